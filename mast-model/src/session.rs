//! Sessions receiving model construction commands

use std::collections::BTreeMap;

use crate::commands::{CommandKind, ModelCommand};
use crate::error::BuildResult;

/// A stateful model session accepting commands in order.
///
/// Implementations may reject a command; the builder aborts on the first
/// rejection and leaves earlier commands applied.
pub trait ModelSession {
    fn submit(&mut self, command: ModelCommand) -> BuildResult<()>;
}

impl ModelSession for Vec<ModelCommand> {
    fn submit(&mut self, command: ModelCommand) -> BuildResult<()> {
        self.push(command);
        Ok(())
    }
}

/// Session that records every command, used for dry runs and build plans
#[derive(Debug, Clone, Default)]
pub struct RecordingSession {
    commands: Vec<ModelCommand>,
}

impl RecordingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[ModelCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<ModelCommand> {
        self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of recorded commands of one kind
    pub fn count(&self, kind: CommandKind) -> usize {
        self.commands.iter().filter(|c| c.kind() == kind).count()
    }

    /// Recorded commands of one kind, in order
    pub fn of_kind(&self, kind: CommandKind) -> impl Iterator<Item = &ModelCommand> {
        self.commands.iter().filter(move |c| c.kind() == kind)
    }

    /// Histogram of recorded command kinds
    pub fn counts(&self) -> BTreeMap<CommandKind, usize> {
        let mut counts = BTreeMap::new();
        for command in &self.commands {
            *counts.entry(command.kind()).or_insert(0) += 1;
        }
        counts
    }
}

impl ModelSession for RecordingSession {
    fn submit(&mut self, command: ModelCommand) -> BuildResult<()> {
        log::trace!("Recording {:?}", command);
        self.commands.push(command);
        Ok(())
    }
}
