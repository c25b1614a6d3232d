//! Support conditions

use serde::{Deserialize, Serialize};

use super::NodeRef;

/// A tower support at a node.
///
/// The restraint type is not part of the document; it is chosen by the
/// builder configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Support {
    pub node: NodeRef,
}

impl Support {
    pub fn at(node: u32) -> Self {
        Self { node: node.into() }
    }

    /// Support name used by the target model: the node number as text
    pub fn name(&self) -> String {
        self.node.number.to_string()
    }
}
