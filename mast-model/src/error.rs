//! Error types for the mast model builder

use thiserror::Error;

/// Main error type for document loading and model building
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Node {0} not found in document")]
    NodeNotFound(u32),

    #[error("Section '{0}' not found in section registry")]
    SectionNotFound(String),

    #[error("Duplicate {kind} number {number}")]
    DuplicateNumber { kind: &'static str, number: u32 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Session rejected command: {0}")]
    Session(String),

    #[error("Result for load case '{0}' not found")]
    LoadCaseNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for model building operations
pub type BuildResult<T> = Result<T, BuildError>;
