//! Error types for generation passes

use thiserror::Error;

/// Result type alias for generation operations
pub type GenResult<T> = Result<T, GenError>;

/// Errors that abort a generation pass
///
/// Problems with individual declarations are reported as
/// [`Diagnostic`](crate::Diagnostic)s instead and never surface here.
#[derive(Error, Debug)]
pub enum GenError {
    /// The pass was cancelled before publishing
    #[error("generation cancelled")]
    Cancelled,

    /// Emitted text did not close every block it opened
    #[error("unbalanced blocks in {unit}: depth {depth} at end of unit")]
    UnbalancedBlocks { unit: String, depth: usize },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The build sink rejected a unit
    #[error("sink error: {0}")]
    Sink(String),

    /// I/O error while reading input or writing units
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GenError {
    /// Returns a stable numeric code for the error kind
    pub fn error_code(&self) -> u32 {
        match self {
            GenError::Cancelled => 1,
            GenError::UnbalancedBlocks { .. } => 2,
            GenError::Config(_) => 3,
            GenError::Serialization(_) => 4,
            GenError::Sink(_) => 5,
            GenError::Io(_) => 6,
        }
    }
}

impl From<serde_json::Error> for GenError {
    fn from(err: serde_json::Error) -> Self {
        GenError::Serialization(err.to_string())
    }
}

#[cfg(test)]
#[path = "error/error_tests.rs"]
mod error_tests;
