//! Error types for mentor record resolution

use std::time::Duration;
use thiserror::Error;

/// Result type for resolution operations
pub type Result<T> = std::result::Result<T, MentorError>;

/// Failure kinds surfaced by the engine.
///
/// A lookup that finds nothing is not an error; it is `Ok(None)`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MentorError {
    /// The query executor itself failed (network, authorization, bad request)
    #[error("Transport error: {0}")]
    Transport(String),

    /// A payload arrived but could not be read as JSON rows
    #[error("Decode error: {0}")]
    Decode(String),

    /// The resolution deadline elapsed before the chain finished
    #[error("Resolution timed out after {0:?}")]
    Timeout(Duration),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl MentorError {
    /// Whether the error came from the executor rather than from decoding
    pub fn is_transport(&self) -> bool {
        matches!(self, MentorError::Transport(_) | MentorError::Timeout(_))
    }
}

impl From<serde_json::Error> for MentorError {
    fn from(err: serde_json::Error) -> Self {
        MentorError::Decode(err.to_string())
    }
}

#[cfg(feature = "rest")]
impl From<reqwest::Error> for MentorError {
    fn from(err: reqwest::Error) -> Self {
        MentorError::Transport(err.to_string())
    }
}
