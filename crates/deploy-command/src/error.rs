//! Error types for deploy commands

use thiserror::Error;
use uuid::Uuid;

/// Unified error type for building and updating commands
#[derive(Error, Debug)]
pub enum Error {
    /// A command was built without any program tokens or script body
    #[error("a command needs at least one program token or a script body")]
    NoContent,

    /// An options document could not be parsed
    #[error("invalid command options: {0}")]
    InvalidOptions(#[from] serde_yaml::Error),

    /// An executor event was applied to a command it does not belong to
    #[error("event for command {actual} applied to command {expected}")]
    UuidMismatch {
        /// The uuid of the command the event was applied to
        expected: Uuid,
        /// The uuid carried by the event
        actual: Uuid,
    },
}

impl Error {
    /// Create a uuid mismatch error
    pub fn uuid_mismatch(expected: Uuid, actual: Uuid) -> Self {
        Self::UuidMismatch { expected, actual }
    }

    /// Returns true if this is the empty-construction error
    pub fn is_no_content(&self) -> bool {
        matches!(self, Self::NoContent)
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
