//! Execution status of a command

use serde::{Deserialize, Serialize};

/// Where a command is in its execution lifecycle
///
/// A command starts `Pending` and moves to `Successful` or `Failed` once the
/// executor records an exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    /// No exit code has been recorded yet
    Pending,
    /// The command exited with code 0
    Successful,
    /// The command exited with a non-zero code
    Failed {
        /// The exit code
        code: i32,
    },
}

impl ExecutionStatus {
    /// Derive the status from an optional exit code
    pub fn from_exit_status(exit_status: Option<i32>) -> Self {
        match exit_status {
            None => Self::Pending,
            Some(0) => Self::Successful,
            Some(code) => Self::Failed { code },
        }
    }

    /// Returns true once an exit code has been recorded
    pub fn is_complete(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Returns true if the command exited with code 0
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Successful)
    }

    /// Returns true if the command exited with a non-zero code
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}
