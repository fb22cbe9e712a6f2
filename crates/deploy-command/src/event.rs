//! Events an executor feeds back into a command

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A result event for a single command, correlated by its uuid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandEvent {
    /// The command this event belongs to
    pub uuid: Uuid,
    /// When the event occurred
    pub timestamp: DateTime<Utc>,
    /// The type of event
    pub kind: CommandEventKind,
}

impl CommandEvent {
    /// Create a new event for the given command
    pub fn new(uuid: Uuid, kind: CommandEventKind) -> Self {
        Self {
            uuid,
            timestamp: Utc::now(),
            kind,
        }
    }

    /// Create an output event
    pub fn output(uuid: Uuid, source: OutputSource, data: impl Into<String>) -> Self {
        Self::new(
            uuid,
            CommandEventKind::Output {
                source,
                data: data.into(),
            },
        )
    }

    /// Create an exit event
    pub fn exited(uuid: Uuid, code: i32) -> Self {
        Self::new(uuid, CommandEventKind::Exited { code })
    }
}

/// Types of command events
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CommandEventKind {
    /// A chunk of output arrived
    Output {
        /// Which stream produced it
        source: OutputSource,
        /// The raw chunk, appended as-is
        data: String,
    },
    /// The process terminated
    Exited {
        /// The exit code
        code: i32,
    },
}

/// Source of an output chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputSource {
    /// Standard output
    Stdout,
    /// Standard error
    Stderr,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_event() {
        let uuid = Uuid::new_v4();
        let event = CommandEvent::output(uuid, OutputSource::Stderr, "oops\n");

        assert_eq!(event.uuid, uuid);
        assert_eq!(
            event.kind,
            CommandEventKind::Output {
                source: OutputSource::Stderr,
                data: "oops\n".to_string(),
            }
        );
    }

    #[test]
    fn test_event_json_shape() {
        let event = CommandEvent::exited(Uuid::new_v4(), 3);
        let value = serde_json::to_value(&event).unwrap();

        assert_eq!(value["kind"]["type"], "exited");
        assert_eq!(value["kind"]["code"], 3);
    }
}
