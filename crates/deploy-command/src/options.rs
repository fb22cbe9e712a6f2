//! Options applied when a command is constructed
//!
//! These correspond to the `env`, `in`, `user` and `host` keys a caller can
//! pass alongside the program tokens. They can also be read from a YAML
//! document:
//!
//! ```
//! use deploy_command::CommandOptions;
//!
//! let options = CommandOptions::from_yaml_str(
//!     "env:\n  rails_env: production\nin: /opt/sites\nuser: deploy\n",
//! )
//! .unwrap();
//! assert_eq!(options.dir.as_deref(), Some("/opt/sites"));
//! ```

use crate::error::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Optional settings for a [`Command`](crate::Command)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandOptions {
    /// Environment variables, rendered uppercased in insertion order
    pub env: IndexMap<String, String>,
    /// Directory to change into before running
    #[serde(rename = "in", skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
    /// User to switch to via sudo
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Host the command is routed to by the transport layer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
}

impl CommandOptions {
    /// Create an empty set of options
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from a YAML document
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let options: CommandOptions = serde_yaml::from_str(content)?;
        Ok(options)
    }

    /// Add an environment variable
    pub fn with_env(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.env.insert(key.into(), value.to_string());
        self
    }

    /// Set the working directory
    pub fn with_dir(mut self, dir: impl Into<String>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    /// Set the user to switch to
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Set the target host
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }
}
