//! Shell command values for deploy steps
//!
//! This crate builds the single-line shell string for a command that is run
//! on a host, optionally wrapped with environment variables, a working
//! directory and a user switch. The same value then collects the exit code
//! and output that an external executor reports back.
//!
//! Spawning processes and talking SSH are left to the executor.
//!
//! ```
//! use deploy_command::{Command, CommandOptions};
//!
//! let options = CommandOptions::new()
//!     .with_dir("/opt/sites")
//!     .with_env("a", "b");
//! let mut cmd = Command::with_options(["ls", "-l"], options).unwrap();
//! assert_eq!(cmd.to_string(), "cd /opt/sites && ( A=b /usr/bin/env ls -l )");
//!
//! cmd.append_stdout("total 0\n");
//! cmd.set_exit_status(0);
//! assert!(cmd.is_successful());
//! ```

#![warn(missing_docs)]

pub mod command;
pub mod error;
pub mod event;
pub mod options;
pub mod status;

pub use command::{Command, CommandBuilder, Program};
pub use error::{Error, Result};
pub use event::{CommandEvent, CommandEventKind, OutputSource};
pub use options::CommandOptions;
pub use status::ExecutionStatus;
