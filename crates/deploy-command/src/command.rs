//! Command type for building shell command lines
//!
//! A [`Command`] renders to a single line that an executor can hand to a
//! local shell or a remote transport verbatim. The executor then feeds the
//! exit code and captured output back into the same value.

use crate::error::{Error, Result};
use crate::event::{CommandEvent, CommandEventKind, OutputSource};
use crate::options::CommandOptions;
use crate::status::ExecutionStatus;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;
use tracing::{debug, trace, warn};
use uuid::Uuid;

/// Prefix applied to program invocations so the program is resolved via `PATH`
const ENV_PROGRAM: &str = "/usr/bin/env";

/// What a command runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Program {
    /// A program name followed by its arguments
    Invocation(Vec<String>),
    /// A literal script body, already folded onto one line
    Script(String),
}

/// A shell command to be run on a host
///
/// Unlike the rendered string, this type also carries the execution result.
/// It is deliberately not `Clone`: every command owns a unique uuid.
#[derive(Debug, Serialize)]
pub struct Command {
    /// Identifier used to correlate executor results
    uuid: Uuid,
    /// The invocation or script
    program: Program,
    /// Environment variables, rendered uppercased in insertion order
    env: IndexMap<String, String>,
    /// Working directory
    #[serde(rename = "in")]
    dir: Option<String>,
    /// User to switch to
    user: Option<String>,
    /// Host the transport routes this command to
    host: Option<String>,
    /// Exit code, unset until the executor records it
    exit_status: Option<i32>,
    /// Captured standard output
    stdout: String,
    /// Captured standard error
    stderr: String,
}

impl Command {
    /// Create a command from program tokens
    ///
    /// A single token containing a newline is treated as a script body.
    pub fn new<I, S>(tokens: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_options(tokens, CommandOptions::default())
    }

    /// Create a command from program tokens and options
    pub fn with_options<I, S>(tokens: I, options: CommandOptions) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens: Vec<String> = tokens.into_iter().map(Into::into).collect();
        if tokens.is_empty() {
            return Err(Error::NoContent);
        }

        let program = if tokens.len() == 1 && tokens[0].contains('\n') {
            normalize_script(&tokens[0])
        } else {
            Program::Invocation(tokens)
        };
        Ok(Self::from_parts(program, options))
    }

    /// Create a command from a literal script body
    pub fn script(body: impl AsRef<str>) -> Self {
        Self::script_with_options(body, CommandOptions::default())
    }

    /// Create a command from a literal script body and options
    pub fn script_with_options(body: impl AsRef<str>, options: CommandOptions) -> Self {
        Self::from_parts(normalize_script(body.as_ref()), options)
    }

    /// Create a builder for this command (for chaining)
    pub fn builder() -> CommandBuilder {
        CommandBuilder::default()
    }

    fn from_parts(program: Program, options: CommandOptions) -> Self {
        let CommandOptions {
            env,
            dir,
            user,
            host,
        } = options;

        let command = Self {
            uuid: Uuid::new_v4(),
            program,
            env,
            dir,
            user,
            host,
            exit_status: None,
            stdout: String::new(),
            stderr: String::new(),
        };
        debug!(uuid = %command.uuid, host = ?command.host, "Created command");
        command
    }

    /// Get the invocation or script
    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Returns true if this command runs a literal script body
    pub fn is_script(&self) -> bool {
        matches!(self.program, Program::Script(_))
    }

    /// Get the environment variables
    pub fn env(&self) -> &IndexMap<String, String> {
        &self.env
    }

    /// Get the working directory
    pub fn dir(&self) -> Option<&str> {
        self.dir.as_deref()
    }

    /// Get the user to switch to
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// Get the target host
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Get the unique identifier
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// Render the single-line shell string
    ///
    /// Layers are applied innermost first: the invocation, the environment
    /// subshell, the user switch, then the directory change.
    pub fn render(&self) -> String {
        let mut rendered = match &self.program {
            Program::Invocation(tokens) => format!("{} {}", ENV_PROGRAM, tokens.join(" ")),
            Program::Script(line) => line.clone(),
        };

        if !self.env.is_empty() {
            let assignments: Vec<String> = self
                .env
                .iter()
                .map(|(key, value)| format!("{}={}", key.to_uppercase(), value))
                .collect();
            rendered = format!("( {} {} )", assignments.join(" "), rendered);
        }

        if let Some(user) = &self.user {
            rendered = format!("( sudo su -u {} {} )", user, rendered);
        }

        if let Some(dir) = &self.dir {
            rendered = format!("cd {} && {}", dir, rendered);
        }

        trace!(uuid = %self.uuid, command = %rendered, "Rendered command");
        rendered
    }

    /// Get the exit code, if the command has finished
    pub fn exit_status(&self) -> Option<i32> {
        self.exit_status
    }

    /// Record the exit code
    ///
    /// Each execution records its exit code once. Overwriting is allowed but
    /// logged.
    pub fn set_exit_status(&mut self, code: i32) {
        match self.exit_status.replace(code) {
            Some(previous) => warn!(
                uuid = %self.uuid,
                previous,
                code,
                "Exit status overwritten"
            ),
            None => debug!(uuid = %self.uuid, code, "Command completed"),
        }
    }

    /// Get the execution status
    pub fn status(&self) -> ExecutionStatus {
        ExecutionStatus::from_exit_status(self.exit_status)
    }

    /// Returns true once an exit code has been recorded
    pub fn is_complete(&self) -> bool {
        self.status().is_complete()
    }

    /// Returns true if the command exited with code 0
    pub fn is_successful(&self) -> bool {
        self.status().is_success()
    }

    /// Alias for [`Command::is_successful`]
    pub fn is_success(&self) -> bool {
        self.is_successful()
    }

    /// Returns true if the command exited with a non-zero code
    pub fn is_failure(&self) -> bool {
        self.status().is_failure()
    }

    /// Alias for [`Command::is_failure`]
    pub fn is_failed(&self) -> bool {
        self.is_failure()
    }

    /// Get the captured standard output
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    /// Get the captured standard error
    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    /// Mutable access to the standard output buffer
    pub fn stdout_mut(&mut self) -> &mut String {
        &mut self.stdout
    }

    /// Mutable access to the standard error buffer
    pub fn stderr_mut(&mut self) -> &mut String {
        &mut self.stderr
    }

    /// Append a chunk of standard output
    pub fn append_stdout(&mut self, data: &str) {
        self.stdout.push_str(data);
    }

    /// Append a chunk of standard error
    pub fn append_stderr(&mut self, data: &str) {
        self.stderr.push_str(data);
    }

    /// Apply an executor event to this command
    pub fn apply(&mut self, event: &CommandEvent) -> Result<()> {
        if event.uuid != self.uuid {
            return Err(Error::uuid_mismatch(self.uuid, event.uuid));
        }

        match &event.kind {
            CommandEventKind::Output { source, data } => match source {
                OutputSource::Stdout => self.append_stdout(data),
                OutputSource::Stderr => self.append_stderr(data),
            },
            CommandEventKind::Exited { code } => self.set_exit_status(*code),
        }
        Ok(())
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Fold a multi-line body into one line: trim each line, drop blank ones,
/// join with `"; "`. A body with no non-blank lines folds to `""`.
fn normalize_script(body: &str) -> Program {
    let lines: Vec<&str> = body
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    Program::Script(lines.join("; "))
}

/// Builder wrapper for more ergonomic command construction
#[derive(Debug, Default)]
pub struct CommandBuilder {
    tokens: Vec<String>,
    options: CommandOptions,
}

impl CommandBuilder {
    /// Add a token
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.tokens.push(arg.into());
        self
    }

    /// Add multiple tokens
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tokens.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set an environment variable
    pub fn env(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.options = self.options.with_env(key, value);
        self
    }

    /// Set the working directory
    pub fn current_dir(mut self, dir: impl Into<String>) -> Self {
        self.options = self.options.with_dir(dir);
        self
    }

    /// Set the user to switch to
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.options = self.options.with_user(user);
        self
    }

    /// Set the target host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.options = self.options.with_host(host);
        self
    }

    /// Replace all options at once
    pub fn options(mut self, options: CommandOptions) -> Self {
        self.options = options;
        self
    }

    /// Build the command
    pub fn build(self) -> Result<Command> {
        Command::with_options(self.tokens, self.options)
    }
}
