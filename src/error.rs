//! Structured command errors.
//!
//! Every failure, whether raised while building a spec or while executing
//! it, is surfaced as a [`CommandError`]: a kind, the originating command
//! text, a numeric code, a rendered message, and ordered key/value context
//! captured at the failure site. Errors are constructed once and never
//! mutated afterwards.

use std::io;
use thiserror::Error;

/// Classification of a command failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The construction input could not be tokenized into a command.
    InvalidCommand,
    /// The child process could not be launched (executable missing).
    Launch,
    /// The process ran and exited non-zero, or an internal error occurred.
    Execution,
}

/// Error raised when building or executing a command.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct CommandError {
    kind: ErrorKind,
    command: String,
    code: Option<i32>,
    message: String,
    context: Vec<(String, String)>,
}

impl CommandError {
    /// Malformed construction or reconfiguration input.
    pub(crate) fn invalid_command(command: &str, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        Self {
            kind: ErrorKind::InvalidCommand,
            command: command.to_string(),
            code: None,
            message: format!("invalid command {command:?}: {reason}"),
            context: Vec::new(),
        }
    }

    /// The executable could not be found.
    pub(crate) fn launch(command: &str, program: &str, cause: &io::Error) -> Self {
        Self::build(
            ErrorKind::Launch,
            command,
            cause.raw_os_error(),
            Some(format!("no such executable '{program}'")),
            vec![
                ("program".to_string(), program.to_string()),
                ("cause".to_string(), cause.to_string()),
            ],
        )
    }

    /// The process ran and exited with a failing code.
    pub(crate) fn exit(command: &str, code: i32, stderr: &str) -> Self {
        let mut context = Vec::new();
        if !stderr.is_empty() {
            context.push(("stderr".to_string(), stderr.to_string()));
        }
        Self::build(ErrorKind::Execution, command, Some(code), None, context)
    }

    /// An unexpected error occurred while launching or waiting.
    pub(crate) fn internal(command: &str, cause: &io::Error) -> Self {
        Self::build(
            ErrorKind::Execution,
            command,
            Some(1),
            None,
            vec![("cause".to_string(), cause.to_string())],
        )
    }

    fn build(
        kind: ErrorKind,
        command: &str,
        code: Option<i32>,
        detail: Option<String>,
        context: Vec<(String, String)>,
    ) -> Self {
        let mut message = match code {
            Some(code) => format!("command '{command}' failed with error: {code}"),
            None => format!("command '{command}' failed"),
        };
        if let Some(detail) = detail {
            message.push(' ');
            message.push_str(&detail);
        }
        if !context.is_empty() {
            let pairs: Vec<String> = context.iter().map(|(k, v)| format!("{k}={v}")).collect();
            message.push_str("\n  ");
            message.push_str(&pairs.join(" "));
        }
        Self {
            kind,
            command: command.to_string(),
            code,
            message,
            context,
        }
    }

    /// The failure classification.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The originating command text.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// The numeric error code, if one was established.
    pub fn code(&self) -> Option<i32> {
        self.code
    }

    /// The rendered message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Contextual key/value pairs captured at the failure site.
    pub fn context(&self) -> &[(String, String)] {
        &self.context
    }

    /// Look up a single context value by key.
    pub fn context_value(&self, key: &str) -> Option<&str> {
        self.context
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_command_has_no_code() {
        let err = CommandError::invalid_command("", "command is empty");
        assert_eq!(err.kind(), ErrorKind::InvalidCommand);
        assert_eq!(err.code(), None);
        assert!(err.message().contains("command is empty"));
    }

    #[test]
    fn launch_carries_program_and_os_code() {
        let cause = io::Error::from_raw_os_error(2);
        let err = CommandError::launch("nope --version", "nope", &cause);
        assert_eq!(err.kind(), ErrorKind::Launch);
        assert_eq!(err.code(), Some(2));
        assert_eq!(err.command(), "nope --version");
        assert_eq!(err.context_value("program"), Some("nope"));
        assert!(err.message().contains("no such executable 'nope'"));
    }

    #[test]
    fn exit_carries_code_and_stderr() {
        let err = CommandError::exit("sh -c 'exit 3'", 3, "boom");
        assert_eq!(err.kind(), ErrorKind::Execution);
        assert_eq!(err.code(), Some(3));
        assert_eq!(err.context_value("stderr"), Some("boom"));
        assert!(err.message().contains("failed with error: 3"));
    }

    #[test]
    fn exit_with_empty_stderr_has_no_context() {
        let err = CommandError::exit("false", 1, "");
        assert!(err.context().is_empty());
    }

    #[test]
    fn internal_defaults_to_code_one() {
        let cause = io::Error::other("pipe burst");
        let err = CommandError::internal("cat file", &cause);
        assert_eq!(err.kind(), ErrorKind::Execution);
        assert_eq!(err.code(), Some(1));
        assert_eq!(err.context_value("cause"), Some("pipe burst"));
    }
}
