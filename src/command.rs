//! Command specs and synchronous execution.
//!
//! A [`Command`] holds one tokenized shell command plus its execution
//! context. Executing it spawns a single child process with captured
//! output, blocks until it finishes, classifies the outcome, and records
//! the result into the spec before returning. The model is deliberately
//! synchronous: the caller blocks for the child's full lifetime plus a
//! fixed settle delay, and there is no cancellation or timeout.

use std::path::{Path, PathBuf};
use std::process::Command as StdCommand;
use std::thread;
use std::time::Duration;

use tracing::debug;

use crate::error::CommandError;
use crate::term::Term;

/// Exit code recorded when a finished child reports no exit code of its
/// own, so the success check has nothing to agree with.
pub const MISSING_EXIT_CODE: i32 = 69;

/// Default pacing pause imposed after every execution attempt.
pub const DEFAULT_SETTLE: Duration = Duration::from_secs(1);

/// One shell command plus its execution context.
///
/// Construction tokenizes the text with shell word-splitting semantics;
/// the first token is the program name. A spec is meant for
/// single-threaded use: run it, inspect the recorded outcome, optionally
/// [`reconfigure`](Command::reconfigure) it and run again.
#[derive(Debug, Clone)]
pub struct Command {
    raw: String,
    text: String,
    cwd: PathBuf,
    args: Vec<String>,
    program: String,
    error_code: i32,
    last_error: Option<CommandError>,
    settle: Duration,
    term: Term,
}

impl Command {
    /// Build a spec from raw command text.
    ///
    /// The text is trimmed and split with shell tokenization (quoting and
    /// escapes are honored, quotes are stripped). `cwd` is resolved to an
    /// absolute path; `None` means the process current directory.
    pub fn new(text: impl Into<String>, cwd: Option<&Path>) -> Result<Self, CommandError> {
        let raw = text.into();
        let trimmed = raw.trim().to_string();
        let args = tokenize(&trimmed)?;
        let program = args[0].clone();
        let cwd = resolve_cwd(&trimmed, cwd)?;
        Ok(Self {
            raw,
            text: trimmed,
            cwd,
            args,
            program,
            error_code: 0,
            last_error: None,
            settle: DEFAULT_SETTLE,
            term: Term::default(),
        })
    }

    /// Replace the settle delay (tests use [`Duration::ZERO`]).
    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    /// Replace the status printer.
    pub fn with_term(mut self, term: Term) -> Self {
        self.term = term;
        self
    }

    /// The raw command text as given.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The trimmed command text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The program name (first token).
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The tokenized argument list, program included. Never empty.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The working directory the command runs in.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// The error code recorded by the last execution (0 means success or
    /// not yet run).
    pub fn error_code(&self) -> i32 {
        self.error_code
    }

    /// The error recorded by the last execution, if any.
    pub fn last_error(&self) -> Option<&CommandError> {
        self.last_error.as_ref()
    }

    /// The status printer used for this spec.
    pub fn term(&self) -> &Term {
        &self.term
    }

    /// Replace the command text, re-tokenize, and reset the error state.
    ///
    /// On invalid input the spec keeps its previous text and tokens.
    pub fn reconfigure(&mut self, text: impl Into<String>) -> Result<(), CommandError> {
        let raw = text.into();
        let trimmed = raw.trim().to_string();
        let args = tokenize(&trimmed)?;
        self.program = args[0].clone();
        self.args = args;
        self.raw = raw;
        self.text = trimmed;
        self.error_code = 0;
        self.last_error = None;
        Ok(())
    }

    /// Run the command and return its trimmed stdout.
    pub fn execute(&mut self) -> Result<String, CommandError> {
        self.execute_with(&[], &[])
    }

    /// Run the command with extra arguments appended after the base
    /// tokens: positional extras first, then keyword extras rendered as
    /// `key=value` tokens.
    pub fn execute_with(
        &mut self,
        extra: &[&str],
        kwargs: &[(&str, &str)],
    ) -> Result<String, CommandError> {
        let mut argv = self.args.clone();
        argv.extend(extra.iter().map(|arg| arg.to_string()));
        argv.extend(kwargs.iter().map(|(key, value)| format!("{key}={value}")));

        let outcome = self.attempt(&argv);

        // Pacing pause: let side effects of the child settle before the
        // caller proceeds. Not a retry.
        thread::sleep(self.settle);

        if let Err(err) = &outcome {
            self.error_code = err.code().unwrap_or(1);
            self.last_error = Some(err.clone());
            self.term.failure(&format!("Command failed: {err}"));
        }
        outcome
    }

    fn attempt(&self, argv: &[String]) -> Result<String, CommandError> {
        debug!(command = %self.text, cwd = %self.cwd.display(), "spawning child process");

        let output = match StdCommand::new(&argv[0])
            .args(&argv[1..])
            .current_dir(&self.cwd)
            .output()
        {
            Ok(output) => output,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(CommandError::launch(&self.text, &argv[0], &err));
            }
            Err(err) => return Err(CommandError::internal(&self.text, &err)),
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = stderr.trim();

        match output.status.code() {
            Some(0) => {
                if !stderr.is_empty() {
                    self.term.warn(&format!("Command stderr: {stderr}"));
                }
                self.term.success(&format!("Command succeeded: {}", self.text));
                debug!(command = %self.text, "child exited cleanly");
                Ok(stdout.trim().to_string())
            }
            Some(code) => Err(CommandError::exit(&self.text, code, stderr)),
            // The child finished without reporting an exit code for the
            // success check to agree with; recorded under the reserved
            // sentinel.
            None => Err(CommandError::exit(&self.text, MISSING_EXIT_CODE, stderr)),
        }
    }
}

/// Execute a spec, print the classified outcome, and pass the result on.
///
/// Output is reported as a green status line, or a blue notice when the
/// command succeeded without producing any. Failures are reported in red
/// (with an extra hint when the code is 1) and returned to the caller.
pub fn run(command: &mut Command) -> Result<String, CommandError> {
    match command.execute() {
        Ok(output) => {
            if output.is_empty() {
                command
                    .term()
                    .notice("Command executed successfully with no output.");
            } else {
                command.term().success(&format!("Command output: {output}"));
            }
            Ok(output)
        }
        Err(err) => {
            command.term().failure(&format!("Command error: {err}"));
            if err.code() == Some(1) {
                command
                    .term()
                    .warn("Command failed. Please check the command and try again.");
            }
            Err(err)
        }
    }
}

/// Build a spec from raw text and execute it in `cwd`.
pub fn run_line(line: &str, cwd: Option<&Path>) -> Result<String, CommandError> {
    let mut command = Command::new(line, cwd)?;
    run(&mut command)
}

fn tokenize(text: &str) -> Result<Vec<String>, CommandError> {
    let args = shell_words::split(text)
        .map_err(|err| CommandError::invalid_command(text, err.to_string()))?;
    if args.is_empty() {
        return Err(CommandError::invalid_command(text, "command is empty"));
    }
    Ok(args)
}

fn resolve_cwd(command: &str, cwd: Option<&Path>) -> Result<PathBuf, CommandError> {
    match cwd {
        Some(dir) if dir.is_absolute() => Ok(dir.to_path_buf()),
        Some(dir) => {
            let base = std::env::current_dir()
                .map_err(|err| CommandError::internal(command, &err))?;
            Ok(base.join(dir))
        }
        None => std::env::current_dir().map_err(|err| CommandError::internal(command, &err)),
    }
}
