//! cmdr - a thin, colorized shell command execution wrapper.
//!
//! Takes a command string, splits it into arguments with shell
//! tokenization, runs it as a child process in a given working directory,
//! captures stdout/stderr as text, prints colorized status lines to
//! stderr, and surfaces failures as a structured [`CommandError`].
//!
//! ```no_run
//! use cmdr::Command;
//!
//! let mut command = Command::new("echo hello", None)?;
//! let output = command.execute()?;
//! assert_eq!(output, "hello");
//! # Ok::<(), cmdr::CommandError>(())
//! ```

pub mod command;
pub mod delay;
pub mod error;
pub mod term;

pub use command::{Command, DEFAULT_SETTLE, MISSING_EXIT_CODE, run, run_line};
pub use error::{CommandError, ErrorKind};
pub use term::{ColorMode, Term};
