//! cmdr - a colorized shell command execution wrapper.
//!
//! Usage:
//!   cmdr <command> [args...]       Run a command in the current directory
//!   cmdr -d <dir> <command>...     Run a command in a specific directory
//!
//! Every argument is shell-quoted and rejoined into a single command line,
//! so arguments containing spaces or quotes survive re-tokenization
//! intact. Captured output goes to stdout; status lines go to stderr.
//! Exits 0 on success, 1 on any failure.

mod cli_config;

use clap::Parser;
use cli_config::Config;
use cmdr::{ColorMode, Command, Term, run};
use std::path::PathBuf;
use tracing::{debug, error};

/// cmdr - run a shell command with captured output and colorized status
#[derive(Parser)]
#[command(name = "cmdr")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (overrides XDG default)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Working directory for the command (overrides config file)
    #[arg(short = 'd', long, value_name = "DIR")]
    cwd: Option<PathBuf>,

    /// Disable colorized status output
    #[arg(long)]
    no_color: bool,

    /// Command to execute, given as one or more arguments
    #[arg(
        value_name = "COMMAND",
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    command: Vec<String>,
}

fn main() {
    // Logging goes to stderr; stdout is reserved for captured output.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match Config::load(cli.config) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let line = shell_words::join(&cli.command);
    debug!(command = %line, "joined command line");

    let cwd = cli.cwd.or(config.runner.working_dir);
    let color = if cli.no_color {
        ColorMode::Never
    } else {
        config.output.color
    };

    let mut command = match Command::new(line, cwd.as_deref()) {
        Ok(command) => command
            .with_settle(config.runner.settle)
            .with_term(Term::new(color)),
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    match run(&mut command) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{output}");
            }
        }
        // run() already reported the failure on the status stream.
        Err(_) => std::process::exit(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn command_arguments_are_required() {
        assert!(Cli::try_parse_from(["cmdr"]).is_err());
    }

    #[test]
    fn trailing_arguments_keep_their_flags() {
        let cli = Cli::try_parse_from(["cmdr", "ls", "-la", "/tmp"]).unwrap();
        assert_eq!(cli.command, ["ls", "-la", "/tmp"]);
        assert!(cli.cwd.is_none());
    }

    #[test]
    fn own_flags_parse_before_the_command() {
        let cli = Cli::try_parse_from(["cmdr", "-d", "/srv", "--no-color", "make", "-j4"]).unwrap();
        assert_eq!(cli.cwd, Some(PathBuf::from("/srv")));
        assert!(cli.no_color);
        assert_eq!(cli.command, ["make", "-j4"]);
    }
}
