//! Colorized status output.
//!
//! Status lines are printed to the status stream (stderr), so stdout
//! carries nothing but captured child output. Severity maps to color:
//! green for success, blue for neutral notices, yellow for non-fatal
//! diagnostics, red for failures.

use crossterm::style::{Color, Stylize};
use crossterm::tty::IsTty;
use serde::Deserialize;

/// When to colorize status output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Colorize only when the status stream is a terminal.
    #[default]
    Auto,
    /// Always emit color codes.
    Always,
    /// Never emit color codes.
    Never,
}

/// Printer for colorized status lines.
#[derive(Debug, Clone, Copy)]
pub struct Term {
    enabled: bool,
}

impl Term {
    pub fn new(mode: ColorMode) -> Self {
        let enabled = match mode {
            ColorMode::Auto => std::io::stderr().is_tty(),
            ColorMode::Always => true,
            ColorMode::Never => false,
        };
        Self { enabled }
    }

    /// Whether status lines are being colorized.
    pub fn colored(&self) -> bool {
        self.enabled
    }

    /// Green: a command succeeded or produced output.
    pub fn success(&self, message: &str) {
        self.emit(message, Color::Green);
    }

    /// Blue: a neutral success notice.
    pub fn notice(&self, message: &str) {
        self.emit(message, Color::Blue);
    }

    /// Yellow: a non-fatal diagnostic.
    pub fn warn(&self, message: &str) {
        self.emit(message, Color::Yellow);
    }

    /// Red: a failure.
    pub fn failure(&self, message: &str) {
        self.emit(message, Color::Red);
    }

    fn emit(&self, message: &str, color: Color) {
        if self.enabled {
            eprintln!("{}", message.with(color).bold());
        } else {
            eprintln!("{message}");
        }
    }
}

impl Default for Term {
    fn default() -> Self {
        Self::new(ColorMode::Auto)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_mode_toggles_styling() {
        assert!(Term::new(ColorMode::Always).colored());
        assert!(!Term::new(ColorMode::Never).colored());
    }

    #[test]
    fn color_mode_deserializes_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            color: ColorMode,
        }

        let parsed: Wrapper = toml::from_str(r#"color = "never""#).unwrap();
        assert_eq!(parsed.color, ColorMode::Never);

        let parsed: Wrapper = toml::from_str(r#"color = "always""#).unwrap();
        assert_eq!(parsed.color, ColorMode::Always);
    }

    #[test]
    fn plain_printer_does_not_panic() {
        let term = Term::new(ColorMode::Never);
        term.success("ok");
        term.notice("fyi");
        term.warn("careful");
        term.failure("broken");
    }
}
