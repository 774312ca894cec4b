//! ui::output
//!
//! Diagnostic output.
//!
//! # Design
//!
//! Everything is written to stderr, in the style of GRASS modules: plain
//! lines for messages, `WARNING:` and `ERROR:` prefixes otherwise. Messages
//! respect the quiet flag; warnings and errors are always shown.

use std::fmt::Display;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - warnings and errors only
    Quiet,
    /// Normal mode - progress and result messages
    Normal,
    /// Debug mode - also every backend command
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a message (respects quiet mode).
pub fn message(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("{}", message);
    }
}

/// Print a debug message (only in debug mode).
pub fn debug(message: impl Display, verbosity: Verbosity) {
    if verbosity == Verbosity::Debug {
        eprintln!("[debug] {}", message);
    }
}

/// Print a warning (always shown).
pub fn warning(message: impl Display) {
    eprintln!("{}", format_warning(message));
}

/// Print an error (always shown).
pub fn fatal(message: impl Display) {
    eprintln!("{}", format_fatal(message));
}

/// Format a warning line.
pub fn format_warning(message: impl Display) -> String {
    format!("WARNING: {}", message)
}

/// Format an error line.
pub fn format_fatal(message: impl Display) -> String {
    format!("ERROR: {}", message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_quiet_wins() {
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Debug);
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
    }

    #[test]
    fn prefixes() {
        assert_eq!(format_warning("too big"), "WARNING: too big");
        assert_eq!(format_fatal("too big"), "ERROR: too big");
    }
}
