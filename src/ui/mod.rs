//! ui
//!
//! User-facing output.
//!
//! # Modules
//!
//! - [`output`] - Diagnostic messages on stderr
//!
//! # Design
//!
//! All output goes through this module so verbosity is handled in one
//! place. Nothing is written to stdout except shell completion scripts.

pub mod output;
