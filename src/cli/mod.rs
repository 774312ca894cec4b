//! cli
//!
//! Command-line interface layer.
//!
//! # Responsibilities
//!
//! - Parse and validate arguments before any backend call
//! - Load configuration and set up the GRASS backend
//! - Run the evaluation and map its outcome to messages and an exit status
//!
//! # Exit Status
//!
//! | outcome                         | status |
//! |---------------------------------|--------|
//! | informational / warning         | 0      |
//! | fatal outcome or pipeline error | 1      |
//! | invalid arguments (clap)        | 2      |

pub mod args;
mod completion;

pub use args::{Cli, Shell};
pub use completion::completion;

use std::process::ExitCode;

use anyhow::{Context as _, Result};

use crate::backend::{Backend, GrassBackend};
use crate::core::config::Config;
use crate::core::outcome::Severity;
use crate::engine::{self, Context};
use crate::ui::output;

/// Exit status for a successful run.
pub const EXIT_SUCCESS: u8 = 0;

/// Exit status for fatal outcomes and errors.
pub const EXIT_FAILURE: u8 = 1;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> ExitCode {
    let cli = Cli::parse_args();

    match execute(&cli) {
        Ok(status) => ExitCode::from(status),
        Err(e) => {
            output::fatal(format!("{:#}", e));
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

/// Execute parsed arguments, returning the exit status.
fn execute(cli: &Cli) -> Result<u8> {
    if let Some(shell) = cli.completions {
        completion(shell)?;
        return Ok(EXIT_SUCCESS);
    }

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let ctx = Context::from_config(&config, cli.debug, cli.quiet)
        .context("Invalid configuration")?;
    let verbosity = ctx.verbosity();

    if let Some(path) = config.loaded_from() {
        output::debug(format!("loaded config from {}", path.display()), verbosity);
    }

    let backend = GrassBackend::from_env(config.exec_prefix().map(<[String]>::to_vec), verbosity)?;

    evaluate_and_report(&backend, cli, &ctx)
}

/// Run the evaluation against a backend and return the exit status.
///
/// The evaluator prints the area and comparison messages itself, before the
/// scratch map is cleaned up.
pub fn evaluate_and_report(backend: &dyn Backend, cli: &Cli, ctx: &Context) -> Result<u8> {
    let outcome = engine::evaluate(backend, &cli.request(), ctx)?;
    Ok(exit_status(outcome.severity))
}

/// Map a severity to a process exit status.
pub fn exit_status(severity: Severity) -> u8 {
    match severity {
        Severity::Informational | Severity::Warning => EXIT_SUCCESS,
        Severity::Fatal => EXIT_FAILURE,
    }
}
