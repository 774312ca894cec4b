//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Options
//!
//! - `--map <NAME>`: vector map to measure (default: current region)
//! - `--maximum <SQM>`: maximum area for comparison
//! - `-t` / `--tolerant`: warn instead of failing when the maximum is exceeded
//! - `--config <PATH>`: configuration file
//! - `--debug`: print every GRASS module call
//! - `--quiet` / `-q`: warnings and errors only
//! - `--completions <SHELL>`: print a completion script
//!
//! GRASS-style `map=<NAME>` and `maximum=<SQM>` arguments are accepted too.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

use crate::core::types::{Maximum, VectorName};
use crate::engine::AreaRequest;

/// Computes the current region extent or the size of a vector map in square
/// meters and compares it with a user defined maximum.
#[derive(Parser, Debug)]
#[command(name = "region-area")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
EXAMPLES:
    # Area of the current computational region
    region-area

    # Area of a vector map, failing if it exceeds 600 km²
    region-area --map fields maximum=600000000

    # Only warn when the maximum is exceeded
    region-area -t --maximum 600000000")]
pub struct Cli {
    /// Input vector map to compute the area, if not set the current region is used
    #[arg(long, value_name = "NAME")]
    pub map: Option<VectorName>,

    /// Maximum area in sqm for comparison
    #[arg(long, value_name = "SQM", allow_hyphen_values = true)]
    pub maximum: Option<Maximum>,

    /// Do not throw error, if region area is greater than the maximum
    #[arg(short = 't', long)]
    pub tolerant: bool,

    /// Read configuration from this file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Only print warnings and errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Print a shell completion script to stdout and exit
    #[arg(long, value_name = "SHELL", value_enum)]
    pub completions: Option<Shell>,
}

impl Cli {
    /// Parse command-line arguments from the process.
    pub fn parse_args() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }

    /// Parse command-line arguments from an iterator, accepting GRASS-style
    /// `key=value` options.
    pub fn try_parse_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize_args(args))
    }

    /// The evaluation requested by these arguments.
    pub fn request(&self) -> AreaRequest {
        AreaRequest {
            map: self.map.clone(),
            maximum: self.maximum,
            tolerant: self.tolerant,
        }
    }
}

/// Options that may be given as GRASS-style `key=value`.
const GRASS_KEYS: &[&str] = &["map", "maximum"];

/// Rewrite `map=x` / `maximum=y` into `--map=x` / `--maximum=y`.
///
/// The first argument (program name) and everything else pass through
/// unchanged.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .enumerate()
        .map(|(i, arg)| {
            if i == 0 {
                return arg;
            }
            match arg.to_str().and_then(|s| s.split_once('=')) {
                Some((key, value)) if GRASS_KEYS.contains(&key) => {
                    OsString::from(format!("--{}={}", key, value))
                }
                _ => arg,
            }
        })
        .collect()
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}
