//! backend::grass
//!
//! GRASS GIS implementation of [`Backend`], running GRASS modules as child
//! processes.
//!
//! # Sessions
//!
//! GRASS modules only work inside a GRASS session, which is signalled by the
//! `GISRC` environment variable. Outside a session, an exec prefix such as
//! `["grass", "/data/nc_spm/PERMANENT", "--exec"]` can be configured and is
//! placed in front of every module invocation.
//!
//! # Error Handling
//!
//! - Failing to start a module maps to [`BackendError::Spawn`]
//! - A non-zero exit status maps to [`BackendError::CommandFailed`], carrying
//!   the module's trimmed stderr

use std::ffi::OsString;
use std::process::{Command, Output};

use super::traits::{AreaUnits, Backend, BackendError, ColumnSpec};
use crate::core::types::{ColumnName, VectorName};
use crate::ui::output::{self, Verbosity};

/// Backend that drives GRASS modules on the command line.
#[derive(Debug, Clone)]
pub struct GrassBackend {
    exec_prefix: Vec<String>,
    verbosity: Verbosity,
}

impl GrassBackend {
    /// Create a backend with an explicit exec prefix (may be empty).
    ///
    /// No session check is performed.
    pub fn new(exec_prefix: Vec<String>, verbosity: Verbosity) -> Self {
        Self {
            exec_prefix,
            verbosity,
        }
    }

    /// Create a backend for the current environment.
    ///
    /// Without an exec prefix, `GISRC` must be set.
    pub fn from_env(
        exec_prefix: Option<Vec<String>>,
        verbosity: Verbosity,
    ) -> Result<Self, BackendError> {
        Self::detect(exec_prefix, std::env::var_os("GISRC"), verbosity)
    }

    fn detect(
        exec_prefix: Option<Vec<String>>,
        gisrc: Option<OsString>,
        verbosity: Verbosity,
    ) -> Result<Self, BackendError> {
        match exec_prefix {
            Some(prefix) if !prefix.is_empty() => Ok(Self::new(prefix, verbosity)),
            _ => match gisrc {
                Some(value) if !value.is_empty() => Ok(Self::new(Vec::new(), verbosity)),
                _ => Err(BackendError::NoSession),
            },
        }
    }

    /// The configured exec prefix.
    pub fn exec_prefix(&self) -> &[String] {
        &self.exec_prefix
    }

    /// Build the command line for a module call.
    fn command(&self, module: &str, args: &[String]) -> Command {
        let mut cmd = match self.exec_prefix.split_first() {
            Some((program, rest)) => {
                let mut cmd = Command::new(program);
                cmd.args(rest).arg(module);
                cmd
            }
            None => Command::new(module),
        };
        cmd.args(args);
        cmd
    }

    /// Render a module call for debug output.
    fn describe(&self, module: &str, args: &[String]) -> String {
        self.exec_prefix
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(module))
            .chain(args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run a module and return its raw output, whatever the exit status.
    fn run_unchecked(&self, module: &str, args: &[String]) -> Result<Output, BackendError> {
        output::debug(
            format!("running {}", self.describe(module, args)),
            self.verbosity,
        );

        self.command(module, args)
            .output()
            .map_err(|e| BackendError::Spawn {
                module: module.to_string(),
                message: e.to_string(),
            })
    }

    /// Run a module and return its stdout, failing on a non-zero exit status.
    fn run(&self, module: &str, args: &[String]) -> Result<String, BackendError> {
        let out = self.run_unchecked(module, args)?;

        if !out.status.success() {
            return Err(BackendError::CommandFailed {
                module: module.to_string(),
                status: out.status.to_string(),
                stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&out.stdout).into_owned())
    }
}

/// Shorthand for building `key=value` module arguments.
fn kv(key: &str, value: impl std::fmt::Display) -> String {
    format!("{}={}", key, value)
}

/// One entry per line of module output, blank lines included.
///
/// `v.db.select -c` prints NULL values as empty lines, so dropping them
/// would shift every following row up.
fn output_rows(stdout: &str) -> Vec<String> {
    stdout.lines().map(str::to_string).collect()
}

impl Backend for GrassBackend {
    fn copy_vector(&self, src: &VectorName, dst: &VectorName) -> Result<(), BackendError> {
        self.run(
            "g.copy",
            &[kv("vector", format!("{},{}", src, dst)), "--quiet".into()],
        )
        .map(|_| ())
    }

    fn region_to_vector(&self, dst: &VectorName) -> Result<(), BackendError> {
        self.run("v.in.region", &[kv("output", dst), "--quiet".into()])
            .map(|_| ())
    }

    fn has_attribute_table(&self, map: &VectorName) -> Result<bool, BackendError> {
        // v.db.connect -g complains on stderr for maps without a connection;
        // only the listing on stdout matters.
        let out = self.run_unchecked("v.db.connect", &["-g".into(), kv("map", map)])?;
        let stdout = String::from_utf8_lossy(&out.stdout);
        Ok(output_rows(&stdout).iter().any(|row| !row.trim().is_empty()))
    }

    fn add_attribute_table(&self, map: &VectorName) -> Result<(), BackendError> {
        self.run("v.db.addtable", &[kv("map", map), "--quiet".into()])
            .map(|_| ())
    }

    fn add_column(&self, map: &VectorName, column: &ColumnSpec) -> Result<(), BackendError> {
        self.run(
            "v.db.addcolumn",
            &[
                kv("map", map),
                kv("columns", column),
                "--quiet".into(),
                "--overwrite".into(),
            ],
        )
        .map(|_| ())
    }

    fn compute_area_into_column(
        &self,
        map: &VectorName,
        column: &ColumnName,
        units: AreaUnits,
    ) -> Result<(), BackendError> {
        self.run(
            "v.to.db",
            &[
                kv("map", map),
                kv("option", "area"),
                kv("columns", column),
                kv("units", units),
                "--quiet".into(),
                "--overwrite".into(),
            ],
        )
        .map(|_| ())
    }

    fn select_column(
        &self,
        map: &VectorName,
        column: &ColumnName,
    ) -> Result<Vec<String>, BackendError> {
        let stdout = self.run(
            "v.db.select",
            &["-c".into(), kv("map", map), kv("columns", column)],
        )?;
        Ok(output_rows(&stdout))
    }

    fn remove_vector(&self, map: &VectorName) -> Result<(), BackendError> {
        self.run(
            "g.remove",
            &[
                "-f".into(),
                kv("type", "vector"),
                kv("name", map),
                "--quiet".into(),
            ],
        )
        .map(|_| ())
    }
}
