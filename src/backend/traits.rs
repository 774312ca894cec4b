//! backend::traits
//!
//! Backend trait definition for the geospatial toolkit that stores vector
//! maps and computes their areas.
//!
//! # Design
//!
//! The trait is synchronous because every operation is a blocking call into
//! the toolkit. The evaluator only depends on this trait, so tests can swap
//! in [`MockBackend`](super::mock::MockBackend).
//!
//! # Example
//!
//! ```
//! use region_area::backend::mock::MockBackend;
//! use region_area::backend::{Backend, BackendError, ColumnSpec};
//! use region_area::core::types::{ColumnName, VectorName};
//!
//! fn prepare(
//!     backend: &dyn Backend,
//!     map: &VectorName,
//!     column: &ColumnName,
//! ) -> Result<(), BackendError> {
//!     if !backend.has_attribute_table(map)? {
//!         backend.add_attribute_table(map)?;
//!     }
//!     backend.add_column(map, &ColumnSpec::double(column.clone()))
//! }
//!
//! let backend = MockBackend::new().with_region_area(42.0);
//! let map = VectorName::new("scratch").unwrap();
//! backend.region_to_vector(&map).unwrap();
//! prepare(&backend, &map, &ColumnName::new("tmparea").unwrap()).unwrap();
//! assert!(backend.has_attribute_table(&map).unwrap());
//! ```

use std::fmt;

use thiserror::Error;

use crate::core::types::{ColumnName, VectorName};

/// Errors from backend operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BackendError {
    /// No GRASS session is active and no exec prefix is configured.
    #[error("not inside a GRASS session (GISRC is not set); start GRASS or configure exec_prefix")]
    NoSession,

    /// The module could not be started at all.
    #[error("failed to run {module}: {message}")]
    Spawn {
        /// Module name (e.g. `g.copy`)
        module: String,
        /// OS error description
        message: String,
    },

    /// The module ran and reported failure.
    #[error("{module} failed ({status}){}", format_stderr(.stderr))]
    CommandFailed {
        /// Module name (e.g. `g.copy`)
        module: String,
        /// Exit status description
        status: String,
        /// Trimmed standard error of the module
        stderr: String,
    },
}

fn format_stderr(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {}", stderr)
    }
}

/// Units used when the backend measures areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AreaUnits {
    /// Square meters
    Meters,
}

impl AreaUnits {
    /// The unit keyword understood by `v.to.db`.
    pub fn as_str(&self) -> &'static str {
        match self {
            AreaUnits::Meters => "meters",
        }
    }
}

impl fmt::Display for AreaUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Definition of an attribute column to add.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Column name
    pub name: ColumnName,
    /// SQL type, e.g. `double precision`
    pub sql_type: String,
}

impl ColumnSpec {
    /// A `double precision` column.
    pub fn double(name: ColumnName) -> Self {
        Self {
            name,
            sql_type: "double precision".to_string(),
        }
    }
}

impl fmt::Display for ColumnSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.sql_type)
    }
}

/// The geospatial toolkit, as seen by the evaluator.
///
/// Every method blocks until the underlying operation has finished.
pub trait Backend {
    /// Duplicate vector map `src` as `dst`.
    fn copy_vector(&self, src: &VectorName, dst: &VectorName) -> Result<(), BackendError>;

    /// Store the current computational region as vector map `dst`.
    fn region_to_vector(&self, dst: &VectorName) -> Result<(), BackendError>;

    /// Whether `map` has an attribute table connected.
    fn has_attribute_table(&self, map: &VectorName) -> Result<bool, BackendError>;

    /// Create and connect a new attribute table for `map`.
    fn add_attribute_table(&self, map: &VectorName) -> Result<(), BackendError>;

    /// Add a column, replacing an existing column of the same name.
    fn add_column(&self, map: &VectorName, column: &ColumnSpec) -> Result<(), BackendError>;

    /// Write each feature's area into `column`, overwriting previous values.
    fn compute_area_into_column(
        &self,
        map: &VectorName,
        column: &ColumnName,
        units: AreaUnits,
    ) -> Result<(), BackendError>;

    /// Read the values of `column` for all features, one string per row.
    fn select_column(
        &self,
        map: &VectorName,
        column: &ColumnName,
    ) -> Result<Vec<String>, BackendError>;

    /// Remove vector map `map`.
    ///
    /// Callers treat failures here as non-fatal; removing a map that does
    /// not exist may or may not report an error.
    fn remove_vector(&self, map: &VectorName) -> Result<(), BackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_spec_display() {
        let spec = ColumnSpec::double(ColumnName::new("tmparea").unwrap());
        assert_eq!(spec.to_string(), "tmparea double precision");
    }

    #[test]
    fn units_keyword() {
        assert_eq!(AreaUnits::Meters.to_string(), "meters");
    }

    #[test]
    fn command_failed_includes_stderr() {
        let err = BackendError::CommandFailed {
            module: "g.copy".into(),
            status: "exit status: 1".into(),
            stderr: "ERROR: Vector map <nope> not found".into(),
        };
        assert_eq!(
            err.to_string(),
            "g.copy failed (exit status: 1): ERROR: Vector map <nope> not found"
        );
    }

    #[test]
    fn command_failed_without_stderr() {
        let err = BackendError::CommandFailed {
            module: "v.to.db".into(),
            status: "exit status: 1".into(),
            stderr: String::new(),
        };
        assert_eq!(err.to_string(), "v.to.db failed (exit status: 1)");
    }
}
