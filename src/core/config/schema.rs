//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Validation
//!
//! Config values are validated after parsing: the scratch prefix must be
//! able to start a GRASS map name, the area column must be a valid column
//! name, and an exec prefix, if present, must name a program.

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::naming::DEFAULT_SCRATCH_PREFIX;
use crate::core::types::{ColumnName, VectorName};

/// Default name of the temporary area column.
pub const DEFAULT_AREA_COLUMN: &str = "tmparea";

/// User configuration.
///
/// # Example
///
/// ```toml
/// exec_prefix = ["grass", "/data/nc_spm_08/PERMANENT", "--exec"]
/// scratch_prefix = "tmp_regionvector_"
/// area_column = "tmparea"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Command placed in front of every GRASS module
    pub exec_prefix: Option<Vec<String>>,

    /// Prefix for scratch vector names
    pub scratch_prefix: Option<String>,

    /// Name of the temporary area column
    pub area_column: Option<String>,
}

impl FileConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(prefix) = &self.exec_prefix {
            match prefix.first() {
                None => {
                    return Err(ConfigError::InvalidValue(
                        "exec_prefix must not be empty".into(),
                    ))
                }
                Some(program) if program.trim().is_empty() => {
                    return Err(ConfigError::InvalidValue(
                        "exec_prefix must start with a program name".into(),
                    ))
                }
                Some(_) => {}
            }
        }

        if let Some(prefix) = &self.scratch_prefix {
            if prefix.is_empty() {
                return Err(ConfigError::InvalidValue(
                    "scratch_prefix must not be empty".into(),
                ));
            }
            // A prefix is valid if it forms a valid name with a letter suffix.
            VectorName::new(format!("{}a", prefix)).map_err(|_| {
                ConfigError::InvalidValue(format!(
                    "scratch_prefix '{}' must start with a letter and contain only letters, digits and '_'",
                    prefix
                ))
            })?;
            if prefix.contains('@') {
                return Err(ConfigError::InvalidValue(format!(
                    "scratch_prefix '{}' must not contain a mapset",
                    prefix
                )));
            }
        }

        if let Some(column) = &self.area_column {
            ColumnName::new(column.as_str())
                .map_err(|e| ConfigError::InvalidValue(format!("area_column: {}", e)))?;
        }

        Ok(())
    }

    /// Scratch prefix with the default applied.
    pub fn scratch_prefix(&self) -> &str {
        self.scratch_prefix
            .as_deref()
            .unwrap_or(DEFAULT_SCRATCH_PREFIX)
    }

    /// Area column with the default applied.
    pub fn area_column(&self) -> &str {
        self.area_column.as_deref().unwrap_or(DEFAULT_AREA_COLUMN)
    }
}
