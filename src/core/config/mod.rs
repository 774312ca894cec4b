//! core::config
//!
//! Configuration schema and loading.
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Config file
//! 3. CLI flags (not handled here)
//!
//! # Config Locations
//!
//! Searched in order; the first existing file wins:
//! 1. `--config <PATH>` (must exist)
//! 2. `$REGION_AREA_CONFIG` if set
//! 3. `$XDG_CONFIG_HOME/region-area/config.toml`
//! 4. `~/.region-area/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use region_area::core::config::Config;
//!
//! let config = Config::load(None).unwrap();
//! println!("Scratch prefix: {}", config.scratch_prefix());
//! println!("Area column: {}", config.area_column());
//! ```

pub mod schema;

pub use schema::{FileConfig, DEFAULT_AREA_COLUMN};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "REGION_AREA_CONFIG";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file '{path}' does not exist")]
    NotFound { path: PathBuf },

    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Environment inputs to config discovery.
///
/// Separated from the process environment so discovery can be tested
/// without mutating global state.
#[derive(Debug, Clone, Default)]
pub struct ConfigEnv {
    /// Value of `$REGION_AREA_CONFIG`
    pub config_var: Option<PathBuf>,
    /// Value of `$XDG_CONFIG_HOME`
    pub xdg_config_home: Option<PathBuf>,
    /// Home directory
    pub home: Option<PathBuf>,
}

impl ConfigEnv {
    /// Capture the relevant parts of the process environment.
    pub fn from_process() -> Self {
        Self {
            config_var: std::env::var_os(CONFIG_ENV).map(PathBuf::from),
            xdg_config_home: std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
            home: dirs::home_dir(),
        }
    }

    /// Candidate config paths, in search order.
    fn candidates(&self) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(path) = &self.config_var {
            paths.push(path.clone());
        }
        if let Some(xdg) = &self.xdg_config_home {
            paths.push(xdg.join("region-area/config.toml"));
        }
        if let Some(home) = &self.home {
            paths.push(home.join(".region-area/config.toml"));
        }
        paths
    }
}

/// Loaded configuration with defaults applied through accessors.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Values read from the config file
    pub file: FileConfig,
    /// Path the config was loaded from, if any
    loaded_from: Option<PathBuf>,
}

impl Config {
    /// Load configuration, honouring an explicit path first.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit path does not exist, or if a config
    /// file exists but cannot be read, parsed or validated. Missing config
    /// files are not an error (defaults are used).
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(explicit, &ConfigEnv::from_process())
    }

    /// Load configuration using the given environment inputs.
    pub fn load_with_env(explicit: Option<&Path>, env: &ConfigEnv) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound {
                    path: path.to_path_buf(),
                })
            }
            Some(path) => Some(path.to_path_buf()),
            None => env.candidates().into_iter().find(|p| p.exists()),
        };

        let Some(path) = path else {
            return Ok(Self::default());
        };

        let file = Self::read_config(&path)?;
        file.validate()?;

        Ok(Self {
            file,
            loaded_from: Some(path),
        })
    }

    /// Read and parse a config file.
    fn read_config(path: &Path) -> Result<FileConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Command placed in front of every GRASS module, if configured.
    pub fn exec_prefix(&self) -> Option<&[String]> {
        self.file.exec_prefix.as_deref()
    }

    /// Prefix for scratch vector names.
    pub fn scratch_prefix(&self) -> &str {
        self.file.scratch_prefix()
    }

    /// Name of the temporary area column.
    pub fn area_column(&self) -> &str {
        self.file.area_column()
    }

    /// Get the path the config was loaded from.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.loaded_from.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, contents: &str) -> PathBuf {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn load_empty_defaults() {
        let temp = TempDir::new().unwrap();
        let env = ConfigEnv {
            home: Some(temp.path().to_path_buf()),
            ..Default::default()
        };

        let config = Config::load_with_env(None, &env).unwrap();
        assert!(config.loaded_from().is_none());
        assert!(config.exec_prefix().is_none());
        assert_eq!(config.scratch_prefix(), "tmp_regionvector_");
        assert_eq!(config.area_column(), "tmparea");
    }

    #[test]
    fn explicit_path_must_exist() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.toml");
        let err = Config::load_with_env(Some(&missing), &ConfigEnv::default()).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn explicit_path_wins_over_env() {
        let temp = TempDir::new().unwrap();
        let explicit = write(temp.path(), "explicit.toml", "area_column = \"explicit\"\n");
        let from_env = write(temp.path(), "env.toml", "area_column = \"from_env\"\n");
        let env = ConfigEnv {
            config_var: Some(from_env),
            ..Default::default()
        };

        let config = Config::load_with_env(Some(&explicit), &env).unwrap();
        assert_eq!(config.area_column(), "explicit");
        assert_eq!(config.loaded_from(), Some(explicit.as_path()));
    }

    #[test]
    fn env_var_wins_over_xdg_and_home() {
        let temp = TempDir::new().unwrap();
        let from_env = write(temp.path(), "env.toml", "scratch_prefix = \"env_\"\n");
        write(
            temp.path(),
            "xdg/region-area/config.toml",
            "scratch_prefix = \"xdg_\"\n",
        );
        let env = ConfigEnv {
            config_var: Some(from_env),
            xdg_config_home: Some(temp.path().join("xdg")),
            home: Some(temp.path().to_path_buf()),
        };

        let config = Config::load_with_env(None, &env).unwrap();
        assert_eq!(config.scratch_prefix(), "env_");
    }

    #[test]
    fn xdg_wins_over_home() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "xdg/region-area/config.toml",
            "scratch_prefix = \"xdg_\"\n",
        );
        write(
            temp.path(),
            "home/.region-area/config.toml",
            "scratch_prefix = \"home_\"\n",
        );
        let env = ConfigEnv {
            config_var: Some(temp.path().join("unset.toml")),
            xdg_config_home: Some(temp.path().join("xdg")),
            home: Some(temp.path().join("home")),
        };

        let config = Config::load_with_env(None, &env).unwrap();
        assert_eq!(config.scratch_prefix(), "xdg_");
    }

    #[test]
    fn home_config_is_found() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            ".region-area/config.toml",
            "exec_prefix = [\"grass\", \"/data/nc/PERMANENT\", \"--exec\"]\n",
        );
        let env = ConfigEnv {
            home: Some(temp.path().to_path_buf()),
            ..Default::default()
        };

        let config = Config::load_with_env(None, &env).unwrap();
        assert_eq!(config.exec_prefix().map(<[String]>::len), Some(3));
    }

    #[test]
    fn parse_errors_name_the_file() {
        let temp = TempDir::new().unwrap();
        let path = write(temp.path(), "bad.toml", "area_column = [\n");
        let err = Config::load_with_env(Some(&path), &ConfigEnv::default()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn invalid_values_rejected() {
        let temp = TempDir::new().unwrap();
        let path = write(temp.path(), "c.toml", "area_column = \"tmp area\"\n");
        let err = Config::load_with_env(Some(&path), &ConfigEnv::default()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
    }

    #[test]
    fn unknown_fields_rejected() {
        let temp = TempDir::new().unwrap();
        let path = write(temp.path(), "c.toml", "trunk = \"main\"\n");
        assert!(Config::load_with_env(Some(&path), &ConfigEnv::default()).is_err());
    }
}
