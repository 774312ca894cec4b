//! engine
//!
//! Orchestrates one area evaluation:
//! Setup -> Materialize -> Compute -> Compare -> Report -> Cleanup.
//!
//! # Architecture
//!
//! The engine owns the pipeline but not its inputs or outputs: arguments are
//! validated by the CLI before the engine runs, and the CLI decides what an
//! [`Outcome`](crate::core::outcome::Outcome) means for the exit status.
//!
//! # Invariants
//!
//! - At most one scratch vector is created per evaluation
//! - The scratch vector is removed on every exit path
//! - No backend call happens before the scratch name is reserved
//!
//! # Example
//!
//! ```
//! use region_area::backend::mock::MockBackend;
//! use region_area::core::outcome::Severity;
//! use region_area::core::types::{Maximum, VectorName};
//! use region_area::engine::{evaluate, AreaRequest, Context};
//!
//! let backend = MockBackend::new().with_vector("area", vec![737154516.32], false);
//! let request = AreaRequest {
//!     map: Some(VectorName::new("area").unwrap()),
//!     maximum: Some(Maximum::new(600000000.0).unwrap()),
//!     tolerant: true,
//! };
//!
//! let outcome = evaluate(&backend, &request, &Context::quiet()).unwrap();
//! assert_eq!(outcome.severity, Severity::Warning);
//! assert_eq!(backend.vector_names(), vec!["area"]);
//! ```

mod evaluate;

pub use evaluate::{evaluate, EvalError, ErrorKind};

use crate::core::config::{Config, DEFAULT_AREA_COLUMN};
use crate::core::naming::DEFAULT_SCRATCH_PREFIX;
use crate::core::types::{ColumnName, Maximum, TypeError, VectorName};
use crate::ui::output::Verbosity;

/// What to evaluate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AreaRequest {
    /// Vector map to measure; the current region when absent.
    pub map: Option<VectorName>,
    /// Threshold to compare against; report only when absent.
    pub maximum: Option<Maximum>,
    /// Downgrade "exceeds maximum" from fatal to warning.
    pub tolerant: bool,
}

/// Execution context for an evaluation.
#[derive(Debug, Clone)]
pub struct Context {
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (warnings and errors only).
    pub quiet: bool,
    /// Prefix for the scratch vector name.
    pub scratch_prefix: String,
    /// Column receiving per-feature areas.
    pub area_column: ColumnName,
}

impl Context {
    /// Build a context from configuration and CLI flags.
    pub fn from_config(config: &Config, debug: bool, quiet: bool) -> Result<Self, TypeError> {
        Ok(Self {
            debug,
            quiet,
            scratch_prefix: config.scratch_prefix().to_string(),
            area_column: ColumnName::new(config.area_column())?,
        })
    }

    /// A default context that prints nothing but warnings and errors.
    pub fn quiet() -> Self {
        Self {
            quiet: true,
            ..Self::default()
        }
    }

    /// Output verbosity derived from the flags.
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }
}

impl Default for Context {
    fn default() -> Self {
        Self {
            debug: false,
            quiet: false,
            scratch_prefix: DEFAULT_SCRATCH_PREFIX.to_string(),
            area_column: ColumnName::new(DEFAULT_AREA_COLUMN)
                .unwrap_or_else(|_| unreachable!("default column name is valid")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_context() {
        let ctx = Context::default();
        assert_eq!(ctx.scratch_prefix, "tmp_regionvector_");
        assert_eq!(ctx.area_column.as_str(), "tmparea");
        assert_eq!(ctx.verbosity(), Verbosity::Normal);
    }

    #[test]
    fn quiet_context() {
        assert_eq!(Context::quiet().verbosity(), Verbosity::Quiet);
    }

    #[test]
    fn from_config_applies_defaults_and_flags() {
        let ctx = Context::from_config(&Config::default(), true, false).unwrap();
        assert_eq!(ctx.verbosity(), Verbosity::Debug);
        assert_eq!(ctx.area_column.as_str(), "tmparea");
    }
}
