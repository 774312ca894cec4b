//! engine::evaluate
//!
//! The area evaluation pipeline.
//!
//! Every stage after the scratch name is reserved runs while a
//! [`ScratchVector`] guard is alive, so an early `?` return still removes
//! the scratch map.

use thiserror::Error;

use super::{AreaRequest, Context};
use crate::backend::{AreaUnits, Backend, BackendError, ColumnSpec};
use crate::core::outcome::{assess, Outcome, Severity};
use crate::core::scratch::ScratchVector;
use crate::core::types::{ColumnName, TypeError, VectorName};
use crate::ui::output::{self, Verbosity};

/// Errors that end an evaluation.
#[derive(Debug, Error)]
pub enum EvalError {
    /// Invalid names or thresholds.
    #[error(transparent)]
    Configuration(#[from] TypeError),

    /// A backend operation failed.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// The area column came back without any value.
    #[error("no area value could be read from vector map <{map}>")]
    MissingArea { map: String },

    /// The area column held something other than a non-negative number.
    #[error("area value '{value}' of vector map <{map}> is not a valid number")]
    InvalidArea { map: String, value: String },
}

/// Coarse classification of [`EvalError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Backend,
    Parse,
}

impl EvalError {
    /// Which class of failure this is.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EvalError::Configuration(_) => ErrorKind::Configuration,
            EvalError::Backend(_) => ErrorKind::Backend,
            EvalError::MissingArea { .. } | EvalError::InvalidArea { .. } => ErrorKind::Parse,
        }
    }
}

/// Measure the target region and compare it with the maximum.
///
/// Creates exactly one scratch vector and removes it before returning,
/// whether the evaluation succeeds or fails.
///
/// # Errors
///
/// - [`EvalError::Configuration`] if the scratch prefix is unusable
/// - [`EvalError::Backend`] if any backend operation fails
/// - [`EvalError::MissingArea`] / [`EvalError::InvalidArea`] if the area
///   cannot be read back
pub fn evaluate(
    backend: &dyn Backend,
    request: &AreaRequest,
    ctx: &Context,
) -> Result<Outcome, EvalError> {
    let verbosity = ctx.verbosity();

    let mut scratch = ScratchVector::reserve(backend, &ctx.scratch_prefix, verbosity)?;

    materialize(backend, request.map.as_ref(), scratch.name(), verbosity)?;

    output::message("Computing area of current region in sqm ...", verbosity);
    compute_area(backend, scratch.name(), &ctx.area_column)?;

    output::message("Select area ...", verbosity);
    let area = read_area(backend, scratch.name(), &ctx.area_column)?;

    let outcome = assess(area, request.maximum, request.tolerant);
    announce(&outcome, verbosity);

    scratch.release();
    Ok(outcome)
}

/// Create the scratch vector from the map or the current region.
fn materialize(
    backend: &dyn Backend,
    map: Option<&VectorName>,
    scratch: &VectorName,
    verbosity: Verbosity,
) -> Result<(), BackendError> {
    match map {
        Some(map) => {
            output::message(format!("Copy vector map <{}> ...", map), verbosity);
            backend.copy_vector(map, scratch)
        }
        None => {
            output::message("Create vector map out of current region ...", verbosity);
            backend.region_to_vector(scratch)
        }
    }
}

/// Fill the area column of the scratch vector.
fn compute_area(
    backend: &dyn Backend,
    scratch: &VectorName,
    column: &ColumnName,
) -> Result<(), BackendError> {
    if !backend.has_attribute_table(scratch)? {
        backend.add_attribute_table(scratch)?;
    }

    backend.add_column(scratch, &ColumnSpec::double(column.clone()))?;
    backend.compute_area_into_column(scratch, column, AreaUnits::Meters)
}

/// Read the area back; the first row is the area.
///
/// A NULL area comes back as an empty row and is an error, not a reason to
/// look further down.
fn read_area(
    backend: &dyn Backend,
    scratch: &VectorName,
    column: &ColumnName,
) -> Result<f64, EvalError> {
    let rows = backend.select_column(scratch, column)?;
    let value = rows.first().ok_or_else(|| EvalError::MissingArea {
        map: scratch.to_string(),
    })?;

    parse_area(value).ok_or_else(|| EvalError::InvalidArea {
        map: scratch.to_string(),
        value: value.trim().to_string(),
    })
}

fn parse_area(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|area| area.is_finite() && *area >= 0.0)
        .map(|area| area + 0.0)
}

/// Print the area and, if a maximum was given, the comparison at its severity.
fn announce(outcome: &Outcome, verbosity: Verbosity) {
    output::message(outcome.area_message(), verbosity);

    if let Some(message) = outcome.comparison_message() {
        match outcome.severity {
            Severity::Informational => output::message(message, verbosity),
            Severity::Warning => output::warning(message),
            Severity::Fatal => output::fatal(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::{FailOn, MockBackend, MockOperation};

    fn request(map: Option<&str>) -> AreaRequest {
        AreaRequest {
            map: map.map(|m| VectorName::new(m).unwrap()),
            ..Default::default()
        }
    }

    #[test]
    fn parse_area_accepts_numbers() {
        assert_eq!(parse_area("737154516.32"), Some(737154516.32));
        assert_eq!(parse_area("0"), Some(0.0));
        assert_eq!(parse_area("1e3"), Some(1000.0));
        assert!(parse_area("-0").unwrap().is_sign_positive());
    }

    #[test]
    fn parse_area_rejects_garbage() {
        assert_eq!(parse_area("abc"), None);
        assert_eq!(parse_area("-1"), None);
        assert_eq!(parse_area("nan"), None);
        assert_eq!(parse_area("inf"), None);
        assert_eq!(parse_area(""), None);
    }

    #[test]
    fn region_path_uses_region_to_vector() {
        let backend = MockBackend::new().with_region_area(906568009.35);
        let outcome = evaluate(&backend, &request(None), &Context::quiet()).unwrap();

        assert_eq!(outcome.area, 906568009.35);
        assert_eq!(outcome.severity, Severity::Informational);
        assert!(matches!(
            backend.operations()[0],
            MockOperation::RegionToVector { .. }
        ));
    }

    #[test]
    fn map_path_uses_copy() {
        let backend = MockBackend::new().with_vector("area", vec![737154516.32], true);
        let outcome = evaluate(&backend, &request(Some("area")), &Context::quiet()).unwrap();

        assert_eq!(outcome.area, 737154516.32);
        match &backend.operations()[0] {
            MockOperation::CopyVector { src, dst } => {
                assert_eq!(src, "area");
                assert!(dst.starts_with("tmp_regionvector_"));
            }
            other => panic!("unexpected first operation: {:?}", other),
        }
    }

    #[test]
    fn existing_table_is_not_recreated() {
        let backend = MockBackend::new().with_vector("area", vec![5.0], true);
        evaluate(&backend, &request(Some("area")), &Context::quiet()).unwrap();

        assert!(!backend
            .operations()
            .iter()
            .any(|op| matches!(op, MockOperation::AddAttributeTable { .. })));
    }

    #[test]
    fn missing_table_is_created() {
        let backend = MockBackend::new().with_region_area(5.0);
        evaluate(&backend, &request(None), &Context::quiet()).unwrap();

        assert!(backend
            .operations()
            .iter()
            .any(|op| matches!(op, MockOperation::AddAttributeTable { .. })));
    }

    #[test]
    fn first_row_wins() {
        let backend = MockBackend::new().with_vector("area", vec![10.0, 20.0], true);
        let outcome = evaluate(&backend, &request(Some("area")), &Context::quiet()).unwrap();
        assert_eq!(outcome.area, 10.0);
    }

    #[test]
    fn empty_read_back_is_parse_error() {
        let backend = MockBackend::new().with_region_area(5.0);
        backend.set_select_output(Vec::new());
        let err = evaluate(&backend, &request(None), &Context::quiet()).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(matches!(err, EvalError::MissingArea { .. }));
        assert!(backend.vector_names().is_empty());
    }

    #[test]
    fn non_numeric_read_back_is_parse_error() {
        let backend = MockBackend::new().with_region_area(5.0);
        backend.set_select_output(vec!["NULL".to_string()]);
        let err = evaluate(&backend, &request(None), &Context::quiet()).unwrap_err();

        assert!(matches!(err, EvalError::InvalidArea { ref value, .. } if value == "NULL"));
        assert!(backend.vector_names().is_empty());
    }

    #[test]
    fn empty_first_row_is_parse_error() {
        let backend = MockBackend::new().with_vector("area", vec![1.0, 2.0], true);
        backend.set_select_output(vec![String::new(), "5.0".to_string()]);
        let req = AreaRequest {
            maximum: Some(crate::core::types::Maximum::new(10.0).unwrap()),
            ..request(Some("area"))
        };
        let err = evaluate(&backend, &req, &Context::quiet()).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(matches!(err, EvalError::InvalidArea { ref value, .. } if value.is_empty()));
        assert_eq!(backend.vector_names(), vec!["area"]);
        assert_eq!(backend.removed().len(), 1);
    }

    #[test]
    fn null_first_row_is_parse_error() {
        let backend = MockBackend::new().with_region_area(5.0);
        backend.set_select_output(vec!["NULL".to_string(), "5.0".to_string()]);
        let err = evaluate(&backend, &request(None), &Context::quiet()).unwrap_err();

        assert!(matches!(err, EvalError::InvalidArea { ref value, .. } if value == "NULL"));
        assert!(backend.vector_names().is_empty());
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let backend = MockBackend::new().with_region_area(5.0);
        backend.set_select_output(vec![" 12.5 ".to_string()]);
        let outcome = evaluate(&backend, &request(None), &Context::quiet()).unwrap();
        assert_eq!(outcome.area, 12.5);
    }

    #[test]
    fn backend_failure_still_cleans_up() {
        let backend = MockBackend::new().with_region_area(5.0);
        backend.fail_on(FailOn::ComputeArea(BackendError::CommandFailed {
            module: "v.to.db".into(),
            status: "exit status: 1".into(),
            stderr: String::new(),
        }));
        let err = evaluate(&backend, &request(None), &Context::quiet()).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Backend);
        assert!(backend.vector_names().is_empty());
        assert_eq!(backend.removed().len(), 1);
    }

    #[test]
    fn invalid_prefix_fails_before_backend() {
        let backend = MockBackend::new().with_region_area(5.0);
        let ctx = Context {
            scratch_prefix: "9bad".into(),
            ..Context::quiet()
        };
        let err = evaluate(&backend, &request(None), &ctx).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(backend.operations().is_empty());
    }

    #[test]
    fn custom_column_is_used() {
        let backend = MockBackend::new().with_region_area(5.0);
        let ctx = Context {
            area_column: ColumnName::new("area_sqm").unwrap(),
            ..Context::quiet()
        };
        evaluate(&backend, &request(None), &ctx).unwrap();

        assert!(backend.operations().iter().any(|op| matches!(
            op,
            MockOperation::AddColumn { column, .. } if column == "area_sqm double precision"
        )));
    }
}
