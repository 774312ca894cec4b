//! core::outcome
//!
//! Comparison of an area against an optional maximum.
//!
//! # Policy
//!
//! | area vs. maximum   | tolerant | severity        |
//! |--------------------|----------|-----------------|
//! | no maximum         | any      | Informational   |
//! | area <= maximum    | any      | Informational   |
//! | area > maximum     | false    | Fatal           |
//! | area > maximum     | true     | Warning         |
//!
//! Mapping severities to exit codes is left to the CLI.

use std::fmt;

use crate::core::types::Maximum;

/// How serious an outcome is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Informational,
    Warning,
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Informational => write!(f, "informational"),
            Severity::Warning => write!(f, "warning"),
            Severity::Fatal => write!(f, "fatal"),
        }
    }
}

/// Result of comparing the area with the maximum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Comparison {
    /// No maximum was given.
    NotRequested,
    /// Area is smaller than or equal to the maximum.
    WithinMaximum(Maximum),
    /// Area is larger than the maximum.
    ExceedsMaximum(Maximum),
}

/// Final outcome of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outcome {
    /// Measured area in square meters.
    pub area: f64,
    /// Comparison with the maximum, if any.
    pub comparison: Comparison,
    /// Severity of the comparison.
    pub severity: Severity,
}

/// Format square meters with exactly two decimals.
///
/// ```
/// use region_area::core::outcome::format_sqm;
///
/// assert_eq!(format_sqm(737154516.3215), "737154516.32");
/// assert_eq!(format_sqm(1e9), "1000000000.00");
/// ```
pub fn format_sqm(sqm: f64) -> String {
    format!("{:.2}", sqm)
}

/// Compare an area with an optional maximum.
///
/// # Example
///
/// ```
/// use region_area::core::outcome::{assess, Severity};
/// use region_area::core::types::Maximum;
///
/// let max = Maximum::new(600000000.0).unwrap();
/// assert_eq!(assess(737154516.32, Some(max), false).severity, Severity::Fatal);
/// assert_eq!(assess(737154516.32, Some(max), true).severity, Severity::Warning);
/// assert_eq!(assess(737154516.32, None, false).severity, Severity::Informational);
/// ```
pub fn assess(area: f64, maximum: Option<Maximum>, tolerant: bool) -> Outcome {
    let (comparison, severity) = match maximum {
        None => (Comparison::NotRequested, Severity::Informational),
        Some(max) if area > max.sqm() => {
            let severity = if tolerant {
                Severity::Warning
            } else {
                Severity::Fatal
            };
            (Comparison::ExceedsMaximum(max), severity)
        }
        Some(max) => (Comparison::WithinMaximum(max), Severity::Informational),
    };

    Outcome {
        area,
        comparison,
        severity,
    }
}

impl Outcome {
    /// The message reporting the measured area.
    pub fn area_message(&self) -> String {
        format!("The region has an area of {} sqm", format_sqm(self.area))
    }

    /// The message reporting the comparison, if a maximum was given.
    pub fn comparison_message(&self) -> Option<String> {
        let (max, relation) = match self.comparison {
            Comparison::NotRequested => return None,
            Comparison::WithinMaximum(max) => (max, "smaller"),
            Comparison::ExceedsMaximum(max) => (max, "larger"),
        };

        Some(format!(
            "The region has with {} sqm a {} area than the given maximum ({} sqm)",
            format_sqm(self.area),
            relation,
            format_sqm(max.sqm())
        ))
    }

    /// Whether the process should report failure.
    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Fatal
    }
}
