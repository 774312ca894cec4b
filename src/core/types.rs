//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`VectorName`] - Validated GRASS vector map name (optionally `@mapset` qualified)
//! - [`ColumnName`] - Validated attribute column name
//! - [`Maximum`] - Non-negative, finite area threshold in square meters
//!
//! # Validation
//!
//! These types enforce validity at construction time, so bad input is
//! rejected while parsing arguments and never reaches the backend.
//!
//! # Examples
//!
//! ```
//! use region_area::core::types::{ColumnName, Maximum, VectorName};
//!
//! let map = VectorName::new("roadsmajor@PERMANENT").unwrap();
//! assert_eq!(map.name(), "roadsmajor");
//! assert_eq!(map.mapset(), Some("PERMANENT"));
//!
//! assert!(ColumnName::new("tmparea").is_ok());
//! assert!(Maximum::parse("-1").is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid vector map name: {0}")]
    InvalidVectorName(String),

    #[error("invalid column name: {0}")]
    InvalidColumnName(String),

    #[error("invalid maximum: {0}")]
    InvalidMaximum(String),
}

/// Check the GRASS rules shared by map and column names.
///
/// Returns a description of the first violation.
fn check_identifier(name: &str) -> Result<(), String> {
    let mut chars = name.chars();
    match chars.next() {
        None => return Err("name cannot be empty".into()),
        Some(c) if !c.is_ascii_alphabetic() => {
            return Err(format!("'{}' must start with a letter", name));
        }
        Some(_) => {}
    }

    if let Some(bad) = chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
        return Err(format!("'{}' contains invalid character '{}'", name, bad));
    }

    Ok(())
}

/// A validated GRASS vector map name.
///
/// The name part must start with an ASCII letter and contain only ASCII
/// alphanumerics and `_`. A mapset may be given after `@`.
///
/// # Example
///
/// ```
/// use region_area::core::types::VectorName;
///
/// let name = VectorName::new("area_1234").unwrap();
/// assert_eq!(name.as_str(), "area_1234");
/// assert_eq!(name.mapset(), None);
///
/// assert!(VectorName::new("").is_err());
/// assert!(VectorName::new("1map").is_err());
/// assert!(VectorName::new("my map").is_err());
/// assert!(VectorName::new("map@").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VectorName(String);

impl VectorName {
    /// Create a new validated vector name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidVectorName` if the name violates GRASS naming rules.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(Self(name))
    }

    fn validate(name: &str) -> Result<(), TypeError> {
        let (map, mapset) = match name.split_once('@') {
            Some((map, mapset)) => (map, Some(mapset)),
            None => (name, None),
        };

        check_identifier(map).map_err(TypeError::InvalidVectorName)?;

        if let Some(mapset) = mapset {
            if mapset.is_empty() {
                return Err(TypeError::InvalidVectorName(format!(
                    "'{}' has an empty mapset",
                    name
                )));
            }
            if mapset.contains('@') || mapset.chars().any(|c| c.is_whitespace()) {
                return Err(TypeError::InvalidVectorName(format!(
                    "'{}' has an invalid mapset",
                    name
                )));
            }
        }

        Ok(())
    }

    /// Get the full name as given, including any `@mapset` suffix.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the map name without the mapset.
    pub fn name(&self) -> &str {
        self.0.split('@').next().unwrap_or(&self.0)
    }

    /// Get the mapset, if the name is fully qualified.
    pub fn mapset(&self) -> Option<&str> {
        self.0.split_once('@').map(|(_, mapset)| mapset)
    }
}

impl fmt::Display for VectorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for VectorName {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<VectorName> for String {
    fn from(name: VectorName) -> Self {
        name.0
    }
}

impl FromStr for VectorName {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// A validated attribute column name.
///
/// # Example
///
/// ```
/// use region_area::core::types::ColumnName;
///
/// assert_eq!(ColumnName::new("tmparea").unwrap().as_str(), "tmparea");
/// assert!(ColumnName::new("tmp area").is_err());
/// assert!(ColumnName::new("area@x").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColumnName(String);

impl ColumnName {
    /// Create a new validated column name.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        check_identifier(&name).map_err(TypeError::InvalidColumnName)?;
        Ok(Self(name))
    }

    /// Get the column name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColumnName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ColumnName {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ColumnName> for String {
    fn from(name: ColumnName) -> Self {
        name.0
    }
}

/// A maximum area threshold in square meters.
///
/// Always finite and non-negative.
///
/// # Example
///
/// ```
/// use region_area::core::types::Maximum;
///
/// let max = Maximum::parse("600000000").unwrap();
/// assert_eq!(max.sqm(), 600_000_000.0);
///
/// assert!(Maximum::parse("").is_err());
/// assert!(Maximum::parse("lots").is_err());
/// assert!(Maximum::parse("-5").is_err());
/// assert!(Maximum::parse("inf").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Maximum(f64);

impl Maximum {
    /// Create a maximum from a number.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidMaximum` for negative, NaN or infinite values.
    pub fn new(sqm: f64) -> Result<Self, TypeError> {
        if !sqm.is_finite() {
            return Err(TypeError::InvalidMaximum(format!(
                "{} is not a finite number",
                sqm
            )));
        }
        if sqm < 0.0 {
            return Err(TypeError::InvalidMaximum(format!(
                "{} is negative",
                sqm
            )));
        }
        // -0.0 would display as "-0.00"
        Ok(Self(sqm + 0.0))
    }

    /// Parse a maximum from user input.
    pub fn parse(input: &str) -> Result<Self, TypeError> {
        let trimmed = input.trim();
        let sqm: f64 = trimmed.parse().map_err(|_| {
            TypeError::InvalidMaximum(format!("'{}' is not a number", input))
        })?;
        Self::new(sqm)
    }

    /// The threshold in square meters.
    pub fn sqm(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Maximum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl FromStr for Maximum {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
