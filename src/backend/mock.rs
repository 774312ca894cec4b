//! backend::mock
//!
//! Mock backend implementation for deterministic testing.
//!
//! # Design
//!
//! The mock backend keeps vector maps in memory, computes "areas" from
//! per-feature values supplied by the test, records every operation, and can
//! be configured to fail a chosen operation.
//!
//! # Example
//!
//! ```
//! use region_area::backend::mock::MockBackend;
//! use region_area::backend::Backend;
//! use region_area::core::types::VectorName;
//!
//! let backend = MockBackend::new().with_region_area(906568009.35);
//! let scratch = VectorName::new("tmp_regionvector_abcde").unwrap();
//!
//! backend.region_to_vector(&scratch).unwrap();
//! assert!(backend.exists("tmp_regionvector_abcde"));
//! assert!(!backend.has_attribute_table(&scratch).unwrap());
//! ```

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use super::traits::{AreaUnits, Backend, BackendError, ColumnSpec};
use crate::core::types::{ColumnName, VectorName};

/// Mock backend for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    inner: Arc<Mutex<MockBackendInner>>,
}

/// Internal mutable state.
#[derive(Debug, Default)]
struct MockBackendInner {
    /// Stored vector maps by name.
    vectors: BTreeMap<String, MockVector>,
    /// Area of the current region in square meters.
    region_area: f64,
    /// Operation to fail on (for testing error paths).
    fail_on: Option<FailOn>,
    /// Replaces the rows returned by `select_column`.
    select_output: Option<Vec<String>>,
    /// Recorded operations for verification.
    operations: Vec<MockOperation>,
}

/// A vector map held by the mock.
#[derive(Debug, Clone)]
struct MockVector {
    /// Area of each feature in square meters.
    feature_areas: Vec<f64>,
    /// Attribute table, if connected: column name to per-feature values.
    table: Option<HashMap<String, Vec<String>>>,
}

/// Configuration for which operation should fail.
#[derive(Debug, Clone)]
pub enum FailOn {
    CopyVector(BackendError),
    RegionToVector(BackendError),
    HasAttributeTable(BackendError),
    AddAttributeTable(BackendError),
    AddColumn(BackendError),
    ComputeArea(BackendError),
    SelectColumn(BackendError),
    RemoveVector(BackendError),
}

/// Recorded operation for test verification.
#[derive(Debug, Clone, PartialEq)]
pub enum MockOperation {
    CopyVector { src: String, dst: String },
    RegionToVector { dst: String },
    HasAttributeTable { map: String },
    AddAttributeTable { map: String },
    AddColumn { map: String, column: String },
    ComputeArea { map: String, column: String, units: AreaUnits },
    SelectColumn { map: String, column: String },
    RemoveVector { map: String },
}

impl MockBackend {
    /// Create an empty mock backend with a zero-area region.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the area of the current region.
    pub fn with_region_area(self, sqm: f64) -> Self {
        self.lock().region_area = sqm;
        self
    }

    /// Add a vector map with the given per-feature areas.
    pub fn with_vector(self, name: &str, feature_areas: Vec<f64>, has_table: bool) -> Self {
        self.lock().vectors.insert(
            name.to_string(),
            MockVector {
                feature_areas,
                table: has_table.then(HashMap::new),
            },
        );
        self
    }

    /// Make the given operation fail.
    pub fn fail_on(&self, fail: FailOn) {
        self.lock().fail_on = Some(fail);
    }

    /// Return these rows from `select_column` instead of the real values.
    pub fn set_select_output(&self, rows: Vec<String>) {
        self.lock().select_output = Some(rows);
    }

    /// All recorded operations, in order.
    pub fn operations(&self) -> Vec<MockOperation> {
        self.lock().operations.clone()
    }

    /// Whether a vector map with this name exists.
    pub fn exists(&self, name: &str) -> bool {
        self.lock().vectors.contains_key(name)
    }

    /// Names of all stored vector maps, sorted.
    pub fn vector_names(&self) -> Vec<String> {
        self.lock().vectors.keys().cloned().collect()
    }

    /// Names passed to `remove_vector`, in order.
    pub fn removed(&self) -> Vec<String> {
        self.lock()
            .operations
            .iter()
            .filter_map(|op| match op {
                MockOperation::RemoveVector { map } => Some(map.clone()),
                _ => None,
            })
            .collect()
    }

    /// Names of maps created by `copy_vector` or `region_to_vector`, in order.
    pub fn created(&self) -> Vec<String> {
        self.lock()
            .operations
            .iter()
            .filter_map(|op| match op {
                MockOperation::CopyVector { dst, .. } | MockOperation::RegionToVector { dst } => {
                    Some(dst.clone())
                }
                _ => None,
            })
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, MockBackendInner> {
        // A poisoned lock only means another test thread panicked.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl MockBackendInner {
    fn record(&mut self, op: MockOperation) {
        self.operations.push(op);
    }

    fn vector_mut(&mut self, module: &str, name: &str) -> Result<&mut MockVector, BackendError> {
        self.vectors
            .get_mut(name)
            .ok_or_else(|| failed(module, format!("Vector map <{}> not found", name)))
    }
}

fn failed(module: &str, stderr: String) -> BackendError {
    BackendError::CommandFailed {
        module: module.to_string(),
        status: "exit status: 1".to_string(),
        stderr: format!("ERROR: {}", stderr),
    }
}

impl Backend for MockBackend {
    fn copy_vector(&self, src: &VectorName, dst: &VectorName) -> Result<(), BackendError> {
        let mut inner = self.lock();
        inner.record(MockOperation::CopyVector {
            src: src.to_string(),
            dst: dst.to_string(),
        });
        if let Some(FailOn::CopyVector(e)) = &inner.fail_on {
            return Err(e.clone());
        }

        let source = inner
            .vectors
            .get(src.as_str())
            .cloned()
            .ok_or_else(|| failed("g.copy", format!("Vector map <{}> not found", src)))?;
        if inner.vectors.contains_key(dst.as_str()) {
            return Err(failed("g.copy", format!("Vector map <{}> already exists", dst)));
        }
        inner.vectors.insert(dst.to_string(), source);
        Ok(())
    }

    fn region_to_vector(&self, dst: &VectorName) -> Result<(), BackendError> {
        let mut inner = self.lock();
        inner.record(MockOperation::RegionToVector {
            dst: dst.to_string(),
        });
        if let Some(FailOn::RegionToVector(e)) = &inner.fail_on {
            return Err(e.clone());
        }

        let area = inner.region_area;
        inner.vectors.insert(
            dst.to_string(),
            MockVector {
                feature_areas: vec![area],
                table: None,
            },
        );
        Ok(())
    }

    fn has_attribute_table(&self, map: &VectorName) -> Result<bool, BackendError> {
        let mut inner = self.lock();
        inner.record(MockOperation::HasAttributeTable {
            map: map.to_string(),
        });
        if let Some(FailOn::HasAttributeTable(e)) = &inner.fail_on {
            return Err(e.clone());
        }

        Ok(inner.vector_mut("v.db.connect", map.as_str())?.table.is_some())
    }

    fn add_attribute_table(&self, map: &VectorName) -> Result<(), BackendError> {
        let mut inner = self.lock();
        inner.record(MockOperation::AddAttributeTable {
            map: map.to_string(),
        });
        if let Some(FailOn::AddAttributeTable(e)) = &inner.fail_on {
            return Err(e.clone());
        }

        let vector = inner.vector_mut("v.db.addtable", map.as_str())?;
        if vector.table.is_some() {
            return Err(failed(
                "v.db.addtable",
                format!("Table for vector map <{}> already exists", map),
            ));
        }
        vector.table = Some(HashMap::new());
        Ok(())
    }

    fn add_column(&self, map: &VectorName, column: &ColumnSpec) -> Result<(), BackendError> {
        let mut inner = self.lock();
        inner.record(MockOperation::AddColumn {
            map: map.to_string(),
            column: column.to_string(),
        });
        if let Some(FailOn::AddColumn(e)) = &inner.fail_on {
            return Err(e.clone());
        }

        let vector = inner.vector_mut("v.db.addcolumn", map.as_str())?;
        let rows = vector.feature_areas.len();
        let table = vector.table.as_mut().ok_or_else(|| {
            failed(
                "v.db.addcolumn",
                format!("Vector map <{}> is not connected to a database", map),
            )
        })?;
        table.insert(column.name.to_string(), vec![String::new(); rows]);
        Ok(())
    }

    fn compute_area_into_column(
        &self,
        map: &VectorName,
        column: &ColumnName,
        units: AreaUnits,
    ) -> Result<(), BackendError> {
        let mut inner = self.lock();
        inner.record(MockOperation::ComputeArea {
            map: map.to_string(),
            column: column.to_string(),
            units,
        });
        if let Some(FailOn::ComputeArea(e)) = &inner.fail_on {
            return Err(e.clone());
        }

        let vector = inner.vector_mut("v.to.db", map.as_str())?;
        let values: Vec<String> = vector
            .feature_areas
            .iter()
            .map(|area| area.to_string())
            .collect();
        let slot = vector
            .table
            .as_mut()
            .and_then(|table| table.get_mut(column.as_str()))
            .ok_or_else(|| failed("v.to.db", format!("Column <{}> not found", column)))?;
        *slot = values;
        Ok(())
    }

    fn select_column(
        &self,
        map: &VectorName,
        column: &ColumnName,
    ) -> Result<Vec<String>, BackendError> {
        let mut inner = self.lock();
        inner.record(MockOperation::SelectColumn {
            map: map.to_string(),
            column: column.to_string(),
        });
        if let Some(FailOn::SelectColumn(e)) = &inner.fail_on {
            return Err(e.clone());
        }
        if let Some(rows) = &inner.select_output {
            return Ok(rows.clone());
        }

        let vector = inner.vector_mut("v.db.select", map.as_str())?;
        vector
            .table
            .as_ref()
            .and_then(|table| table.get(column.as_str()))
            .cloned()
            .ok_or_else(|| failed("v.db.select", format!("Column <{}> not found", column)))
    }

    fn remove_vector(&self, map: &VectorName) -> Result<(), BackendError> {
        let mut inner = self.lock();
        inner.record(MockOperation::RemoveVector {
            map: map.to_string(),
        });
        if let Some(FailOn::RemoveVector(e)) = &inner.fail_on {
            return Err(e.clone());
        }

        match inner.vectors.remove(map.as_str()) {
            Some(_) => Ok(()),
            None => Err(failed(
                "g.remove",
                format!("Vector map <{}> not found", map),
            )),
        }
    }
}
