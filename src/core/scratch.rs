//! core::scratch
//!
//! Scoped ownership of a temporary vector map.
//!
//! # Architecture
//!
//! A [`ScratchVector`] owns the name of one temporary map in the backend's
//! mapset. The map is removed when the guard is released or dropped,
//! whichever happens first, so every exit path of the evaluator (normal
//! return, early `?` return, panic unwinding) cleans up.
//!
//! # Invariants
//!
//! - Removal is attempted exactly once per guard
//! - Removal errors are swallowed; a map that never got created, or is
//!   already gone, is not an error for the caller
//! - The guard does not create the map; it only reserves the name
//!
//! # Example
//!
//! ```
//! use region_area::backend::mock::MockBackend;
//! use region_area::backend::Backend;
//! use region_area::core::scratch::ScratchVector;
//! use region_area::ui::output::Verbosity;
//!
//! let backend = MockBackend::new().with_region_area(42.0);
//! {
//!     let scratch = ScratchVector::reserve(&backend, "tmp_regionvector_", Verbosity::Quiet).unwrap();
//!     backend.region_to_vector(scratch.name()).unwrap();
//!     // map removed when `scratch` goes out of scope
//! }
//! assert!(backend.vector_names().is_empty());
//! ```

use crate::backend::Backend;
use crate::core::naming;
use crate::core::types::{TypeError, VectorName};
use crate::ui::output::{self, Verbosity};

/// A reserved temporary vector map, removed on release or drop.
pub struct ScratchVector<'a> {
    backend: &'a dyn Backend,
    name: VectorName,
    verbosity: Verbosity,
    /// Set once removal has been attempted.
    released: bool,
}

impl<'a> ScratchVector<'a> {
    /// Reserve a fresh, randomly suffixed map name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidVectorName` if `prefix` cannot start a
    /// valid map name.
    pub fn reserve(
        backend: &'a dyn Backend,
        prefix: &str,
        verbosity: Verbosity,
    ) -> Result<Self, TypeError> {
        let name = naming::scratch_name(prefix)?;
        output::debug(format!("reserved scratch vector {}", name), verbosity);
        Ok(Self::with_name(backend, name, verbosity))
    }

    /// Take ownership of a specific map name.
    pub fn with_name(backend: &'a dyn Backend, name: VectorName, verbosity: Verbosity) -> Self {
        Self {
            backend,
            name,
            verbosity,
            released: false,
        }
    }

    /// The reserved map name.
    pub fn name(&self) -> &VectorName {
        &self.name
    }

    /// Whether removal has already been attempted.
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Remove the map now.
    ///
    /// Calling this more than once has no further effect.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        output::message("Cleaning up...", self.verbosity);
        if let Err(e) = self.backend.remove_vector(&self.name) {
            output::debug(
                format!("ignoring failure to remove {}: {}", self.name, e),
                self.verbosity,
            );
        }
    }
}

impl Drop for ScratchVector<'_> {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for ScratchVector<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScratchVector")
            .field("name", &self.name)
            .field("released", &self.released)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::{FailOn, MockBackend};
    use crate::backend::BackendError;

    #[test]
    fn drop_removes_created_map() {
        let backend = MockBackend::new().with_region_area(1.0);
        {
            let scratch =
                ScratchVector::reserve(&backend, naming::DEFAULT_SCRATCH_PREFIX, Verbosity::Quiet)
                    .unwrap();
            backend.region_to_vector(scratch.name()).unwrap();
            assert_eq!(backend.vector_names().len(), 1);
        }
        assert!(backend.vector_names().is_empty());
        assert_eq!(backend.removed().len(), 1);
    }

    #[test]
    fn release_is_idempotent() {
        let backend = MockBackend::new().with_region_area(1.0);
        let mut scratch =
            ScratchVector::reserve(&backend, naming::DEFAULT_SCRATCH_PREFIX, Verbosity::Quiet)
                .unwrap();
        backend.region_to_vector(scratch.name()).unwrap();

        scratch.release();
        scratch.release();
        assert!(scratch.is_released());
        drop(scratch);

        assert_eq!(backend.removed().len(), 1);
    }

    #[test]
    fn missing_map_is_not_an_error() {
        let backend = MockBackend::new();
        let name = VectorName::new("tmp_regionvector_never").unwrap();
        {
            let _scratch = ScratchVector::with_name(&backend, name, Verbosity::Quiet);
        }
        assert_eq!(backend.removed(), vec!["tmp_regionvector_never"]);
    }

    #[test]
    fn removal_failure_is_swallowed() {
        let backend = MockBackend::new().with_region_area(1.0);
        let mut scratch =
            ScratchVector::reserve(&backend, naming::DEFAULT_SCRATCH_PREFIX, Verbosity::Quiet)
                .unwrap();
        backend.region_to_vector(scratch.name()).unwrap();
        backend.fail_on(FailOn::RemoveVector(BackendError::NoSession));

        scratch.release();
        assert!(scratch.is_released());
    }

    #[test]
    fn invalid_prefix_is_rejected() {
        let backend = MockBackend::new();
        let result = ScratchVector::reserve(&backend, "1bad", Verbosity::Quiet);
        assert!(result.is_err());
        assert!(backend.operations().is_empty());
    }
}
