//! backend
//!
//! Abstraction over the geospatial toolkit that owns vector maps.
//!
//! # Architecture
//!
//! The [`Backend`] trait is the single doorway to the toolkit. The evaluator
//! never runs toolkit commands itself; it only calls trait methods, which
//! normalize failures into [`BackendError`].
//!
//! # Implementations
//!
//! - [`grass::GrassBackend`] - runs GRASS GIS modules as child processes
//! - [`mock::MockBackend`] - in-memory backend for deterministic tests

pub mod grass;
pub mod mock;
mod traits;

pub use grass::GrassBackend;
pub use traits::{AreaUnits, Backend, BackendError, ColumnSpec};
