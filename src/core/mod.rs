//! core
//!
//! Core domain types and policies.
//!
//! # Modules
//!
//! - [`types`] - Strong types: VectorName, ColumnName, Maximum
//! - [`naming`] - Scratch vector name generation
//! - [`scratch`] - Scoped ownership of the scratch vector
//! - [`outcome`] - Area-versus-maximum policy and messages
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Invalid names and thresholds are rejected at construction time
//! - Temporary backend objects are owned by a guard, never by global state
//! - The outcome policy is pure and independent of output and exit codes

pub mod config;
pub mod naming;
pub mod outcome;
pub mod scratch;
pub mod types;
