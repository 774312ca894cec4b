//! region-area - Measure the GRASS region or a vector map against a maximum
//!
//! `region-area` computes the planar area, in square meters, of the current
//! GRASS computational region or of a vector map, and optionally compares it
//! with a maximum. Exceeding the maximum is fatal unless the tolerant flag is
//! set, in which case it is reported as a warning.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, maps outcomes to exit status)
//! - [`engine`] - The evaluation pipeline
//! - [`core`] - Domain types, scratch vector ownership, outcome policy, config
//! - [`backend`] - Interface to the GIS toolkit (GRASS modules, mock)
//! - [`ui`] - Diagnostic output
//!
//! # Correctness Invariants
//!
//! 1. Arguments are validated before any backend call
//! 2. Each evaluation creates at most one scratch vector
//! 3. The scratch vector is removed on every exit path
//! 4. All human-readable output goes to stderr

pub mod backend;
pub mod cli;
pub mod core;
pub mod engine;
pub mod ui;
