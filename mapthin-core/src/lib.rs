//! Core data structures and error types for mapthin
//!
//! This crate provides the fundamental types for boundary-line thinning:
//! arcs stored as parallel coordinate sequences, arc collections, per-vertex
//! weight arrays, and the shared error type.

pub mod arc;
pub mod arc_collection;
pub mod error;

pub use arc::*;
pub use arc_collection::*;
pub use error::*;

/// Common result type for mapthin operations
pub type Result<T> = std::result::Result<T, Error>;
