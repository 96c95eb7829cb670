//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept a pool or executor as the first argument.

pub mod document_repo;

pub use document_repo::DocumentRepo;
