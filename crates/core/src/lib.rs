//! Contributor statistics domain logic.
//!
//! Pure, I/O-free building blocks for the statistics jobs:
//!
//! - [`aggregation`]: per-key total generation from counters and suggestions.
//! - [`validation`]: recomputation of stored totals and discrepancy reports.
//! - [`audit`]: suggestion linkage diagnostics.
//! - [`hanging_stories`]: dangling story references on topics.
//! - [`job_result`]: rendered job-run output.

pub mod aggregation;
pub mod audit;
pub mod contribution;
pub mod error;
pub mod hanging_stories;
pub mod job_result;
pub mod keys;
pub mod opportunity;
pub mod scoring;
pub mod suggestion;
pub mod topic;
pub mod totals;
pub mod types;
pub mod validation;
