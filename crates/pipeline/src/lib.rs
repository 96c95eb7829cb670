//! Batch jobs over contribution records.
//!
//! [`dataflow`] holds the grouping and join primitives, [`shortlist`] the
//! opportunity filter applied to suggestions, and [`jobs`] the runner that
//! drives each job through its phases against a `RecordStore`.

pub mod dataflow;
pub mod jobs;
pub mod shortlist;

pub use jobs::{JobError, JobKind, JobPhase, JobReport, JobRunner};
