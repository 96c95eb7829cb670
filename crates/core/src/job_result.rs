//! Result entries emitted by a job run.
//!
//! Each job returns an unordered collection of [`JobRunResult`]s; the
//! helpers here turn per-key outcomes into the rendered report lines.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether a result entry reports success or failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobResultKind {
    Success,
    Error,
}

/// One line of job-run output.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct JobRunResult {
    pub kind: JobResultKind,
    pub message: String,
    pub count: Option<u64>,
}

impl JobRunResult {
    /// `"<label> SUCCESS: <n>"`.
    pub fn success(label: impl Into<String>, count: u64) -> Self {
        Self {
            kind: JobResultKind::Success,
            message: format!("{} SUCCESS", label.into()),
            count: Some(count),
        }
    }

    /// `"<label> FAILED: <n>"`, reported as an error entry.
    pub fn failure_count(label: impl Into<String>, count: u64) -> Self {
        Self {
            kind: JobResultKind::Error,
            message: format!("{} FAILED", label.into()),
            count: Some(count),
        }
    }

    /// A free-form informational line.
    pub fn stdout(message: impl Into<String>) -> Self {
        Self {
            kind: JobResultKind::Success,
            message: message.into(),
            count: None,
        }
    }

    /// A free-form error line.
    pub fn stderr(message: impl Into<String>) -> Self {
        Self {
            kind: JobResultKind::Error,
            message: message.into(),
            count: None,
        }
    }

    /// An error message seen `count` times.
    pub fn grouped_error(message: impl Into<String>, count: u64) -> Self {
        Self {
            kind: JobResultKind::Error,
            message: message.into(),
            count: Some(count),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == JobResultKind::Error
    }
}

impl fmt::Display for JobRunResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, self.count) {
            (JobResultKind::Success, Some(n)) => write!(f, "{}: {n}", self.message),
            (JobResultKind::Error, Some(n)) if self.message.ends_with(" FAILED") => {
                write!(f, "{}: {n}", self.message)
            }
            (JobResultKind::Error, Some(n)) => write!(f, "ERROR: \"{}\": {n}", self.message),
            (_, None) => f.write_str(&self.message),
        }
    }
}

// ---------------------------------------------------------------------------
// Collecting per-key outcomes
// ---------------------------------------------------------------------------

/// Count successes and group identical error messages.
///
/// Emits `"<label> SUCCESS: n"` only when `n > 0`, and one grouped error
/// entry per distinct message.
pub fn count_results<T, E, I>(label: &str, results: I) -> Vec<JobRunResult>
where
    E: fmt::Display,
    I: IntoIterator<Item = Result<T, E>>,
{
    let mut successes = 0u64;
    let mut errors: BTreeMap<String, u64> = BTreeMap::new();
    for result in results {
        match result {
            Ok(_) => successes += 1,
            Err(err) => *errors.entry(err.to_string()).or_insert(0) += 1,
        }
    }

    let mut out = Vec::with_capacity(errors.len() + 1);
    if successes > 0 {
        out.push(JobRunResult::success(label, successes));
    }
    out.extend(
        errors
            .into_iter()
            .map(|(message, count)| JobRunResult::grouped_error(message, count)),
    );
    out
}

/// Sort results so reports are deterministic.
pub fn sorted(mut results: Vec<JobRunResult>) -> Vec<JobRunResult> {
    results.sort();
    results
}
