//! Job orchestration.
//!
//! A job run walks `CONFIGURE → READ → TRANSFORM → (WRITE) → EMIT`. Reads
//! and writes go through a [`RecordStore`]; the transform step is pure and
//! delegates to `contribstats-core`. Per-key failures become result entries,
//! only store failures abort a run.
//!
//! | Job                                 | Writes | Module              |
//! |-------------------------------------|--------|---------------------|
//! | `generate_contributor_stats`        | yes    | [`generate`]        |
//! | `audit_generate_contributor_stats`  | no     | [`generate`]        |
//! | `audit_and_log_contributor_stats`   | no     | [`audit_log`]       |
//! | `validate_total_contribution_stats` | no     | [`validate`]        |
//! | `audit_topics_with_hanging_stories` | no     | [`hanging_stories`] |

use std::fmt;
use std::str::FromStr;

use contribstats_core::error::CoreError;
use contribstats_core::job_result::{sorted, JobRunResult};
use contribstats_core::scoring::ScoringPolicy;
use contribstats_db::{Record, RecordKind, RecordStore, StoreError};

pub mod audit_log;
pub mod generate;
pub mod hanging_stories;
pub mod validate;

// ---------------------------------------------------------------------------
// JobKind
// ---------------------------------------------------------------------------

/// The runnable jobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobKind {
    Generate,
    AuditGenerate,
    AuditAndLog,
    Validate,
    AuditHangingStories,
}

impl JobKind {
    pub const ALL: [JobKind; 5] = [
        JobKind::Generate,
        JobKind::AuditGenerate,
        JobKind::AuditAndLog,
        JobKind::Validate,
        JobKind::AuditHangingStories,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobKind::Generate => "generate_contributor_stats",
            JobKind::AuditGenerate => "audit_generate_contributor_stats",
            JobKind::AuditAndLog => "audit_and_log_contributor_stats",
            JobKind::Validate => "validate_total_contribution_stats",
            JobKind::AuditHangingStories => "audit_topics_with_hanging_stories",
        }
    }

    /// Whether the job persists what it computes.
    pub fn writes(&self) -> bool {
        matches!(self, JobKind::Generate)
    }
}

impl FromStr for JobKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobKind::ALL
            .into_iter()
            .find(|job| job.as_str() == s)
            .ok_or_else(|| CoreError::unknown_name("job", s, JobKind::ALL.iter().map(JobKind::as_str)))
    }
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Phases
// ---------------------------------------------------------------------------

/// Stages of a single job run, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum JobPhase {
    Configure,
    Read,
    Transform,
    Write,
    Emit,
}

impl JobPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobPhase::Configure => "configure",
            JobPhase::Read => "read",
            JobPhase::Transform => "transform",
            JobPhase::Write => "write",
            JobPhase::Emit => "emit",
        }
    }
}

impl fmt::Display for JobPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Records and logs the phases a job passes through.
///
/// Phases only move forward; `Write` may be skipped.
#[derive(Debug)]
pub struct PhaseTracker {
    job: JobKind,
    history: Vec<JobPhase>,
}

impl PhaseTracker {
    pub fn new(job: JobKind) -> Self {
        tracing::info!(job = %job, phase = %JobPhase::Configure, "Job phase");
        Self {
            job,
            history: vec![JobPhase::Configure],
        }
    }

    pub fn current(&self) -> JobPhase {
        self.history.last().copied().unwrap_or(JobPhase::Configure)
    }

    /// Move to `next`. Ignored when `next` is not after the current phase.
    pub fn advance(&mut self, next: JobPhase) {
        if next <= self.current() {
            tracing::warn!(job = %self.job, from = %self.current(), to = %next, "Ignoring backward phase transition");
            return;
        }
        tracing::info!(job = %self.job, phase = %next, "Job phase");
        self.history.push(next);
    }

    pub fn history(&self) -> &[JobPhase] {
        &self.history
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failures that abort a whole job run.
#[derive(Debug, thiserror::Error)]
pub enum JobError {
    #[error("Failed to read {kind} records: {source}")]
    Read { kind: RecordKind, source: StoreError },

    #[error("Failed to write {kind} records: {source}")]
    Write { kind: RecordKind, source: StoreError },

    #[error(transparent)]
    Config(#[from] CoreError),
}

/// Scan all live records of one kind.
pub(crate) async fn read<S, R>(store: &S) -> Result<Vec<R>, JobError>
where
    S: RecordStore,
    R: Record,
{
    let records = store
        .scan::<R>(false)
        .await
        .map_err(|source| JobError::Read {
            kind: R::KIND,
            source,
        })?;
    tracing::debug!(kind = %R::KIND, count = records.len(), "Read records");
    Ok(records)
}

/// Upsert a batch of records.
pub(crate) async fn write<S, R>(store: &S, records: &[R]) -> Result<(), JobError>
where
    S: RecordStore,
    R: Record,
{
    store
        .upsert(records)
        .await
        .map_err(|source| JobError::Write {
            kind: R::KIND,
            source,
        })?;
    tracing::debug!(kind = %R::KIND, count = records.len(), "Wrote records");
    Ok(())
}

// ---------------------------------------------------------------------------
// JobRunner
// ---------------------------------------------------------------------------

/// Output of one job run.
#[derive(Debug, Clone)]
pub struct JobReport {
    pub job: JobKind,
    pub phases: Vec<JobPhase>,
    /// Sorted result entries.
    pub results: Vec<JobRunResult>,
}

impl JobReport {
    /// Rendered result lines.
    pub fn lines(&self) -> Vec<String> {
        self.results.iter().map(ToString::to_string).collect()
    }
}

/// Runs jobs against one store with one scoring policy.
pub struct JobRunner<S> {
    store: S,
    policy: ScoringPolicy,
}

impl<S: RecordStore> JobRunner<S> {
    /// Fails when the policy is unusable.
    pub fn new(store: S, policy: ScoringPolicy) -> Result<Self, JobError> {
        policy.validate()?;
        Ok(Self { store, policy })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    pub async fn run(&self, job: JobKind) -> Result<JobReport, JobError> {
        let mut phases = PhaseTracker::new(job);

        let results = match job {
            JobKind::Generate | JobKind::AuditGenerate => {
                generate::run(&self.store, &self.policy, &mut phases, job.writes()).await?
            }
            JobKind::AuditAndLog => audit_log::run(&self.store, &mut phases).await?,
            JobKind::Validate => validate::run(&self.store, &self.policy, &mut phases).await?,
            JobKind::AuditHangingStories => hanging_stories::run(&self.store, &mut phases).await?,
        };

        phases.advance(JobPhase::Emit);
        let results = sorted(results);
        tracing::info!(
            job = %job,
            results = results.len(),
            errors = results.iter().filter(|r| r.is_error()).count(),
            "Job finished"
        );

        Ok(JobReport {
            job,
            phases: phases.history().to_vec(),
            results,
        })
    }
}
