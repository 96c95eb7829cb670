//! The record-store seam.
//!
//! Jobs read and write records through [`RecordStore`] without knowing
//! whether documents live in Postgres or in memory. Every record type maps
//! to one [`RecordKind`] and is stored as a JSON document keyed by its id.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use contribstats_core::error::CoreError;
use serde::de::DeserializeOwned;
use serde::Serialize;

// ---------------------------------------------------------------------------
// RecordKind
// ---------------------------------------------------------------------------

/// Every document kind the store holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordKind {
    Suggestion,
    TranslationContribution,
    TranslationReview,
    QuestionContribution,
    QuestionReview,
    TranslationSubmitterTotal,
    TranslationReviewerTotal,
    QuestionSubmitterTotal,
    QuestionReviewerTotal,
    Topic,
    Story,
    ExplorationContext,
    ExplorationOpportunity,
    SkillOpportunity,
}

impl RecordKind {
    pub const ALL: [RecordKind; 14] = [
        RecordKind::Suggestion,
        RecordKind::TranslationContribution,
        RecordKind::TranslationReview,
        RecordKind::QuestionContribution,
        RecordKind::QuestionReview,
        RecordKind::TranslationSubmitterTotal,
        RecordKind::TranslationReviewerTotal,
        RecordKind::QuestionSubmitterTotal,
        RecordKind::QuestionReviewerTotal,
        RecordKind::Topic,
        RecordKind::Story,
        RecordKind::ExplorationContext,
        RecordKind::ExplorationOpportunity,
        RecordKind::SkillOpportunity,
    ];

    /// Value stored in the `documents.kind` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Suggestion => "suggestion",
            RecordKind::TranslationContribution => "translation_contribution",
            RecordKind::TranslationReview => "translation_review",
            RecordKind::QuestionContribution => "question_contribution",
            RecordKind::QuestionReview => "question_review",
            RecordKind::TranslationSubmitterTotal => "translation_submitter_total",
            RecordKind::TranslationReviewerTotal => "translation_reviewer_total",
            RecordKind::QuestionSubmitterTotal => "question_submitter_total",
            RecordKind::QuestionReviewerTotal => "question_reviewer_total",
            RecordKind::Topic => "topic",
            RecordKind::Story => "story",
            RecordKind::ExplorationContext => "exploration_context",
            RecordKind::ExplorationOpportunity => "exploration_opportunity",
            RecordKind::SkillOpportunity => "skill_opportunity",
        }
    }
}

impl FromStr for RecordKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                CoreError::unknown_name("record kind", s, RecordKind::ALL.iter().map(RecordKind::as_str))
            })
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// A value persisted as one JSON document.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const KIND: RecordKind;

    fn id(&self) -> &str;
}

// ---------------------------------------------------------------------------
// StoreError
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Failed to decode {kind} document {id}: {source}")]
    Decode {
        kind: RecordKind,
        id: String,
        source: serde_json::Error,
    },

    #[error("Failed to encode {kind} document {id}: {source}")]
    Encode {
        kind: RecordKind,
        id: String,
        source: serde_json::Error,
    },
}

/// Serialize a record into its document body.
pub fn encode<R: Record>(record: &R) -> Result<serde_json::Value, StoreError> {
    serde_json::to_value(record).map_err(|source| StoreError::Encode {
        kind: R::KIND,
        id: record.id().to_string(),
        source,
    })
}

/// Deserialize a document body into a record.
pub fn decode<R: Record>(id: &str, body: serde_json::Value) -> Result<R, StoreError> {
    serde_json::from_value(body).map_err(|source| StoreError::Decode {
        kind: R::KIND,
        id: id.to_string(),
        source,
    })
}

// ---------------------------------------------------------------------------
// RecordStore
// ---------------------------------------------------------------------------

/// Document persistence used by the jobs.
///
/// `delete` is a soft delete: the document stays readable through
/// `scan(include_deleted = true)` and is revived by a later `upsert`.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All documents of `R`'s kind, ordered by id.
    async fn scan<R: Record>(&self, include_deleted: bool) -> Result<Vec<R>, StoreError>;

    /// A live document by id.
    async fn get_by_id<R: Record>(&self, id: &str) -> Result<Option<R>, StoreError>;

    /// Insert or replace a batch of documents.
    async fn upsert<R: Record>(&self, records: &[R]) -> Result<(), StoreError>;

    /// Soft-delete a document. Returns `false` when no live document matched.
    async fn delete<R: Record>(&self, id: &str) -> Result<bool, StoreError>;
}
