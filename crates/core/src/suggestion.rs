//! Suggestion records and their review outcomes.
//!
//! A suggestion is a translation or practice question submitted by a
//! contributor. Only suggestions in a terminal status produce a
//! [`ReviewOutcome`]; suggestions still in review are ignored by every
//! aggregate in this crate.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{EntityId, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Id prefix marking a pseudonymized (deleted) user.
///
/// Keys whose user id carries this prefix are skipped by total generation
/// and validation.
pub const PSEUDONYMIZED_ID_PREFIX: &str = "pid_";

/// Returns `true` when `user_id` belongs to a pseudonymized (deleted) user.
pub fn is_pseudonymized(user_id: &str) -> bool {
    user_id.starts_with(PSEUDONYMIZED_ID_PREFIX)
}

// ---------------------------------------------------------------------------
// SuggestionType
// ---------------------------------------------------------------------------

/// Kind of content a suggestion proposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionType {
    TranslateContent,
    AddQuestion,
    #[serde(rename = "edit_exploration_state_content")]
    EditStateContent,
}

impl SuggestionType {
    /// String representation used in stored documents and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionType::TranslateContent => "translate_content",
            SuggestionType::AddQuestion => "add_question",
            SuggestionType::EditStateContent => "edit_exploration_state_content",
        }
    }
}

impl fmt::Display for SuggestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SuggestionStatus
// ---------------------------------------------------------------------------

/// Review status of a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionStatus {
    #[serde(rename = "review")]
    InReview,
    Accepted,
    Rejected,
}

impl SuggestionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionStatus::InReview => "review",
            SuggestionStatus::Accepted => "accepted",
            SuggestionStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for SuggestionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ReviewOutcome
// ---------------------------------------------------------------------------

/// Outcome label recorded in a total's recent-review window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewOutcome {
    Accepted,
    AcceptedWithEdits,
    Rejected,
}

impl ReviewOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewOutcome::Accepted => "accepted",
            ReviewOutcome::AcceptedWithEdits => "accepted_with_edits",
            ReviewOutcome::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ReviewOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Suggestion
// ---------------------------------------------------------------------------

/// A submitted translation or question suggestion. Read-only here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: EntityId,
    pub suggestion_type: SuggestionType,
    pub target_type: String,
    pub target_id: EntityId,
    pub target_version_at_submission: i32,
    pub status: SuggestionStatus,
    pub author_id: EntityId,
    pub final_reviewer_id: Option<EntityId>,
    /// `None` for question suggestions.
    pub language_code: Option<String>,
    pub edited_by_reviewer: bool,
    pub created_on: Timestamp,
}

impl Suggestion {
    /// Map this suggestion to its review outcome, or `None` while it is
    /// still in review.
    pub fn review_outcome(&self) -> Option<ReviewOutcome> {
        match (self.status, self.edited_by_reviewer) {
            (SuggestionStatus::Accepted, false) => Some(ReviewOutcome::Accepted),
            (SuggestionStatus::Accepted, true) => Some(ReviewOutcome::AcceptedWithEdits),
            (SuggestionStatus::Rejected, _) => Some(ReviewOutcome::Rejected),
            (SuggestionStatus::InReview, _) => None,
        }
    }

    pub fn is_translation(&self) -> bool {
        self.suggestion_type == SuggestionType::TranslateContent
    }

    pub fn is_question(&self) -> bool {
        self.suggestion_type == SuggestionType::AddQuestion
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
