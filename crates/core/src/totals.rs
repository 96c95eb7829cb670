//! Fully aggregated, cross-topic contribution totals.
//!
//! One record per user and dimension. Totals are recomputed from scratch on
//! every generation run and are read-only during validation.

use serde::{Deserialize, Serialize};

use crate::keys::{QuestionKey, TranslationKey};
use crate::suggestion::ReviewOutcome;
use crate::types::{ContributionDate, EntityId};

/// Totals of a translation submitter in one language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationSubmitterTotalContributionStats {
    /// `"{language_code}.{contributor_id}"`.
    pub id: EntityId,
    pub language_code: String,
    pub contributor_id: EntityId,
    pub topic_ids_with_translation_submissions: Vec<EntityId>,
    pub recent_review_outcomes: Vec<ReviewOutcome>,
    pub recent_performance: i64,
    pub overall_accuracy: f64,
    pub submitted_translations_count: i64,
    pub submitted_translation_word_count: i64,
    pub accepted_translations_count: i64,
    pub accepted_translations_without_reviewer_edits_count: i64,
    pub accepted_translation_word_count: i64,
    pub rejected_translations_count: i64,
    pub rejected_translation_word_count: i64,
    pub first_contribution_date: ContributionDate,
    pub last_contribution_date: ContributionDate,
}

impl TranslationSubmitterTotalContributionStats {
    pub const MODEL_NAME: &'static str = "TranslationSubmitterTotalContributionStats";

    pub fn key(&self) -> TranslationKey {
        TranslationKey::new(&self.language_code, &self.contributor_id)
    }
}

/// Totals of a translation reviewer in one language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationReviewerTotalContributionStats {
    /// `"{language_code}.{contributor_id}"`.
    pub id: EntityId,
    pub language_code: String,
    pub contributor_id: EntityId,
    pub topic_ids_with_translation_reviews: Vec<EntityId>,
    pub reviewed_translations_count: i64,
    pub accepted_translations_count: i64,
    pub accepted_translations_with_reviewer_edits_count: i64,
    pub accepted_translation_word_count: i64,
    pub rejected_translations_count: i64,
    pub first_contribution_date: ContributionDate,
    pub last_contribution_date: ContributionDate,
}

impl TranslationReviewerTotalContributionStats {
    pub const MODEL_NAME: &'static str = "TranslationReviewerTotalContributionStats";
}

/// Totals of a question submitter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionSubmitterTotalContributionStats {
    /// Same as `contributor_id`.
    pub id: EntityId,
    pub contributor_id: EntityId,
    pub topic_ids_with_question_submissions: Vec<EntityId>,
    pub recent_review_outcomes: Vec<ReviewOutcome>,
    pub recent_performance: i64,
    pub overall_accuracy: f64,
    pub submitted_questions_count: i64,
    pub accepted_questions_count: i64,
    pub accepted_questions_without_reviewer_edits_count: i64,
    pub rejected_questions_count: i64,
    pub first_contribution_date: ContributionDate,
    pub last_contribution_date: ContributionDate,
}

impl QuestionSubmitterTotalContributionStats {
    pub const MODEL_NAME: &'static str = "QuestionSubmitterTotalContributionStats";

    pub fn key(&self) -> QuestionKey {
        QuestionKey::new(&self.contributor_id)
    }
}

/// Totals of a question reviewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionReviewerTotalContributionStats {
    /// Same as `contributor_id`.
    pub id: EntityId,
    pub contributor_id: EntityId,
    pub topic_ids_with_question_reviews: Vec<EntityId>,
    pub reviewed_questions_count: i64,
    pub accepted_questions_count: i64,
    pub accepted_questions_with_reviewer_edits_count: i64,
    pub rejected_questions_count: i64,
    pub first_contribution_date: ContributionDate,
    pub last_contribution_date: ContributionDate,
}

impl QuestionReviewerTotalContributionStats {
    pub const MODEL_NAME: &'static str = "QuestionReviewerTotalContributionStats";
}
