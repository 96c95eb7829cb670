//! Per-topic contribution and review counters.
//!
//! Counters are written upstream whenever a suggestion is submitted or
//! reviewed. Each row covers one `(user, [language], topic)` triple; the
//! totals in [`crate::totals`] fold all rows for a user together.

use serde::{Deserialize, Serialize};

use crate::keys::{QuestionKey, TranslationKey};
use crate::types::{ContributionDate, EntityId};

// ---------------------------------------------------------------------------
// Shared behaviour
// ---------------------------------------------------------------------------

/// A counter row attached to a single topic.
pub trait TopicCounter {
    fn record_id(&self) -> &str;

    fn topic_id(&self) -> &str;

    /// Earliest contribution date covered by this row.
    fn first_date(&self) -> Option<ContributionDate>;

    /// Latest contribution date covered by this row.
    fn last_date(&self) -> Option<ContributionDate>;
}

// ---------------------------------------------------------------------------
// TranslationContribution
// ---------------------------------------------------------------------------

/// Translation submission counts for one contributor, language and topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationContribution {
    pub id: EntityId,
    pub language_code: String,
    pub contributor_user_id: EntityId,
    pub topic_id: EntityId,
    pub submitted_translations_count: i64,
    pub submitted_translation_word_count: i64,
    pub accepted_translations_count: i64,
    pub accepted_translations_without_reviewer_edits_count: i64,
    pub accepted_translation_word_count: i64,
    pub rejected_translations_count: i64,
    pub rejected_translation_word_count: i64,
    /// Kept in ascending order by the writer.
    pub contribution_dates: Vec<ContributionDate>,
}

impl TranslationContribution {
    pub const MODEL_NAME: &'static str = "TranslationContribution";

    pub fn key(&self) -> TranslationKey {
        TranslationKey::new(&self.language_code, &self.contributor_user_id)
    }
}

impl TopicCounter for TranslationContribution {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn topic_id(&self) -> &str {
        &self.topic_id
    }

    fn first_date(&self) -> Option<ContributionDate> {
        self.contribution_dates.iter().min().copied()
    }

    fn last_date(&self) -> Option<ContributionDate> {
        self.contribution_dates.iter().max().copied()
    }
}

// ---------------------------------------------------------------------------
// TranslationReview
// ---------------------------------------------------------------------------

/// Translation review counts for one reviewer, language and topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationReview {
    pub id: EntityId,
    pub language_code: String,
    pub reviewer_user_id: EntityId,
    pub topic_id: EntityId,
    pub reviewed_translations_count: i64,
    pub reviewed_translation_word_count: i64,
    pub accepted_translations_count: i64,
    pub accepted_translations_with_reviewer_edits_count: i64,
    pub accepted_translation_word_count: i64,
    pub first_contribution_date: ContributionDate,
    pub last_contribution_date: ContributionDate,
}

impl TranslationReview {
    pub fn key(&self) -> TranslationKey {
        TranslationKey::new(&self.language_code, &self.reviewer_user_id)
    }
}

impl TopicCounter for TranslationReview {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn topic_id(&self) -> &str {
        &self.topic_id
    }

    fn first_date(&self) -> Option<ContributionDate> {
        Some(self.first_contribution_date)
    }

    fn last_date(&self) -> Option<ContributionDate> {
        Some(self.last_contribution_date)
    }
}

// ---------------------------------------------------------------------------
// QuestionContribution
// ---------------------------------------------------------------------------

/// Question submission counts for one contributor and topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionContribution {
    pub id: EntityId,
    pub contributor_user_id: EntityId,
    pub topic_id: EntityId,
    pub submitted_questions_count: i64,
    pub accepted_questions_count: i64,
    pub accepted_questions_without_reviewer_edits_count: i64,
    pub first_contribution_date: ContributionDate,
    pub last_contribution_date: ContributionDate,
}

impl QuestionContribution {
    pub const MODEL_NAME: &'static str = "QuestionContribution";

    pub fn key(&self) -> QuestionKey {
        QuestionKey::new(&self.contributor_user_id)
    }
}

impl TopicCounter for QuestionContribution {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn topic_id(&self) -> &str {
        &self.topic_id
    }

    fn first_date(&self) -> Option<ContributionDate> {
        Some(self.first_contribution_date)
    }

    fn last_date(&self) -> Option<ContributionDate> {
        Some(self.last_contribution_date)
    }
}

// ---------------------------------------------------------------------------
// QuestionReview
// ---------------------------------------------------------------------------

/// Question review counts for one reviewer and topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionReview {
    pub id: EntityId,
    pub reviewer_user_id: EntityId,
    pub topic_id: EntityId,
    pub reviewed_questions_count: i64,
    pub accepted_questions_count: i64,
    pub accepted_questions_with_reviewer_edits_count: i64,
    pub first_contribution_date: ContributionDate,
    pub last_contribution_date: ContributionDate,
}

impl QuestionReview {
    pub fn key(&self) -> QuestionKey {
        QuestionKey::new(&self.reviewer_user_id)
    }
}

impl TopicCounter for QuestionReview {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn topic_id(&self) -> &str {
        &self.topic_id
    }

    fn first_date(&self) -> Option<ContributionDate> {
        Some(self.first_contribution_date)
    }

    fn last_date(&self) -> Option<ContributionDate> {
        Some(self.last_contribution_date)
    }
}
