//! Cross-checking of stored totals against their constituent records.
//!
//! A stored total is recomputed from the same prefetched counters and
//! suggestions that generation would use, and every derived field is
//! compared. All mismatches are collected into one [`ValidationReport`]
//! rather than stopping at the first.
//!
//! Missing-total detection runs first, per key, through
//! [`check_missing_total`].

use std::collections::BTreeSet;
use std::fmt;

use crate::aggregation::{contribution_span, rejected_suggestion_count, sum_field};
use crate::contribution::{QuestionContribution, TopicCounter, TranslationContribution};
use crate::keys::StatsKey;
use crate::scoring::{overall_accuracy, ScoringPolicy};
use crate::suggestion::{ReviewOutcome, Suggestion};
use crate::topic::TopicIndex;
use crate::totals::{
    QuestionSubmitterTotalContributionStats, TranslationSubmitterTotalContributionStats,
};
use crate::types::{ContributionDate, EntityId};

/// Largest accuracy difference still treated as equal.
pub const ACCURACY_TOLERANCE: f64 = 1e-6;

/// Model name used for suggestions in missing-total reports.
pub const SUGGESTION_MODEL_NAME: &str = "Suggestion";

// ---------------------------------------------------------------------------
// Discrepancy
// ---------------------------------------------------------------------------

/// One field on which a stored total disagrees with its recomputation.
#[derive(Debug, Clone, PartialEq)]
pub enum Discrepancy {
    /// Topics of valid contributions absent from the stored topic list.
    MissingTopicIds(BTreeSet<EntityId>),
    Count {
        field: &'static str,
        aggregated: i64,
        stored: i64,
    },
    FirstContributionDate {
        aggregated: ContributionDate,
        stored: ContributionDate,
    },
    LastContributionDate {
        aggregated: ContributionDate,
        stored: ContributionDate,
    },
    RecentOutcomes {
        aggregated: Vec<ReviewOutcome>,
        stored: Vec<ReviewOutcome>,
    },
    RecentPerformance {
        aggregated: i64,
        stored: i64,
    },
    OverallAccuracy {
        aggregated: f64,
        stored: f64,
    },
}

fn join_outcomes(outcomes: &[ReviewOutcome]) -> String {
    let labels: Vec<&str> = outcomes.iter().map(ReviewOutcome::as_str).collect();
    format!("[{}]", labels.join(", "))
}

impl fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Discrepancy::MissingTopicIds(ids) => {
                let ids: Vec<&str> = ids.iter().map(String::as_str).collect();
                write!(f, "-> missing topic_ids {{{}}} in total stats", ids.join(", "))
            }
            Discrepancy::Count {
                field,
                aggregated,
                stored,
            } => write!(f, "-> field {field} aggregated {aggregated} != total {stored}"),
            Discrepancy::FirstContributionDate { aggregated, stored } => {
                write!(f, "-> first contribution {aggregated} != {stored}")
            }
            Discrepancy::LastContributionDate { aggregated, stored } => {
                write!(f, "-> last contribution {aggregated} != {stored}")
            }
            Discrepancy::RecentOutcomes { aggregated, stored } => write!(
                f,
                "-> recent outcomes {} != {}",
                join_outcomes(aggregated),
                join_outcomes(stored)
            ),
            Discrepancy::RecentPerformance { aggregated, stored } => {
                write!(f, "-> recent performance {aggregated} != {stored}")
            }
            Discrepancy::OverallAccuracy { aggregated, stored } => {
                write!(f, "-> accuracy {aggregated} != {stored}")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

/// All discrepancies found for one stored total.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    pub model: &'static str,
    pub total_id: EntityId,
    pub discrepancies: Vec<Discrepancy>,
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation failed for {} {}:", self.model, self.total_id)?;
        for discrepancy in &self.discrepancies {
            write!(f, "\n{discrepancy}")?;
        }
        Ok(())
    }
}

/// A key that has constituent records but no stored total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingTotalReport {
    pub total_model: &'static str,
    pub contribution_model: &'static str,
    pub key: String,
    pub contribution_ids: Vec<EntityId>,
    pub suggestion_ids: Vec<EntityId>,
}

fn write_id_list(f: &mut fmt::Formatter<'_>, ids: &[EntityId]) -> fmt::Result {
    if ids.is_empty() {
        return write!(f, "\n--None");
    }
    for id in ids {
        write!(f, "\n--{id}")?;
    }
    Ok(())
}

impl fmt::Display for MissingTotalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Missing {} for key {}:", self.total_model, self.key)?;
        write!(f, "\n-> {}:", self.contribution_model)?;
        write_id_list(f, &self.contribution_ids)?;
        write!(f, "\n-> {SUGGESTION_MODEL_NAME}:")?;
        write_id_list(f, &self.suggestion_ids)
    }
}

// ---------------------------------------------------------------------------
// Missing-total detection
// ---------------------------------------------------------------------------

/// Totals, counters and suggestions that share one key.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationGroup<T, C> {
    pub totals: Vec<T>,
    pub contributions: Vec<C>,
    pub suggestions: Vec<Suggestion>,
}

/// Confirm that a key with constituent records has a stored total.
///
/// Returns `None` for pseudonymized keys, `Some(Err(..))` when no total
/// exists, and `Some(Ok(group))` otherwise. Contribution and suggestion
/// lists may be empty.
pub fn check_missing_total<K, T, C>(
    key: &K,
    group: ValidationGroup<T, C>,
    total_model: &'static str,
    contribution_model: &'static str,
) -> Option<Result<ValidationGroup<T, C>, MissingTotalReport>>
where
    K: StatsKey,
    C: TopicCounter,
{
    if key.is_pseudonymized() {
        return None;
    }
    if !group.totals.is_empty() {
        return Some(Ok(group));
    }
    Some(Err(MissingTotalReport {
        total_model,
        contribution_model,
        key: key.to_string(),
        contribution_ids: group
            .contributions
            .iter()
            .map(|c| c.record_id().to_string())
            .collect(),
        suggestion_ids: group.suggestions.iter().map(|s| s.id.clone()).collect(),
    }))
}

// ---------------------------------------------------------------------------
// Validator
// ---------------------------------------------------------------------------

/// Recomputes submitter totals and reports every mismatch.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    policy: &'a ScoringPolicy,
    topics: &'a TopicIndex,
}

impl<'a> Validator<'a> {
    pub fn new(policy: &'a ScoringPolicy, topics: &'a TopicIndex) -> Self {
        Self { policy, topics }
    }

    /// Check a stored translation submitter total. Returns its id when
    /// every field matches.
    pub fn translation_submitter(
        &self,
        total: &TranslationSubmitterTotalContributionStats,
        contributions: &[TranslationContribution],
        suggestions: &[Suggestion],
    ) -> Result<EntityId, ValidationReport> {
        let valid = self.topics.valid_rows(contributions);
        let mut found = Vec::new();

        check_topic_ids(
            &valid,
            &total.topic_ids_with_translation_submissions,
            &mut found,
        );

        let counts: [(&'static str, fn(&TranslationContribution) -> i64, i64); 7] = [
            (
                "submitted_translations_count",
                |c| c.submitted_translations_count,
                total.submitted_translations_count,
            ),
            (
                "submitted_translation_word_count",
                |c| c.submitted_translation_word_count,
                total.submitted_translation_word_count,
            ),
            (
                "accepted_translations_count",
                |c| c.accepted_translations_count,
                total.accepted_translations_count,
            ),
            (
                "accepted_translations_without_reviewer_edits_count",
                |c| c.accepted_translations_without_reviewer_edits_count,
                total.accepted_translations_without_reviewer_edits_count,
            ),
            (
                "accepted_translation_word_count",
                |c| c.accepted_translation_word_count,
                total.accepted_translation_word_count,
            ),
            (
                "rejected_translations_count",
                |c| c.rejected_translations_count,
                total.rejected_translations_count,
            ),
            (
                "rejected_translation_word_count",
                |c| c.rejected_translation_word_count,
                total.rejected_translation_word_count,
            ),
        ];
        for (field, getter, stored) in counts {
            check_count(field, sum_field(&valid, getter), stored, &mut found);
        }

        check_dates(
            &valid,
            total.first_contribution_date,
            total.last_contribution_date,
            &mut found,
        );
        self.check_outcomes(
            suggestions,
            &total.recent_review_outcomes,
            total.recent_performance,
            &mut found,
        );
        check_accuracy(
            total.accepted_translations_count,
            total.submitted_translations_count,
            total.overall_accuracy,
            &mut found,
        );

        finish(
            TranslationSubmitterTotalContributionStats::MODEL_NAME,
            &total.id,
            found,
        )
    }

    /// Check a stored question submitter total. Returns its id when every
    /// field matches.
    pub fn question_submitter(
        &self,
        total: &QuestionSubmitterTotalContributionStats,
        contributions: &[QuestionContribution],
        suggestions: &[Suggestion],
    ) -> Result<EntityId, ValidationReport> {
        let valid = self.topics.valid_rows(contributions);
        let mut found = Vec::new();

        check_topic_ids(&valid, &total.topic_ids_with_question_submissions, &mut found);

        check_count(
            "submitted_questions_count",
            sum_field(&valid, |c| c.submitted_questions_count),
            total.submitted_questions_count,
            &mut found,
        );
        check_count(
            "accepted_questions_count",
            sum_field(&valid, |c| c.accepted_questions_count),
            total.accepted_questions_count,
            &mut found,
        );
        check_count(
            "accepted_questions_without_reviewer_edits_count",
            sum_field(&valid, |c| c.accepted_questions_without_reviewer_edits_count),
            total.accepted_questions_without_reviewer_edits_count,
            &mut found,
        );
        check_count(
            "rejected_questions_count",
            rejected_suggestion_count(suggestions),
            total.rejected_questions_count,
            &mut found,
        );

        check_dates(
            &valid,
            total.first_contribution_date,
            total.last_contribution_date,
            &mut found,
        );
        self.check_outcomes(
            suggestions,
            &total.recent_review_outcomes,
            total.recent_performance,
            &mut found,
        );
        check_accuracy(
            total.accepted_questions_count,
            total.submitted_questions_count,
            total.overall_accuracy,
            &mut found,
        );

        finish(
            QuestionSubmitterTotalContributionStats::MODEL_NAME,
            &total.id,
            found,
        )
    }

    fn check_outcomes(
        &self,
        suggestions: &[Suggestion],
        stored_outcomes: &[ReviewOutcome],
        stored_performance: i64,
        found: &mut Vec<Discrepancy>,
    ) {
        let recent = self.policy.recent_outcomes(suggestions);
        let performance = self.policy.recent_performance(&recent.counts);
        if recent.outcomes != stored_outcomes {
            found.push(Discrepancy::RecentOutcomes {
                aggregated: recent.outcomes,
                stored: stored_outcomes.to_vec(),
            });
        }
        if performance != stored_performance {
            found.push(Discrepancy::RecentPerformance {
                aggregated: performance,
                stored: stored_performance,
            });
        }
    }
}

// ---------------------------------------------------------------------------
// Field checks
// ---------------------------------------------------------------------------

fn check_topic_ids<C: TopicCounter>(valid: &[&C], stored: &[EntityId], found: &mut Vec<Discrepancy>) {
    let stored: BTreeSet<&str> = stored.iter().map(String::as_str).collect();
    let missing: BTreeSet<EntityId> = valid
        .iter()
        .map(|c| c.topic_id())
        .filter(|topic_id| !stored.contains(topic_id))
        .map(str::to_string)
        .collect();
    if !missing.is_empty() {
        found.push(Discrepancy::MissingTopicIds(missing));
    }
}

fn check_count(field: &'static str, aggregated: i64, stored: i64, found: &mut Vec<Discrepancy>) {
    if aggregated != stored {
        found.push(Discrepancy::Count {
            field,
            aggregated,
            stored,
        });
    }
}

/// Dates are only comparable when at least one valid row carries a date.
fn check_dates<C: TopicCounter>(
    valid: &[&C],
    stored_first: ContributionDate,
    stored_last: ContributionDate,
    found: &mut Vec<Discrepancy>,
) {
    let Ok(span) = contribution_span(valid) else {
        return;
    };
    if span.first != stored_first {
        found.push(Discrepancy::FirstContributionDate {
            aggregated: span.first,
            stored: stored_first,
        });
    }
    if span.last != stored_last {
        found.push(Discrepancy::LastContributionDate {
            aggregated: span.last,
            stored: stored_last,
        });
    }
}

/// Accuracy is recomputed from the stored counts and skipped when nothing
/// was submitted.
fn check_accuracy(accepted: i64, submitted: i64, stored: f64, found: &mut Vec<Discrepancy>) {
    let Some(aggregated) = overall_accuracy(accepted, submitted) else {
        return;
    };
    if (aggregated - stored).abs() > ACCURACY_TOLERANCE {
        found.push(Discrepancy::OverallAccuracy { aggregated, stored });
    }
}

fn finish(
    model: &'static str,
    total_id: &str,
    discrepancies: Vec<Discrepancy>,
) -> Result<EntityId, ValidationReport> {
    if discrepancies.is_empty() {
        Ok(total_id.to_string())
    } else {
        Err(ValidationReport {
            model,
            total_id: total_id.to_string(),
            discrepancies,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
