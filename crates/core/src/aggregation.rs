//! Aggregation of per-topic counters into contribution totals.
//!
//! Every function here is pure: given all counter rows and suggestions that
//! share a key, it produces exactly one total for that key, skips the key
//! (pseudonymized users), or returns an [`AggregationError`] describing why
//! the total could not be built. Errors are per-key values so that one bad
//! key never aborts its siblings.
//!
//! Steps, shared by all four total shapes:
//!
//! 1. Drop counter rows whose topic no longer exists ([`TopicIndex`]).
//! 2. Build the bounded recent-outcome window from the suggestions
//!    (submitters only).
//! 3. Derive `recent_performance` and `overall_accuracy` (submitters only).
//! 4. Sum counts, collect topic ids and take the min/max contribution dates.

use std::collections::BTreeSet;

use crate::contribution::{
    QuestionContribution, QuestionReview, TopicCounter, TranslationContribution,
    TranslationReview,
};
use crate::keys::{QuestionKey, StatsKey, TranslationKey};
use crate::scoring::{overall_accuracy, ScoringPolicy};
use crate::suggestion::{Suggestion, SuggestionStatus};
use crate::topic::TopicIndex;
use crate::totals::{
    QuestionReviewerTotalContributionStats, QuestionSubmitterTotalContributionStats,
    TranslationReviewerTotalContributionStats, TranslationSubmitterTotalContributionStats,
};
use crate::types::{ContributionDate, EntityId};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a derived field could not be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ComputeFailure {
    #[error("no valid contributions to aggregate")]
    NoValidContributions,

    #[error("no contribution dates to aggregate")]
    NoContributionDates,

    #[error("accuracy is undefined with zero submissions")]
    NoSubmissions,
}

/// A per-key failure to build a total.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AggregationError {
    #[error(
        "Unable to create total translation contribution stats for contributor \
         id({contributor_id}) and language code({language_code}): {cause}"
    )]
    TranslationSubmitter {
        contributor_id: EntityId,
        language_code: String,
        cause: ComputeFailure,
    },

    #[error(
        "Unable to create total translation review stats for reviewer \
         id({reviewer_id}) and language code({language_code}): {cause}"
    )]
    TranslationReviewer {
        reviewer_id: EntityId,
        language_code: String,
        cause: ComputeFailure,
    },

    #[error("Unable to create total question contribution stats for contributor id({contributor_id}): {cause}")]
    QuestionSubmitter {
        contributor_id: EntityId,
        cause: ComputeFailure,
    },

    #[error("Unable to create total question review stats for reviewer id({reviewer_id}): {cause}")]
    QuestionReviewer {
        reviewer_id: EntityId,
        cause: ComputeFailure,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Earliest and latest contribution date across a set of counter rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContributionSpan {
    pub first: ContributionDate,
    pub last: ContributionDate,
}

/// Compute the contribution span of `rows`.
///
/// Fails when `rows` is empty or when none of the rows carries a date.
pub fn contribution_span<C: TopicCounter>(rows: &[&C]) -> Result<ContributionSpan, ComputeFailure> {
    if rows.is_empty() {
        return Err(ComputeFailure::NoValidContributions);
    }
    let first = rows.iter().filter_map(|r| r.first_date()).min();
    let last = rows.iter().filter_map(|r| r.last_date()).max();
    match (first, last) {
        (Some(first), Some(last)) => Ok(ContributionSpan { first, last }),
        _ => Err(ComputeFailure::NoContributionDates),
    }
}

/// Deduplicated, sorted topic ids of `rows`.
pub fn topic_ids<C: TopicCounter>(rows: &[&C]) -> Vec<EntityId> {
    rows.iter()
        .map(|r| r.topic_id().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Sum one numeric field across `rows`.
pub fn sum_field<C>(rows: &[&C], field: impl Fn(&C) -> i64) -> i64 {
    rows.iter().map(|r| field(*r)).sum()
}

/// Number of rejected suggestions, all time.
pub fn rejected_suggestion_count(suggestions: &[Suggestion]) -> i64 {
    suggestions
        .iter()
        .filter(|s| s.status == SuggestionStatus::Rejected)
        .count() as i64
}

// ---------------------------------------------------------------------------
// Aggregator
// ---------------------------------------------------------------------------

/// Builds totals against a fixed scoring policy and topic snapshot.
#[derive(Debug, Clone, Copy)]
pub struct Aggregator<'a> {
    policy: &'a ScoringPolicy,
    topics: &'a TopicIndex,
}

impl<'a> Aggregator<'a> {
    pub fn new(policy: &'a ScoringPolicy, topics: &'a TopicIndex) -> Self {
        Self { policy, topics }
    }

    /// Total for one `(language, contributor)` translation submitter.
    ///
    /// Returns `Ok(None)` for pseudonymized contributors.
    pub fn translation_submitter(
        &self,
        key: &TranslationKey,
        contributions: &[TranslationContribution],
        suggestions: &[Suggestion],
    ) -> Result<Option<TranslationSubmitterTotalContributionStats>, AggregationError> {
        if key.is_pseudonymized() {
            return Ok(None);
        }
        let fail = |cause| AggregationError::TranslationSubmitter {
            contributor_id: key.user_id.clone(),
            language_code: key.language_code.clone(),
            cause,
        };

        let recent = self.policy.recent_outcomes(suggestions);
        let recent_performance = self.policy.recent_performance(&recent.counts);

        let valid = self.topics.valid_rows(contributions);
        let span = contribution_span(&valid).map_err(fail)?;

        let submitted_translations_count = sum_field(&valid, |c| c.submitted_translations_count);
        let accepted_translations_count = sum_field(&valid, |c| c.accepted_translations_count);
        let overall_accuracy =
            overall_accuracy(accepted_translations_count, submitted_translations_count)
                .ok_or_else(|| fail(ComputeFailure::NoSubmissions))?;

        Ok(Some(TranslationSubmitterTotalContributionStats {
            id: key.to_string(),
            language_code: key.language_code.clone(),
            contributor_id: key.user_id.clone(),
            topic_ids_with_translation_submissions: topic_ids(&valid),
            recent_review_outcomes: recent.outcomes,
            recent_performance,
            overall_accuracy,
            submitted_translations_count,
            submitted_translation_word_count: sum_field(&valid, |c| {
                c.submitted_translation_word_count
            }),
            accepted_translations_count,
            accepted_translations_without_reviewer_edits_count: sum_field(&valid, |c| {
                c.accepted_translations_without_reviewer_edits_count
            }),
            accepted_translation_word_count: sum_field(&valid, |c| {
                c.accepted_translation_word_count
            }),
            rejected_translations_count: sum_field(&valid, |c| c.rejected_translations_count),
            rejected_translation_word_count: sum_field(&valid, |c| {
                c.rejected_translation_word_count
            }),
            first_contribution_date: span.first,
            last_contribution_date: span.last,
        }))
    }

    /// Total for one `(language, reviewer)` translation reviewer.
    pub fn translation_reviewer(
        &self,
        key: &TranslationKey,
        reviews: &[TranslationReview],
    ) -> Result<Option<TranslationReviewerTotalContributionStats>, AggregationError> {
        if key.is_pseudonymized() {
            return Ok(None);
        }
        let valid = self.topics.valid_rows(reviews);
        let span = contribution_span(&valid).map_err(|cause| {
            AggregationError::TranslationReviewer {
                reviewer_id: key.user_id.clone(),
                language_code: key.language_code.clone(),
                cause,
            }
        })?;

        let reviewed_translations_count = sum_field(&valid, |r| r.reviewed_translations_count);
        let accepted_translations_count = sum_field(&valid, |r| r.accepted_translations_count);

        Ok(Some(TranslationReviewerTotalContributionStats {
            id: key.to_string(),
            language_code: key.language_code.clone(),
            contributor_id: key.user_id.clone(),
            topic_ids_with_translation_reviews: topic_ids(&valid),
            reviewed_translations_count,
            accepted_translations_count,
            accepted_translations_with_reviewer_edits_count: sum_field(&valid, |r| {
                r.accepted_translations_with_reviewer_edits_count
            }),
            accepted_translation_word_count: sum_field(&valid, |r| {
                r.accepted_translation_word_count
            }),
            rejected_translations_count: reviewed_translations_count - accepted_translations_count,
            first_contribution_date: span.first,
            last_contribution_date: span.last,
        }))
    }

    /// Total for one question submitter.
    ///
    /// `rejected_questions_count` counts every rejected suggestion, not just
    /// the ones inside the recent window.
    pub fn question_submitter(
        &self,
        key: &QuestionKey,
        contributions: &[QuestionContribution],
        suggestions: &[Suggestion],
    ) -> Result<Option<QuestionSubmitterTotalContributionStats>, AggregationError> {
        if key.is_pseudonymized() {
            return Ok(None);
        }
        let fail = |cause| AggregationError::QuestionSubmitter {
            contributor_id: key.0.clone(),
            cause,
        };

        let recent = self.policy.recent_outcomes(suggestions);
        let recent_performance = self.policy.recent_performance(&recent.counts);

        let valid = self.topics.valid_rows(contributions);
        let span = contribution_span(&valid).map_err(fail)?;

        let submitted_questions_count = sum_field(&valid, |c| c.submitted_questions_count);
        let accepted_questions_count = sum_field(&valid, |c| c.accepted_questions_count);
        let overall_accuracy = overall_accuracy(accepted_questions_count, submitted_questions_count)
            .ok_or_else(|| fail(ComputeFailure::NoSubmissions))?;

        Ok(Some(QuestionSubmitterTotalContributionStats {
            id: key.to_string(),
            contributor_id: key.0.clone(),
            topic_ids_with_question_submissions: topic_ids(&valid),
            recent_review_outcomes: recent.outcomes,
            recent_performance,
            overall_accuracy,
            submitted_questions_count,
            accepted_questions_count,
            accepted_questions_without_reviewer_edits_count: sum_field(&valid, |c| {
                c.accepted_questions_without_reviewer_edits_count
            }),
            rejected_questions_count: rejected_suggestion_count(suggestions),
            first_contribution_date: span.first,
            last_contribution_date: span.last,
        }))
    }

    /// Total for one question reviewer.
    pub fn question_reviewer(
        &self,
        key: &QuestionKey,
        reviews: &[QuestionReview],
    ) -> Result<Option<QuestionReviewerTotalContributionStats>, AggregationError> {
        if key.is_pseudonymized() {
            return Ok(None);
        }
        let valid = self.topics.valid_rows(reviews);
        let span = contribution_span(&valid).map_err(|cause| AggregationError::QuestionReviewer {
            reviewer_id: key.0.clone(),
            cause,
        })?;

        let reviewed_questions_count = sum_field(&valid, |r| r.reviewed_questions_count);
        let accepted_questions_count = sum_field(&valid, |r| r.accepted_questions_count);

        Ok(Some(QuestionReviewerTotalContributionStats {
            id: key.to_string(),
            contributor_id: key.0.clone(),
            topic_ids_with_question_reviews: topic_ids(&valid),
            reviewed_questions_count,
            accepted_questions_count,
            accepted_questions_with_reviewer_edits_count: sum_field(&valid, |r| {
                r.accepted_questions_with_reviewer_edits_count
            }),
            rejected_questions_count: reviewed_questions_count - accepted_questions_count,
            first_contribution_date: span.first,
            last_contribution_date: span.last,
        }))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{Duration, NaiveDate, TimeZone, Utc};
    use proptest::prelude::*;

    use super::*;
    use crate::suggestion::{ReviewOutcome, SuggestionType};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn topics(ids: &[&str]) -> TopicIndex {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn translation(id: &str, topic_id: &str, submitted: i64, accepted: i64) -> TranslationContribution {
        TranslationContribution {
            id: id.into(),
            language_code: "hi".into(),
            contributor_user_id: "user1".into(),
            topic_id: topic_id.into(),
            submitted_translations_count: submitted,
            submitted_translation_word_count: submitted * 10,
            accepted_translations_count: accepted,
            accepted_translations_without_reviewer_edits_count: accepted,
            accepted_translation_word_count: accepted * 10,
            rejected_translations_count: submitted - accepted,
            rejected_translation_word_count: (submitted - accepted) * 10,
            contribution_dates: vec![date(2022, 5, 2), date(2023, 4, 2)],
        }
    }

    fn suggestion(index: i64, status: SuggestionStatus, edited: bool) -> Suggestion {
        Suggestion {
            id: format!("s{index}"),
            suggestion_type: SuggestionType::TranslateContent,
            target_type: "exploration".into(),
            target_id: "exp1".into(),
            target_version_at_submission: 1,
            status,
            author_id: "user1".into(),
            final_reviewer_id: None,
            language_code: Some("hi".into()),
            edited_by_reviewer: edited,
            created_on: Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap()
                + Duration::hours(index),
        }
    }

    fn question(id: &str, topic_id: &str, first: NaiveDate, last: NaiveDate) -> QuestionContribution {
        QuestionContribution {
            id: id.into(),
            contributor_user_id: "user1".into(),
            topic_id: topic_id.into(),
            submitted_questions_count: 4,
            accepted_questions_count: 3,
            accepted_questions_without_reviewer_edits_count: 2,
            first_contribution_date: first,
            last_contribution_date: last,
        }
    }

    // -- translation submitter --

    #[test]
    fn translation_submitter_scenario() {
        let policy = ScoringPolicy::default();
        let index = topics(&["topic1", "topic2", "topic3"]);
        let contributions = vec![
            translation("c1", "topic1", 2, 1),
            translation("c2", "topic2", 3, 2),
            translation("c3", "topic3", 1, 1),
            translation("c4", "", 7, 7),
        ];
        let suggestions = vec![
            suggestion(0, SuggestionStatus::Accepted, false),
            suggestion(1, SuggestionStatus::Accepted, true),
            suggestion(2, SuggestionStatus::Rejected, false),
            suggestion(3, SuggestionStatus::InReview, false),
        ];

        let total = Aggregator::new(&policy, &index)
            .translation_submitter(&TranslationKey::new("hi", "user1"), &contributions, &suggestions)
            .unwrap()
            .unwrap();

        assert_eq!(total.id, "hi.user1");
        assert_eq!(total.submitted_translations_count, 6);
        assert_eq!(total.accepted_translations_count, 4);
        assert_eq!(total.submitted_translation_word_count, 60);
        assert_eq!(
            total.topic_ids_with_translation_submissions,
            vec!["topic1", "topic2", "topic3"]
        );
        assert_eq!(
            total.recent_review_outcomes,
            vec![
                ReviewOutcome::Accepted,
                ReviewOutcome::AcceptedWithEdits,
                ReviewOutcome::Rejected
            ]
        );
        assert_eq!(total.recent_performance, 0);
        assert_eq!(total.overall_accuracy, 66.67);
        assert_eq!(total.first_contribution_date, date(2022, 5, 2));
        assert_eq!(total.last_contribution_date, date(2023, 4, 2));
    }

    #[test]
    fn translation_submitter_without_valid_contributions_is_an_error() {
        let policy = ScoringPolicy::default();
        let index = topics(&[]);
        let result = Aggregator::new(&policy, &index).translation_submitter(
            &TranslationKey::new("hi", "user1"),
            &[translation("c1", "deleted_topic", 1, 1)],
            &[suggestion(0, SuggestionStatus::Rejected, false)],
        );
        assert_matches!(
            result,
            Err(AggregationError::TranslationSubmitter {
                cause: ComputeFailure::NoValidContributions,
                ..
            })
        );
    }

    #[test]
    fn error_message_names_contributor_and_language() {
        let policy = ScoringPolicy::default();
        let index = topics(&[]);
        let err = Aggregator::new(&policy, &index)
            .translation_submitter(&TranslationKey::new("hi", "user1"), &[], &[])
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unable to create total translation contribution stats for contributor id(user1) \
             and language code(hi): no valid contributions to aggregate"
        );
    }

    #[test]
    fn translation_submitter_without_dates_is_an_error() {
        let policy = ScoringPolicy::default();
        let index = topics(&["topic1"]);
        let mut row = translation("c1", "topic1", 1, 1);
        row.contribution_dates.clear();
        let result = Aggregator::new(&policy, &index).translation_submitter(
            &TranslationKey::new("hi", "user1"),
            &[row],
            &[],
        );
        assert_matches!(
            result,
            Err(AggregationError::TranslationSubmitter {
                cause: ComputeFailure::NoContributionDates,
                ..
            })
        );
    }

    #[test]
    fn translation_submitter_with_zero_submissions_is_an_error() {
        let policy = ScoringPolicy::default();
        let index = topics(&["topic1"]);
        let result = Aggregator::new(&policy, &index).translation_submitter(
            &TranslationKey::new("hi", "user1"),
            &[translation("c1", "topic1", 0, 0)],
            &[],
        );
        assert_matches!(
            result,
            Err(AggregationError::TranslationSubmitter {
                cause: ComputeFailure::NoSubmissions,
                ..
            })
        );
    }

    #[test]
    fn pseudonymized_contributors_are_skipped() {
        let policy = ScoringPolicy::default();
        let index = topics(&["topic1"]);
        let aggregator = Aggregator::new(&policy, &index);
        let key = TranslationKey::new("hi", "pid_user1");
        assert_matches!(aggregator.translation_submitter(&key, &[], &[]), Ok(None));
        assert_matches!(aggregator.translation_reviewer(&key, &[]), Ok(None));
        let qkey = QuestionKey::new("pid_user1");
        assert_matches!(aggregator.question_submitter(&qkey, &[], &[]), Ok(None));
        assert_matches!(aggregator.question_reviewer(&qkey, &[]), Ok(None));
    }

    #[test]
    fn duplicate_topic_ids_are_collapsed() {
        let policy = ScoringPolicy::default();
        let index = topics(&["topic1"]);
        let total = Aggregator::new(&policy, &index)
            .translation_submitter(
                &TranslationKey::new("hi", "user1"),
                &[translation("c1", "topic1", 1, 1), translation("c2", "topic1", 1, 0)],
                &[],
            )
            .unwrap()
            .unwrap();
        assert_eq!(total.topic_ids_with_translation_submissions, vec!["topic1"]);
        assert_eq!(total.submitted_translations_count, 2);
        assert_eq!(total.overall_accuracy, 50.0);
    }

    // -- translation reviewer --

    #[test]
    fn translation_reviewer_derives_rejections() {
        let policy = ScoringPolicy::default();
        let index = topics(&["topic1", "topic2"]);
        let review = |id: &str, topic: &str, first, last| TranslationReview {
            id: id.into(),
            language_code: "hi".into(),
            reviewer_user_id: "rev1".into(),
            topic_id: topic.into(),
            reviewed_translations_count: 5,
            reviewed_translation_word_count: 50,
            accepted_translations_count: 3,
            accepted_translations_with_reviewer_edits_count: 1,
            accepted_translation_word_count: 30,
            first_contribution_date: first,
            last_contribution_date: last,
        };
        let reviews = vec![
            review("r1", "topic1", date(2022, 1, 1), date(2022, 6, 1)),
            review("r2", "topic2", date(2021, 3, 1), date(2022, 2, 1)),
            review("r3", "missing", date(2020, 1, 1), date(2024, 1, 1)),
        ];
        let total = Aggregator::new(&policy, &index)
            .translation_reviewer(&TranslationKey::new("hi", "rev1"), &reviews)
            .unwrap()
            .unwrap();
        assert_eq!(total.reviewed_translations_count, 10);
        assert_eq!(total.accepted_translations_count, 6);
        assert_eq!(total.rejected_translations_count, 4);
        assert_eq!(total.first_contribution_date, date(2021, 3, 1));
        assert_eq!(total.last_contribution_date, date(2022, 6, 1));
    }

    #[test]
    fn translation_reviewer_without_rows_is_an_error() {
        let policy = ScoringPolicy::default();
        let index = topics(&["topic1"]);
        assert_matches!(
            Aggregator::new(&policy, &index).translation_reviewer(&TranslationKey::new("hi", "rev1"), &[]),
            Err(AggregationError::TranslationReviewer { .. })
        );
    }

    // -- question submitter --

    #[test]
    fn question_submitter_counts_all_rejections() {
        let policy = ScoringPolicy {
            recent_outcomes_limit: 1,
            ..ScoringPolicy::default()
        };
        let index = topics(&["topic1"]);
        let contributions = vec![question("q1", "topic1", date(2022, 1, 1), date(2022, 3, 1))];
        let suggestions = vec![
            suggestion(0, SuggestionStatus::Rejected, false),
            suggestion(1, SuggestionStatus::Rejected, false),
            suggestion(2, SuggestionStatus::Accepted, false),
        ];
        let total = Aggregator::new(&policy, &index)
            .question_submitter(&QuestionKey::new("user1"), &contributions, &suggestions)
            .unwrap()
            .unwrap();
        assert_eq!(total.id, "user1");
        assert_eq!(total.recent_review_outcomes, vec![ReviewOutcome::Accepted]);
        assert_eq!(total.recent_performance, 1);
        assert_eq!(total.rejected_questions_count, 2);
        assert_eq!(total.overall_accuracy, 75.0);
    }

    #[test]
    fn question_submitter_without_valid_contributions_is_an_error() {
        let policy = ScoringPolicy::default();
        let index = topics(&["topic1"]);
        let err = Aggregator::new(&policy, &index)
            .question_submitter(&QuestionKey::new("user1"), &[], &[])
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unable to create total question contribution stats for contributor id(user1): \
             no valid contributions to aggregate"
        );
    }

    // -- question reviewer --

    #[test]
    fn question_reviewer_aggregates_valid_rows() {
        let policy = ScoringPolicy::default();
        let index = topics(&["topic1"]);
        let reviews = vec![QuestionReview {
            id: "qr1".into(),
            reviewer_user_id: "rev1".into(),
            topic_id: "topic1".into(),
            reviewed_questions_count: 7,
            accepted_questions_count: 5,
            accepted_questions_with_reviewer_edits_count: 2,
            first_contribution_date: date(2022, 1, 1),
            last_contribution_date: date(2022, 2, 1),
        }];
        let total = Aggregator::new(&policy, &index)
            .question_reviewer(&QuestionKey::new("rev1"), &reviews)
            .unwrap()
            .unwrap();
        assert_eq!(total.topic_ids_with_question_reviews, vec!["topic1"]);
        assert_eq!(total.rejected_questions_count, 2);
    }

    // -- properties --

    fn arb_rows() -> impl Strategy<Value = Vec<(u8, i64, i64)>> {
        prop::collection::vec((0u8..6, 1i64..50, 0i64..50), 1..20)
    }

    proptest! {
        #[test]
        fn sums_cover_exactly_the_valid_rows(rows in arb_rows()) {
            // Topics 0..3 exist, 3..6 do not.
            let index: TopicIndex = (0..3).map(|t| format!("topic{t}")).collect();
            let contributions: Vec<TranslationContribution> = rows
                .iter()
                .enumerate()
                .map(|(i, (topic, submitted, accepted))| {
                    translation(&format!("c{i}"), &format!("topic{topic}"), *submitted, (*accepted).min(*submitted))
                })
                .collect();
            let expected_valid: Vec<&TranslationContribution> =
                contributions.iter().filter(|c| index.contains(&c.topic_id)).collect();

            let policy = ScoringPolicy::default();
            let result = Aggregator::new(&policy, &index)
                .translation_submitter(&TranslationKey::new("hi", "user1"), &contributions, &[]);

            if expected_valid.is_empty() {
                prop_assert!(result.is_err());
            } else {
                let total = result.unwrap().unwrap();
                let expected_submitted: i64 =
                    expected_valid.iter().map(|c| c.submitted_translations_count).sum();
                let expected_words: i64 =
                    expected_valid.iter().map(|c| c.rejected_translation_word_count).sum();
                prop_assert_eq!(total.submitted_translations_count, expected_submitted);
                prop_assert_eq!(total.rejected_translation_word_count, expected_words);
                for topic_id in &total.topic_ids_with_translation_submissions {
                    prop_assert!(index.contains(topic_id));
                }
            }
        }
    }
}
