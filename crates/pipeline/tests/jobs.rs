//! Integration tests for the job runner against the in-memory store.
//!
//! Covers every job mode end to end:
//! - Generate builds, skips and persists totals; audit-generate never writes
//! - Generate is idempotent
//! - Validate reports valid, invalid and missing totals
//! - Audit-and-log always reports both logged counts
//! - Hanging story references are listed per topic

use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::json;

use contribstats_core::contribution::TranslationContribution;
use contribstats_core::opportunity::ExplorationOpportunity;
use contribstats_core::scoring::ScoringPolicy;
use contribstats_core::suggestion::{
    ReviewOutcome, Suggestion, SuggestionStatus, SuggestionType,
};
use contribstats_core::topic::{Story, Topic};
use contribstats_core::totals::TranslationSubmitterTotalContributionStats;
use contribstats_db::{MemoryStore, RecordKind, RecordStore};
use contribstats_pipeline::{JobError, JobKind, JobPhase, JobRunner};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn day(month: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, month, d).unwrap()
}

fn topic(id: &str) -> Topic {
    Topic {
        id: id.to_string(),
        name: format!("Topic {id}"),
        canonical_story_references: vec![],
        skill_ids: vec![],
    }
}

#[allow(clippy::too_many_arguments)]
fn contribution(
    id: &str,
    user: &str,
    topic_id: &str,
    submitted: i64,
    accepted: i64,
    accepted_without_edits: i64,
    rejected: i64,
    dates: Vec<NaiveDate>,
) -> TranslationContribution {
    TranslationContribution {
        id: id.to_string(),
        language_code: "hi".to_string(),
        contributor_user_id: user.to_string(),
        topic_id: topic_id.to_string(),
        submitted_translations_count: submitted,
        submitted_translation_word_count: submitted * 10,
        accepted_translations_count: accepted,
        accepted_translations_without_reviewer_edits_count: accepted_without_edits,
        accepted_translation_word_count: accepted * 10,
        rejected_translations_count: rejected,
        rejected_translation_word_count: rejected * 10,
        contribution_dates: dates,
    }
}

fn translation_suggestion(
    id: &str,
    author: &str,
    target_id: &str,
    status: SuggestionStatus,
    edited: bool,
    created_day: u32,
) -> Suggestion {
    Suggestion {
        id: id.to_string(),
        suggestion_type: SuggestionType::TranslateContent,
        target_type: "exploration".to_string(),
        target_id: target_id.to_string(),
        target_version_at_submission: 1,
        status,
        author_id: author.to_string(),
        final_reviewer_id: Some("reviewer1".to_string()),
        language_code: Some("hi".to_string()),
        edited_by_reviewer: edited,
        created_on: Utc.with_ymd_and_hms(2023, 1, created_day, 12, 0, 0).unwrap(),
    }
}

/// One contributor with three valid counters, one counter without a topic,
/// a pseudonymized contributor and four suggestions (one still in review).
async fn seeded_store() -> MemoryStore {
    let store = MemoryStore::new();
    store
        .upsert(&[topic("topic1"), topic("topic2"), topic("topic3")])
        .await
        .unwrap();
    store
        .upsert(&[
            contribution("tc1", "user1", "topic1", 2, 1, 1, 1, vec![day(3, 1)]),
            contribution("tc2", "user1", "topic2", 3, 2, 1, 1, vec![day(3, 5), day(3, 9)]),
            contribution("tc3", "user1", "topic3", 1, 1, 0, 0, vec![day(3, 3)]),
            contribution("tc4", "user1", "", 100, 100, 100, 0, vec![day(2, 1)]),
            contribution("tc5", "pid_deleted", "topic1", 4, 4, 4, 0, vec![day(3, 2)]),
        ])
        .await
        .unwrap();
    store
        .upsert(&[
            translation_suggestion("s1", "user1", "exp1", SuggestionStatus::Accepted, false, 1),
            translation_suggestion("s2", "user1", "exp1", SuggestionStatus::Accepted, true, 2),
            translation_suggestion("s3", "user1", "exp1", SuggestionStatus::Rejected, false, 3),
            translation_suggestion("s4", "user1", "exp1", SuggestionStatus::InReview, false, 4),
        ])
        .await
        .unwrap();
    store
        .upsert(&[ExplorationOpportunity {
            id: "exp1".to_string(),
            topic_id: "topic1".to_string(),
        }])
        .await
        .unwrap();
    store
}

fn runner(store: MemoryStore) -> JobRunner<MemoryStore> {
    JobRunner::new(store, ScoringPolicy::default()).unwrap()
}

async fn stored_total(store: &MemoryStore, id: &str) -> TranslationSubmitterTotalContributionStats {
    store
        .get_by_id::<TranslationSubmitterTotalContributionStats>(id)
        .await
        .unwrap()
        .expect("total should be stored")
}

// ---------------------------------------------------------------------------
// Test: generate aggregates valid counters and skips pseudonymized users
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_generate_builds_translation_total() {
    let runner = runner(seeded_store().await);

    let report = runner.run(JobKind::Generate).await.unwrap();
    assert_eq!(report.lines(), vec!["Translation Submitter Models SUCCESS: 1"]);
    assert_eq!(
        report.phases,
        vec![
            JobPhase::Configure,
            JobPhase::Read,
            JobPhase::Transform,
            JobPhase::Write,
            JobPhase::Emit
        ]
    );

    let total = stored_total(runner.store(), "hi.user1").await;
    assert_eq!(total.submitted_translations_count, 6);
    assert_eq!(total.submitted_translation_word_count, 60);
    assert_eq!(total.accepted_translations_count, 4);
    assert_eq!(total.accepted_translations_without_reviewer_edits_count, 2);
    assert_eq!(total.rejected_translations_count, 2);
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
    assert_eq!(total.first_contribution_date, day(3, 1));
    assert_eq!(total.last_contribution_date, day(3, 9));

    assert_eq!(
        runner
            .store()
            .live_count(RecordKind::TranslationSubmitterTotal)
            .await,
        1,
        "pseudonymized contributor must not get a total"
    );
}

// ---------------------------------------------------------------------------
// Test: audit-generate reports the same counts but writes nothing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_audit_generate_does_not_write() {
    let runner = runner(seeded_store().await);

    let report = runner.run(JobKind::AuditGenerate).await.unwrap();
    assert_eq!(report.lines(), vec!["Translation Submitter Models SUCCESS: 1"]);
    assert!(!report.phases.contains(&JobPhase::Write));
    assert_eq!(
        runner
            .store()
            .live_count(RecordKind::TranslationSubmitterTotal)
            .await,
        0
    );
}

// ---------------------------------------------------------------------------
// Test: generating twice yields identical documents
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_generate_is_idempotent() {
    let runner = runner(seeded_store().await);

    runner.run(JobKind::Generate).await.unwrap();
    let first: Vec<TranslationSubmitterTotalContributionStats> =
        runner.store().scan(false).await.unwrap();
    runner.run(JobKind::Generate).await.unwrap();
    let second: Vec<TranslationSubmitterTotalContributionStats> =
        runner.store().scan(false).await.unwrap();

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

// ---------------------------------------------------------------------------
// Test: validate accepts freshly generated totals
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_validate_after_generate_is_clean() {
    let runner = runner(seeded_store().await);
    runner.run(JobKind::Generate).await.unwrap();

    let report = runner.run(JobKind::Validate).await.unwrap();
    assert_eq!(
        report.lines(),
        vec!["Valid Translation Submitter Models SUCCESS: 1"]
    );
}

// ---------------------------------------------------------------------------
// Test: a zero-counter total without counters is valid
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_validate_zero_counter_total() {
    let store = MemoryStore::new();
    store
        .upsert(&[TranslationSubmitterTotalContributionStats {
            id: "hi.user2".to_string(),
            language_code: "hi".to_string(),
            contributor_id: "user2".to_string(),
            topic_ids_with_translation_submissions: vec![],
            recent_review_outcomes: vec![],
            recent_performance: 0,
            overall_accuracy: 0.0,
            submitted_translations_count: 0,
            submitted_translation_word_count: 0,
            accepted_translations_count: 0,
            accepted_translations_without_reviewer_edits_count: 0,
            accepted_translation_word_count: 0,
            rejected_translations_count: 0,
            rejected_translation_word_count: 0,
            first_contribution_date: day(1, 1),
            last_contribution_date: day(1, 1),
        }])
        .await
        .unwrap();

    let report = runner(store).run(JobKind::Validate).await.unwrap();
    assert_eq!(
        report.lines(),
        vec!["Valid Translation Submitter Models SUCCESS: 1"]
    );
}

// ---------------------------------------------------------------------------
// Test: a stored total missing a topic yields exactly one discrepancy line
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_validate_reports_missing_topic_id() {
    let runner = runner(seeded_store().await);
    runner.run(JobKind::Generate).await.unwrap();

    let mut total = stored_total(runner.store(), "hi.user1").await;
    total
        .topic_ids_with_translation_submissions
        .retain(|id| id != "topic2");
    runner.store().upsert(&[total]).await.unwrap();

    let report = runner.run(JobKind::Validate).await.unwrap();
    let lines = report.lines();
    assert!(lines.contains(&"Invalid Total Translation Submitter Models FAILED: 1".to_string()));
    assert!(lines.contains(
        &"Validation failed for TranslationSubmitterTotalContributionStats hi.user1:\n\
          -> missing topic_ids {topic2} in total stats"
            .to_string()
    ));
    assert!(!lines.iter().any(|l| l.starts_with("Valid ")));
}

// ---------------------------------------------------------------------------
// Test: counters without a total produce a missing-total report
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_validate_reports_missing_total() {
    let store = MemoryStore::new();
    store.upsert(&[topic("topic1")]).await.unwrap();
    store
        .upsert(&[
            contribution("tc1", "user1", "topic1", 1, 1, 1, 0, vec![day(3, 1)]),
            contribution("tc2", "user1", "topic1", 2, 0, 0, 2, vec![day(3, 2)]),
        ])
        .await
        .unwrap();

    let report = runner(store).run(JobKind::Validate).await.unwrap();
    assert_eq!(
        report.lines(),
        vec![
            "Missing Total Translation Submitter Models FAILED: 1".to_string(),
            "Missing TranslationSubmitterTotalContributionStats for key hi.user1:\n\
             -> TranslationContribution:\n\
             --tc1\n\
             --tc2\n\
             -> Suggestion:\n\
             --None"
                .to_string(),
        ]
    );
}

// ---------------------------------------------------------------------------
// Test: audit-and-log always reports both counts
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_audit_and_log_on_empty_store() {
    let report = runner(MemoryStore::new())
        .run(JobKind::AuditAndLog)
        .await
        .unwrap();
    assert_eq!(
        report.lines(),
        vec![
            "LOGGED QUESTION SUGGESTION COUNT SUCCESS: 0",
            "LOGGED TRANSLATION SUGGESTION COUNT SUCCESS: 0"
        ]
    );
}

#[tokio::test]
async fn test_audit_and_log_dumps_unlinked_suggestion() {
    let store = MemoryStore::new();
    store
        .upsert(&[translation_suggestion(
            "s9",
            "user3",
            "exp_without_context",
            SuggestionStatus::Accepted,
            false,
            5,
        )])
        .await
        .unwrap();

    let report = runner(store).run(JobKind::AuditAndLog).await.unwrap();
    let lines = report.lines();
    assert!(lines.contains(&"LOGGED TRANSLATION SUGGESTION COUNT SUCCESS: 1".to_string()));
    assert!(lines.contains(&"LOGGED QUESTION SUGGESTION COUNT SUCCESS: 0".to_string()));

    let dump = lines
        .iter()
        .find(|l| l.starts_with("<====TRANSLATION_CONTRIBUTION====>"))
        .expect("translation dump");
    assert!(dump.contains("suggestion_id: s9,"));
    assert!(dump.contains("{topic_id: None, problem: no_exp_context_model},"));
    assert!(dump.contains("exp_opportunity_model_exists: false,"));
}

// ---------------------------------------------------------------------------
// Test: hanging story references
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_audit_hanging_stories() {
    let store = MemoryStore::new();
    let mut broken = topic("topic1");
    broken.canonical_story_references = vec![
        json!({"story_id": "story1"}),
        json!({"story_id": "gone"}),
        json!(5),
    ];
    let mut healthy = topic("topic2");
    healthy.canonical_story_references = vec![json!({"story_id": "story1"})];
    store.upsert(&[broken, healthy]).await.unwrap();
    store
        .upsert(&[Story {
            id: "story1".to_string(),
            corresponding_topic_id: "topic1".to_string(),
        }])
        .await
        .unwrap();

    let report = runner(store).run(JobKind::AuditHangingStories).await.unwrap();
    assert_eq!(
        report.lines(),
        vec![
            "Topic with ID: topic1 has hanging story references: gone, \
             INVALID_REFERENCE (malformed entry)."
        ]
    );
}

// ---------------------------------------------------------------------------
// Test: configuration errors
// ---------------------------------------------------------------------------

#[test]
fn test_unknown_job_name_is_rejected() {
    assert!("generate_everything".parse::<JobKind>().is_err());
    assert_eq!(
        "validate_total_contribution_stats".parse::<JobKind>().unwrap(),
        JobKind::Validate
    );
}

#[test]
fn test_invalid_policy_is_rejected() {
    let policy = ScoringPolicy {
        recent_outcomes_limit: 0,
        ..ScoringPolicy::default()
    };
    let result = JobRunner::new(MemoryStore::new(), policy);
    assert!(matches!(result, Err(JobError::Config(_))));
}
