//! Generate and audit-generate: rebuild all four total shapes from their
//! counters.
//!
//! Both jobs share the transform. Only `generate` writes the totals back;
//! the audit variant reports the same counts without touching the store.

use contribstats_core::aggregation::{AggregationError, Aggregator};
use contribstats_core::contribution::{
    QuestionContribution, QuestionReview, TranslationContribution, TranslationReview,
};
use contribstats_core::job_result::{count_results, JobRunResult};
use contribstats_core::opportunity::{ExplorationOpportunity, SkillOpportunity};
use contribstats_core::scoring::ScoringPolicy;
use contribstats_core::suggestion::Suggestion;
use contribstats_core::topic::{Topic, TopicIndex};
use contribstats_core::totals::{
    QuestionReviewerTotalContributionStats, QuestionSubmitterTotalContributionStats,
    TranslationReviewerTotalContributionStats, TranslationSubmitterTotalContributionStats,
};
use contribstats_db::RecordStore;

use super::{read, write, JobError, JobPhase, PhaseTracker};
use crate::dataflow::{co_group2, group_by};
use crate::shortlist::{
    question_suggestion_key, shortlist_questions, shortlist_translations,
    translation_suggestion_key,
};

pub const TRANSLATION_SUBMITTER_LABEL: &str = "Translation Submitter Models";
pub const TRANSLATION_REVIEWER_LABEL: &str = "Translation Reviewer Models";
pub const QUESTION_SUBMITTER_LABEL: &str = "Question Submitter Models";
pub const QUESTION_REVIEWER_LABEL: &str = "Question Reviewer Models";

// ---------------------------------------------------------------------------
// Read
// ---------------------------------------------------------------------------

/// Everything the generate transform needs, read once per run.
#[derive(Debug, Clone, Default)]
pub struct GenerateInputs {
    pub suggestions: Vec<Suggestion>,
    pub translation_contributions: Vec<TranslationContribution>,
    pub translation_reviews: Vec<TranslationReview>,
    pub question_contributions: Vec<QuestionContribution>,
    pub question_reviews: Vec<QuestionReview>,
    pub topics: Vec<Topic>,
    pub exploration_opportunities: Vec<ExplorationOpportunity>,
    pub skill_opportunities: Vec<SkillOpportunity>,
}

impl GenerateInputs {
    pub async fn load<S: RecordStore>(store: &S) -> Result<Self, JobError> {
        let (
            suggestions,
            translation_contributions,
            translation_reviews,
            question_contributions,
            question_reviews,
            topics,
            exploration_opportunities,
            skill_opportunities,
        ) = tokio::try_join!(
            read::<S, Suggestion>(store),
            read::<S, TranslationContribution>(store),
            read::<S, TranslationReview>(store),
            read::<S, QuestionContribution>(store),
            read::<S, QuestionReview>(store),
            read::<S, Topic>(store),
            read::<S, ExplorationOpportunity>(store),
            read::<S, SkillOpportunity>(store),
        )?;

        Ok(Self {
            suggestions,
            translation_contributions,
            translation_reviews,
            question_contributions,
            question_reviews,
            topics,
            exploration_opportunities,
            skill_opportunities,
        })
    }
}

// ---------------------------------------------------------------------------
// Transform
// ---------------------------------------------------------------------------

/// Per-key outcomes of one generate pass. Skipped keys are absent.
#[derive(Debug, Clone, Default)]
pub struct GeneratedTotals {
    pub translation_submitters:
        Vec<Result<TranslationSubmitterTotalContributionStats, AggregationError>>,
    pub translation_reviewers:
        Vec<Result<TranslationReviewerTotalContributionStats, AggregationError>>,
    pub question_submitters: Vec<Result<QuestionSubmitterTotalContributionStats, AggregationError>>,
    pub question_reviewers: Vec<Result<QuestionReviewerTotalContributionStats, AggregationError>>,
}

impl GeneratedTotals {
    pub fn errors(&self) -> impl Iterator<Item = &AggregationError> {
        let ts = self.translation_submitters.iter().filter_map(|r| r.as_ref().err());
        let tr = self.translation_reviewers.iter().filter_map(|r| r.as_ref().err());
        let qs = self.question_submitters.iter().filter_map(|r| r.as_ref().err());
        let qr = self.question_reviewers.iter().filter_map(|r| r.as_ref().err());
        ts.chain(tr).chain(qs).chain(qr)
    }

    /// Result entries for the four categories.
    pub fn results(&self) -> Vec<JobRunResult> {
        let mut results = count_results(
            TRANSLATION_SUBMITTER_LABEL,
            self.translation_submitters.iter().map(Result::as_ref),
        );
        results.extend(count_results(
            TRANSLATION_REVIEWER_LABEL,
            self.translation_reviewers.iter().map(Result::as_ref),
        ));
        results.extend(count_results(
            QUESTION_SUBMITTER_LABEL,
            self.question_submitters.iter().map(Result::as_ref),
        ));
        results.extend(count_results(
            QUESTION_REVIEWER_LABEL,
            self.question_reviewers.iter().map(Result::as_ref),
        ));
        results
    }
}

fn successes<T: Clone, E>(results: &[Result<T, E>]) -> Vec<T> {
    results.iter().filter_map(|r| r.as_ref().ok()).cloned().collect()
}

/// Build every total from `inputs`. Pure; per-key failures are values.
pub fn generate_totals(inputs: &GenerateInputs, policy: &ScoringPolicy) -> GeneratedTotals {
    let topics = TopicIndex::from_topics(&inputs.topics);
    let aggregator = Aggregator::new(policy, &topics);

    let translation_suggestions =
        shortlist_translations(&inputs.suggestions, &inputs.exploration_opportunities);
    let question_suggestions =
        shortlist_questions(&inputs.suggestions, &inputs.skill_opportunities);

    let translation_groups = co_group2(
        inputs
            .translation_contributions
            .iter()
            .filter(|c| !c.topic_id.is_empty())
            .cloned(),
        TranslationContribution::key,
        translation_suggestions,
        translation_suggestion_key,
    );
    let translation_submitters = translation_groups
        .iter()
        .filter_map(|(key, group)| {
            aggregator
                .translation_submitter(key, &group.first, &group.second)
                .transpose()
        })
        .collect();

    let translation_reviewers = group_by(
        inputs.translation_reviews.iter().cloned(),
        TranslationReview::key,
    )
    .iter()
    .filter_map(|(key, reviews)| aggregator.translation_reviewer(key, reviews).transpose())
    .collect();

    let question_groups = co_group2(
        inputs.question_contributions.iter().cloned(),
        QuestionContribution::key,
        question_suggestions,
        question_suggestion_key,
    );
    let question_submitters = question_groups
        .iter()
        .filter_map(|(key, group)| {
            aggregator
                .question_submitter(key, &group.first, &group.second)
                .transpose()
        })
        .collect();

    let question_reviewers = group_by(inputs.question_reviews.iter().cloned(), QuestionReview::key)
        .iter()
        .filter_map(|(key, reviews)| aggregator.question_reviewer(key, reviews).transpose())
        .collect();

    GeneratedTotals {
        translation_submitters,
        translation_reviewers,
        question_submitters,
        question_reviewers,
    }
}

// ---------------------------------------------------------------------------
// Job
// ---------------------------------------------------------------------------

pub(crate) async fn run<S: RecordStore>(
    store: &S,
    policy: &ScoringPolicy,
    phases: &mut PhaseTracker,
    persist: bool,
) -> Result<Vec<JobRunResult>, JobError> {
    phases.advance(JobPhase::Read);
    let inputs = GenerateInputs::load(store).await?;
    tracing::info!(
        suggestions = inputs.suggestions.len(),
        translation_contributions = inputs.translation_contributions.len(),
        question_contributions = inputs.question_contributions.len(),
        topics = inputs.topics.len(),
        "Loaded generate inputs"
    );

    phases.advance(JobPhase::Transform);
    let generated = generate_totals(&inputs, policy);
    for error in generated.errors() {
        tracing::warn!(error = %error, "Skipping total");
    }

    if persist {
        phases.advance(JobPhase::Write);
        write(store, &successes(&generated.translation_submitters)).await?;
        write(store, &successes(&generated.translation_reviewers)).await?;
        write(store, &successes(&generated.question_submitters)).await?;
        write(store, &successes(&generated.question_reviewers)).await?;
    }

    Ok(generated.results())
}
