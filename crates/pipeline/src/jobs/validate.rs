//! Validate stored submitter totals against their counters.
//!
//! Totals, counters and shortlisted suggestions are joined per key. A key
//! with no stored total is reported as missing; every stored total is then
//! recomputed and compared field by field.

use std::collections::BTreeMap;

use contribstats_core::contribution::{
    QuestionContribution, TopicCounter, TranslationContribution,
};
use contribstats_core::job_result::JobRunResult;
use contribstats_core::keys::StatsKey;
use contribstats_core::opportunity::{ExplorationOpportunity, SkillOpportunity};
use contribstats_core::scoring::ScoringPolicy;
use contribstats_core::suggestion::Suggestion;
use contribstats_core::topic::{Topic, TopicIndex};
use contribstats_core::totals::{
    QuestionSubmitterTotalContributionStats, TranslationSubmitterTotalContributionStats,
};
use contribstats_core::types::EntityId;
use contribstats_core::validation::{
    check_missing_total, MissingTotalReport, ValidationGroup, ValidationReport, Validator,
};
use contribstats_db::RecordStore;

use super::{read, JobError, JobPhase, PhaseTracker};
use crate::dataflow::{co_group3, CoGrouped3};
use crate::shortlist::{
    question_suggestion_key, shortlist_questions, shortlist_translations,
    translation_suggestion_key,
};

pub const TRANSLATION_SUBMITTER_LABEL: &str = "Translation Submitter Models";
pub const QUESTION_SUBMITTER_LABEL: &str = "Question Submitter Models";

// ---------------------------------------------------------------------------
// Read
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct ValidateInputs {
    pub translation_totals: Vec<TranslationSubmitterTotalContributionStats>,
    pub question_totals: Vec<QuestionSubmitterTotalContributionStats>,
    pub translation_contributions: Vec<TranslationContribution>,
    pub question_contributions: Vec<QuestionContribution>,
    pub suggestions: Vec<Suggestion>,
    pub topics: Vec<Topic>,
    pub exploration_opportunities: Vec<ExplorationOpportunity>,
    pub skill_opportunities: Vec<SkillOpportunity>,
}

impl ValidateInputs {
    pub async fn load<S: RecordStore>(store: &S) -> Result<Self, JobError> {
        let (
            translation_totals,
            question_totals,
            translation_contributions,
            question_contributions,
            suggestions,
            topics,
            exploration_opportunities,
            skill_opportunities,
        ) = tokio::try_join!(
            read::<S, TranslationSubmitterTotalContributionStats>(store),
            read::<S, QuestionSubmitterTotalContributionStats>(store),
            read::<S, TranslationContribution>(store),
            read::<S, QuestionContribution>(store),
            read::<S, Suggestion>(store),
            read::<S, Topic>(store),
            read::<S, ExplorationOpportunity>(store),
            read::<S, SkillOpportunity>(store),
        )?;

        Ok(Self {
            translation_totals,
            question_totals,
            translation_contributions,
            question_contributions,
            suggestions,
            topics,
            exploration_opportunities,
            skill_opportunities,
        })
    }
}

// ---------------------------------------------------------------------------
// Transform
// ---------------------------------------------------------------------------

/// Outcome of validating one dimension.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DimensionOutcome {
    /// Ids of totals that matched their recomputation.
    pub valid: Vec<EntityId>,
    pub invalid: Vec<ValidationReport>,
    pub missing: Vec<MissingTotalReport>,
}

impl DimensionOutcome {
    /// Counts per category, followed by every report.
    pub fn results(&self, label: &str) -> Vec<JobRunResult> {
        let mut results = Vec::new();
        if !self.valid.is_empty() {
            results.push(JobRunResult::success(
                format!("Valid {label}"),
                self.valid.len() as u64,
            ));
        }
        if !self.missing.is_empty() {
            results.push(JobRunResult::failure_count(
                format!("Missing Total {label}"),
                self.missing.len() as u64,
            ));
            results.extend(self.missing.iter().map(|r| JobRunResult::stderr(r.to_string())));
        }
        if !self.invalid.is_empty() {
            results.push(JobRunResult::failure_count(
                format!("Invalid Total {label}"),
                self.invalid.len() as u64,
            ));
            results.extend(self.invalid.iter().map(|r| JobRunResult::stderr(r.to_string())));
        }
        results
    }
}

fn validate_dimension<K, T, C, F>(
    groups: BTreeMap<K, CoGrouped3<T, C, Suggestion>>,
    total_model: &'static str,
    contribution_model: &'static str,
    check: F,
) -> DimensionOutcome
where
    K: StatsKey,
    C: TopicCounter,
    F: Fn(&T, &[C], &[Suggestion]) -> Result<EntityId, ValidationReport>,
{
    let mut outcome = DimensionOutcome::default();
    for (key, grouped) in groups {
        let group = ValidationGroup {
            totals: grouped.first,
            contributions: grouped.second,
            suggestions: grouped.third,
        };
        match check_missing_total(&key, group, total_model, contribution_model) {
            None => {}
            Some(Err(report)) => outcome.missing.push(report),
            Some(Ok(group)) => {
                for total in &group.totals {
                    match check(total, &group.contributions, &group.suggestions) {
                        Ok(id) => outcome.valid.push(id),
                        Err(report) => outcome.invalid.push(report),
                    }
                }
            }
        }
    }
    outcome
}

/// Validation outcomes for both submitter dimensions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationOutcomes {
    pub translation: DimensionOutcome,
    pub question: DimensionOutcome,
}

impl ValidationOutcomes {
    pub fn results(&self) -> Vec<JobRunResult> {
        let mut results = self.translation.results(TRANSLATION_SUBMITTER_LABEL);
        results.extend(self.question.results(QUESTION_SUBMITTER_LABEL));
        results
    }
}

pub fn validate_totals(inputs: &ValidateInputs, policy: &ScoringPolicy) -> ValidationOutcomes {
    let topics = TopicIndex::from_topics(&inputs.topics);
    let validator = Validator::new(policy, &topics);

    let translation_groups = co_group3(
        inputs.translation_totals.iter().cloned(),
        TranslationSubmitterTotalContributionStats::key,
        inputs.translation_contributions.iter().cloned(),
        TranslationContribution::key,
        shortlist_translations(&inputs.suggestions, &inputs.exploration_opportunities),
        translation_suggestion_key,
    );
    let translation = validate_dimension(
        translation_groups,
        TranslationSubmitterTotalContributionStats::MODEL_NAME,
        TranslationContribution::MODEL_NAME,
        |total, contributions, suggestions| {
            validator.translation_submitter(total, contributions, suggestions)
        },
    );

    let question_groups = co_group3(
        inputs.question_totals.iter().cloned(),
        QuestionSubmitterTotalContributionStats::key,
        inputs.question_contributions.iter().cloned(),
        QuestionContribution::key,
        shortlist_questions(&inputs.suggestions, &inputs.skill_opportunities),
        question_suggestion_key,
    );
    let question = validate_dimension(
        question_groups,
        QuestionSubmitterTotalContributionStats::MODEL_NAME,
        QuestionContribution::MODEL_NAME,
        |total, contributions, suggestions| {
            validator.question_submitter(total, contributions, suggestions)
        },
    );

    ValidationOutcomes {
        translation,
        question,
    }
}

// ---------------------------------------------------------------------------
// Job
// ---------------------------------------------------------------------------

pub(crate) async fn run<S: RecordStore>(
    store: &S,
    policy: &ScoringPolicy,
    phases: &mut PhaseTracker,
) -> Result<Vec<JobRunResult>, JobError> {
    phases.advance(JobPhase::Read);
    let inputs = ValidateInputs::load(store).await?;

    phases.advance(JobPhase::Transform);
    let outcomes = validate_totals(&inputs, policy);
    for dimension in [&outcomes.translation, &outcomes.question] {
        for report in &dimension.missing {
            tracing::warn!(key = %report.key, model = report.total_model, "Missing total");
        }
        for report in &dimension.invalid {
            tracing::warn!(
                id = %report.total_id,
                discrepancies = report.discrepancies.len(),
                "Invalid total"
            );
        }
    }

    Ok(outcomes.results())
}
