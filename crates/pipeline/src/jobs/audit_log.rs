//! Audit-and-log: find suggestions whose counter row cannot be traced.
//!
//! Suggestions are filtered by type only. Opportunity rows are looked up
//! for each logged entry but never used to drop suggestions.

use contribstats_core::audit::{
    audit_question_linkage, audit_translation_linkage, tally_problems, LinkageAudit,
    LinkageSnapshot,
};
use contribstats_core::contribution::{QuestionContribution, TranslationContribution};
use contribstats_core::job_result::JobRunResult;
use contribstats_core::opportunity::{
    ExplorationContext, ExplorationOpportunity, SkillOpportunity,
};
use contribstats_core::suggestion::Suggestion;
use contribstats_core::topic::{Story, Topic, TopicIndex};
use contribstats_db::RecordStore;

use super::{read, JobError, JobPhase, PhaseTracker};
use crate::dataflow::co_group2;
use crate::shortlist::{question_suggestion_key, translation_suggestion_key};

pub const LOGGED_TRANSLATION_LABEL: &str = "LOGGED TRANSLATION SUGGESTION COUNT";
pub const LOGGED_QUESTION_LABEL: &str = "LOGGED QUESTION SUGGESTION COUNT";

#[derive(Debug, Clone, Default)]
pub struct AuditInputs {
    pub suggestions: Vec<Suggestion>,
    pub translation_contributions: Vec<TranslationContribution>,
    pub question_contributions: Vec<QuestionContribution>,
    pub topics: Vec<Topic>,
    pub stories: Vec<Story>,
    pub exploration_contexts: Vec<ExplorationContext>,
    pub exploration_opportunities: Vec<ExplorationOpportunity>,
    pub skill_opportunities: Vec<SkillOpportunity>,
}

impl AuditInputs {
    pub async fn load<S: RecordStore>(store: &S) -> Result<Self, JobError> {
        let (
            suggestions,
            translation_contributions,
            question_contributions,
            topics,
            stories,
            exploration_contexts,
            exploration_opportunities,
            skill_opportunities,
        ) = tokio::try_join!(
            read::<S, Suggestion>(store),
            read::<S, TranslationContribution>(store),
            read::<S, QuestionContribution>(store),
            read::<S, Topic>(store),
            read::<S, Story>(store),
            read::<S, ExplorationContext>(store),
            read::<S, ExplorationOpportunity>(store),
            read::<S, SkillOpportunity>(store),
        )?;

        Ok(Self {
            suggestions,
            translation_contributions,
            question_contributions,
            topics,
            stories,
            exploration_contexts,
            exploration_opportunities,
            skill_opportunities,
        })
    }
}

/// Keys with at least one logged suggestion, per dimension.
#[derive(Debug, Clone, Default)]
pub struct LinkageAudits {
    pub translation: Vec<LinkageAudit>,
    pub question: Vec<LinkageAudit>,
}

impl LinkageAudits {
    pub fn logged_translations(&self) -> usize {
        self.translation.iter().map(LinkageAudit::count).sum()
    }

    pub fn logged_questions(&self) -> usize {
        self.question.iter().map(LinkageAudit::count).sum()
    }

    /// Both totals, always present, followed by one dump per key.
    pub fn results(&self) -> Vec<JobRunResult> {
        let mut results = vec![
            JobRunResult::success(LOGGED_TRANSLATION_LABEL, self.logged_translations() as u64),
            JobRunResult::success(LOGGED_QUESTION_LABEL, self.logged_questions() as u64),
        ];
        results.extend(
            self.translation
                .iter()
                .chain(&self.question)
                .map(|audit| JobRunResult::stdout(audit.to_string())),
        );
        results
    }
}

pub fn audit_linkage(inputs: &AuditInputs) -> LinkageAudits {
    let topics = TopicIndex::from_topics(&inputs.topics);
    let snapshot = LinkageSnapshot::new(
        &inputs.exploration_contexts,
        &inputs.stories,
        &inputs.topics,
        &inputs.exploration_opportunities,
        &inputs.skill_opportunities,
    );

    let translation = co_group2(
        inputs
            .translation_contributions
            .iter()
            .filter(|c| !c.topic_id.is_empty())
            .cloned(),
        TranslationContribution::key,
        inputs.suggestions.iter().filter(|s| s.is_translation()).cloned(),
        translation_suggestion_key,
    )
    .values()
    .filter_map(|group| audit_translation_linkage(&group.first, &group.second, &topics, &snapshot))
    .collect();

    let question = co_group2(
        inputs.question_contributions.iter().cloned(),
        QuestionContribution::key,
        inputs.suggestions.iter().filter(|s| s.is_question()).cloned(),
        question_suggestion_key,
    )
    .values()
    .filter_map(|group| audit_question_linkage(&group.first, &group.second, &topics, &snapshot))
    .collect();

    LinkageAudits {
        translation,
        question,
    }
}

pub(crate) async fn run<S: RecordStore>(
    store: &S,
    phases: &mut PhaseTracker,
) -> Result<Vec<JobRunResult>, JobError> {
    phases.advance(JobPhase::Read);
    let inputs = AuditInputs::load(store).await?;

    phases.advance(JobPhase::Transform);
    let audits = audit_linkage(&inputs);
    for (problem, count) in tally_problems(audits.translation.iter().chain(&audits.question)) {
        tracing::info!(problem, count, "Logged suggestions");
    }

    Ok(audits.results())
}
