//! Linkage diagnostics for suggestions that have no matching counter row.
//!
//! For every suggestion of a key, the chain suggestion → exploration
//! context → story → topic (translations) or suggestion → skill → topics
//! (questions) is followed, and the suggestion is logged when the chain
//! breaks or ends in a topic for which the key has no valid counter.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;

use crate::contribution::TopicCounter;
use crate::opportunity::{ExplorationContext, ExplorationOpportunity, SkillOpportunity};
use crate::suggestion::Suggestion;
use crate::topic::{Story, Topic, TopicIndex};
use crate::types::EntityId;

pub const TRANSLATION_DUMP_HEADER: &str = "<====TRANSLATION_CONTRIBUTION====>";
pub const QUESTION_DUMP_HEADER: &str = "<====QUESTION_CONTRIBUTION====>";

// ---------------------------------------------------------------------------
// LinkageProblem
// ---------------------------------------------------------------------------

/// Where the linkage chain of a suggestion broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkageProblem {
    /// The target exploration has no context row, or the row has no story.
    NoExpContextModel,
    /// The context names a story that does not exist.
    NoStoryModel,
    /// The resolved topic has no valid counter row for this key.
    NoStatsModel,
}

impl LinkageProblem {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkageProblem::NoExpContextModel => "no_exp_context_model",
            LinkageProblem::NoStoryModel => "no_story_model",
            LinkageProblem::NoStatsModel => "no_stats_model",
        }
    }
}

impl fmt::Display for LinkageProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// LinkageSnapshot
// ---------------------------------------------------------------------------

/// Lookup tables built once per run from the linkage records.
#[derive(Debug, Clone, Default)]
pub struct LinkageSnapshot {
    story_by_exploration: HashMap<EntityId, EntityId>,
    topic_by_story: HashMap<EntityId, EntityId>,
    topics_by_skill: HashMap<EntityId, BTreeSet<EntityId>>,
    exploration_opportunities: HashSet<EntityId>,
    skill_opportunities: HashSet<EntityId>,
}

impl LinkageSnapshot {
    pub fn new(
        contexts: &[ExplorationContext],
        stories: &[Story],
        topics: &[Topic],
        exploration_opportunities: &[ExplorationOpportunity],
        skill_opportunities: &[SkillOpportunity],
    ) -> Self {
        let story_by_exploration = contexts
            .iter()
            .filter_map(|c| c.story_id.clone().map(|story_id| (c.id.clone(), story_id)))
            .collect();
        let topic_by_story = stories
            .iter()
            .map(|s| (s.id.clone(), s.corresponding_topic_id.clone()))
            .collect();

        let mut topics_by_skill: HashMap<EntityId, BTreeSet<EntityId>> = HashMap::new();
        for topic in topics {
            for skill_id in &topic.skill_ids {
                topics_by_skill
                    .entry(skill_id.clone())
                    .or_default()
                    .insert(topic.id.clone());
            }
        }

        Self {
            story_by_exploration,
            topic_by_story,
            topics_by_skill,
            exploration_opportunities: exploration_opportunities.iter().map(|o| o.id.clone()).collect(),
            skill_opportunities: skill_opportunities.iter().map(|o| o.id.clone()).collect(),
        }
    }

    fn story_for(&self, exploration_id: &str) -> Option<&EntityId> {
        self.story_by_exploration.get(exploration_id)
    }

    fn topic_for(&self, story_id: &str) -> Option<&EntityId> {
        self.topic_by_story.get(story_id)
    }

    fn topics_with_skill(&self, skill_id: &str) -> impl Iterator<Item = &EntityId> {
        self.topics_by_skill.get(skill_id).into_iter().flatten()
    }
}

// ---------------------------------------------------------------------------
// Logged entries
// ---------------------------------------------------------------------------

/// Which opportunity table was consulted for a logged entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpportunityKind {
    Exploration,
    Skill,
}

/// One suggestion whose linkage chain broke.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggedSuggestion {
    pub suggestion: Suggestion,
    pub topic_id: Option<EntityId>,
    pub problem: LinkageProblem,
    pub opportunity_kind: OpportunityKind,
    pub opportunity_exists: bool,
}

impl fmt::Display for LoggedSuggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.suggestion;
        writeln!(f, "{{")?;
        writeln!(f, "suggestion_id: {},", s.id)?;
        writeln!(f, "suggestion_type: {},", s.suggestion_type)?;
        writeln!(f, "target_type: {},", s.target_type)?;
        writeln!(f, "target_id: {},", s.target_id)?;
        writeln!(f, "target_version_at_submission: {},", s.target_version_at_submission)?;
        writeln!(f, "status: {},", s.status)?;
        if self.opportunity_kind == OpportunityKind::Exploration {
            writeln!(f, "language_code: {},", s.language_code.as_deref().unwrap_or("None"))?;
        }
        writeln!(f, "corresponding_topic_id: [")?;
        writeln!(
            f,
            "{{topic_id: {}, problem: {}}},",
            self.topic_id.as_deref().unwrap_or("None"),
            self.problem
        )?;
        writeln!(f, "],")?;
        let label = match self.opportunity_kind {
            OpportunityKind::Exploration => "exp_opportunity_model_exists",
            OpportunityKind::Skill => "skill_opportunity_model_exists",
        };
        writeln!(f, "{label}: {},", self.opportunity_exists)?;
        writeln!(f, "}},")
    }
}

/// Logged suggestions for one key, rendered under a dump header.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkageAudit {
    pub header: &'static str,
    pub entries: Vec<LoggedSuggestion>,
}

impl LinkageAudit {
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    fn into_option(self) -> Option<Self> {
        if self.entries.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

impl fmt::Display for LinkageAudit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header)?;
        for entry in &self.entries {
            write!(f, "{entry}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Audits
// ---------------------------------------------------------------------------

/// Topic ids of the key's counters that are non-empty and exist.
fn valid_topic_ids<C: TopicCounter>(counters: &[C], topics: &TopicIndex) -> HashSet<EntityId> {
    topics
        .valid_rows(counters)
        .into_iter()
        .map(|c| c.topic_id().to_string())
        .collect()
}

/// Audit the translation suggestions of one `(language, contributor)` key.
///
/// Returns `None` when every suggestion links to a valid counter row.
pub fn audit_translation_linkage<C: TopicCounter>(
    contributions: &[C],
    suggestions: &[Suggestion],
    topics: &TopicIndex,
    snapshot: &LinkageSnapshot,
) -> Option<LinkageAudit> {
    let valid = valid_topic_ids(contributions, topics);
    let entries = suggestions
        .iter()
        .filter_map(|s| {
            let (topic_id, problem) = match snapshot.story_for(&s.target_id) {
                None => (None, LinkageProblem::NoExpContextModel),
                Some(story_id) => match snapshot.topic_for(story_id) {
                    None => (None, LinkageProblem::NoStoryModel),
                    Some(topic_id) if valid.contains(topic_id) => return None,
                    Some(topic_id) => (Some(topic_id.clone()), LinkageProblem::NoStatsModel),
                },
            };
            Some(LoggedSuggestion {
                suggestion: s.clone(),
                topic_id,
                problem,
                opportunity_kind: OpportunityKind::Exploration,
                opportunity_exists: snapshot.exploration_opportunities.contains(&s.target_id),
            })
        })
        .collect();

    LinkageAudit {
        header: TRANSLATION_DUMP_HEADER,
        entries,
    }
    .into_option()
}

/// Audit the question suggestions of one contributor.
///
/// A suggestion is logged once per topic that carries its skill but has no
/// valid counter row.
pub fn audit_question_linkage<C: TopicCounter>(
    contributions: &[C],
    suggestions: &[Suggestion],
    topics: &TopicIndex,
    snapshot: &LinkageSnapshot,
) -> Option<LinkageAudit> {
    let valid = valid_topic_ids(contributions, topics);
    let mut entries = Vec::new();
    for s in suggestions {
        for topic_id in snapshot.topics_with_skill(&s.target_id) {
            if valid.contains(topic_id) {
                continue;
            }
            entries.push(LoggedSuggestion {
                suggestion: s.clone(),
                topic_id: Some(topic_id.clone()),
                problem: LinkageProblem::NoStatsModel,
                opportunity_kind: OpportunityKind::Skill,
                opportunity_exists: snapshot.skill_opportunities.contains(&s.target_id),
            });
        }
    }

    LinkageAudit {
        header: QUESTION_DUMP_HEADER,
        entries,
    }
    .into_option()
}

/// Problem tallies across many audits, used for log summaries.
pub fn tally_problems<'a, I>(audits: I) -> BTreeMap<&'static str, usize>
where
    I: IntoIterator<Item = &'a LinkageAudit>,
{
    let mut tally = BTreeMap::new();
    for audit in audits {
        for entry in &audit.entries {
            *tally.entry(entry.problem.as_str()).or_insert(0) += 1;
        }
    }
    tally
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
