//! Opportunity and exploration-linkage records.
//!
//! An opportunity marks a target (exploration or skill) as open for
//! contribution. Suggestions whose target has no live opportunity do not
//! count toward totals.

use serde::{Deserialize, Serialize};

use crate::types::EntityId;

/// An exploration open for translation. `id` is the exploration id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplorationOpportunity {
    pub id: EntityId,
    pub topic_id: EntityId,
}

/// A skill open for question contributions. `id` is the skill id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillOpportunity {
    pub id: EntityId,
    pub skill_description: String,
}

/// Links an exploration to the story that contains it. `id` is the
/// exploration id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplorationContext {
    pub id: EntityId,
    pub story_id: Option<EntityId>,
}
