//! Topics, stories and the topic-validity oracle.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::contribution::TopicCounter;
use crate::types::EntityId;

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A curriculum topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub id: EntityId,
    pub name: String,
    /// Raw reference objects, expected to look like `{"story_id": "..."}`.
    #[serde(default)]
    pub canonical_story_references: Vec<serde_json::Value>,
    /// Skills assigned to this topic.
    #[serde(default)]
    pub skill_ids: Vec<EntityId>,
}

/// A story belonging to a topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    pub id: EntityId,
    pub corresponding_topic_id: EntityId,
}

// ---------------------------------------------------------------------------
// TopicIndex
// ---------------------------------------------------------------------------

/// Set of topic ids that currently exist.
///
/// A counter row is valid only when its topic resolves here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicIndex {
    ids: HashSet<EntityId>,
}

impl TopicIndex {
    pub fn from_topics<'a, I>(topics: I) -> Self
    where
        I: IntoIterator<Item = &'a Topic>,
    {
        topics.into_iter().map(|t| t.id.clone()).collect()
    }

    pub fn contains(&self, topic_id: &str) -> bool {
        self.ids.contains(topic_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Keep the rows whose topic exists, preserving input order.
    ///
    /// Always builds a new list; the input is never modified.
    pub fn valid_rows<'a, C: TopicCounter>(&self, rows: &'a [C]) -> Vec<&'a C> {
        rows.iter().filter(|row| self.contains(row.topic_id())).collect()
    }
}

impl FromIterator<EntityId> for TopicIndex {
    fn from_iter<I: IntoIterator<Item = EntityId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::contribution::QuestionContribution;

    fn row(id: &str, topic_id: &str) -> QuestionContribution {
        let date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        QuestionContribution {
            id: id.into(),
            contributor_user_id: "user1".into(),
            topic_id: topic_id.into(),
            submitted_questions_count: 1,
            accepted_questions_count: 1,
            accepted_questions_without_reviewer_edits_count: 1,
            first_contribution_date: date,
            last_contribution_date: date,
        }
    }

    #[test]
    fn adjacent_invalid_rows_are_all_removed() {
        let index: TopicIndex = ["topic1".to_string()].into_iter().collect();
        let rows = vec![
            row("a", "gone1"),
            row("b", "gone2"),
            row("c", "topic1"),
            row("d", "gone3"),
        ];
        let valid = index.valid_rows(&rows);
        assert_eq!(valid.len(), 1);
        assert_eq!(valid[0].id, "c");
    }

    #[test]
    fn empty_topic_id_is_never_valid() {
        let index: TopicIndex = ["topic1".to_string()].into_iter().collect();
        let rows = vec![row("a", "")];
        assert!(index.valid_rows(&rows).is_empty());
    }

    #[test]
    fn index_from_topics_collects_ids() {
        let topics = vec![
            Topic {
                id: "t1".into(),
                name: "Fractions".into(),
                canonical_story_references: vec![],
                skill_ids: vec![],
            },
            Topic {
                id: "t2".into(),
                name: "Ratios".into(),
                canonical_story_references: vec![],
                skill_ids: vec![],
            },
        ];
        let index = TopicIndex::from_topics(&topics);
        assert_eq!(index.len(), 2);
        assert!(index.contains("t2"));
        assert!(!index.contains("t3"));
    }
}
