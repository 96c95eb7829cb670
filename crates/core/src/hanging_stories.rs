//! Detection of topics whose canonical story references point nowhere.

use std::collections::HashSet;
use std::fmt;

use serde_json::Value;

use crate::topic::Topic;
use crate::types::EntityId;

/// Reported for references that are not objects or have no `story_id`.
pub const MALFORMED_REFERENCE: &str = "INVALID_REFERENCE (malformed entry)";

/// A topic with at least one dangling story reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HangingStoryReport {
    pub topic_id: EntityId,
    pub references: Vec<String>,
}

impl fmt::Display for HangingStoryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Topic with ID: {} has hanging story references: {}.",
            self.topic_id,
            self.references.join(", ")
        )
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "NoneType",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

/// Classify one canonical story reference. `None` means the story exists.
fn classify_reference(reference: &Value, story_ids: &HashSet<EntityId>) -> Option<String> {
    let Some(story_id) = reference.as_object().and_then(|obj| obj.get("story_id")) else {
        return Some(MALFORMED_REFERENCE.to_string());
    };
    match story_id {
        Value::String(id) if story_ids.contains(id) => None,
        Value::String(id) => Some(id.clone()),
        other => Some(format!(
            "INVALID_REFERENCE (non-string story_id: {})",
            json_type_name(other)
        )),
    }
}

/// Check one topic against the set of existing story ids.
pub fn find_hanging_stories(topic: &Topic, story_ids: &HashSet<EntityId>) -> Option<HangingStoryReport> {
    let references: Vec<String> = topic
        .canonical_story_references
        .iter()
        .filter_map(|reference| classify_reference(reference, story_ids))
        .collect();
    if references.is_empty() {
        return None;
    }
    Some(HangingStoryReport {
        topic_id: topic.id.clone(),
        references,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn stories() -> HashSet<EntityId> {
        ["story1".to_string(), "story2".to_string()].into_iter().collect()
    }

    fn topic(references: Vec<Value>) -> Topic {
        Topic {
            id: "topic1".into(),
            name: "Fractions".into(),
            canonical_story_references: references,
            skill_ids: vec![],
        }
    }

    #[test]
    fn topic_with_existing_stories_is_clean() {
        let t = topic(vec![json!({"story_id": "story1"}), json!({"story_id": "story2"})]);
        assert_eq!(find_hanging_stories(&t, &stories()), None);
    }

    #[test]
    fn missing_and_malformed_references_are_reported_in_order() {
        let t = topic(vec![
            json!({"story_id": "story1"}),
            json!({"story_id": "story_gone"}),
            json!("not an object"),
            json!({"story_is_published": true}),
            json!({"story_id": 42}),
            json!({"story_id": null}),
        ]);
        let report = find_hanging_stories(&t, &stories()).unwrap();
        assert_eq!(
            report.references,
            vec![
                "story_gone",
                MALFORMED_REFERENCE,
                MALFORMED_REFERENCE,
                "INVALID_REFERENCE (non-string story_id: int)",
                "INVALID_REFERENCE (non-string story_id: NoneType)",
            ]
        );
    }

    #[test]
    fn report_message_lists_references() {
        let report = HangingStoryReport {
            topic_id: "topic1".into(),
            references: vec!["a".into(), "b".into()],
        };
        assert_eq!(
            report.to_string(),
            "Topic with ID: topic1 has hanging story references: a, b."
        );
    }
}
