//! Opportunity shortlisting of suggestions.
//!
//! Only suggestions whose target is still open for contribution count
//! toward generated and validated totals.

use std::collections::HashSet;

use contribstats_core::keys::{QuestionKey, TranslationKey};
use contribstats_core::opportunity::{ExplorationOpportunity, SkillOpportunity};
use contribstats_core::suggestion::Suggestion;

/// Translation suggestions whose exploration has a live opportunity.
pub fn shortlist_translations(
    suggestions: &[Suggestion],
    opportunities: &[ExplorationOpportunity],
) -> Vec<Suggestion> {
    let open: HashSet<&str> = opportunities.iter().map(|o| o.id.as_str()).collect();
    suggestions
        .iter()
        .filter(|s| s.is_translation() && open.contains(s.target_id.as_str()))
        .cloned()
        .collect()
}

/// Question suggestions whose skill has a live opportunity.
pub fn shortlist_questions(
    suggestions: &[Suggestion],
    opportunities: &[SkillOpportunity],
) -> Vec<Suggestion> {
    let open: HashSet<&str> = opportunities.iter().map(|o| o.id.as_str()).collect();
    suggestions
        .iter()
        .filter(|s| s.is_question() && open.contains(s.target_id.as_str()))
        .cloned()
        .collect()
}

/// `(language, author)` key of a translation suggestion.
pub fn translation_suggestion_key(suggestion: &Suggestion) -> TranslationKey {
    TranslationKey::new(
        suggestion.language_code.clone().unwrap_or_default(),
        &suggestion.author_id,
    )
}

/// Author key of a question suggestion.
pub fn question_suggestion_key(suggestion: &Suggestion) -> QuestionKey {
    QuestionKey::new(&suggestion.author_id)
}
