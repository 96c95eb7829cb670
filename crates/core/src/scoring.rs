//! Recent-outcome window and derived scores.
//!
//! `recent_performance` weighs the outcomes inside the bounded window;
//! `overall_accuracy` is the all-time accepted/submitted percentage. The
//! weights are policy constants and can be overridden through
//! [`ScoringPolicy`].

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::suggestion::{ReviewOutcome, Suggestion};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum number of outcomes kept in `recent_review_outcomes`.
pub const RECENT_REVIEW_OUTCOMES_LIMIT: usize = 100;

/// Weight of an accepted suggestion in `recent_performance`.
pub const ACCEPTED_WEIGHT: i64 = 1;

/// Weight of a suggestion accepted with reviewer edits.
pub const ACCEPTED_WITH_EDITS_WEIGHT: i64 = 1;

/// Penalty subtracted per rejected suggestion.
pub const REJECTED_PENALTY: i64 = 2;

/// Number of decimal places kept on `overall_accuracy`.
pub const ACCURACY_DECIMAL_PLACES: i32 = 2;

// ---------------------------------------------------------------------------
// ScoringPolicy
// ---------------------------------------------------------------------------

/// Window size and weights used to derive scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringPolicy {
    pub recent_outcomes_limit: usize,
    pub accepted_weight: i64,
    pub accepted_with_edits_weight: i64,
    pub rejected_penalty: i64,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            recent_outcomes_limit: RECENT_REVIEW_OUTCOMES_LIMIT,
            accepted_weight: ACCEPTED_WEIGHT,
            accepted_with_edits_weight: ACCEPTED_WITH_EDITS_WEIGHT,
            rejected_penalty: REJECTED_PENALTY,
        }
    }
}

impl ScoringPolicy {
    /// Reject a zero-sized window and negative weights.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.recent_outcomes_limit == 0 {
            return Err(CoreError::Validation(
                "recent_outcomes_limit must be at least 1".to_string(),
            ));
        }
        for (name, value) in [
            ("accepted_weight", self.accepted_weight),
            ("accepted_with_edits_weight", self.accepted_with_edits_weight),
            ("rejected_penalty", self.rejected_penalty),
        ] {
            if value < 0 {
                return Err(CoreError::Validation(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Build the bounded outcome window for a set of suggestions.
    ///
    /// Suggestions are ordered by `created_on` (stable for ties) before
    /// mapping, in-review suggestions are dropped, and only the most recent
    /// `recent_outcomes_limit` outcomes are kept, oldest first.
    pub fn recent_outcomes<'a, I>(&self, suggestions: I) -> RecentOutcomes
    where
        I: IntoIterator<Item = &'a Suggestion>,
    {
        let mut ordered: Vec<&Suggestion> = suggestions.into_iter().collect();
        ordered.sort_by_key(|s| s.created_on);

        let mut outcomes: Vec<ReviewOutcome> =
            ordered.iter().filter_map(|s| s.review_outcome()).collect();
        if outcomes.len() > self.recent_outcomes_limit {
            let excess = outcomes.len() - self.recent_outcomes_limit;
            outcomes.drain(..excess);
        }

        let counts = OutcomeCounts::tally(&outcomes);
        RecentOutcomes { outcomes, counts }
    }

    /// `accepted + accepted_with_edits - 2 * rejected` under the default weights.
    pub fn recent_performance(&self, counts: &OutcomeCounts) -> i64 {
        counts.accepted * self.accepted_weight
            + counts.accepted_with_edits * self.accepted_with_edits_weight
            - counts.rejected * self.rejected_penalty
    }
}

// ---------------------------------------------------------------------------
// Outcome window
// ---------------------------------------------------------------------------

/// Occurrences of each outcome label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeCounts {
    pub accepted: i64,
    pub accepted_with_edits: i64,
    pub rejected: i64,
}

impl OutcomeCounts {
    pub fn tally(outcomes: &[ReviewOutcome]) -> Self {
        let mut counts = Self::default();
        for outcome in outcomes {
            match outcome {
                ReviewOutcome::Accepted => counts.accepted += 1,
                ReviewOutcome::AcceptedWithEdits => counts.accepted_with_edits += 1,
                ReviewOutcome::Rejected => counts.rejected += 1,
            }
        }
        counts
    }
}

/// The chronologically latest outcomes of a user, with their counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentOutcomes {
    pub outcomes: Vec<ReviewOutcome>,
    pub counts: OutcomeCounts,
}

// ---------------------------------------------------------------------------
// Accuracy
// ---------------------------------------------------------------------------

/// `round(accepted / submitted * 100, 2)`, or `None` when nothing was
/// submitted.
pub fn overall_accuracy(accepted: i64, submitted: i64) -> Option<f64> {
    if submitted == 0 {
        return None;
    }
    let ratio = accepted as f64 / submitted as f64 * 100.0;
    Some(round_to(ratio, ACCURACY_DECIMAL_PLACES))
}

/// Round to `places` decimal places, ties to even.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round_ties_even() / factor
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
