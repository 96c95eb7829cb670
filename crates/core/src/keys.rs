//! Identity keys shared by counters, suggestions and totals.
//!
//! Translation dimensions are keyed by `(language, user)`; question
//! dimensions by user alone. A key's [`Display`](std::fmt::Display) form is
//! the id of the total record it maps to.

use std::fmt;

use crate::suggestion::is_pseudonymized;

/// Behaviour common to every grouping key.
pub trait StatsKey: Clone + Ord + fmt::Display {
    /// The contributor or reviewer id carried by the key.
    fn user_id(&self) -> &str;

    /// Keys of deleted users are excluded from aggregate maintenance.
    fn is_pseudonymized(&self) -> bool {
        is_pseudonymized(self.user_id())
    }
}

/// `(language_code, user_id)` key for translation dimensions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TranslationKey {
    pub language_code: String,
    pub user_id: String,
}

impl TranslationKey {
    pub fn new(language_code: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            language_code: language_code.into(),
            user_id: user_id.into(),
        }
    }
}

impl StatsKey for TranslationKey {
    fn user_id(&self) -> &str {
        &self.user_id
    }
}

impl fmt::Display for TranslationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.language_code, self.user_id)
    }
}

/// User-id key for question dimensions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QuestionKey(pub String);

impl QuestionKey {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self(user_id.into())
    }
}

impl StatsKey for QuestionKey {
    fn user_id(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
