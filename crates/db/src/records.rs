//! [`Record`] bindings for the domain types.

use contribstats_core::contribution::{
    QuestionContribution, QuestionReview, TranslationContribution, TranslationReview,
};
use contribstats_core::opportunity::{
    ExplorationContext, ExplorationOpportunity, SkillOpportunity,
};
use contribstats_core::suggestion::Suggestion;
use contribstats_core::topic::{Story, Topic};
use contribstats_core::totals::{
    QuestionReviewerTotalContributionStats, QuestionSubmitterTotalContributionStats,
    TranslationReviewerTotalContributionStats, TranslationSubmitterTotalContributionStats,
};

use crate::store::{Record, RecordKind};

macro_rules! impl_record {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Record for $ty {
                const KIND: RecordKind = RecordKind::$kind;

                fn id(&self) -> &str {
                    &self.id
                }
            }
        )*
    };
}

impl_record! {
    Suggestion => Suggestion,
    TranslationContribution => TranslationContribution,
    TranslationReview => TranslationReview,
    QuestionContribution => QuestionContribution,
    QuestionReview => QuestionReview,
    TranslationSubmitterTotalContributionStats => TranslationSubmitterTotal,
    TranslationReviewerTotalContributionStats => TranslationReviewerTotal,
    QuestionSubmitterTotalContributionStats => QuestionSubmitterTotal,
    QuestionReviewerTotalContributionStats => QuestionReviewerTotal,
    Topic => Topic,
    Story => Story,
    ExplorationContext => ExplorationContext,
    ExplorationOpportunity => ExplorationOpportunity,
    SkillOpportunity => SkillOpportunity,
}
