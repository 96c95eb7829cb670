//! Audit topics whose canonical story references point at missing stories.

use std::collections::HashSet;

use contribstats_core::hanging_stories::{find_hanging_stories, HangingStoryReport};
use contribstats_core::job_result::JobRunResult;
use contribstats_core::topic::{Story, Topic};
use contribstats_core::types::EntityId;
use contribstats_db::RecordStore;

use super::{read, JobError, JobPhase, PhaseTracker};

/// One report per topic with at least one hanging reference, ordered by
/// topic id.
pub fn hanging_story_reports(topics: &[Topic], stories: &[Story]) -> Vec<HangingStoryReport> {
    let story_ids: HashSet<EntityId> = stories.iter().map(|s| s.id.clone()).collect();
    topics
        .iter()
        .filter_map(|topic| find_hanging_stories(topic, &story_ids))
        .collect()
}

pub(crate) async fn run<S: RecordStore>(
    store: &S,
    phases: &mut PhaseTracker,
) -> Result<Vec<JobRunResult>, JobError> {
    phases.advance(JobPhase::Read);
    let (topics, stories) =
        tokio::try_join!(read::<S, Topic>(store), read::<S, Story>(store))?;

    phases.advance(JobPhase::Transform);
    let reports = hanging_story_reports(&topics, &stories);
    tracing::info!(
        topics = topics.len(),
        hanging = reports.len(),
        "Checked canonical story references"
    );

    Ok(reports
        .iter()
        .map(|report| JobRunResult::stdout(report.to_string()))
        .collect())
}
