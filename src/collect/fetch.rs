//! Fetch execution - effectful operations
//!
//! Runs a [`FetchPlan`] against the platform, one query at a time, and
//! concatenates the results in plan order. The first failing query aborts the
//! whole run.

use super::plan::{FetchPlan, FetchStep};
use crate::error::Result;
use crate::platform::PlatformService;
use crate::types::{DraftPolicy, MergeRequest, MergeRequestQuery};
use async_trait::async_trait;
use tracing::debug;

/// Progress reporting during fetches
#[async_trait]
pub trait FetchProgress: Send + Sync {
    /// Called before a step issues its queries
    async fn on_step_started(&self, step: &FetchStep);

    /// Called after a step returned `count` merge requests
    async fn on_step_finished(&self, step: &FetchStep, count: usize);
}

/// Progress sink that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

#[async_trait]
impl FetchProgress for NoopProgress {
    async fn on_step_started(&self, _step: &FetchStep) {}

    async fn on_step_finished(&self, _step: &FetchStep, _count: usize) {}
}

async fn run_queries(
    platform: &dyn PlatformService,
    queries: impl IntoIterator<Item = MergeRequestQuery>,
) -> Result<Vec<MergeRequest>> {
    let mut results = Vec::new();
    for query in queries {
        let found = platform.list_merge_requests(&query).await?;
        debug!(%query, count = found.len(), "query finished");
        results.extend(found);
    }
    Ok(results)
}

/// Open merge requests in a group authored by any of `usernames`
pub async fn fetch_by_group_authors(
    platform: &dyn PlatformService,
    group_id: &str,
    usernames: &[String],
    policy: DraftPolicy,
) -> Result<Vec<MergeRequest>> {
    run_queries(
        platform,
        usernames
            .iter()
            .map(|username| MergeRequestQuery::group_author(group_id, username, policy)),
    )
    .await
}

/// Open merge requests in a project authored by any of `usernames`
pub async fn fetch_by_project_authors(
    platform: &dyn PlatformService,
    project: &str,
    usernames: &[String],
    policy: DraftPolicy,
) -> Result<Vec<MergeRequest>> {
    run_queries(
        platform,
        usernames
            .iter()
            .map(|username| MergeRequestQuery::project_author(project, username, policy)),
    )
    .await
}

/// Open merge requests in a group with `user_id` as reviewer
pub async fn fetch_by_reviewer(
    platform: &dyn PlatformService,
    group_id: &str,
    user_id: u64,
    policy: DraftPolicy,
) -> Result<Vec<MergeRequest>> {
    run_queries(
        platform,
        [MergeRequestQuery::group_reviewer(group_id, user_id, policy)],
    )
    .await
}

/// Open merge requests in a group already approved by `user_id`
pub async fn fetch_approved_by(
    platform: &dyn PlatformService,
    group_id: &str,
    user_id: u64,
    policy: DraftPolicy,
) -> Result<Vec<MergeRequest>> {
    run_queries(
        platform,
        [MergeRequestQuery::group_approved_by(group_id, user_id, policy)],
    )
    .await
}

/// Execute the fetch plan (EFFECTFUL)
///
/// Results are appended in step order with no deduplication or filtering.
pub async fn execute_fetch_plan(
    platform: &dyn PlatformService,
    plan: &FetchPlan,
    policy: DraftPolicy,
    progress: &dyn FetchProgress,
) -> Result<Vec<MergeRequest>> {
    let mut aggregated = Vec::new();

    for step in &plan.steps {
        progress.on_step_started(step).await;

        let found = match step {
            FetchStep::GroupAuthors {
                group_id,
                usernames,
            } => fetch_by_group_authors(platform, group_id, usernames, policy).await?,
            FetchStep::ProjectAuthors { project, usernames } => {
                fetch_by_project_authors(platform, project, usernames, policy).await?
            }
            FetchStep::Reviewer { group_id, user_id } => {
                fetch_by_reviewer(platform, group_id, *user_id, policy).await?
            }
        };

        progress.on_step_finished(step, found.len()).await;
        aggregated.extend(found);
    }

    Ok(aggregated)
}
