//! Merge request collection
//!
//! Three-phase pattern:
//! 1. Plan - decide which queries to issue (pure, testable)
//! 2. Fetch - run the queries and aggregate results (effectful)
//! 3. Filter - deduplicate, then apply the exclusions in fixed order

mod fetch;
mod filter;
mod plan;

pub use fetch::{
    FetchProgress, NoopProgress, execute_fetch_plan, fetch_approved_by, fetch_by_group_authors,
    fetch_by_project_authors, fetch_by_reviewer,
};
pub use filter::{dedupe, exclude_approved, exclude_ready};
pub use plan::{FetchPlan, FetchStep, plan_fetches};

use crate::config::Config;
use crate::error::Result;
use crate::platform::PlatformService;
use crate::selection::SelectionCriteria;
use crate::types::MergeRequest;
use tracing::info;

/// Collect the merge requests worth reviewing for one run
///
/// Any query failure, including the approval lookup, aborts the run; there is
/// no partial result.
pub async fn collect_merge_requests(
    platform: &dyn PlatformService,
    config: &Config,
    criteria: &SelectionCriteria,
    progress: &dyn FetchProgress,
) -> Result<Vec<MergeRequest>> {
    let policy = criteria.draft_policy();
    let plan = plan_fetches(config, criteria)?;
    if plan.is_empty() {
        info!("no usernames configured for the selected scopes and no reviewer id");
    }
    info!(
        steps = plan.steps.len(),
        queries = plan.query_count(),
        "planned fetches"
    );

    let aggregated = execute_fetch_plan(platform, &plan, policy, progress).await?;
    let fetched = aggregated.len();
    let mut mrs = dedupe(aggregated);
    info!(fetched, unique = mrs.len(), "deduplicated");

    if let (true, Some(me)) = (criteria.excludes_approved(), criteria.me) {
        let approved = fetch_approved_by(platform, criteria.group_id.trim(), me, policy).await?;
        let before = mrs.len();
        mrs = exclude_approved(mrs, &approved);
        info!(removed = before - mrs.len(), "excluded merge requests approved by me");
    }

    if criteria.excludes_ready() {
        let before = mrs.len();
        mrs = exclude_ready(mrs, criteria.me);
        info!(removed = before - mrs.len(), "excluded ready-to-merge merge requests");
    }

    Ok(mrs)
}
