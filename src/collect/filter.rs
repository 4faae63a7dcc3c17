//! Deduplication and exclusion filters over a result set.

use crate::types::{MergeRequest, MrId};
use std::collections::HashSet;

/// Keep the first occurrence of each merge request, preserving order
#[must_use]
pub fn dedupe(mrs: Vec<MergeRequest>) -> Vec<MergeRequest> {
    let mut seen = HashSet::with_capacity(mrs.len());
    mrs.into_iter()
        .filter(|mr| seen.insert(mr.identity()))
        .collect()
}

/// Drop merge requests present in `approved`
#[must_use]
pub fn exclude_approved(mrs: Vec<MergeRequest>, approved: &[MergeRequest]) -> Vec<MergeRequest> {
    if approved.is_empty() {
        return mrs;
    }
    let approved: HashSet<MrId> = approved.iter().map(MergeRequest::identity).collect();
    mrs.into_iter()
        .filter(|mr| !approved.contains(&mr.identity()))
        .collect()
}

/// Drop mergeable merge requests, except those authored by `me`
#[must_use]
pub fn exclude_ready(mrs: Vec<MergeRequest>, me: Option<u64>) -> Vec<MergeRequest> {
    mrs.into_iter()
        .filter(|mr| !mr.is_mergeable() || me.is_some_and(|me| mr.is_authored_by(me)))
        .collect()
}
