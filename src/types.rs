//! Core types for mr-roundup

use serde::{Deserialize, Serialize};

/// Detailed merge status reported for merge requests with no blockers left
pub const MERGEABLE_STATUS: &str = "mergeable";

/// Canonical identity of a merge request
///
/// Wraps the provider's global numeric id. The project-local IID and the web
/// URL are never used to decide whether two records are the same merge
/// request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MrId(pub u64);

impl std::fmt::Display for MrId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Author of a merge request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MrAuthor {
    /// Numeric user id
    pub id: u64,
    /// Username (without the leading `@`)
    pub username: String,
}

/// An open merge request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeRequest {
    /// Global id, unique across the GitLab instance
    pub id: u64,
    /// Project-local sequence number (the `!123` number)
    pub iid: u64,
    /// Project the merge request belongs to
    pub project_id: u64,
    /// Title
    pub title: String,
    /// Web URL for the merge request
    pub web_url: String,
    /// Author identity
    pub author: MrAuthor,
    /// Whether the merge request is a draft
    pub is_draft: bool,
    /// GitLab's detailed merge status, e.g. `mergeable` or `not_approved`
    pub detailed_merge_status: Option<String>,
}

impl MergeRequest {
    /// Canonical identity used for deduplication and exclusion matching
    pub const fn identity(&self) -> MrId {
        MrId(self.id)
    }

    /// Whether GitLab reports no remaining blockers to merging
    pub fn is_mergeable(&self) -> bool {
        self.detailed_merge_status.as_deref() == Some(MERGEABLE_STATUS)
    }

    /// Whether the given user authored this merge request
    pub fn is_authored_by(&self, user_id: u64) -> bool {
        self.author.id == user_id
    }
}

/// How draft merge requests are treated by a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DraftPolicy {
    /// Only non-draft merge requests
    #[default]
    ExcludeDrafts,
    /// Drafts and non-drafts alike (no draft filter)
    IncludeAll,
}

impl DraftPolicy {
    /// Translate the caller's "include drafts" wish into a policy
    ///
    /// Absent or `false` excludes drafts; `true` leaves the query unfiltered.
    /// There is no drafts-only mode.
    pub const fn from_include_drafts(include_drafts: Option<bool>) -> Self {
        match include_drafts {
            Some(true) => Self::IncludeAll,
            Some(false) | None => Self::ExcludeDrafts,
        }
    }
}

/// Query boundary: a whole group or a single project
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryScope {
    /// Group id or full path
    Group(String),
    /// Project id or full path
    Project(String),
}

impl std::fmt::Display for QueryScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Group(id) => write!(f, "group '{id}'"),
            Self::Project(id) => write!(f, "project '{id}'"),
        }
    }
}

/// The single predicate narrowing a query beyond scope and state
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryFilter {
    /// Authored by this username
    Author(String),
    /// This user id is a reviewer
    Reviewer(u64),
    /// Approved by all of these user ids
    ApprovedBy(Vec<u64>),
}

impl std::fmt::Display for QueryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Author(username) => write!(f, "authored by @{username}"),
            Self::Reviewer(id) => write!(f, "reviewed by user {id}"),
            Self::ApprovedBy(ids) => {
                let ids: Vec<String> = ids.iter().map(ToString::to_string).collect();
                write!(f, "approved by user {}", ids.join(", "))
            }
        }
    }
}

/// A request to the merge request query service
///
/// State is implicit: every query asks for open merge requests only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MergeRequestQuery {
    /// Group or project boundary
    pub scope: QueryScope,
    /// Author, reviewer or approver predicate
    pub filter: QueryFilter,
    /// Draft handling
    pub draft_policy: DraftPolicy,
}

impl MergeRequestQuery {
    /// Open merge requests in a group authored by `username`
    pub fn group_author(group_id: &str, username: &str, draft_policy: DraftPolicy) -> Self {
        Self {
            scope: QueryScope::Group(group_id.to_string()),
            filter: QueryFilter::Author(username.to_string()),
            draft_policy,
        }
    }

    /// Open merge requests in a project authored by `username`
    pub fn project_author(project: &str, username: &str, draft_policy: DraftPolicy) -> Self {
        Self {
            scope: QueryScope::Project(project.to_string()),
            filter: QueryFilter::Author(username.to_string()),
            draft_policy,
        }
    }

    /// Open merge requests in a group where `user_id` is a reviewer
    pub fn group_reviewer(group_id: &str, user_id: u64, draft_policy: DraftPolicy) -> Self {
        Self {
            scope: QueryScope::Group(group_id.to_string()),
            filter: QueryFilter::Reviewer(user_id),
            draft_policy,
        }
    }

    /// Open merge requests in a group approved by `user_id`
    pub fn group_approved_by(group_id: &str, user_id: u64, draft_policy: DraftPolicy) -> Self {
        Self {
            scope: QueryScope::Group(group_id.to_string()),
            filter: QueryFilter::ApprovedBy(vec![user_id]),
            draft_policy,
        }
    }
}

impl std::fmt::Display for MergeRequestQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.scope, self.filter)
    }
}
