//! Fetch planning - pure functions deciding which queries a run issues
//!
//! No I/O happens here. The plan lists the fetch steps in the order their
//! results are aggregated: group authors, then each configured project, then
//! the reviewer search.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::selection::{SelectionCriteria, choose_usernames, project_usernames};

/// A single fetcher invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStep {
    /// Open merge requests in the group by each username
    GroupAuthors {
        /// Group id or path
        group_id: String,
        /// Authors to query, one request each
        usernames: Vec<String>,
    },
    /// Open merge requests in one project by each username
    ProjectAuthors {
        /// Project id or path
        project: String,
        /// Authors to query, one request each
        usernames: Vec<String>,
    },
    /// Open merge requests in the group with the user as reviewer
    Reviewer {
        /// Group id or path
        group_id: String,
        /// Reviewer's user id
        user_id: u64,
    },
}

impl FetchStep {
    /// Number of queries this step issues
    #[must_use]
    pub fn query_count(&self) -> usize {
        match self {
            Self::GroupAuthors { usernames, .. } | Self::ProjectAuthors { usernames, .. } => {
                usernames.len()
            }
            Self::Reviewer { .. } => 1,
        }
    }
}

impl std::fmt::Display for FetchStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GroupAuthors {
                group_id,
                usernames,
            } => write!(
                f,
                "group '{group_id}' authors ({})",
                usernames.join(", ")
            ),
            Self::ProjectAuthors { project, usernames } => write!(
                f,
                "project '{project}' authors ({})",
                usernames.join(", ")
            ),
            Self::Reviewer { group_id, user_id } => {
                write!(f, "group '{group_id}' reviews for user {user_id}")
            }
        }
    }
}

/// Fetch plan - the functional core output
///
/// Created by [`plan_fetches`] (pure) and executed by
/// [`super::execute_fetch_plan`] (effectful).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchPlan {
    /// Steps in aggregation order
    pub steps: Vec<FetchStep>,
}

impl FetchPlan {
    /// Check if the plan issues no queries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Total number of queries across all steps
    #[must_use]
    pub fn query_count(&self) -> usize {
        self.steps.iter().map(FetchStep::query_count).sum()
    }
}

/// Create a fetch plan (PURE - no I/O)
///
/// Steps whose username set is empty are left out. The group id must be set
/// when the group author or reviewer step is planned, since the approval
/// exclusion searches the same group.
pub fn plan_fetches(config: &Config, criteria: &SelectionCriteria) -> Result<FetchPlan> {
    let mut steps = Vec::new();
    let group_id = criteria.group_id.trim();

    if criteria.scopes.fetch_group() {
        let usernames = choose_usernames(&criteria.usernames, &config.usernames);
        if !usernames.is_empty() {
            steps.push(FetchStep::GroupAuthors {
                group_id: require_group(group_id)?,
                usernames: usernames.to_vec(),
            });
        }
    }

    if criteria.scopes.fetch_projects() {
        for (project, configured) in config.project_entries() {
            let usernames = if criteria.usernames.is_empty() {
                project_usernames(configured, config.all_projects_usernames())
            } else {
                criteria.usernames.clone()
            };
            if usernames.is_empty() {
                continue;
            }
            steps.push(FetchStep::ProjectAuthors {
                project: project.to_string(),
                usernames,
            });
        }
    }

    if let Some(user_id) = criteria.me {
        steps.push(FetchStep::Reviewer {
            group_id: require_group(group_id)?,
            user_id,
        });
    }

    Ok(FetchPlan { steps })
}

fn require_group(group_id: &str) -> Result<String> {
    if group_id.is_empty() {
        return Err(Error::Config(
            "group_id is not set; add it to the config or pass --group-id".to_string(),
        ));
    }
    Ok(group_id.to_string())
}
