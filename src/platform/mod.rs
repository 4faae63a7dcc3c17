//! Merge request query service
//!
//! Wraps the forge's merge request listing API behind a trait so the
//! collection pipeline can run against GitLab or a test double.

mod gitlab;

pub use gitlab::{DEFAULT_HOST, GitLabService, api_base_url};

use crate::error::Result;
use crate::types::{MergeRequest, MergeRequestQuery};
use async_trait::async_trait;

/// Platform service trait for merge request queries
///
/// Implementations translate a [`MergeRequestQuery`] into a provider request
/// and return every open merge request matching all of its predicates.
/// Failures are returned unmodified; implementations must not retry.
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// List open merge requests matching the query
    async fn list_merge_requests(&self, query: &MergeRequestQuery) -> Result<Vec<MergeRequest>>;

    /// Host this service talks to, for display
    fn host(&self) -> &str;
}

/// Create the platform service for a resolved access token and host
pub fn create_platform_service(
    token: String,
    host: Option<&str>,
) -> Result<Box<dyn PlatformService>> {
    Ok(Box::new(GitLabService::new(token, host)?))
}
