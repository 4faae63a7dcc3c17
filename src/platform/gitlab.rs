//! GitLab platform service implementation

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{
    DraftPolicy, MergeRequest, MergeRequestQuery, MrAuthor, QueryFilter, QueryScope,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

/// Host used when the configuration does not name one
pub const DEFAULT_HOST: &str = "gitlab.com";

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Largest page GitLab serves; results beyond it are not requested
const PER_PAGE: &str = "100";

/// GitLab service using reqwest
pub struct GitLabService {
    client: Client,
    token: String,
    host: String,
    api_base: String,
}

#[derive(Deserialize)]
struct ApiUser {
    id: u64,
    username: String,
}

#[derive(Deserialize)]
struct ApiMergeRequest {
    id: u64,
    iid: u64,
    project_id: u64,
    title: String,
    web_url: String,
    author: ApiUser,
    #[serde(default)]
    draft: bool,
    #[serde(default)]
    work_in_progress: bool,
    detailed_merge_status: Option<String>,
}

impl From<ApiMergeRequest> for MergeRequest {
    fn from(mr: ApiMergeRequest) -> Self {
        Self {
            id: mr.id,
            iid: mr.iid,
            project_id: mr.project_id,
            title: mr.title,
            web_url: mr.web_url,
            author: MrAuthor {
                id: mr.author.id,
                username: mr.author.username,
            },
            // Older instances only report the WIP flag
            is_draft: mr.draft || mr.work_in_progress,
            detailed_merge_status: mr.detailed_merge_status,
        }
    }
}

/// Resolve the REST API base URL for a configured host
///
/// A bare host becomes `https://<host>/api/v4`. A value that already carries
/// an `http://` or `https://` scheme is used as the instance root verbatim,
/// which is how self-hosted instances behind plain HTTP are reached.
pub fn api_base_url(host: Option<&str>) -> Result<String> {
    let host = host.map(str::trim).filter(|h| !h.is_empty()).unwrap_or(DEFAULT_HOST);

    let root = if host.starts_with("http://") || host.starts_with("https://") {
        host.trim_end_matches('/').to_string()
    } else {
        format!("https://{}", host.trim_end_matches('/'))
    };

    Url::parse(&root).map_err(|e| Error::Config(format!("invalid GitLab host '{host}': {e}")))?;

    Ok(format!("{root}/api/v4"))
}

/// Translate a query into GitLab's list parameters
fn query_params(query: &MergeRequestQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![("state", "opened".to_string())];

    match &query.filter {
        QueryFilter::Author(username) => params.push(("author_username", username.clone())),
        QueryFilter::Reviewer(user_id) => params.push(("reviewer_id", user_id.to_string())),
        QueryFilter::ApprovedBy(user_ids) => {
            for user_id in user_ids {
                params.push(("approved_by_ids[]", user_id.to_string()));
            }
        }
    }

    // `wip=yes` would return only drafts, so inclusion means no parameter at all
    if query.draft_policy == DraftPolicy::ExcludeDrafts {
        params.push(("wip", "no".to_string()));
    }

    params.push(("per_page", PER_PAGE.to_string()));
    params
}

impl GitLabService {
    /// Create a new GitLab service
    pub fn new(token: String, host: Option<&str>) -> Result<Self> {
        let api_base = api_base_url(host)?;
        let host = host
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .unwrap_or(DEFAULT_HOST)
            .to_string();

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Internal(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            token,
            host,
            api_base,
        })
    }

    fn scope_url(&self, scope: &QueryScope) -> String {
        match scope {
            QueryScope::Group(id) => format!(
                "{}/groups/{}/merge_requests",
                self.api_base,
                urlencoding::encode(id)
            ),
            QueryScope::Project(id) => format!(
                "{}/projects/{}/merge_requests",
                self.api_base,
                urlencoding::encode(id)
            ),
        }
    }
}

#[async_trait]
impl PlatformService for GitLabService {
    async fn list_merge_requests(&self, query: &MergeRequestQuery) -> Result<Vec<MergeRequest>> {
        debug!(%query, "listing merge requests");
        let url = self.scope_url(&query.scope);

        let mrs: Vec<ApiMergeRequest> = self
            .client
            .get(&url)
            .header("PRIVATE-TOKEN", &self.token)
            .query(&query_params(query))
            .send()
            .await
            .map_err(|e| Error::query(query, e))?
            .error_for_status()
            .map_err(|e| Error::query(query, e))?
            .json()
            .await
            .map_err(|e| Error::query(query, format!("malformed response: {e}")))?;

        debug!(%query, count = mrs.len(), "listed merge requests");
        Ok(mrs.into_iter().map(Into::into).collect())
    }

    fn host(&self) -> &str {
        &self.host
    }
}
