//! Shared fixtures for integration and unit tests

#![allow(dead_code)]

mod mock_platform;

pub use mock_platform::MockPlatformService;

use mr_roundup::config::Config;
use mr_roundup::types::{MERGEABLE_STATUS, MergeRequest, MrAuthor};
use std::collections::BTreeMap;

/// Build an open, non-draft merge request
pub fn make_mr(id: u64, author_id: u64, username: &str) -> MergeRequest {
    MergeRequest {
        id,
        iid: id % 1000,
        project_id: 7,
        title: format!("Change {id}"),
        web_url: format!("https://gitlab.com/acme/web/-/merge_requests/{}", id % 1000),
        author: MrAuthor {
            id: author_id,
            username: username.to_string(),
        },
        is_draft: false,
        detailed_merge_status: Some("not_approved".to_string()),
    }
}

/// Build a merge request GitLab reports as mergeable
pub fn make_ready_mr(id: u64, author_id: u64, username: &str) -> MergeRequest {
    MergeRequest {
        detailed_merge_status: Some(MERGEABLE_STATUS.to_string()),
        ..make_mr(id, author_id, username)
    }
}

/// Turn string literals into owned usernames
pub fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}

/// Group `g1`, me = 42, `alice` group-wide, `bob` in `proj1`, `carol` everywhere
pub fn sample_config() -> Config {
    let mut projects = BTreeMap::new();
    projects.insert("all".to_string(), names(&["carol"]));
    projects.insert("proj1".to_string(), names(&["bob"]));
    Config {
        access_token: "glpat-test".to_string(),
        group_id: "g1".to_string(),
        me: 42,
        host: None,
        usernames: names(&["alice"]),
        projects,
    }
}
