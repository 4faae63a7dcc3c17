//! Mock platform service for testing

#![allow(dead_code)]

use async_trait::async_trait;
use mr_roundup::error::{Error, Result};
use mr_roundup::platform::PlatformService;
use mr_roundup::types::{MergeRequest, MergeRequestQuery};
use std::collections::HashMap;
use std::sync::Mutex;

/// Simple mock platform service for testing
///
/// Responses are keyed by the full query, so a test states exactly which
/// scope, filter and draft policy it expects. Unknown queries return an empty
/// list.
///
/// Features:
/// - Call tracking for verification
/// - Configurable responses per query
/// - Error injection for failure path testing
pub struct MockPlatformService {
    responses: Mutex<HashMap<MergeRequestQuery, Vec<MergeRequest>>>,
    failures: Mutex<HashMap<MergeRequestQuery, String>>,
    calls: Mutex<Vec<MergeRequestQuery>>,
}

impl MockPlatformService {
    /// Create an empty mock
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            failures: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Set the merge requests returned for a query
    pub fn respond(&self, query: MergeRequestQuery, mrs: Vec<MergeRequest>) {
        self.responses.lock().unwrap().insert(query, mrs);
    }

    /// Make a query fail with a query error
    pub fn fail_query(&self, query: MergeRequestQuery, msg: &str) {
        self.failures
            .lock()
            .unwrap()
            .insert(query, msg.to_string());
    }

    /// Queries received, in order
    pub fn get_calls(&self) -> Vec<MergeRequestQuery> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of queries received
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Assert the query was issued at least once
    pub fn assert_called(&self, query: &MergeRequestQuery) {
        let calls = self.calls.lock().unwrap();
        assert!(
            calls.contains(query),
            "Expected query {query}, got: {:?}",
            calls.iter().map(ToString::to_string).collect::<Vec<_>>()
        );
    }

    /// Assert the query was never issued
    pub fn assert_not_called(&self, query: &MergeRequestQuery) {
        let calls = self.calls.lock().unwrap();
        assert!(!calls.contains(query), "Unexpected query {query}");
    }
}

impl Default for MockPlatformService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn list_merge_requests(&self, query: &MergeRequestQuery) -> Result<Vec<MergeRequest>> {
        self.calls.lock().unwrap().push(query.clone());

        if let Some(msg) = self.failures.lock().unwrap().get(query) {
            return Err(Error::query(query, msg));
        }

        Ok(self
            .responses
            .lock()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_default())
    }

    fn host(&self) -> &str {
        "mock.gitlab.test"
    }
}
