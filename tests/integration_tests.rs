//! Integration tests for the roundup binary

#![allow(deprecated)] // cargo_bin is the standard way to test CLI binaries

mod common;

use assert_cmd::Command;
use common::sample_config;
use mockito::{Matcher, Server};
use mr_roundup::config::{Config, load_config, save_config};
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn roundup() -> Command {
    let mut cmd = Command::cargo_bin("roundup").unwrap();
    cmd.env_remove("GITLAB_TOKEN")
        .env_remove("GL_TOKEN")
        .env_remove("RUST_LOG");
    cmd
}

fn write_config(dir: &Path, config: &Config) -> PathBuf {
    let path = dir.join("config.toml");
    save_config(&path, config).unwrap();
    path
}

fn mr_body(id: u64, username: &str) -> String {
    serde_json::json!([{
        "id": id,
        "iid": 5,
        "project_id": 7,
        "title": "Add widget",
        "web_url": format!("https://gitlab.example.com/acme/web/-/merge_requests/{id}"),
        "author": { "id": 10, "username": username },
        "draft": false,
        "detailed_merge_status": "not_approved"
    }])
    .to_string()
}

/// Config pointed at the mock server, following only `alice` in the group
fn server_config(server: &Server) -> Config {
    Config {
        host: Some(server.url()),
        me: 0,
        projects: std::collections::BTreeMap::new(),
        ..sample_config()
    }
}

// =============================================================================
// CLI Tests
// =============================================================================

#[test]
fn test_cli_help() {
    roundup()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Round up open GitLab merge requests"));
}

#[test]
fn test_cli_version() {
    roundup()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_list_help_shows_flags() {
    roundup()
        .args(["list", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--group-id"))
        .stdout(predicate::str::contains("--users"))
        .stdout(predicate::str::contains("--no-persist"));
}

#[test]
fn test_yes_conflicts_with_no_persist() {
    roundup()
        .args(["list", "--yes", "--no-persist"])
        .assert()
        .failure();
}

// =============================================================================
// Init Tests
// =============================================================================

#[test]
fn test_init_creates_home_from_env() {
    let temp = TempDir::new().unwrap();
    let home = temp.path().join("roundup-home");

    roundup()
        .env("ROUNDUP_HOME", &home)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("sample configuration"));

    let config = load_config(&home.join("config.toml")).unwrap();
    assert!(config.group_id.is_empty());

    // Running again leaves the file alone
    roundup()
        .env("ROUNDUP_HOME", &home)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

// =============================================================================
// List Tests
// =============================================================================

#[test]
fn test_list_without_config_fails() {
    let temp = TempDir::new().unwrap();
    roundup()
        .arg("--config")
        .arg(temp.path().join("missing.toml"))
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("roundup init"));
}

#[test]
fn test_list_without_token_fails() {
    let temp = TempDir::new().unwrap();
    let config = Config {
        access_token: String::new(),
        ..sample_config()
    };
    let path = write_config(temp.path(), &config);

    roundup()
        .arg("--config")
        .arg(&path)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("GITLAB_TOKEN"));
}

#[test]
fn test_list_prints_merge_requests() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/api/v4/groups/g1/merge_requests")
        .match_header("PRIVATE-TOKEN", "glpat-test")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("author_username".into(), "alice".into()),
            Matcher::UrlEncoded("state".into(), "opened".into()),
            Matcher::UrlEncoded("wip".into(), "no".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(mr_body(100, "alice"))
        .create();

    let temp = TempDir::new().unwrap();
    let path = write_config(temp.path(), &server_config(&server));

    roundup()
        .arg("--config")
        .arg(&path)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "@alice: https://gitlab.example.com/acme/web/-/merge_requests/100",
        ));

    mock.assert();
}

#[test]
fn test_list_uses_token_from_env() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/api/v4/groups/g1/merge_requests")
        .match_header("PRIVATE-TOKEN", "glpat-env")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create();

    let temp = TempDir::new().unwrap();
    let config = Config {
        access_token: String::new(),
        ..server_config(&server)
    };
    let path = write_config(temp.path(), &config);

    roundup()
        .env("GL_TOKEN", "glpat-env")
        .arg("--config")
        .arg(&path)
        .arg("list")
        .assert()
        .success()
        .stderr(predicate::str::contains("No open merge requests"));

    mock.assert();
}

#[test]
fn test_list_user_override_and_persist() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/api/v4/groups/g2/merge_requests")
        .match_query(Matcher::UrlEncoded(
            "author_username".into(),
            "dave".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(mr_body(200, "dave"))
        .create();

    let temp = TempDir::new().unwrap();
    let path = write_config(temp.path(), &server_config(&server));

    roundup()
        .arg("--config")
        .arg(&path)
        .args(["list", "--group-id", "g2", "--users", "dave", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("@dave:"));

    mock.assert();

    let saved = load_config(&path).unwrap();
    assert_eq!(saved.group_id, "g2");
    // Username overrides are never persisted
    assert_eq!(saved.usernames, vec!["alice".to_string()]);
}

#[test]
fn test_list_query_failure_names_the_query() {
    let mut server = Server::new();
    server
        .mock("GET", "/api/v4/groups/g1/merge_requests")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body(r#"{"message":"401 Unauthorized"}"#)
        .create();

    let temp = TempDir::new().unwrap();
    let path = write_config(temp.path(), &server_config(&server));

    roundup()
        .arg("--config")
        .arg(&path)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("group 'g1' authored by @alice"));
}
