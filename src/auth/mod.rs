//! Authentication for GitLab
//!
//! Supports tokens from the command line, the config file, and environment
//! variables.

use crate::error::{Error, Result};

/// Environment variables consulted, in order, when no token is configured
pub const TOKEN_ENV_VARS: [&str; 2] = ["GITLAB_TOKEN", "GL_TOKEN"];

/// Source of authentication token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Token passed on the command line
    Flag,
    /// Token from the config file
    Config,
    /// Token from environment variable
    EnvVar,
}

/// GitLab authentication
#[derive(Debug, Clone)]
pub struct GitLabAuthConfig {
    /// Access token
    pub token: String,
    /// Where the token came from
    pub source: AuthSource,
}

/// Pick the access token for this run
///
/// `resolved` is the token after command-line overrides were applied to the
/// configured value; `from_flag` says which of the two it came from. When it
/// is empty, `env` is asked for each of [`TOKEN_ENV_VARS`] in turn.
pub fn resolve_gitlab_auth<F>(resolved: &str, from_flag: bool, env: F) -> Result<GitLabAuthConfig>
where
    F: Fn(&str) -> Option<String>,
{
    if !resolved.is_empty() {
        return Ok(GitLabAuthConfig {
            token: resolved.to_string(),
            source: if from_flag {
                AuthSource::Flag
            } else {
                AuthSource::Config
            },
        });
    }

    TOKEN_ENV_VARS
        .iter()
        .find_map(|name| env(name).filter(|token| !token.trim().is_empty()))
        .map(|token| GitLabAuthConfig {
            token: token.trim().to_string(),
            source: AuthSource::EnvVar,
        })
        .ok_or_else(|| {
            Error::Auth(
                "no GitLab access token: set access_token in the config, pass --access-token, or export GITLAB_TOKEN"
                    .to_string(),
            )
        })
}

/// Pick the access token for this run, reading the process environment
pub fn get_gitlab_auth(resolved: &str, from_flag: bool) -> Result<GitLabAuthConfig> {
    resolve_gitlab_auth(resolved, from_flag, |name| std::env::var(name).ok())
}
