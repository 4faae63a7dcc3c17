//! Configuration for mr-roundup
//!
//! The configuration names the group to search, the usernames to follow in
//! it, per-project username lists, and the viewer's own GitLab user id.
//! It is read once at startup and passed explicitly; nothing here is global.

mod storage;

pub use storage::{
    CONFIG_FILE, HOME_ENV, InitOutcome, config_home, default_config_path, init_config,
    load_config, save_config, update_config_field,
};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reserved project key whose usernames apply to every other project
pub const ALL_PROJECTS_KEY: &str = "all";

/// On-disk configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Personal access token
    pub access_token: String,
    /// Group id or full path
    pub group_id: String,
    /// The viewer's numeric GitLab user id (0 = unset)
    pub me: u64,
    /// GitLab host (defaults to gitlab.com)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// Usernames followed across the whole group
    pub usernames: Vec<String>,
    /// Project id/path to usernames followed in that project
    ///
    /// The `all` entry is added to every other project's list.
    pub projects: BTreeMap<String, Vec<String>>,
}

impl Config {
    /// The viewer's user id, if configured
    pub const fn me(&self) -> Option<u64> {
        if self.me == 0 { None } else { Some(self.me) }
    }

    /// Usernames configured for every project
    pub fn all_projects_usernames(&self) -> &[String] {
        self.projects
            .get(ALL_PROJECTS_KEY)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Configured projects in iteration order, excluding the `all` bucket
    pub fn project_entries(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.projects
            .iter()
            .filter(|(name, _)| name.as_str() != ALL_PROJECTS_KEY)
            .map(|(name, usernames)| (name.as_str(), usernames.as_slice()))
    }

    /// Apply a persisted override
    pub fn apply(&mut self, update: &ConfigUpdate) -> crate::Result<()> {
        match update.field {
            ConfigField::AccessToken => self.access_token.clone_from(&update.value),
            ConfigField::GroupId => self.group_id.clone_from(&update.value),
            ConfigField::Me => {
                self.me = update.value.parse().map_err(|e| {
                    crate::Error::Config(format!("invalid user id '{}': {e}", update.value))
                })?;
            }
        }
        Ok(())
    }
}

/// Configuration fields a caller may override per run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigField {
    /// `access_token`
    AccessToken,
    /// `group_id`
    GroupId,
    /// `me`
    Me,
}

impl ConfigField {
    /// Key used in the config file
    pub const fn key(self) -> &'static str {
        match self {
            Self::AccessToken => "access_token",
            Self::GroupId => "group_id",
            Self::Me => "me",
        }
    }

    /// Human-readable name used in prompts
    pub const fn label(self) -> &'static str {
        match self {
            Self::AccessToken => "access token",
            Self::GroupId => "group ID",
            Self::Me => "me user ID",
        }
    }
}

impl std::fmt::Display for ConfigField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// A value that would be written back to the configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigUpdate {
    /// Field to write
    pub field: ConfigField,
    /// New value, as it would appear on the command line
    pub value: String,
}
