//! Selection policy
//!
//! Decides, per run, which fetchers are active and which usernames each of
//! them uses, and merges command-line overrides into the configuration.
//! Everything here is pure: no I/O, no prompts.

use crate::config::{Config, ConfigField, ConfigUpdate};
use crate::types::DraftPolicy;

/// Which author scopes the caller asked for
///
/// Flags are inclusive: neither and both mean the same thing (both scopes).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScopeFlags {
    /// Restrict to the group usernames
    pub group: bool,
    /// Restrict to the per-project usernames
    pub projects: bool,
}

impl ScopeFlags {
    /// Whether the group author fetch runs
    pub const fn fetch_group(self) -> bool {
        self.group || !self.projects
    }

    /// Whether the per-project author fetches run
    pub const fn fetch_projects(self) -> bool {
        self.projects || !self.group
    }
}

/// Which exclusion stages the caller switched off
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InclusionFlags {
    /// Include draft merge requests
    pub drafts: bool,
    /// Include merge requests the viewer already approved
    pub approved: bool,
    /// Include merge requests that are ready to merge
    pub ready: bool,
}

/// Raw caller-supplied values that may replace configured ones
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    /// Access token
    pub access_token: Option<String>,
    /// Group id
    pub group_id: Option<String>,
    /// Viewer's user id; 0 counts as absent
    pub me: Option<u64>,
    /// Comma-separated usernames
    pub usernames: Option<String>,
}

/// Per-field record of whether an override replaced the configured value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct OverriddenFields {
    /// `access_token` came from the caller
    pub access_token: bool,
    /// `group_id` came from the caller
    pub group_id: bool,
    /// `me` came from the caller
    pub me: bool,
}

/// Configuration values in effect for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSettings {
    /// Access token (may still be empty; see [`crate::auth`])
    pub access_token: String,
    /// Group id
    pub group_id: String,
    /// Viewer's user id
    pub me: Option<u64>,
    /// Username override; empty means use the configured lists
    pub usernames: Vec<String>,
    /// Which fields were overridden
    pub overridden: OverriddenFields,
}

impl ResolvedSettings {
    /// Overrides the caller may want to keep for future runs
    ///
    /// The returned updates carry the values used for this run, in the order
    /// access token, group id, me.
    pub fn pending_updates(&self) -> Vec<ConfigUpdate> {
        let mut updates = Vec::new();
        if self.overridden.access_token {
            updates.push(ConfigUpdate {
                field: ConfigField::AccessToken,
                value: self.access_token.clone(),
            });
        }
        if self.overridden.group_id {
            updates.push(ConfigUpdate {
                field: ConfigField::GroupId,
                value: self.group_id.clone(),
            });
        }
        if let (true, Some(me)) = (self.overridden.me, self.me) {
            updates.push(ConfigUpdate {
                field: ConfigField::Me,
                value: me.to_string(),
            });
        }
        updates
    }
}

/// Parse a comma-separated username list
///
/// All whitespace is removed first and empty entries are dropped, so
/// `"dave, erin,"` yields `["dave", "erin"]`.
pub fn parse_usernames(raw: &str) -> Vec<String> {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    compact
        .split(',')
        .filter(|name| !name.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Merge caller overrides into the configuration
pub fn resolve_settings(config: &Config, overrides: &Overrides) -> ResolvedSettings {
    let mut overridden = OverriddenFields::default();

    let access_token = match overrides.access_token.as_deref().map(str::trim) {
        Some(token) if !token.is_empty() => {
            overridden.access_token = true;
            token.to_string()
        }
        _ => config.access_token.clone(),
    };

    let group_id = match overrides.group_id.as_deref().map(str::trim) {
        Some(group_id) if !group_id.is_empty() => {
            overridden.group_id = true;
            group_id.to_string()
        }
        _ => config.group_id.trim().to_string(),
    };

    let me = match overrides.me {
        Some(me) if me != 0 => {
            overridden.me = true;
            Some(me)
        }
        _ => config.me(),
    };

    let usernames = overrides
        .usernames
        .as_deref()
        .map(parse_usernames)
        .unwrap_or_default();

    ResolvedSettings {
        access_token,
        group_id,
        me,
        usernames,
        overridden,
    }
}

/// Pick the override list when present, the configured list otherwise
pub fn choose_usernames<'a>(overrides: &'a [String], configured: &'a [String]) -> &'a [String] {
    if overrides.is_empty() {
        configured
    } else {
        overrides
    }
}

/// Union of a project's usernames and the `all` usernames
///
/// Project names come first; duplicates are dropped.
pub fn project_usernames(project: &[String], all_projects: &[String]) -> Vec<String> {
    let mut usernames: Vec<String> = Vec::with_capacity(project.len() + all_projects.len());
    for name in project.iter().chain(all_projects) {
        if !usernames.contains(name) {
            usernames.push(name.clone());
        }
    }
    usernames
}

/// Everything the collection pipeline needs to know about one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionCriteria {
    /// Group searched by the group, reviewer and approval queries
    pub group_id: String,
    /// Viewer's user id
    pub me: Option<u64>,
    /// Active author scopes
    pub scopes: ScopeFlags,
    /// Disabled exclusions
    pub include: InclusionFlags,
    /// Username override; empty means use the configured lists
    pub usernames: Vec<String>,
}

impl SelectionCriteria {
    /// Build the criteria for a run
    pub fn new(settings: &ResolvedSettings, scopes: ScopeFlags, include: InclusionFlags) -> Self {
        Self {
            group_id: settings.group_id.clone(),
            me: settings.me,
            scopes,
            include,
            usernames: settings.usernames.clone(),
        }
    }

    /// Draft policy shared by every query of the run
    pub const fn draft_policy(&self) -> DraftPolicy {
        DraftPolicy::from_include_drafts(Some(self.include.drafts))
    }

    /// Whether the approved-by-me exclusion runs
    pub const fn excludes_approved(&self) -> bool {
        !self.include.approved && self.me.is_some()
    }

    /// Whether the ready-to-merge exclusion runs
    pub const fn excludes_ready(&self) -> bool {
        !self.include.ready
    }
}
