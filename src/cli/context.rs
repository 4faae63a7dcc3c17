//! Shared setup for commands that talk to GitLab
//!
//! Loads the configuration, applies command-line overrides, resolves the
//! access token and builds the platform service.

use mr_roundup::auth::get_gitlab_auth;
use mr_roundup::config::{Config, default_config_path, load_config};
use mr_roundup::error::Result;
use mr_roundup::platform::{PlatformService, create_platform_service};
use mr_roundup::selection::{Overrides, ResolvedSettings, resolve_settings};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Everything a command needs before it issues queries
pub struct CommandContext {
    /// Where the configuration was loaded from
    pub config_path: PathBuf,
    /// Configuration as loaded
    pub config: Config,
    /// Configuration with overrides applied
    pub settings: ResolvedSettings,
    /// GitLab query service
    pub platform: Box<dyn PlatformService>,
}

impl CommandContext {
    /// Create a new command context
    ///
    /// Fails before any query if the configuration is missing or malformed,
    /// or if no access token can be found.
    pub fn new(config_path: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let config_path = match config_path {
            Some(path) => path.to_path_buf(),
            None => default_config_path()?,
        };
        let config = load_config(&config_path)?;
        let settings = resolve_settings(&config, overrides);

        let auth = get_gitlab_auth(&settings.access_token, settings.overridden.access_token)?;
        debug!(source = ?auth.source, "resolved access token");

        let platform = create_platform_service(auth.token, config.host.as_deref())?;
        debug!(host = platform.host(), "created GitLab service");

        Ok(Self {
            config_path,
            config,
            settings,
            platform,
        })
    }
}
