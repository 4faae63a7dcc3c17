//! Persistence for the configuration file in `~/.roundup/`.

use super::{Config, ConfigUpdate};
use crate::error::{Error, Result};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable overriding the configuration home directory.
pub const HOME_ENV: &str = "ROUNDUP_HOME";

/// Filename for the configuration.
pub const CONFIG_FILE: &str = "config.toml";

/// Directory name for roundup within the user's home directory.
const HOME_DIR: &str = ".roundup";

/// Header written above saved configuration.
const HEADER: &str = "# roundup configuration\n# Rewritten when you choose to keep a command-line override\n\n";

/// Starting point written by `roundup init`.
const SAMPLE_CONFIG: &str = r#"# roundup configuration

# Personal access token with the read_api scope.
# GITLAB_TOKEN or GL_TOKEN are used when this is empty.
access_token = ""

# Group to search, by numeric id or full path.
group_id = ""

# Your numeric GitLab user id. Enables the reviewer search, hides merge
# requests you already approved, and keeps your own ready-to-merge ones.
me = 0

# Self-hosted instances: host name, or a full http(s):// URL.
# host = "gitlab.example.com"

# Authors followed across the whole group.
usernames = []

# Authors followed per project. Names under `all` apply to every project.
[projects]
all = []
"#;

/// Resolve the configuration home from an explicit override and a home
/// directory.
fn resolve_home(override_dir: Option<OsString>, home_dir: Option<PathBuf>) -> Option<PathBuf> {
    override_dir
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(HOME_DIR)))
}

/// Get the configuration home directory.
///
/// `$ROUNDUP_HOME` when set, otherwise `~/.roundup`.
pub fn config_home() -> Result<PathBuf> {
    resolve_home(std::env::var_os(HOME_ENV), dirs::home_dir())
        .ok_or_else(|| Error::Config("could not determine the home directory".to_string()))
}

/// Get path to the configuration file in the configuration home.
pub fn default_config_path() -> Result<PathBuf> {
    Ok(config_home()?.join(CONFIG_FILE))
}

/// Load the configuration from disk.
///
/// A missing file is an error: nothing can be fetched without a group.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Err(Error::Config(format!(
            "no configuration at {}; run 'roundup init' to create one",
            path.display()
        )));
    }

    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))?;

    debug!(path = %path.display(), "loaded configuration");
    Ok(config)
}

/// Save the configuration to disk.
///
/// Creates the parent directory if it doesn't exist.
pub fn save_config(path: &Path, config: &Config) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir)
                .map_err(|e| Error::Config(format!("failed to create {}: {e}", dir.display())))?;
        }
    }

    let content = toml::to_string_pretty(config)
        .map_err(|e| Error::Config(format!("failed to serialize configuration: {e}")))?;

    fs::write(path, format!("{HEADER}{content}"))
        .map_err(|e| Error::Config(format!("failed to write {}: {e}", path.display())))?;

    debug!(path = %path.display(), "saved configuration");
    Ok(())
}

/// Write a single override back to the configuration file.
pub fn update_config_field(path: &Path, update: &ConfigUpdate) -> Result<()> {
    let mut config = load_config(path)?;
    config.apply(update)?;
    save_config(path, &config)
}

/// What `init_config` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitOutcome {
    /// The directory holding the configuration had to be created
    pub created_home: bool,
    /// A sample configuration was written
    pub created_config: bool,
    /// Path of the configuration file
    pub config_path: PathBuf,
}

/// Create the configuration directory and a sample configuration.
///
/// Existing directories and files are left untouched.
pub fn init_config(config_path: &Path) -> Result<InitOutcome> {
    let home = config_path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let created_home = if home.is_dir() {
        false
    } else if home.exists() {
        return Err(Error::Config(format!(
            "{} exists but is not a directory",
            home.display()
        )));
    } else {
        fs::create_dir_all(home)
            .map_err(|e| Error::Config(format!("failed to create {}: {e}", home.display())))?;
        true
    };

    let created_config = if config_path.exists() {
        false
    } else {
        fs::write(config_path, SAMPLE_CONFIG).map_err(|e| {
            Error::Config(format!("failed to write {}: {e}", config_path.display()))
        })?;
        true
    };

    Ok(InitOutcome {
        created_home,
        created_config,
        config_path: config_path.to_path_buf(),
    })
}
