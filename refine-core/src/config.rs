//! # Configuration Management
//!
//! Resolves the Jira site, project and backlog query from three layers, in
//! increasing precedence:
//!
//! 1. `config.toml` in the refine config directory (XDG on Linux)
//! 2. a `.env` file (`$REFINE_ENV_FILE`, else `./.env`) loaded into the
//!    process environment without overriding variables that are already set
//! 3. the process environment (`JIRA_BASE_URL`, `JIRA_PROJECT_KEY`, ...)

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::issue_key::IssueKeyMode;
use crate::url::{browse_url, ensure_url_scheme};

/// Environment variable storing the Jira site URL.
pub const ENV_JIRA_BASE_URL: &str = "JIRA_BASE_URL";
/// Fallback environment variable for the Jira site URL.
pub const ENV_JIRA_HOST: &str = "JIRA_HOST";
/// Environment variable storing the default project key.
pub const ENV_JIRA_PROJECT_KEY: &str = "JIRA_PROJECT_KEY";
/// Environment variable overriding the backlog JQL.
pub const ENV_JIRA_BACKLOG_JQL: &str = "JIRA_BACKLOG_JQL";
/// Environment variable pointing at an alternative `.env` file.
pub const ENV_REFINE_ENV_FILE: &str = "REFINE_ENV_FILE";

/// Represents the configuration directory for the refine application
#[derive(Debug, Clone)]
pub struct ConfigDirs {
  config_dir: PathBuf,
}

impl ConfigDirs {
  /// Locate the platform configuration directory
  pub fn new() -> Result<Self> {
    let proj_dirs =
      ProjectDirs::from("eddieland", "", "refine").context("Failed to determine project directories")?;

    Ok(Self::from_path(proj_dirs.config_dir()))
  }

  /// Use an explicit configuration directory
  pub fn from_path(config_dir: impl Into<PathBuf>) -> Self {
    Self {
      config_dir: config_dir.into(),
    }
  }

  /// Get the config directory
  pub fn config_dir(&self) -> &Path {
    &self.config_dir
  }

  /// Get the path to the configuration file
  pub fn config_path(&self) -> PathBuf {
    self.config_dir.join("config.toml")
  }

  /// Load the configuration file, or defaults when it does not exist
  pub fn load_file_config(&self) -> Result<FileConfig> {
    let config_path = self.config_path();

    if !config_path.exists() {
      debug!("No config file at {}", config_path.display());
      return Ok(FileConfig::default());
    }

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

    toml::from_str(&content).with_context(|| format!("Failed to parse config from {}", config_path.display()))
  }
}

/// Get the configuration directories
pub fn get_config_dirs() -> Result<ConfigDirs> {
  ConfigDirs::new()
}

/// Settings read from `config.toml`. Every key is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FileConfig {
  /// Jira site URL (e.g., https://company.atlassian.net)
  #[serde(default)]
  pub base_url: Option<String>,

  /// Project key used for epic search and the default backlog query
  #[serde(default)]
  pub project_key: Option<String>,

  /// JQL selecting the tickets that still need refinement
  #[serde(default)]
  pub backlog_jql: Option<String>,

  /// How issue keys typed on the command line are parsed
  #[serde(default)]
  pub issue_key_mode: Option<IssueKeyMode>,
}

/// Fully resolved configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefineConfig {
  pub base_url: String,
  pub project_key: String,
  pub backlog_jql: String,
  pub issue_key_mode: IssueKeyMode,
}

/// Backlog query used when none is configured: everything not yet labelled
/// `ready`, in rank order.
pub fn default_backlog_jql(project_key: &str) -> String {
  if project_key.is_empty() {
    "labels != 'ready' ORDER BY rank ASC".to_string()
  } else {
    format!("project = {project_key} AND labels != 'ready' ORDER BY rank ASC")
  }
}

impl RefineConfig {
  /// Merge the file layer with environment lookups.
  ///
  /// `lookup` returns the value of an environment variable; blank values
  /// should be reported as `None`.
  pub fn resolve<F>(file: FileConfig, lookup: F) -> Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let raw_base_url = lookup(ENV_JIRA_BASE_URL)
      .or_else(|| lookup(ENV_JIRA_HOST))
      .or(file.base_url)
      .ok_or_else(|| {
        anyhow::anyhow!("Jira site not configured. Set {ENV_JIRA_BASE_URL} (e.g. https://company.atlassian.net)")
      })?;
    let base_url = ensure_url_scheme(&raw_base_url).with_context(|| format!("Invalid Jira URL '{raw_base_url}'"))?;

    let project_key = lookup(ENV_JIRA_PROJECT_KEY)
      .or(file.project_key)
      .unwrap_or_default()
      .trim()
      .to_string();

    let backlog_jql = lookup(ENV_JIRA_BACKLOG_JQL)
      .or(file.backlog_jql)
      .unwrap_or_else(|| default_backlog_jql(&project_key));

    Ok(Self {
      base_url,
      project_key,
      backlog_jql,
      issue_key_mode: file.issue_key_mode.unwrap_or_default(),
    })
  }

  /// Load `.env`, the config file and the environment
  pub fn load() -> Result<Self> {
    load_dotenv();
    let file = get_config_dirs()?.load_file_config()?;
    Self::resolve(file, env_lookup)
  }

  /// Browser URL for an issue on the configured site
  pub fn browse_url(&self, issue_key: &str) -> String {
    browse_url(&self.base_url, issue_key)
  }
}

/// Read a non-blank environment variable
pub fn env_lookup(name: &str) -> Option<String> {
  std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// Load the `.env` file into the process environment.
///
/// Returns the path that was loaded, if any. A broken file is reported and
/// skipped rather than aborting the command.
pub fn load_dotenv() -> Option<PathBuf> {
  let path = env_lookup(ENV_REFINE_ENV_FILE)
    .map(PathBuf::from)
    .unwrap_or_else(|| PathBuf::from(".env"));

  if !path.exists() {
    return None;
  }

  match dotenvy::from_path(&path) {
    Ok(()) => {
      debug!("Loaded environment from {}", path.display());
      Some(path)
    }
    Err(e) => {
      warn!("Ignoring unreadable env file {}: {e}", path.display());
      None
    }
  }
}
