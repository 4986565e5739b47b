//! # Client Creation
//!
//! Loads configuration and builds the authenticated Jira client that the
//! network-backed commands share.

use anyhow::{Context, Result};
use directories::BaseDirs;
use refine_core::{IssueKeyParser, RefineConfig};
use refine_jira::JiraClient;
use refine_jira::auth::create_jira_runtime_and_client;
use tokio::runtime::Runtime;

/// Everything a Jira-backed command needs
pub struct JiraSession {
  pub config: RefineConfig,
  pub rt: Runtime,
  pub client: JiraClient,
}

impl JiraSession {
  /// Load configuration and credentials, then create the runtime and client
  pub fn connect() -> Result<Self> {
    let config = RefineConfig::load()?;
    let base_dirs = BaseDirs::new().context("Failed to get $HOME directory")?;
    let (rt, client) = create_jira_runtime_and_client(&config, base_dirs.home_dir())?;
    Ok(Self { config, rt, client })
  }

  /// Normalize an issue key typed by the user
  pub fn issue_key(&self, input: &str) -> Result<String> {
    parse_issue_key(&self.config, input)
  }
}

/// Normalize an issue key according to the configured parsing mode
pub fn parse_issue_key(config: &RefineConfig, input: &str) -> Result<String> {
  Ok(IssueKeyParser::new(config.issue_key_mode).parse(input)?)
}
