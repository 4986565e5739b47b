//! Authentication helpers for the Jira client.
//!
//! These helpers combine the resolved configuration with credential lookup
//! so every command builds its client the same way.

use std::path::Path;

use anyhow::{Context, Result};
use refine_core::RefineConfig;
use refine_core::creds::get_jira_credentials;
use tokio::runtime::Runtime;

use crate::{JiraClient, create_jira_client};

/// Creates an authenticated Jira client for the configured site.
pub fn create_jira_client_from_config(config: &RefineConfig, home: &Path) -> Result<JiraClient> {
  let credentials = get_jira_credentials(home, &config.base_url).context("Failed to get Jira credentials")?;

  Ok(create_jira_client(
    &config.base_url,
    &credentials.username,
    &credentials.password,
  ))
}

/// Creates a tokio runtime and an authenticated Jira client.
pub fn create_jira_runtime_and_client(config: &RefineConfig, home: &Path) -> Result<(Runtime, JiraClient)> {
  let rt = Runtime::new().context("Failed to create async runtime")?;
  let client = create_jira_client_from_config(config, home)?;
  Ok((rt, client))
}
