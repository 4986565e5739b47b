//! # Connection Check

use anyhow::Result;
use refine_core::output::{print_info, print_success};

use crate::clients::JiraSession;

pub(crate) fn handle_test_connection_command() -> Result<()> {
  let session = JiraSession::connect()?;
  print_info(&format!("Connecting to {}", session.config.base_url));

  let user = session.rt.block_on(session.client.get_myself())?;
  print_success(&format!("Connected as: {}", user.name()));
  Ok(())
}
