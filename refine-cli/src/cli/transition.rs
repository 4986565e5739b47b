//! # Transition Command

use anyhow::Result;
use clap::Args;
use refine_core::output::{format_issue_key, format_status, print_info, print_success};

use crate::clients::JiraSession;

/// Move a ticket through its workflow
#[derive(Args)]
pub struct TransitionArgs {
  /// The issue key (e.g., PROJ-123, proj123)
  #[arg(required = true, index = 1)]
  pub issue_key: String,

  #[arg(
    long,
    value_name = "TRANSITION",
    long_help = "The transition name or ID (if not provided, available transitions will be listed)"
  )]
  pub to: Option<String>,

  /// Resolution to set, e.g. "Won't Do" when closing
  #[arg(long, requires = "to")]
  pub resolution: Option<String>,
}

pub(crate) fn handle_transition_command(args: TransitionArgs) -> Result<()> {
  let session = JiraSession::connect()?;
  let issue_key = session.issue_key(&args.issue_key)?;

  // If no transition is specified, list available transitions
  let Some(name) = args.to.as_deref() else {
    let transitions = session.rt.block_on(session.client.get_transitions(&issue_key))?;
    if transitions.is_empty() {
      print_info(&format!("No transitions available for {}", format_issue_key(&issue_key)));
    } else {
      print_info(&format!("Available transitions for {}:", format_issue_key(&issue_key)));
      for t in transitions {
        println!("  • {} (ID: {})", format_status(&t.name), t.id);
      }
    }
    return Ok(());
  };

  let applied = session.rt.block_on(session.client.transition_issue_by_name(
    &issue_key,
    name,
    args.resolution.as_deref(),
  ))?;

  print_success(&format!(
    "Transitioned {} to '{}'",
    format_issue_key(&issue_key),
    format_status(&applied.name)
  ));
  Ok(())
}
