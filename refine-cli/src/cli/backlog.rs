//! # Backlog Commands
//!
//! Listing and re-ranking the refinement backlog, and organising tickets
//! under epics and links.

use anyhow::Result;
use clap::builder::RangedU64ValueParser;
use clap::{ArgGroup, Args};
use refine_core::output::{format_issue_key, print_info, print_success};
use refine_jira::consts::DEFAULT_LINK_TYPE;
use refine_jira::{JiraIssue, RankDirection};

use crate::clients::JiraSession;

/// List the backlog
#[derive(Args)]
pub struct GetBacklogArgs {
  /// Maximum number of tickets to list
  #[arg(long, short = 'n', default_value_t = 10)]
  pub limit: usize,

  /// Print the raw JSON returned by Jira
  #[arg(long)]
  pub json: bool,
}

/// Move a ticket within the backlog
#[derive(Args)]
#[command(group(ArgGroup::new("direction").required(true).args(["up", "down"])))]
pub struct MoveRankArgs {
  /// The issue key (e.g., PROJ-123, proj123)
  #[arg(required = true, index = 1)]
  pub issue_key: String,

  /// Move towards the top by this many positions
  #[arg(long, value_name = "SPOTS", value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
  pub up: Option<usize>,

  /// Move towards the bottom by this many positions
  #[arg(long, value_name = "SPOTS", value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
  pub down: Option<usize>,
}

/// Search epics
#[derive(Args)]
pub struct SearchEpicsArgs {
  /// Text to look for in epic summaries
  #[arg(required = true, index = 1)]
  pub query: String,
}

/// Make a ticket a child of an epic
#[derive(Args)]
pub struct LinkEpicArgs {
  /// The ticket to move under the epic
  #[arg(required = true, index = 1)]
  pub issue_key: String,

  /// The epic key
  #[arg(required = true, index = 2)]
  pub epic_key: String,
}

/// Link two tickets
#[derive(Args)]
pub struct LinkIssueArgs {
  /// Inward side of the link
  #[arg(required = true, index = 1)]
  pub from_key: String,

  /// Outward side of the link
  #[arg(required = true, index = 2)]
  pub to_key: String,

  /// Link type name as configured in Jira (e.g., Blocks, Relates)
  #[arg(long = "type", default_value = DEFAULT_LINK_TYPE)]
  pub link_type: String,
}

impl MoveRankArgs {
  fn movement(&self) -> Option<(RankDirection, usize)> {
    match (self.up, self.down) {
      (Some(spots), _) => Some((RankDirection::Up, spots)),
      (None, Some(spots)) => Some((RankDirection::Down, spots)),
      (None, None) => None,
    }
  }
}

/// `KEY: summary` lines
fn print_issue_lines(issues: &[JiraIssue]) {
  for issue in issues {
    println!("{}: {}", format_issue_key(&issue.key), issue.summary());
  }
}

pub(crate) fn handle_get_backlog_command(args: GetBacklogArgs) -> Result<()> {
  let session = JiraSession::connect()?;
  let jql = &session.config.backlog_jql;

  if args.json {
    let issues = session.rt.block_on(session.client.search_issues_value(jql, args.limit))?;
    println!("{}", serde_json::to_string_pretty(&issues)?);
    return Ok(());
  }

  let issues = session.rt.block_on(session.client.get_backlog(jql, args.limit))?;
  if issues.is_empty() {
    print_info("No tickets need refinement.");
  }
  print_issue_lines(&issues);
  Ok(())
}

pub(crate) fn handle_move_rank_command(args: MoveRankArgs) -> Result<()> {
  let Some((direction, spots)) = args.movement() else {
    return Err(anyhow::anyhow!("Specify --up or --down"));
  };

  let session = JiraSession::connect()?;
  let issue_key = session.issue_key(&args.issue_key)?;

  let moved = session.rt.block_on(session.client.move_rank(
    &session.config.backlog_jql,
    &issue_key,
    direction,
    spots,
  ))?;

  let way = match direction {
    RankDirection::Up => "up",
    RankDirection::Down => "down",
  };
  if moved {
    print_success(&format!("Moved {} {way} {spots} spots", format_issue_key(&issue_key)));
  } else {
    print_info(&format!(
      "{} is already at the {} of the backlog",
      format_issue_key(&issue_key),
      if direction == RankDirection::Up { "top" } else { "bottom" }
    ));
  }
  Ok(())
}

pub(crate) fn handle_search_epics_command(args: SearchEpicsArgs) -> Result<()> {
  let session = JiraSession::connect()?;

  let epics = session
    .rt
    .block_on(session.client.search_epics(&session.config.project_key, &args.query))?;
  if epics.is_empty() {
    print_info(&format!("No epics match '{}'", args.query));
  }
  print_issue_lines(&epics);
  Ok(())
}

pub(crate) fn handle_link_epic_command(args: LinkEpicArgs) -> Result<()> {
  let session = JiraSession::connect()?;
  let issue_key = session.issue_key(&args.issue_key)?;
  let epic_key = session.issue_key(&args.epic_key)?;

  session.rt.block_on(session.client.link_to_epic(&issue_key, &epic_key))?;
  print_success(&format!(
    "Linked {} to epic {}",
    format_issue_key(&issue_key),
    format_issue_key(&epic_key)
  ));
  Ok(())
}

pub(crate) fn handle_link_issue_command(args: LinkIssueArgs) -> Result<()> {
  let session = JiraSession::connect()?;
  let from_key = session.issue_key(&args.from_key)?;
  let to_key = session.issue_key(&args.to_key)?;

  session
    .rt
    .block_on(session.client.create_issue_link(&from_key, &to_key, &args.link_type))?;
  print_success(&format!(
    "Linked {} to {} ({})",
    format_issue_key(&from_key),
    format_issue_key(&to_key),
    args.link_type
  ));
  Ok(())
}
