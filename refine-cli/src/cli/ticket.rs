//! # Ticket Commands
//!
//! Viewing, editing, labelling, commenting on and opening individual
//! tickets.

use anyhow::{Context, Result};
use clap::{ArgGroup, Args};
use refine_core::RefineConfig;
use refine_core::output::{format_issue_key, print_info, print_success};
use refine_core::utils::open_url_in_browser;
use refine_jira::adf::text_to_adf;
use refine_jira::models::NameRef;
use refine_jira::{IssueFieldsUpdate, format_comment_for_display, format_ticket_for_display};

use crate::clients::{JiraSession, parse_issue_key};

/// Show a ticket
#[derive(Args)]
pub struct GetTicketArgs {
  /// The issue key (e.g., PROJ-123, proj123)
  #[arg(required = true, index = 1)]
  pub issue_key: String,

  /// Print the raw JSON returned by Jira
  #[arg(long)]
  pub json: bool,
}

/// Update ticket fields
#[derive(Args)]
#[command(group(ArgGroup::new("fields").required(true).multiple(true)))]
pub struct UpdateTicketArgs {
  /// The issue key (e.g., PROJ-123, proj123)
  #[arg(required = true, index = 1)]
  pub issue_key: String,

  /// New summary
  #[arg(long, group = "fields")]
  pub summary: Option<String>,

  /// New description as plain text
  #[arg(long, group = "fields")]
  pub description: Option<String>,

  /// Story point estimate
  #[arg(long, group = "fields")]
  pub story_points: Option<f64>,

  /// Priority name (e.g., High)
  #[arg(long, group = "fields")]
  pub priority: Option<String>,
}

/// Add or remove a label
#[derive(Args)]
pub struct LabelArgs {
  /// The issue key (e.g., PROJ-123, proj123)
  #[arg(required = true, index = 1)]
  pub issue_key: String,

  /// The label
  #[arg(required = true, index = 2)]
  pub label: String,
}

/// List comments
#[derive(Args)]
pub struct CommentsArgs {
  /// The issue key (e.g., PROJ-123, proj123)
  #[arg(required = true, index = 1)]
  pub issue_key: String,

  /// Print the raw JSON returned by Jira
  #[arg(long)]
  pub json: bool,
}

/// Add a comment
#[derive(Args)]
pub struct AddCommentArgs {
  /// The issue key (e.g., PROJ-123, proj123)
  #[arg(required = true, index = 1)]
  pub issue_key: String,

  /// Comment text; use quotes for multiple words
  #[arg(required = true, index = 2)]
  pub text: String,
}

/// Open a ticket in the browser
#[derive(Args)]
pub struct OpenArgs {
  /// The issue key (e.g., PROJ-123, proj123)
  #[arg(required = true, index = 1)]
  pub issue_key: String,
}

impl UpdateTicketArgs {
  /// Empty strings count as not given
  fn to_fields_update(&self) -> IssueFieldsUpdate {
    IssueFieldsUpdate {
      summary: non_empty(self.summary.as_deref()).map(str::to_string),
      description: non_empty(self.description.as_deref()).map(text_to_adf),
      story_points: self.story_points,
      priority: non_empty(self.priority.as_deref()).map(|name| NameRef {
        name: name.to_string(),
      }),
      parent: None,
    }
  }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
  value.filter(|value| !value.is_empty())
}

pub(crate) fn handle_get_ticket_command(args: GetTicketArgs) -> Result<()> {
  let session = JiraSession::connect()?;
  let issue_key = session.issue_key(&args.issue_key)?;

  if args.json {
    let value = session.rt.block_on(session.client.get_issue_value(&issue_key))?;
    println!("{}", serde_json::to_string_pretty(&value)?);
  } else {
    let issue = session.rt.block_on(session.client.get_issue(&issue_key))?;
    print!("{}", format_ticket_for_display(&issue));
  }
  Ok(())
}

pub(crate) fn handle_update_ticket_command(args: UpdateTicketArgs) -> Result<()> {
  let session = JiraSession::connect()?;
  let issue_key = session.issue_key(&args.issue_key)?;
  let fields = args.to_fields_update();

  session
    .rt
    .block_on(session.client.update_issue(&issue_key, &fields))
    .with_context(|| format!("Failed to update {issue_key}"))?;

  print_success(&format!(
    "Updated {}: {}",
    format_issue_key(&issue_key),
    fields.field_names().join(", ")
  ));
  Ok(())
}

pub(crate) fn handle_add_label_command(args: LabelArgs) -> Result<()> {
  let session = JiraSession::connect()?;
  let issue_key = session.issue_key(&args.issue_key)?;

  session.rt.block_on(session.client.add_label(&issue_key, &args.label))?;
  print_success(&format!("Added label '{}' to {}", args.label, format_issue_key(&issue_key)));
  Ok(())
}

pub(crate) fn handle_remove_label_command(args: LabelArgs) -> Result<()> {
  let session = JiraSession::connect()?;
  let issue_key = session.issue_key(&args.issue_key)?;

  session.rt.block_on(session.client.remove_label(&issue_key, &args.label))?;
  print_success(&format!(
    "Removed label '{}' from {}",
    args.label,
    format_issue_key(&issue_key)
  ));
  Ok(())
}

pub(crate) fn handle_comments_command(args: CommentsArgs) -> Result<()> {
  let session = JiraSession::connect()?;
  let issue_key = session.issue_key(&args.issue_key)?;

  if args.json {
    let comments = session.rt.block_on(session.client.get_comments_value(&issue_key))?;
    println!("{}", serde_json::to_string_pretty(&comments)?);
    return Ok(());
  }

  let comments = session.rt.block_on(session.client.get_comments(&issue_key))?;
  if comments.is_empty() {
    print_info(&format!("No comments on {}", format_issue_key(&issue_key)));
    return Ok(());
  }

  let rendered: Vec<String> = comments.iter().map(format_comment_for_display).collect();
  print!("{}", rendered.join("\n"));
  Ok(())
}

pub(crate) fn handle_add_comment_command(args: AddCommentArgs) -> Result<()> {
  let session = JiraSession::connect()?;
  let issue_key = session.issue_key(&args.issue_key)?;

  session.rt.block_on(session.client.add_comment(&issue_key, &args.text))?;
  print_success(&format!("Added comment to {}", format_issue_key(&issue_key)));
  Ok(())
}

/// Opening a ticket only needs the site URL, not credentials
pub(crate) fn handle_open_command(args: OpenArgs) -> Result<()> {
  let config = RefineConfig::load()?;
  let issue_key = parse_issue_key(&config, &args.issue_key)?;

  open_url_in_browser(&config.browse_url(&issue_key))
}

#[cfg(test)]
mod tests {
  use clap::Parser;

  use super::*;
  use crate::cli::{Cli, Commands};

  fn parse_update(args: &[&str]) -> Result<UpdateTicketArgs, clap::Error> {
    let cli = Cli::try_parse_from(args)?;
    match cli.command {
      Commands::UpdateTicket(update) => Ok(update),
      _ => panic!("expected update-ticket"),
    }
  }

  #[test]
  fn test_update_ticket_requires_a_field() {
    assert!(parse_update(&["refine", "update-ticket", "PROJ-1"]).is_err());
  }

  #[test]
  fn test_update_ticket_builds_fields() {
    let args = parse_update(&[
      "refine",
      "update-ticket",
      "PROJ-1",
      "--description",
      "See [docs](https://example.com)",
      "--story-points",
      "2.5",
      "--priority",
      "Low",
    ])
    .unwrap();

    let fields = args.to_fields_update();
    assert!(fields.summary.is_none());
    assert_eq!(fields.story_points, Some(2.5));
    assert_eq!(fields.priority.unwrap().name, "Low");
    assert_eq!(
      fields.description.unwrap().to_markdown(),
      "See [docs](https://example.com)"
    );
  }

  #[test]
  fn test_update_ticket_skips_empty_values() {
    let args = parse_update(&[
      "refine",
      "update-ticket",
      "PROJ-1",
      "--summary",
      "",
      "--description",
      "",
      "--priority",
      "",
      "--story-points",
      "3",
    ])
    .unwrap();

    let fields = args.to_fields_update();
    assert!(fields.summary.is_none());
    assert!(fields.description.is_none());
    assert!(fields.priority.is_none());
    assert_eq!(fields.field_names(), vec!["story points"]);
  }

  #[test]
  fn test_update_ticket_with_only_empty_values_is_empty() {
    let args = parse_update(&["refine", "update-ticket", "PROJ-1", "--summary", ""]).unwrap();

    assert!(args.to_fields_update().is_empty());
  }
}
