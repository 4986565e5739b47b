//! # Command Line Interface
//!
//! Defines the CLI structure and dispatches to the command handlers for
//! ticket inspection and editing, backlog ordering, workflow transitions and
//! offline ADF conversion.

mod adf;
mod backlog;
mod completion;
mod config;
mod connection;
mod ticket;
mod transition;

use anyhow::Result;
use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Parser, Subcommand};
use refine_core::ColorMode;

/// Version string with build metadata for `--version`
const LONG_VERSION: &str = concat!(
  env!("CARGO_PKG_VERSION"),
  " (",
  env!("GIT_HASH"),
  " ",
  env!("TARGET"),
  ")"
);

/// Top-level CLI command for the refine tool
#[derive(Parser)]
#[command(name = "refine")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(about = "Jira backlog refinement from the terminal")]
#[command(
  long_about = "Refine helps run backlog refinement sessions against Jira Cloud.\n\n\
        It fetches tickets as markdown, updates fields and labels, adds comments,\n\
        moves tickets through the workflow and re-ranks the backlog. Descriptions\n\
        and comments are converted between plain text and Atlassian Document Format."
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_version = LONG_VERSION)]
#[command(propagate_version = true)]
#[command(subcommand_required(true))]
#[command(disable_help_subcommand = true)]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightGreen.on_default().bold().underline())
    .usage(AnsiColor::Green.on_default().bold())
    .literal(AnsiColor::BrightGreen.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
    .valid(AnsiColor::Green.on_default())
    .invalid(AnsiColor::BrightRed.on_default().bold())
)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    global = true,
    action = ArgAction::Count,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,

  /// Controls when colored output is used
  #[arg(
    long,
    global = true,
    value_enum,
    ignore_case = true,
    default_value_t = ColorMode::Auto,
  )]
  pub colors: ColorMode,

  /// Subcommands
  #[command(subcommand)]
  pub command: Commands,
}

/// Subcommands for the refine tool
#[derive(Subcommand)]
pub enum Commands {
  /// Add a comment to a ticket
  #[command(long_about = "Add a comment to a ticket.\n\n\
            Each line becomes a paragraph. Markdown links ([text](url)) and bare\n\
            URLs are turned into clickable links.")]
  AddComment(ticket::AddCommentArgs),

  /// Add a label to a ticket
  AddLabel(ticket::LabelArgs),

  /// Convert between plain text and Atlassian Document Format
  #[command(long_about = "Convert between plain text and Atlassian Document Format (ADF).\n\n\
            Works offline: input is read from a file or stdin and the result is\n\
            written to stdout. No Jira configuration is needed.")]
  Adf(adf::AdfArgs),

  /// List the comments on a ticket
  Comments(ticket::CommentsArgs),

  /// Generate shell completions
  #[command(long_about = "Generates shell completion scripts for refine commands.\n\n\
            Supported shells are bash, zsh, fish, elvish and PowerShell.")]
  Completion(completion::CompletionArgs),

  /// Show configuration
  #[command(long_about = "Inspect the resolved configuration.\n\n\
            Settings come from config.toml in the refine config directory, a .env file\n\
            (REFINE_ENV_FILE or ./.env) and JIRA_* environment variables, in increasing\n\
            order of precedence.")]
  Config(config::ConfigArgs),

  /// List backlog tickets that still need refinement
  #[command(long_about = "List backlog tickets that still need refinement, in rank order.\n\n\
            The backlog is selected with JIRA_BACKLOG_JQL, which defaults to every ticket\n\
            in JIRA_PROJECT_KEY that is not labelled 'ready'.")]
  #[command(alias = "backlog")]
  GetBacklog(backlog::GetBacklogArgs),

  /// Show a ticket as markdown
  #[command(long_about = "Show a ticket as markdown.\n\n\
            The output includes the ticket metadata, its description converted from ADF\n\
            and empty Acceptance Criteria and Notes sections to fill in during refinement.\n\
            Use --json for the raw API response.")]
  #[command(alias = "show")]
  GetTicket(ticket::GetTicketArgs),

  /// Make a ticket a child of an epic
  LinkEpic(backlog::LinkEpicArgs),

  /// Link two tickets
  LinkIssue(backlog::LinkIssueArgs),

  /// Move a ticket up or down the backlog
  #[command(long_about = "Move a ticket up or down the backlog by a number of positions.\n\n\
            Moves are clamped to the top and bottom of the backlog. A ticket already at\n\
            the top (or bottom) is left where it is.")]
  MoveRank(backlog::MoveRankArgs),

  /// Open a ticket in the browser
  Open(ticket::OpenArgs),

  /// Remove a label from a ticket
  RemoveLabel(ticket::LabelArgs),

  /// Search epics by summary
  SearchEpics(backlog::SearchEpicsArgs),

  /// Check the connection and credentials
  #[command(long_about = "Check the connection and credentials.\n\n\
            Credentials come from JIRA_EMAIL and JIRA_API_TOKEN, or from a .netrc entry\n\
            for the Jira host (falling back to machine 'atlassian.net').")]
  TestConnection,

  /// Move a ticket through its workflow
  #[command(long_about = "Move a ticket through its workflow.\n\n\
            Without --to, the transitions available from the current status are listed.\n\
            Transition names are matched case-insensitively; IDs are accepted too.")]
  Transition(transition::TransitionArgs),

  /// Update ticket fields
  #[command(long_about = "Update the summary, description, story points or priority of a ticket.\n\n\
            At least one field is required. The description is given as plain text and\n\
            converted to Atlassian Document Format.")]
  UpdateTicket(ticket::UpdateTicketArgs),
}

pub fn handle_cli(cli: Cli) -> Result<()> {
  // Set global color override based on --colors argument
  cli.colors.apply();

  match cli.command {
    Commands::AddComment(args) => ticket::handle_add_comment_command(args),
    Commands::AddLabel(args) => ticket::handle_add_label_command(args),
    Commands::Adf(args) => adf::handle_adf_command(args),
    Commands::Comments(args) => ticket::handle_comments_command(args),
    Commands::Completion(args) => completion::handle_completion_command(args),
    Commands::Config(args) => config::handle_config_command(args),
    Commands::GetBacklog(args) => backlog::handle_get_backlog_command(args),
    Commands::GetTicket(args) => ticket::handle_get_ticket_command(args),
    Commands::LinkEpic(args) => backlog::handle_link_epic_command(args),
    Commands::LinkIssue(args) => backlog::handle_link_issue_command(args),
    Commands::MoveRank(args) => backlog::handle_move_rank_command(args),
    Commands::Open(args) => ticket::handle_open_command(args),
    Commands::RemoveLabel(args) => ticket::handle_remove_label_command(args),
    Commands::SearchEpics(args) => backlog::handle_search_epics_command(args),
    Commands::TestConnection => connection::handle_test_connection_command(),
    Commands::Transition(args) => transition::handle_transition_command(args),
    Commands::UpdateTicket(args) => ticket::handle_update_ticket_command(args),
  }
}
