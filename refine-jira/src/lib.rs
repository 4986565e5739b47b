//! # Jira API Client
//!
//! Jira Cloud REST integration for backlog refinement: searching the backlog,
//! reading and updating tickets, labels, comments, transitions, epic and issue
//! links and backlog ranking, plus conversion between plain text and Atlassian
//! Document Format.

pub mod adf;
pub mod auth;
pub mod backlog;
mod client;
pub mod consts;
pub mod display;
mod endpoints;
pub mod models;

// Re-export the client
pub use adf::{AdfDocument, AdfNode, extract_adf_text, text_to_adf};
pub use backlog::{RankDirection, RankError, plan_rank_move};
pub use client::{JiraClient, create_jira_client};
pub use display::{format_comment_for_display, format_ticket_for_display};
// Re-export models
pub use models::{
  IssueFieldsUpdate, JiraAuth, JiraComment, JiraIssue, JiraIssueFields, JiraTransition, JiraUser, RankRequest,
};
