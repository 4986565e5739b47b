//! # Jira API Endpoints
//!
//! Endpoint implementations grouped by resource: issues, search, comments,
//! labels, transitions, backlog ranking and issue links.

pub mod comments;
pub mod issues;
pub mod labels;
pub mod links;
pub mod rank;
pub mod search;
pub mod transitions;
