//! # Refine Core Library
//!
//! Shared building blocks for the refine workspace: layered configuration,
//! credential lookup, URL normalization, issue-key parsing and the terminal
//! output helpers every command uses.

pub mod config;
pub mod creds;
pub mod issue_key;
pub mod output;
pub mod url;
pub mod utils;

// Re-export main types
pub use config::{ConfigDirs, FileConfig, RefineConfig, get_config_dirs};
pub use creds::{Credentials, get_jira_credentials};
pub use issue_key::{IssueKeyError, IssueKeyMode, IssueKeyParser};
pub use output::{ColorMode, print_error, print_header, print_info, print_success, print_warning};
pub use utils::open_url_in_browser;
