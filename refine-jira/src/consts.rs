//! Constants for the refine-jira client.

/// User-Agent header value for the Jira API client
pub const USER_AGENT: &str = concat!("refine-cli/", env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Path prefix of the Jira platform REST API
pub const API_PATH: &str = "rest/api/3";

/// Path prefix of the Jira Software (agile) REST API
pub const AGILE_PATH: &str = "rest/agile/1.0";

/// Custom field Jira Cloud uses for story point estimates
pub const STORY_POINTS_FIELD: &str = "customfield_10016";

/// Fields requested for every issue search
pub const SEARCH_FIELDS: &[&str] = &[
  "summary",
  "description",
  "status",
  "labels",
  "priority",
  "issuetype",
  "assignee",
  "reporter",
  "created",
  "updated",
  STORY_POINTS_FIELD,
  "parent",
  "comment",
];

/// Issues fetched beyond the move distance when re-ranking the backlog
pub const RANK_LOOKAHEAD: usize = 50;

/// Maximum number of epics returned by an epic search
pub const EPIC_SEARCH_LIMIT: usize = 10;

/// Link type used when none is given
pub const DEFAULT_LINK_TYPE: &str = "Relates";
