//! Markdown rendering of tickets for the refinement conversation.

use chrono::DateTime;
use serde_json::Value;

use crate::adf::extract_adf_text;
use crate::models::{JiraComment, JiraIssue, NamedField};

const NO_DESCRIPTION: &str = "No description";

/// Render a ticket as a markdown document with empty sections for the
/// acceptance criteria and notes gathered during refinement.
pub fn format_ticket_for_display(issue: &JiraIssue) -> String {
  let fields = &issue.fields;

  let summary = fields
    .summary
    .as_deref()
    .filter(|summary| !summary.is_empty())
    .unwrap_or("No summary");
  let issue_type = field_name(fields.issuetype.as_ref());
  let status = field_name(fields.status.as_ref());
  let priority = field_name(fields.priority.as_ref());
  let assignee = fields
    .assignee
    .as_ref()
    .and_then(|user| user.display_name.as_deref())
    .filter(|name| !name.is_empty())
    .unwrap_or("Unassigned");
  let labels = if fields.labels.is_empty() {
    "None".to_string()
  } else {
    fields.labels.join(", ")
  };
  let story_points = fields
    .story_points
    .filter(|points| *points != 0.0)
    .map(format_points)
    .unwrap_or_else(|| "Not estimated".to_string());
  let epic = fields
    .parent
    .as_ref()
    .and_then(|parent| parent.key.as_deref())
    .filter(|key| !key.is_empty())
    .unwrap_or("None");
  let description = description_text(fields.description.as_ref());

  format!(
    "# {key}: {summary}

**Type:** {issue_type} | **Status:** {status} | **Priority:** {priority}
**Assignee:** {assignee}
**Labels:** {labels}
**Story Points:** {story_points}
**Epic:** {epic}

---

## Description

{description}

---

## Acceptance Criteria

<!-- Add acceptance criteria here -->

---

## Notes

<!-- Add any notes from refinement conversation -->

",
    key = issue.key,
  )
}

/// Plain-text form of a description field.
///
/// ADF documents go through the extractor; legacy string descriptions are
/// returned as-is.
pub fn description_text(description: Option<&Value>) -> String {
  let text = match description {
    Some(Value::String(text)) => text.clone(),
    Some(adf @ Value::Object(_)) => extract_adf_text(adf),
    _ => String::new(),
  };

  if text.trim().is_empty() {
    NO_DESCRIPTION.to_string()
  } else {
    text
  }
}

/// Render a single comment: author and timestamp header, then the body.
pub fn format_comment_for_display(comment: &JiraComment) -> String {
  let author = comment.author.as_ref().map(|user| user.name()).unwrap_or("Unknown");
  let created = comment
    .created
    .as_deref()
    .map(format_timestamp)
    .unwrap_or_else(|| "unknown date".to_string());
  let body = match comment.body.as_ref() {
    Some(Value::String(text)) => text.clone(),
    Some(adf) => extract_adf_text(adf),
    None => String::new(),
  };

  format!("**{author}** ({created}):\n{body}\n")
}

fn field_name(field: Option<&NamedField>) -> &str {
  field
    .and_then(|field| field.name.as_deref())
    .filter(|name| !name.is_empty())
    .unwrap_or("Unknown")
}

/// Jira timestamps look like `2024-03-01T10:00:00.000+0000`
fn format_timestamp(raw: &str) -> String {
  DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z")
    .map(|timestamp| timestamp.format("%Y-%m-%d %H:%M").to_string())
    .unwrap_or_else(|_| raw.to_string())
}

fn format_points(points: f64) -> String {
  if points.fract() == 0.0 {
    format!("{points:.0}")
  } else {
    points.to_string()
  }
}
