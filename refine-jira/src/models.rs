//! Request and response bodies for the Jira REST API.
//!
//! Response types are deliberately lenient: Jira returns `null` for empty
//! collections and omits fields the caller did not request, so collections
//! deserialize `null` as empty and everything else is optional.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::adf::AdfDocument;

/// Deserialize `null` as the type's default value
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Default + Deserialize<'de>,
{
  Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Represents Jira authentication credentials
#[derive(Clone)]
pub struct JiraAuth {
  pub username: String,
  pub api_token: String,
}

/// A Jira user, as returned by `myself` or embedded in issues
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraUser {
  pub account_id: Option<String>,
  pub display_name: Option<String>,
  pub email_address: Option<String>,
}

impl JiraUser {
  /// Best available human-readable name
  pub fn name(&self) -> &str {
    [&self.display_name, &self.email_address, &self.account_id]
      .into_iter()
      .flatten()
      .map(String::as_str)
      .find(|name| !name.is_empty())
      .unwrap_or("Unknown")
  }
}

/// Status, priority and issue type all share the `{id, name}` shape
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NamedField {
  pub id: Option<String>,
  pub name: Option<String>,
}

/// A reference to another issue, e.g. the parent epic
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IssueRef {
  pub id: Option<String>,
  pub key: Option<String>,
}

/// Represents a Jira issue
#[derive(Debug, Deserialize)]
pub struct JiraIssue {
  #[serde(default)]
  pub id: String,
  pub key: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub fields: JiraIssueFields,
}

impl JiraIssue {
  pub fn summary(&self) -> &str {
    self.fields.summary.as_deref().unwrap_or_default()
  }
}

/// Represents Jira issue fields
#[derive(Debug, Default, Deserialize)]
pub struct JiraIssueFields {
  pub summary: Option<String>,
  /// An ADF document on API v3; older sites may still send a plain string
  pub description: Option<Value>,
  pub status: Option<NamedField>,
  pub issuetype: Option<NamedField>,
  pub priority: Option<NamedField>,
  #[serde(default, deserialize_with = "null_as_default")]
  pub labels: Vec<String>,
  pub assignee: Option<JiraUser>,
  pub reporter: Option<JiraUser>,
  pub created: Option<String>,
  pub updated: Option<String>,
  #[serde(rename = "customfield_10016")]
  pub story_points: Option<f64>,
  pub parent: Option<IssueRef>,
  pub comment: Option<JiraCommentPage>,
}

/// Represents the result of a JQL search
///
/// `T` is [`JiraIssue`] for typed access or `serde_json::Value` to keep the
/// issues exactly as Jira returned them.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct SearchResults<T = JiraIssue> {
  #[serde(default, deserialize_with = "null_as_default")]
  pub issues: Vec<T>,
}

/// A single issue comment
#[derive(Debug, Deserialize)]
pub struct JiraComment {
  #[serde(default)]
  pub id: String,
  pub author: Option<JiraUser>,
  pub body: Option<Value>,
  pub created: Option<String>,
  pub updated: Option<String>,
}

/// A page of comments
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct JiraCommentPage<T = JiraComment> {
  #[serde(default, deserialize_with = "null_as_default")]
  pub comments: Vec<T>,
  pub total: Option<u64>,
}

/// Represents a Jira transition
#[derive(Debug, Deserialize)]
pub struct JiraTransition {
  pub id: String,
  pub name: String,
}

/// Represents a list of Jira transitions
#[derive(Debug, Deserialize)]
pub struct JiraTransitions {
  #[serde(default, deserialize_with = "null_as_default")]
  pub transitions: Vec<JiraTransition>,
}

/// `{"name": ...}` reference used for priorities, resolutions and link types
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NameRef {
  pub name: String,
}

/// `{"key": ...}` reference to an issue
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyRef {
  pub key: String,
}

/// Represents a transition request payload
#[derive(Debug, Serialize)]
pub struct TransitionRequest {
  pub transition: TransitionId,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub fields: Option<TransitionFields>,
}

/// Represents a transition ID for the request
#[derive(Debug, Serialize)]
pub struct TransitionId {
  pub id: String,
}

/// Fields set while transitioning, e.g. a resolution when closing
#[derive(Debug, Serialize)]
pub struct TransitionFields {
  pub resolution: NameRef,
}

/// Field changes for `PUT issue/{key}`; unset fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IssueFieldsUpdate {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub summary: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<AdfDocument>,
  #[serde(rename = "customfield_10016", skip_serializing_if = "Option::is_none")]
  pub story_points: Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub priority: Option<NameRef>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub parent: Option<KeyRef>,
}

impl IssueFieldsUpdate {
  pub const fn is_empty(&self) -> bool {
    self.summary.is_none()
      && self.description.is_none()
      && self.story_points.is_none()
      && self.priority.is_none()
      && self.parent.is_none()
  }

  /// Names of the fields this update touches, for user feedback
  pub fn field_names(&self) -> Vec<&'static str> {
    [
      (self.summary.is_some(), "summary"),
      (self.description.is_some(), "description"),
      (self.story_points.is_some(), "story points"),
      (self.priority.is_some(), "priority"),
      (self.parent.is_some(), "parent"),
    ]
    .into_iter()
    .filter_map(|(set, name)| set.then_some(name))
    .collect()
  }
}

/// Body of `PUT issue/{key}` when setting fields
#[derive(Debug, Serialize)]
pub struct IssueUpdateRequest<'a> {
  pub fields: &'a IssueFieldsUpdate,
}

/// A single label edit
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelOperation {
  Add(String),
  Remove(String),
}

/// Body of `PUT issue/{key}` when editing labels
#[derive(Debug, Serialize)]
pub struct LabelUpdateRequest {
  pub update: LabelUpdate,
}

#[derive(Debug, Serialize)]
pub struct LabelUpdate {
  pub labels: Vec<LabelOperation>,
}

/// Body of `POST issue/{key}/comment`
#[derive(Debug, Serialize)]
pub struct CommentRequest {
  pub body: AdfDocument,
}

/// Body of the agile `PUT issue/rank` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankRequest {
  pub issues: Vec<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub rank_before_issue: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub rank_after_issue: Option<String>,
}

/// Body of `POST issueLink`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueLinkRequest {
  #[serde(rename = "type")]
  pub link_type: NameRef,
  pub inward_issue: KeyRef,
  pub outward_issue: KeyRef,
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn test_jira_issue_deserialization() {
    let json = json!({
        "id": "10000",
        "key": "PROJ-123",
        "fields": {
            "summary": "Test issue",
            "description": {"type": "doc", "version": 1, "content": []},
            "status": {"name": "In Progress"},
            "labels": ["backend", "ready"],
            "customfield_10016": 5.0,
            "parent": {"id": "9", "key": "PROJ-1"},
            "assignee": {"accountId": "abc", "displayName": "Jane Doe"}
        }
    });

    let issue: JiraIssue = serde_json::from_value(json).unwrap();

    assert_eq!(issue.id, "10000");
    assert_eq!(issue.key, "PROJ-123");
    assert_eq!(issue.summary(), "Test issue");
    assert_eq!(issue.fields.labels, vec!["backend", "ready"]);
    assert_eq!(issue.fields.story_points, Some(5.0));
    assert_eq!(issue.fields.parent.unwrap().key.as_deref(), Some("PROJ-1"));
    assert_eq!(issue.fields.assignee.unwrap().name(), "Jane Doe");
  }

  #[test]
  fn test_jira_issue_tolerates_nulls() {
    let json = json!({
        "key": "PROJ-9",
        "fields": {
            "summary": null,
            "description": null,
            "status": null,
            "labels": null,
            "assignee": null,
            "comment": {"comments": null}
        }
    });

    let issue: JiraIssue = serde_json::from_value(json).unwrap();

    assert_eq!(issue.summary(), "");
    assert!(issue.fields.description.is_none());
    assert!(issue.fields.labels.is_empty());
    assert!(issue.fields.comment.unwrap().comments.is_empty());

    let issue: JiraIssue = serde_json::from_value(json!({"key": "PROJ-10", "fields": null})).unwrap();
    assert!(issue.fields.summary.is_none());
  }

  #[test]
  fn test_user_name_fallbacks() {
    let user = JiraUser {
      account_id: Some("abc".to_string()),
      display_name: Some(String::new()),
      email_address: None,
    };
    assert_eq!(user.name(), "abc");
    assert_eq!(JiraUser::default().name(), "Unknown");
  }

  #[test]
  fn test_jira_transitions_deserialization() {
    let json = json!({
        "transitions": [
            {"id": "11", "name": "To Do"},
            {"id": "21", "name": "In Progress"},
            {"id": "31", "name": "Done"}
        ]
    });

    let transitions: JiraTransitions = serde_json::from_value(json).unwrap();

    assert_eq!(transitions.transitions.len(), 3);
    assert_eq!(transitions.transitions[2].id, "31");
    assert_eq!(transitions.transitions[2].name, "Done");
  }

  #[test]
  fn test_transition_request_serialization() {
    let request = TransitionRequest {
      transition: TransitionId { id: "21".to_string() },
      fields: None,
    };
    assert_eq!(serde_json::to_value(&request).unwrap(), json!({"transition": {"id": "21"}}));

    let request = TransitionRequest {
      transition: TransitionId { id: "31".to_string() },
      fields: Some(TransitionFields {
        resolution: NameRef {
          name: "Won't Do".to_string(),
        },
      }),
    };
    assert_eq!(
      serde_json::to_value(&request).unwrap(),
      json!({"transition": {"id": "31"}, "fields": {"resolution": {"name": "Won't Do"}}})
    );
  }

  #[test]
  fn test_fields_update_serialization() {
    let update = IssueFieldsUpdate {
      summary: Some("New title".to_string()),
      story_points: Some(3.0),
      priority: Some(NameRef {
        name: "High".to_string(),
      }),
      ..Default::default()
    };

    assert_eq!(
      serde_json::to_value(IssueUpdateRequest { fields: &update }).unwrap(),
      json!({"fields": {"summary": "New title", "customfield_10016": 3.0, "priority": {"name": "High"}}})
    );
    assert_eq!(update.field_names(), vec!["summary", "story points", "priority"]);
    assert!(!update.is_empty());
    assert!(IssueFieldsUpdate::default().is_empty());
  }

  #[test]
  fn test_label_and_rank_serialization() {
    let labels = LabelUpdateRequest {
      update: LabelUpdate {
        labels: vec![LabelOperation::Add("ready".to_string())],
      },
    };
    assert_eq!(
      serde_json::to_value(&labels).unwrap(),
      json!({"update": {"labels": [{"add": "ready"}]}})
    );

    let rank = RankRequest {
      issues: vec!["PROJ-5".to_string()],
      rank_before_issue: None,
      rank_after_issue: Some("PROJ-9".to_string()),
    };
    assert_eq!(
      serde_json::to_value(&rank).unwrap(),
      json!({"issues": ["PROJ-5"], "rankAfterIssue": "PROJ-9"})
    );
  }

  #[test]
  fn test_issue_link_serialization() {
    let link = IssueLinkRequest {
      link_type: NameRef {
        name: "Blocks".to_string(),
      },
      inward_issue: KeyRef {
        key: "PROJ-1".to_string(),
      },
      outward_issue: KeyRef {
        key: "PROJ-2".to_string(),
      },
    };

    assert_eq!(
      serde_json::to_value(&link).unwrap(),
      json!({"type": {"name": "Blocks"}, "inwardIssue": {"key": "PROJ-1"}, "outwardIssue": {"key": "PROJ-2"}})
    );
  }
}
