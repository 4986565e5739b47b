//! # Jira Issue Endpoints
//!
//! Fetching issues and updating their fields, including the parent epic.

use anyhow::{Context, Result};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::info;

use crate::client::{JiraClient, error_for_response};
use crate::models::{IssueFieldsUpdate, IssueUpdateRequest, JiraIssue, KeyRef};

/// Expansions requested when fetching a single issue
const ISSUE_EXPAND: &str = "renderedFields,names,changelog";

impl JiraClient {
  /// Get a Jira issue by key
  pub async fn get_issue(&self, issue_key: &str) -> Result<JiraIssue> {
    let value = self.get_issue_value(issue_key).await?;
    serde_json::from_value(value).context("Failed to parse Jira issue")
  }

  /// Get a Jira issue as raw JSON, as returned by the API
  pub async fn get_issue_value(&self, issue_key: &str) -> Result<Value> {
    let url = self.api_url(&format!("issue/{issue_key}"));

    let response = self
      .request(Method::GET, &url)
      .query(&[("expand", ISSUE_EXPAND)])
      .send()
      .await
      .context("Failed to fetch Jira issue")?;

    match response.status() {
      StatusCode::OK => response.json::<Value>().await.context("Failed to parse Jira issue"),
      _ => Err(error_for_response(response, &format!("Issue {issue_key}")).await),
    }
  }

  /// Update fields on an issue. Fields left unset are not touched.
  pub async fn update_issue(&self, issue_key: &str, fields: &IssueFieldsUpdate) -> Result<()> {
    if fields.is_empty() {
      return Err(anyhow::anyhow!("No fields to update for {issue_key}"));
    }

    let url = self.api_url(&format!("issue/{issue_key}"));

    let response = self
      .request(Method::PUT, &url)
      .json(&IssueUpdateRequest { fields })
      .send()
      .await
      .context("Failed to update Jira issue")?;

    match response.status() {
      StatusCode::NO_CONTENT | StatusCode::OK => {
        info!("Updated {issue_key}: {}", fields.field_names().join(", "));
        Ok(())
      }
      _ => Err(error_for_response(response, &format!("Issue {issue_key}")).await),
    }
  }

  /// Make `epic_key` the parent of an issue
  pub async fn link_to_epic(&self, issue_key: &str, epic_key: &str) -> Result<()> {
    let fields = IssueFieldsUpdate {
      parent: Some(KeyRef {
        key: epic_key.to_string(),
      }),
      ..Default::default()
    };

    self
      .update_issue(issue_key, &fields)
      .await
      .with_context(|| format!("Failed to link {issue_key} to epic {epic_key}"))
  }
}
