//! # Jira Label Endpoints

use anyhow::{Context, Result};
use reqwest::{Method, StatusCode};
use tracing::info;

use crate::client::{JiraClient, error_for_response};
use crate::models::{LabelOperation, LabelUpdate, LabelUpdateRequest};

impl JiraClient {
  /// Add a label to an issue, keeping its existing labels
  pub async fn add_label(&self, issue_key: &str, label: &str) -> Result<()> {
    self
      .update_labels(issue_key, LabelOperation::Add(label.to_string()))
      .await
  }

  /// Remove a label from an issue
  pub async fn remove_label(&self, issue_key: &str, label: &str) -> Result<()> {
    self
      .update_labels(issue_key, LabelOperation::Remove(label.to_string()))
      .await
  }

  async fn update_labels(&self, issue_key: &str, operation: LabelOperation) -> Result<()> {
    let url = self.api_url(&format!("issue/{issue_key}"));

    let payload = LabelUpdateRequest {
      update: LabelUpdate {
        labels: vec![operation.clone()],
      },
    };

    let response = self
      .request(Method::PUT, &url)
      .json(&payload)
      .send()
      .await
      .context("Failed to update Jira labels")?;

    match response.status() {
      StatusCode::NO_CONTENT | StatusCode::OK => {
        info!("Applied label change {operation:?} to {issue_key}");
        Ok(())
      }
      _ => Err(error_for_response(response, &format!("Issue {issue_key}")).await),
    }
  }
}
