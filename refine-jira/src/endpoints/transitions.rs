use anyhow::{Context, Result};
use reqwest::{Method, StatusCode};
use tracing::info;

use crate::client::{JiraClient, error_for_response, jira_error_message};
use crate::models::{JiraTransition, JiraTransitions, NameRef, TransitionFields, TransitionId, TransitionRequest};

impl JiraClient {
  /// Get available transitions for an issue
  pub async fn get_transitions(&self, issue_key: &str) -> Result<Vec<JiraTransition>> {
    let url = self.api_url(&format!("issue/{issue_key}/transitions"));

    let response = self
      .request(Method::GET, &url)
      .send()
      .await
      .context("Failed to fetch Jira transitions")?;

    match response.status() {
      StatusCode::OK => {
        let transitions = response
          .json::<JiraTransitions>()
          .await
          .context("Failed to parse Jira transitions")?;
        Ok(transitions.transitions)
      }
      _ => Err(error_for_response(response, &format!("Issue {issue_key}")).await),
    }
  }

  /// Transition an issue to a new status, optionally setting a resolution
  pub async fn transition_issue(&self, issue_key: &str, transition_id: &str, resolution: Option<&str>) -> Result<()> {
    let url = self.api_url(&format!("issue/{issue_key}/transitions"));

    let payload = TransitionRequest {
      transition: TransitionId {
        id: transition_id.to_string(),
      },
      fields: resolution.map(|name| TransitionFields {
        resolution: NameRef { name: name.to_string() },
      }),
    };

    let response = self
      .request(Method::POST, &url)
      .json(&payload)
      .send()
      .await
      .context("Failed to transition Jira issue")?;

    match response.status() {
      StatusCode::NO_CONTENT | StatusCode::OK => {
        info!("Transitioned {issue_key} with transition {transition_id}");
        Ok(())
      }
      StatusCode::BAD_REQUEST => {
        let body = response.text().await.unwrap_or_default();
        Err(anyhow::anyhow!(
          "Invalid transition. The transition may not be available for the current status. ({})",
          jira_error_message(&body)
        ))
      }
      _ => Err(error_for_response(response, &format!("Issue {issue_key}")).await),
    }
  }

  /// Transition an issue by transition name (case-insensitive) or id.
  ///
  /// Returns the transition that was applied.
  pub async fn transition_issue_by_name(
    &self,
    issue_key: &str,
    name: &str,
    resolution: Option<&str>,
  ) -> Result<JiraTransition> {
    let transitions = self.get_transitions(issue_key).await?;
    let transition = find_transition(transitions, name)?;
    self.transition_issue(issue_key, &transition.id, resolution).await?;
    Ok(transition)
  }
}

/// Pick a transition by name (case-insensitive) or id
pub(crate) fn find_transition(mut transitions: Vec<JiraTransition>, name: &str) -> Result<JiraTransition> {
  let wanted = name.trim();
  let position = transitions
    .iter()
    .position(|t| t.name.eq_ignore_ascii_case(wanted))
    .or_else(|| transitions.iter().position(|t| t.id == wanted));

  if let Some(index) = position {
    return Ok(transitions.swap_remove(index));
  }

  let available: Vec<&str> = transitions.iter().map(|t| t.name.as_str()).collect();
  let available = if available.is_empty() {
    "none".to_string()
  } else {
    available.join(", ")
  };
  Err(anyhow::anyhow!("Transition '{wanted}' not found. Available: {available}"))
}
