//! # Jira Issue Link Endpoints

use anyhow::{Context, Result};
use reqwest::{Method, StatusCode};
use tracing::info;

use crate::client::{JiraClient, error_for_response};
use crate::models::{IssueLinkRequest, KeyRef, NameRef};

impl JiraClient {
  /// Link two issues. `from_key` is the inward side of the link.
  pub async fn create_issue_link(&self, from_key: &str, to_key: &str, link_type: &str) -> Result<()> {
    let url = self.api_url("issueLink");

    let payload = IssueLinkRequest {
      link_type: NameRef {
        name: link_type.to_string(),
      },
      inward_issue: KeyRef {
        key: from_key.to_string(),
      },
      outward_issue: KeyRef {
        key: to_key.to_string(),
      },
    };

    let response = self
      .request(Method::POST, &url)
      .json(&payload)
      .send()
      .await
      .context("Failed to create Jira issue link")?;

    match response.status() {
      StatusCode::CREATED | StatusCode::OK | StatusCode::NO_CONTENT => {
        info!("Linked {from_key} to {to_key} ({link_type})");
        Ok(())
      }
      _ => Err(error_for_response(response, &format!("Issue {from_key} or {to_key}")).await),
    }
  }
}

#[cfg(test)]
mod tests {
  use wiremock::matchers::{basic_auth, body_json, method, path};
  use wiremock::{Mock, ResponseTemplate};

  use crate::consts::DEFAULT_LINK_TYPE;
  use crate::endpoints::test_support::{TOKEN, USERNAME, mock_client};

  #[tokio::test]
  async fn test_create_issue_link() -> anyhow::Result<()> {
    let (mock_server, client) = mock_client().await;

    Mock::given(method("POST"))
      .and(path("/rest/api/3/issueLink"))
      .and(basic_auth(USERNAME, TOKEN))
      .and(body_json(serde_json::json!({
          "type": {"name": "Relates"},
          "inwardIssue": {"key": "TEST-1"},
          "outwardIssue": {"key": "TEST-2"}
      })))
      .respond_with(ResponseTemplate::new(201))
      .expect(1)
      .mount(&mock_server)
      .await;

    client.create_issue_link("TEST-1", "TEST-2", DEFAULT_LINK_TYPE).await?;

    Ok(())
  }

  #[tokio::test]
  async fn test_create_issue_link_unknown_type() -> anyhow::Result<()> {
    let (mock_server, client) = mock_client().await;

    Mock::given(method("POST"))
      .and(path("/rest/api/3/issueLink"))
      .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
          "errorMessages": ["No issue link type with name 'Spawns' found."],
          "errors": {}
      })))
      .mount(&mock_server)
      .await;

    let err = client.create_issue_link("TEST-1", "TEST-2", "Spawns").await.unwrap_err();
    assert!(err.to_string().contains("No issue link type with name 'Spawns' found."));

    Ok(())
  }
}
