use anyhow::{Context, Result};
use reqwest::header::USER_AGENT;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::consts::{AGILE_PATH, API_PATH, USER_AGENT as USER_AGENT_VALUE};
use crate::models::{JiraAuth, JiraUser};

/// Represents a Jira API client
pub struct JiraClient {
  pub(crate) client: Client,
  pub(crate) base_url: String,
  pub(crate) auth: JiraAuth,
}

impl JiraClient {
  /// Create a new Jira client
  pub fn new(base_url: &str, auth: JiraAuth) -> Self {
    let client = Client::new();
    Self {
      client,
      base_url: base_url.trim_end_matches('/').to_string(),
      auth,
    }
  }

  /// Site base URL, without trailing slash
  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  /// URL of a platform REST API v3 resource
  pub(crate) fn api_url(&self, resource: &str) -> String {
    format!("{}/{API_PATH}/{resource}", self.base_url)
  }

  /// URL of a Jira Software (agile) REST resource
  pub(crate) fn agile_url(&self, resource: &str) -> String {
    format!("{}/{AGILE_PATH}/{resource}", self.base_url)
  }

  /// Start an authenticated request
  pub(crate) fn request(&self, method: Method, url: &str) -> RequestBuilder {
    debug!("{method} {url}");
    self
      .client
      .request(method, url)
      .basic_auth(&self.auth.username, Some(&self.auth.api_token))
      .header(USER_AGENT, USER_AGENT_VALUE)
  }

  /// Browser URL for an issue
  pub fn browse_url(&self, issue_key: &str) -> String {
    refine_core::url::browse_url(&self.base_url, issue_key)
  }

  /// Fetch the user the credentials belong to
  pub async fn get_myself(&self) -> Result<JiraUser> {
    let url = self.api_url("myself");

    let response = self
      .request(Method::GET, &url)
      .send()
      .await
      .context("Failed to connect to Jira")?;

    match response.status() {
      StatusCode::OK => response.json::<JiraUser>().await.context("Failed to parse Jira user"),
      _ => Err(error_for_response(response, "Current user").await),
    }
  }

  /// Test the Jira connection by fetching the current user
  pub async fn test_connection(&self) -> Result<bool> {
    let url = self.api_url("myself");

    let response = self
      .request(Method::GET, &url)
      .send()
      .await
      .context("Failed to connect to Jira")?;

    Ok(response.status().is_success())
  }
}

/// Error body Jira returns for rejected requests
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JiraErrorBody {
  #[serde(default)]
  error_messages: Vec<String>,
  #[serde(default)]
  errors: serde_json::Map<String, serde_json::Value>,
}

/// Flatten a Jira error body into a single line
pub(crate) fn jira_error_message(body: &str) -> String {
  let Ok(parsed) = serde_json::from_str::<JiraErrorBody>(body) else {
    return body.trim().to_string();
  };

  let mut messages = parsed.error_messages;
  for (field, message) in parsed.errors {
    match message.as_str() {
      Some(text) => messages.push(format!("{field}: {text}")),
      None => messages.push(format!("{field}: {message}")),
    }
  }

  if messages.is_empty() {
    body.trim().to_string()
  } else {
    messages.join("; ")
  }
}

/// Turn a non-success response into an error.
///
/// `subject` names the resource for 404s, e.g. `"Issue PROJ-1"`.
pub(crate) async fn error_for_response(response: Response, subject: &str) -> anyhow::Error {
  let status = response.status();
  match status {
    StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
      anyhow::anyhow!("Authentication failed. Please check your Jira credentials.")
    }
    StatusCode::NOT_FOUND => anyhow::anyhow!("{subject} not found"),
    StatusCode::BAD_REQUEST => {
      let body = response.text().await.unwrap_or_default();
      anyhow::anyhow!("Jira rejected the request: {}", jira_error_message(&body))
    }
    _ => anyhow::anyhow!(
      "Unexpected error: HTTP {} - {}",
      status,
      response.text().await.unwrap_or_default()
    ),
  }
}

/// Create a Jira client from credentials
pub fn create_jira_client(base_url: &str, username: &str, api_token: &str) -> JiraClient {
  let auth = JiraAuth {
    username: username.to_string(),
    api_token: api_token.to_string(),
  };

  JiraClient::new(base_url, auth)
}
