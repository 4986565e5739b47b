//! # Jira Search Endpoints
//!
//! JQL search, the refinement backlog and epic lookup.

use anyhow::{Context, Result};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::client::{JiraClient, error_for_response};
use crate::consts::{EPIC_SEARCH_LIMIT, SEARCH_FIELDS};
use crate::models::{JiraIssue, SearchResults};

impl JiraClient {
  /// Search for issues using JQL
  pub async fn search_issues(&self, jql: &str, max_results: usize) -> Result<Vec<JiraIssue>> {
    self.search(jql, max_results).await
  }

  /// Search for issues using JQL, keeping the raw JSON of each issue
  pub async fn search_issues_value(&self, jql: &str, max_results: usize) -> Result<Vec<Value>> {
    self.search(jql, max_results).await
  }

  async fn search<T: DeserializeOwned>(&self, jql: &str, max_results: usize) -> Result<Vec<T>> {
    let url = self.api_url("search/jql");
    debug!("Searching with JQL: {jql}");

    let response = self
      .request(Method::GET, &url)
      .query(&[
        ("jql", jql.to_string()),
        ("maxResults", max_results.to_string()),
        ("fields", SEARCH_FIELDS.join(",")),
      ])
      .send()
      .await
      .context("Failed to search Jira issues")?;

    match response.status() {
      StatusCode::OK => {
        let results = response
          .json::<SearchResults<T>>()
          .await
          .context("Failed to parse Jira search results")?;
        Ok(results.issues)
      }
      _ => Err(error_for_response(response, "Search endpoint").await),
    }
  }

  /// Tickets waiting for refinement, in rank order
  pub async fn get_backlog(&self, backlog_jql: &str, limit: usize) -> Result<Vec<JiraIssue>> {
    self.search_issues(backlog_jql, limit).await
  }

  /// Find epics whose summary matches `query`, most recently updated first
  pub async fn search_epics(&self, project_key: &str, query: &str) -> Result<Vec<JiraIssue>> {
    self
      .search_issues(&epic_search_jql(project_key, query), EPIC_SEARCH_LIMIT)
      .await
  }
}

/// JQL for an epic summary search
pub(crate) fn epic_search_jql(project_key: &str, query: &str) -> String {
  let summary = escape_jql_string(query);
  if project_key.is_empty() {
    format!("type = Epic AND summary ~ '{summary}' ORDER BY updated DESC")
  } else {
    format!("project = {project_key} AND type = Epic AND summary ~ '{summary}' ORDER BY updated DESC")
  }
}

/// Escape a value for use inside a single-quoted JQL string
fn escape_jql_string(value: &str) -> String {
  value.replace('\\', "\\\\").replace('\'', "\\'")
}

#[cfg(test)]
mod tests {
  use wiremock::matchers::{basic_auth, method, path, query_param};
  use wiremock::{Mock, ResponseTemplate};

  use super::*;
  use crate::endpoints::test_support::{TOKEN, USERNAME, mock_client};

  #[test]
  fn test_epic_search_jql() {
    assert_eq!(
      epic_search_jql("PROJ", "billing"),
      "project = PROJ AND type = Epic AND summary ~ 'billing' ORDER BY updated DESC"
    );
    assert_eq!(
      epic_search_jql("", "it's"),
      r"type = Epic AND summary ~ 'it\'s' ORDER BY updated DESC"
    );
    assert_eq!(escape_jql_string(r"a\b"), r"a\\b");
  }

  #[tokio::test]
  async fn test_search_issues() -> anyhow::Result<()> {
    let (mock_server, client) = mock_client().await;

    Mock::given(method("GET"))
      .and(path("/rest/api/3/search/jql"))
      .and(basic_auth(USERNAME, TOKEN))
      .and(query_param("jql", "project = PROJ ORDER BY rank ASC"))
      .and(query_param("maxResults", "10"))
      .and(query_param(
        "fields",
        "summary,description,status,labels,priority,issuetype,assignee,reporter,created,updated,customfield_10016,parent,comment",
      ))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
          "issues": [
              {"id": "1", "key": "PROJ-1", "fields": {"summary": "First"}},
              {"id": "2", "key": "PROJ-2", "fields": {"summary": "Second", "labels": null}}
          ],
          "isLast": true
      })))
      .mount(&mock_server)
      .await;

    let issues = client.get_backlog("project = PROJ ORDER BY rank ASC", 10).await?;
    let keys: Vec<&str> = issues.iter().map(|issue| issue.key.as_str()).collect();
    assert_eq!(keys, vec!["PROJ-1", "PROJ-2"]);
    assert_eq!(issues[1].summary(), "Second");

    Ok(())
  }

  #[tokio::test]
  async fn test_search_issues_empty_result() -> anyhow::Result<()> {
    let (mock_server, client) = mock_client().await;

    Mock::given(method("GET"))
      .and(path("/rest/api/3/search/jql"))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"issues": null})))
      .mount(&mock_server)
      .await;

    assert!(client.search_issues("project = NONE", 5).await?.is_empty());
    assert!(client.search_issues_value("project = NONE", 5).await?.is_empty());

    Ok(())
  }

  #[tokio::test]
  async fn test_search_epics() -> anyhow::Result<()> {
    let (mock_server, client) = mock_client().await;

    Mock::given(method("GET"))
      .and(path("/rest/api/3/search/jql"))
      .and(query_param(
        "jql",
        "project = PROJ AND type = Epic AND summary ~ 'checkout' ORDER BY updated DESC",
      ))
      .and(query_param("maxResults", "10"))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
          "issues": [{"id": "7", "key": "PROJ-7", "fields": {"summary": "Checkout revamp"}}]
      })))
      .mount(&mock_server)
      .await;

    let epics = client.search_epics("PROJ", "checkout").await?;
    assert_eq!(epics.len(), 1);
    assert_eq!(epics[0].summary(), "Checkout revamp");

    Ok(())
  }

  #[tokio::test]
  async fn test_search_auth_failure() -> anyhow::Result<()> {
    let (mock_server, client) = mock_client().await;

    Mock::given(method("GET"))
      .and(path("/rest/api/3/search/jql"))
      .respond_with(ResponseTemplate::new(403))
      .mount(&mock_server)
      .await;

    let err = client.search_issues("project = PROJ", 5).await.unwrap_err();
    assert_eq!(
      err.to_string(),
      "Authentication failed. Please check your Jira credentials."
    );

    Ok(())
  }
}
