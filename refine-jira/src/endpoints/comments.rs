//! # Jira Comment Endpoints

use anyhow::{Context, Result};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::info;

use crate::adf::text_to_adf;
use crate::client::{JiraClient, error_for_response};
use crate::models::{CommentRequest, JiraComment, JiraCommentPage};

impl JiraClient {
  /// Get the comments on an issue, oldest first
  pub async fn get_comments(&self, issue_key: &str) -> Result<Vec<JiraComment>> {
    self.fetch_comments(issue_key).await
  }

  /// Get the comments on an issue as raw JSON
  pub async fn get_comments_value(&self, issue_key: &str) -> Result<Vec<Value>> {
    self.fetch_comments(issue_key).await
  }

  async fn fetch_comments<T: DeserializeOwned>(&self, issue_key: &str) -> Result<Vec<T>> {
    let url = self.api_url(&format!("issue/{issue_key}/comment"));

    let response = self
      .request(Method::GET, &url)
      .send()
      .await
      .context("Failed to fetch Jira comments")?;

    match response.status() {
      StatusCode::OK => {
        let page = response
          .json::<JiraCommentPage<T>>()
          .await
          .context("Failed to parse Jira comments")?;
        Ok(page.comments)
      }
      _ => Err(error_for_response(response, &format!("Issue {issue_key}")).await),
    }
  }

  /// Add a comment. Links in `text` become ADF link marks.
  pub async fn add_comment(&self, issue_key: &str, text: &str) -> Result<JiraComment> {
    let url = self.api_url(&format!("issue/{issue_key}/comment"));

    let payload = CommentRequest {
      body: text_to_adf(text),
    };

    let response = self
      .request(Method::POST, &url)
      .json(&payload)
      .send()
      .await
      .context("Failed to add Jira comment")?;

    match response.status() {
      StatusCode::CREATED | StatusCode::OK => {
        info!("Added comment to {issue_key}");
        response.json::<JiraComment>().await.context("Failed to parse created comment")
      }
      _ => Err(error_for_response(response, &format!("Issue {issue_key}")).await),
    }
  }
}

#[cfg(test)]
mod tests {
  use wiremock::matchers::{basic_auth, body_json, method, path};
  use wiremock::{Mock, ResponseTemplate};

  use crate::endpoints::test_support::{TOKEN, USERNAME, mock_client};

  #[tokio::test]
  async fn test_get_comments() -> anyhow::Result<()> {
    let (mock_server, client) = mock_client().await;

    Mock::given(method("GET"))
      .and(path("/rest/api/3/issue/TEST-5/comment"))
      .and(basic_auth(USERNAME, TOKEN))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
          "startAt": 0,
          "total": 2,
          "comments": [
              {"id": "1", "author": {"displayName": "Ann"}, "body": {"type": "doc", "content": []}},
              {"id": "2", "author": null, "body": null}
          ]
      })))
      .mount(&mock_server)
      .await;

    let comments = client.get_comments("TEST-5").await?;
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].author.as_ref().unwrap().name(), "Ann");
    assert!(comments[1].author.is_none());

    let raw = client.get_comments_value("TEST-5").await?;
    assert_eq!(raw[0]["author"]["displayName"], "Ann");

    Ok(())
  }

  #[tokio::test]
  async fn test_add_comment_converts_links() -> anyhow::Result<()> {
    let (mock_server, client) = mock_client().await;

    Mock::given(method("POST"))
      .and(path("/rest/api/3/issue/TEST-5/comment"))
      .and(basic_auth(USERNAME, TOKEN))
      .and(body_json(serde_json::json!({
          "body": {
              "type": "doc",
              "version": 1,
              "content": [
                  {
                      "type": "paragraph",
                      "content": [
                          {"type": "text", "text": "See "},
                          {
                              "type": "text",
                              "text": "https://example.com",
                              "marks": [{"type": "link", "attrs": {"href": "https://example.com"}}]
                          }
                      ]
                  },
                  {"type": "paragraph", "content": []},
                  {"type": "paragraph", "content": [{"type": "text", "text": "Thanks"}]}
              ]
          }
      })))
      .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
          "id": "10050",
          "author": {"displayName": "Test User"},
          "created": "2024-03-01T10:00:00.000+0000"
      })))
      .expect(1)
      .mount(&mock_server)
      .await;

    let comment = client.add_comment("TEST-5", "See https://example.com\n\nThanks").await?;
    assert_eq!(comment.id, "10050");

    Ok(())
  }

  #[tokio::test]
  async fn test_comments_issue_not_found() -> anyhow::Result<()> {
    let (mock_server, client) = mock_client().await;

    Mock::given(method("GET"))
      .and(path("/rest/api/3/issue/NOPE-1/comment"))
      .respond_with(ResponseTemplate::new(404))
      .mount(&mock_server)
      .await;

    let err = client.get_comments("NOPE-1").await.unwrap_err();
    assert_eq!(err.to_string(), "Issue NOPE-1 not found");

    Ok(())
  }
}
