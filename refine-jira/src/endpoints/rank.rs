//! # Jira Agile Rank Endpoints
//!
//! Backlog ordering through the Jira Software rank API.

use anyhow::{Context, Result};
use reqwest::{Method, StatusCode};
use tracing::{debug, info};

use crate::backlog::{RankDirection, plan_rank_move};
use crate::client::{JiraClient, error_for_response};
use crate::consts::RANK_LOOKAHEAD;
use crate::models::RankRequest;

impl JiraClient {
  /// Rank issues before or after another issue
  pub async fn rank_issue(&self, request: &RankRequest) -> Result<()> {
    let url = self.agile_url("issue/rank");

    let response = self
      .request(Method::PUT, &url)
      .json(request)
      .send()
      .await
      .context("Failed to rank Jira issue")?;

    match response.status() {
      StatusCode::NO_CONTENT | StatusCode::OK => Ok(()),
      // Partial success: the body lists per-issue errors
      StatusCode::MULTI_STATUS => Err(anyhow::anyhow!(
        "Ranking failed for some issues: {}",
        response.text().await.unwrap_or_default()
      )),
      _ => Err(error_for_response(response, &format!("Issue {}", request.issues.join(", "))).await),
    }
  }

  /// Move an issue `spots` positions up or down the backlog selected by
  /// `backlog_jql`.
  ///
  /// Returns `false` when the issue already sits at the boundary and no
  /// request was sent.
  pub async fn move_rank(
    &self,
    backlog_jql: &str,
    issue_key: &str,
    direction: RankDirection,
    spots: usize,
  ) -> Result<bool> {
    let backlog: Vec<String> = self
      .search_issues(backlog_jql, spots.saturating_add(RANK_LOOKAHEAD))
      .await?
      .into_iter()
      .map(|issue| issue.key)
      .collect();

    let Some(request) = plan_rank_move(&backlog, issue_key, direction, spots)? else {
      debug!("{issue_key} is already at the {direction:?} boundary of the backlog");
      return Ok(false);
    };

    self.rank_issue(&request).await?;
    info!("Moved {issue_key} {direction:?} by {spots}");
    Ok(true)
  }
}
