//! Backlog re-ranking.
//!
//! Moving a ticket "up N spots" is expressed to Jira as ranking it before or
//! after a neighbour. The neighbour is picked from the ordered backlog; no
//! request is needed when the ticket would stay where it is.

use thiserror::Error;

use crate::models::RankRequest;

/// Direction of a backlog move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankDirection {
  /// Towards the top of the backlog
  Up,
  /// Towards the bottom of the backlog
  Down,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RankError {
  #[error("Issue {0} is not in the backlog")]
  NotInBacklog(String),

  #[error("Number of spots to move must be at least 1")]
  ZeroSpots,
}

/// Work out the rank request that moves `issue_key` by `spots` positions.
///
/// `backlog` holds issue keys in rank order. The move is clamped to the ends
/// of the backlog. Returns `Ok(None)` when the issue is already at the
/// boundary in the requested direction.
pub fn plan_rank_move(
  backlog: &[String],
  issue_key: &str,
  direction: RankDirection,
  spots: usize,
) -> Result<Option<RankRequest>, RankError> {
  if spots == 0 {
    return Err(RankError::ZeroSpots);
  }

  let position = backlog
    .iter()
    .position(|key| key == issue_key)
    .ok_or_else(|| RankError::NotInBacklog(issue_key.to_string()))?;

  let target = match direction {
    RankDirection::Up => position.saturating_sub(spots),
    RankDirection::Down => position.saturating_add(spots).min(backlog.len() - 1),
  };

  if target == position {
    return Ok(None);
  }

  let anchor = backlog[target].clone();
  let issues = vec![issue_key.to_string()];
  Ok(Some(match direction {
    RankDirection::Up => RankRequest {
      issues,
      rank_before_issue: Some(anchor),
      rank_after_issue: None,
    },
    RankDirection::Down => RankRequest {
      issues,
      rank_before_issue: None,
      rank_after_issue: Some(anchor),
    },
  }))
}
