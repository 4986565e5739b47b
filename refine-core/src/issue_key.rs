//! # Issue Key Parser
//!
//! Normalizes issue keys typed on the command line. Flexible mode accepts
//! `proj-123`, `PROJ123` and `Proj123` and returns the canonical
//! `PROJ-123`; strict mode only accepts the canonical form.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How permissive issue-key parsing is
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IssueKeyMode {
  /// Only accepts PROJ-1234
  Strict,
  /// Accepts PROJ-1234, PROJ1234, proj1234, Proj-1234
  #[default]
  Flexible,
}

/// Errors that can occur while parsing an issue key
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IssueKeyError {
  #[error("Invalid issue key: '{0}' (expected something like PROJ-123)")]
  InvalidFormat(String),
  #[error("Issue key is empty")]
  Empty,
}

static STRICT_PATTERN: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[A-Z][A-Z0-9_]+-\d+$").expect("Failed to compile strict issue key regex"));

static FLEXIBLE_PATTERN: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^([A-Za-z][A-Za-z0-9_]*?)-?(\d+)$").expect("Failed to compile flexible issue key regex"));

/// Issue key parser with a configurable mode
#[derive(Debug, Clone, Copy, Default)]
pub struct IssueKeyParser {
  mode: IssueKeyMode,
}

impl IssueKeyParser {
  pub const fn new(mode: IssueKeyMode) -> Self {
    Self { mode }
  }

  pub const fn mode(&self) -> IssueKeyMode {
    self.mode
  }

  /// Parse and normalize an issue key
  pub fn parse(&self, input: &str) -> Result<String, IssueKeyError> {
    let input = input.trim();
    if input.is_empty() {
      return Err(IssueKeyError::Empty);
    }

    match self.mode {
      IssueKeyMode::Strict if STRICT_PATTERN.is_match(input) => Ok(input.to_string()),
      IssueKeyMode::Strict => Err(IssueKeyError::InvalidFormat(input.to_string())),
      IssueKeyMode::Flexible => {
        let captures = FLEXIBLE_PATTERN
          .captures(input)
          .ok_or_else(|| IssueKeyError::InvalidFormat(input.to_string()))?;
        let project = &captures[1];
        let number = &captures[2];

        if project.len() < 2 {
          return Err(IssueKeyError::InvalidFormat(input.to_string()));
        }

        Ok(format!("{}-{}", project.to_uppercase(), number))
      }
    }
  }

  pub fn is_valid(&self, input: &str) -> bool {
    self.parse(input).is_ok()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_flexible_normalizes_variants() {
    let parser = IssueKeyParser::new(IssueKeyMode::Flexible);

    assert_eq!(parser.parse("PROJ-123").unwrap(), "PROJ-123");
    assert_eq!(parser.parse("proj-123").unwrap(), "PROJ-123");
    assert_eq!(parser.parse("Proj123").unwrap(), "PROJ-123");
    assert_eq!(parser.parse("  me42 ").unwrap(), "ME-42");
    assert_eq!(parser.parse("AB2-9").unwrap(), "AB2-9");
  }

  #[test]
  fn test_flexible_rejects_garbage() {
    let parser = IssueKeyParser::default();

    assert_eq!(parser.parse(""), Err(IssueKeyError::Empty));
    assert!(matches!(parser.parse("P-1"), Err(IssueKeyError::InvalidFormat(_))));
    assert!(matches!(parser.parse("123"), Err(IssueKeyError::InvalidFormat(_))));
    assert!(matches!(parser.parse("PROJ-"), Err(IssueKeyError::InvalidFormat(_))));
    assert!(!parser.is_valid("feature/login"));
  }

  #[test]
  fn test_strict_mode() {
    let parser = IssueKeyParser::new(IssueKeyMode::Strict);

    assert_eq!(parser.parse("PROJ-123").unwrap(), "PROJ-123");
    assert!(parser.parse("proj-123").is_err());
    assert!(parser.parse("PROJ123").is_err());
  }

  #[test]
  fn test_mode_deserializes_lowercase() {
    #[derive(Deserialize)]
    struct Wrapper {
      mode: IssueKeyMode,
    }

    let wrapper: Wrapper = toml::from_str("mode = \"strict\"").unwrap();
    assert_eq!(wrapper.mode, IssueKeyMode::Strict);
  }
}
