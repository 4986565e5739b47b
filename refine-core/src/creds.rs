//! # Credential Management
//!
//! Jira Cloud authenticates with an account email plus an API token. The
//! pair comes from `JIRA_EMAIL`/`JIRA_API_TOKEN` (directly or via `.env`),
//! falling back to a `.netrc` entry for the Jira host or `atlassian.net`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::url::normalize_host;

/// Environment variable holding the Jira account email.
pub const ENV_JIRA_EMAIL: &str = "JIRA_EMAIL";
/// Environment variable holding the Jira API token.
pub const ENV_JIRA_API_TOKEN: &str = "JIRA_API_TOKEN";
/// Shared `.netrc` machine used for every Atlassian Cloud site.
pub const ATLASSIAN_MACHINE: &str = "atlassian.net";

/// Represents credentials for a service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
  pub username: String,
  pub password: String,
}

/// Returns the path to the `.netrc` file for the provided home directory.
pub fn get_netrc_path(home: &Path) -> PathBuf {
  home.join(".netrc")
}

/// Find the credentials for `target_machine` in `.netrc` content.
///
/// Tokens are read as one whitespace-separated stream, so both the
/// single-line (`machine h login u password p`) and multi-line layouts work.
/// Entries missing either `login` or `password` are ignored.
pub fn parse_netrc(content: &str, target_machine: &str) -> Option<Credentials> {
  let mut tokens = content.split_whitespace();
  let mut machine: Option<&str> = None;
  let mut login: Option<&str> = None;
  let mut password: Option<&str> = None;

  let matched = |machine: Option<&str>, login: Option<&str>, password: Option<&str>| match (machine, login, password) {
    (Some(m), Some(l), Some(p)) if m == target_machine => Some(Credentials {
      username: l.to_string(),
      password: p.to_string(),
    }),
    _ => None,
  };

  while let Some(token) = tokens.next() {
    match token {
      "machine" | "default" => {
        if let Some(creds) = matched(machine, login, password) {
          return Some(creds);
        }
        machine = if token == "machine" { tokens.next() } else { None };
        login = None;
        password = None;
      }
      "login" => login = tokens.next(),
      "password" => password = tokens.next(),
      _ => {}
    }
  }

  matched(machine, login, password)
}

/// Read `.netrc` from `home` and look up `target_machine`.
///
/// A missing file yields `Ok(None)`; an unreadable one is an error.
pub fn read_netrc_credentials(home: &Path, target_machine: &str) -> Result<Option<Credentials>> {
  let path = get_netrc_path(home);
  if !path.exists() {
    return Ok(None);
  }

  let content = fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;
  Ok(parse_netrc(&content, target_machine))
}

/// Resolve Jira credentials.
///
/// `lookup` reads environment variables; it is a parameter so tests do not
/// have to mutate the process environment.
pub fn resolve_jira_credentials<F>(home: &Path, jira_host: &str, lookup: F) -> Result<Credentials>
where
  F: Fn(&str) -> Option<String>,
{
  if let (Some(username), Some(password)) = (lookup(ENV_JIRA_EMAIL), lookup(ENV_JIRA_API_TOKEN)) {
    debug!("Using Jira credentials from {ENV_JIRA_EMAIL}/{ENV_JIRA_API_TOKEN}");
    return Ok(Credentials { username, password });
  }

  let normalized_host = normalize_host(jira_host);
  for machine in [normalized_host.as_str(), ATLASSIAN_MACHINE] {
    if let Some(creds) = read_netrc_credentials(home, machine)? {
      debug!("Using Jira credentials from .netrc machine '{machine}'");
      return Ok(creds);
    }
  }

  Err(anyhow::anyhow!(
    "Jira credentials not found. Set {ENV_JIRA_EMAIL} and {ENV_JIRA_API_TOKEN}, or add a .netrc entry for machine '{normalized_host}' or '{ATLASSIAN_MACHINE}'."
  ))
}

/// Resolve Jira credentials from the process environment and `$HOME/.netrc`.
pub fn get_jira_credentials(home: &Path, jira_host: &str) -> Result<Credentials> {
  resolve_jira_credentials(home, jira_host, |name| {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
  })
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use refine_test_utils::NetrcGuard;

  use super::*;

  const NETRC: &str = r#"machine custom-jira-host.com
  login custom@example.com
  password custom-token

machine atlassian.net
  login net@example.com
  password net-token
"#;

  fn no_env(_: &str) -> Option<String> {
    None
  }

  #[test]
  fn test_parse_netrc_multi_line() {
    let creds = parse_netrc(NETRC, "custom-jira-host.com").unwrap();
    assert_eq!(creds.username, "custom@example.com");
    assert_eq!(creds.password, "custom-token");

    assert!(parse_netrc(NETRC, "missing.example.com").is_none());
  }

  #[test]
  fn test_parse_netrc_single_line_and_incomplete() {
    let content = "machine a.com login only-login\nmachine b.com login user password pass\n";

    assert!(parse_netrc(content, "a.com").is_none());
    assert_eq!(
      parse_netrc(content, "b.com"),
      Some(Credentials {
        username: "user".to_string(),
        password: "pass".to_string(),
      })
    );
  }

  #[test]
  fn test_credentials_from_env_take_precedence() {
    let guard = NetrcGuard::new(NETRC);
    let env: HashMap<&str, &str> = HashMap::from([
      (ENV_JIRA_EMAIL, "env@example.com"),
      (ENV_JIRA_API_TOKEN, "env-token"),
    ]);

    let creds = resolve_jira_credentials(guard.home_dir(), "https://custom-jira-host.com", |name| {
      env.get(name).map(|v| v.to_string())
    })
    .unwrap();

    assert_eq!(creds.username, "env@example.com");
    assert_eq!(creds.password, "env-token");
  }

  #[test]
  fn test_credentials_from_netrc_host_then_atlassian() {
    let guard = NetrcGuard::new(NETRC);

    let creds = resolve_jira_credentials(guard.home_dir(), "https://custom-jira-host.com/", no_env).unwrap();
    assert_eq!(creds.username, "custom@example.com");

    let creds = resolve_jira_credentials(guard.home_dir(), "https://acme.atlassian.net", no_env).unwrap();
    assert_eq!(creds.username, "net@example.com");
  }

  #[test]
  fn test_half_configured_env_falls_back_to_netrc() {
    let guard = NetrcGuard::new(NETRC);

    let creds = resolve_jira_credentials(guard.home_dir(), "custom-jira-host.com", |name| {
      (name == ENV_JIRA_EMAIL).then(|| "env@example.com".to_string())
    })
    .unwrap();
    assert_eq!(creds.username, "custom@example.com");
  }

  #[test]
  fn test_missing_credentials_error_message() {
    let guard = NetrcGuard::empty_home();

    let error = resolve_jira_credentials(guard.home_dir(), "https://custom-jira-host.com", no_env)
      .unwrap_err()
      .to_string();

    assert!(error.contains(ENV_JIRA_EMAIL));
    assert!(error.contains(ENV_JIRA_API_TOKEN));
    assert!(error.contains("custom-jira-host.com"));
    assert!(error.contains("atlassian.net"));
  }
}
