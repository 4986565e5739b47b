//! URL helpers for Jira base URLs.
//!
//! Users configure the Jira site in many shapes (`acme.atlassian.net`,
//! `https://acme.atlassian.net/`, `http:/acme...`), so everything funnels
//! through [`ensure_url_scheme`] before a client is built.

use anyhow::Result;
use url::{Position, Url};

/// Render a parsed URL without the lone `/` path that `Url` always adds.
fn normalize_url(url: &Url) -> String {
  let mut result = String::from(&url[..Position::BeforePath]);

  let path = url.path();
  if path != "/" {
    result.push_str(path.trim_end_matches('/'));
  }

  if let Some(query) = url.query() {
    result.push('?');
    result.push_str(query);
  }

  if let Some(fragment) = url.fragment() {
    result.push('#');
    result.push_str(fragment);
  }

  result
}

/// Parse `input` as a host (plus optional path) under the https scheme.
fn parse_with_https_prefix(input: &str) -> Result<Url> {
  Url::parse(&format!("https://{input}"))
    .map_err(|e| anyhow::anyhow!("Failed to parse URL: '{input}'. Ensure it has a valid scheme ({e})."))
}

/// Ensure a URL has a proper scheme (http:// or https://).
///
/// If the input doesn't include a scheme, assumes https://. Malformed
/// schemes like `http:/example.com` are repaired to https. Trailing slashes
/// are dropped so the result can be joined with API paths directly.
pub fn ensure_url_scheme(input: &str) -> Result<String> {
  let trimmed = input.trim();
  if trimmed.is_empty() {
    return Err(anyhow::anyhow!("Host cannot be empty"));
  }

  let lowered = trimmed.to_ascii_lowercase();
  for scheme in ["http:", "https:"] {
    if lowered.starts_with(scheme) && !lowered.starts_with(&format!("{scheme}//")) {
      let remainder = trimmed[scheme.len()..].trim_start_matches('/');
      return parse_with_https_prefix(remainder).map(|url| normalize_url(&url));
    }
  }

  let url = match Url::parse(trimmed) {
    Ok(url) if url.scheme().len() > 1 && url.host().is_some() => url,
    _ => parse_with_https_prefix(trimmed)?,
  };

  Ok(normalize_url(&url))
}

/// Strip the scheme and trailing slash from a host so it can be used as a
/// `.netrc` machine name.
pub fn normalize_host(raw_host: &str) -> String {
  raw_host
    .trim()
    .trim_start_matches("https://")
    .trim_start_matches("http://")
    .trim_end_matches('/')
    .to_string()
}

/// Build the browser URL for an issue.
pub fn browse_url(base_url: &str, issue_key: &str) -> String {
  format!("{}/browse/{}", base_url.trim_end_matches('/'), issue_key)
}
