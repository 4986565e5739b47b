//! Text to ADF.

use std::sync::LazyLock;

use regex::Regex;

use super::{AdfDocument, AdfNode};

static MARKDOWN_LINK: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("Failed to compile markdown link regex"));

static BARE_URL: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"https?://[^\s<>\[\]]+").expect("Failed to compile bare URL regex"));

/// Convert plain text into an ADF document.
///
/// Each line becomes a paragraph; blank lines become empty paragraphs so the
/// vertical spacing survives. `[label](url)` links and bare `http(s)://`
/// URLs become text nodes with a `link` mark.
pub fn text_to_adf(text: &str) -> AdfDocument {
  let content = text
    .split('\n')
    .map(|line| {
      if line.trim().is_empty() {
        AdfNode::paragraph(Vec::new())
      } else {
        AdfNode::paragraph(text_to_adf_content(line))
      }
    })
    .collect();

  AdfDocument::new(content)
}

/// Convert a single line into inline ADF nodes.
///
/// Markdown links are matched first and their labels are emitted verbatim;
/// only the text between them is searched for bare URLs.
pub fn text_to_adf_content(text: &str) -> Vec<AdfNode> {
  let mut nodes = Vec::new();
  let mut last_end = 0;

  for captures in MARKDOWN_LINK.captures_iter(text) {
    let (Some(whole), Some(label), Some(href)) = (captures.get(0), captures.get(1), captures.get(2)) else {
      continue;
    };

    nodes.extend(link_bare_urls(&text[last_end..whole.start()]));
    nodes.push(AdfNode::link(label.as_str(), href.as_str()));
    last_end = whole.end();
  }

  nodes.extend(link_bare_urls(&text[last_end..]));

  if nodes.is_empty() && !text.is_empty() {
    return vec![AdfNode::text(text)];
  }

  nodes
}

/// Split a span around bare URLs, linking each URL to itself.
fn link_bare_urls(text: &str) -> Vec<AdfNode> {
  let mut nodes = Vec::new();
  let mut last_end = 0;

  for url in BARE_URL.find_iter(text) {
    if url.start() > last_end {
      nodes.push(AdfNode::text(&text[last_end..url.start()]));
    }
    nodes.push(AdfNode::link(url.as_str(), url.as_str()));
    last_end = url.end();
  }

  if last_end < text.len() {
    nodes.push(AdfNode::text(&text[last_end..]));
  }

  nodes
}
