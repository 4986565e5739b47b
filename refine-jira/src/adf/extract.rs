//! ADF to text.
//!
//! Jira sends `null` where it means "empty" at every level of the tree, so
//! the walker works on raw [`serde_json::Value`]s and reads every field
//! through accessors that fall back to an empty value.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

static EXCESS_NEWLINES: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\n{3,}").expect("Failed to compile newline regex"));

/// Node types the extractor knows how to render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeKind {
  Text,
  InlineCard,
  Mention,
  HardBreak,
  Paragraph,
  BulletList,
  OrderedList,
  ListItem,
  Heading,
  CodeBlock,
  Other,
}

impl NodeKind {
  fn of(node: &Map<String, Value>) -> Self {
    match node.get("type").and_then(Value::as_str) {
      Some("text") => Self::Text,
      Some("inlineCard") => Self::InlineCard,
      Some("mention") => Self::Mention,
      Some("hardBreak") => Self::HardBreak,
      Some("paragraph") => Self::Paragraph,
      Some("bulletList") => Self::BulletList,
      Some("orderedList") => Self::OrderedList,
      Some("listItem") => Self::ListItem,
      Some("heading") => Self::Heading,
      Some("codeBlock") => Self::CodeBlock,
      _ => Self::Other,
    }
  }
}

/// Flatten an ADF value into markdown-flavoured text.
///
/// Accepts a whole document, a single node, an array of nodes or `null`.
/// Links render as `[text](href)`, Jira issue cards as `[KEY](url)`,
/// mentions as `@name`, list items with `- ` or `N. ` prefixes, headings
/// with one `#` per level (capped at six, level 0 gets none) and code blocks
/// fenced with backticks. Runs of three or
/// more newlines collapse to a single blank line and the result is trimmed.
pub fn extract_adf_text(adf: &Value) -> String {
  let mut out = String::new();
  walk(adf, "", &mut out);

  EXCESS_NEWLINES.replace_all(&out, "\n\n").trim().to_string()
}

fn walk(node: &Value, list_prefix: &str, out: &mut String) {
  match node {
    Value::Object(map) => walk_node(map, list_prefix, out),
    Value::Array(items) => walk_all(items, out),
    _ => {}
  }
}

fn walk_all(nodes: &[Value], out: &mut String) {
  for node in nodes {
    walk(node, "", out);
  }
}

fn walk_node(node: &Map<String, Value>, list_prefix: &str, out: &mut String) {
  match NodeKind::of(node) {
    NodeKind::Text => push_text(node, out),
    NodeKind::InlineCard => push_inline_card(node, out),
    NodeKind::Mention => {
      let name = Some(attr_str(node, "text"))
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| attr_str(node, "id"));
      if !name.is_empty() {
        out.push('@');
        out.push_str(name);
      }
    }
    NodeKind::HardBreak => out.push('\n'),
    NodeKind::Paragraph => {
      walk_all(children(node), out);
      out.push('\n');
    }
    NodeKind::BulletList => {
      for item in children(node) {
        walk(item, "- ", out);
      }
    }
    NodeKind::OrderedList => {
      for (index, item) in children(node).iter().enumerate() {
        walk(item, &format!("{}. ", index + 1), out);
      }
    }
    NodeKind::ListItem => {
      out.push_str(list_prefix);
      walk_all(children(node), out);
    }
    NodeKind::Heading => {
      out.push_str(&"#".repeat(heading_level(node)));
      out.push(' ');
      walk_all(children(node), out);
      out.push('\n');
    }
    NodeKind::CodeBlock => {
      out.push_str("```\n");
      walk_all(children(node), out);
      out.push_str("\n```\n");
    }
    NodeKind::Other if node.contains_key("content") => walk_all(children(node), out),
    NodeKind::Other => {}
  }
}

fn push_text(node: &Map<String, Value>, out: &mut String) {
  let text = node.get("text").and_then(Value::as_str).unwrap_or_default();

  match link_href(node) {
    Some(href) => {
      out.push('[');
      out.push_str(text);
      out.push_str("](");
      out.push_str(href);
      out.push(')');
    }
    None => out.push_str(text),
  }
}

/// The `href` of the first `link` mark, when it is non-empty
fn link_href(node: &Map<String, Value>) -> Option<&str> {
  let mark = node
    .get("marks")
    .and_then(Value::as_array)
    .into_iter()
    .flatten()
    .filter_map(Value::as_object)
    .find(|mark| mark.get("type").and_then(Value::as_str) == Some("link"))?;

  Some(attr_str(mark, "href")).filter(|href| !href.is_empty())
}

fn push_inline_card(node: &Map<String, Value>, out: &mut String) {
  let url = attr_str(node, "url");
  if url.is_empty() {
    return;
  }

  let label = match url.rsplit_once("/browse/") {
    Some((_, rest)) => rest.split_once('?').map_or(rest, |(key, _)| key),
    None => "link",
  };
  out.push_str(&format!("[{label}]({url})"));
}

fn heading_level(node: &Map<String, Value>) -> usize {
  node
    .get("attrs")
    .and_then(|attrs| attrs.get("level"))
    .and_then(Value::as_u64)
    .map_or(1, |level| level.min(6) as usize)
}

fn children(node: &Map<String, Value>) -> &[Value] {
  node
    .get("content")
    .and_then(Value::as_array)
    .map(Vec::as_slice)
    .unwrap_or_default()
}

fn attr_str<'a>(node: &'a Map<String, Value>, key: &str) -> &'a str {
  node
    .get("attrs")
    .and_then(|attrs| attrs.get(key))
    .and_then(Value::as_str)
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn test_null_and_empty_inputs() {
    assert_eq!(extract_adf_text(&Value::Null), "");
    assert_eq!(extract_adf_text(&json!({})), "");
    assert_eq!(extract_adf_text(&json!([])), "");
    assert_eq!(extract_adf_text(&json!("a bare string")), "");
    assert_eq!(extract_adf_text(&json!({"type": "paragraph"})), "");
    assert_eq!(extract_adf_text(&json!([null, {"type": "text", "text": "ok"}, null])), "ok");
  }

  #[test]
  fn test_null_fields_everywhere() {
    let adf = json!({
      "type": "doc",
      "version": 1,
      "content": [
        null,
        {"type": "paragraph", "content": null},
        {"type": "paragraph", "content": [
          {"type": "text", "text": null},
          {"type": "text", "text": "plain", "marks": null},
          {"type": "text", "text": " linked", "marks": [null, {"type": "link", "attrs": null}]},
          {"type": "mention", "attrs": null},
          {"type": "inlineCard"},
          {"type": "heading", "attrs": null, "content": null}
        ]},
        {"type": "bulletList", "content": [null, {"type": "listItem", "content": null}]}
      ]
    });

    assert_eq!(extract_adf_text(&adf), "plain linked# \n\n-");
  }

  #[test]
  fn test_text_with_link_mark() {
    let adf = json!({"type": "paragraph", "content": [
      {"type": "text", "text": "See "},
      {"type": "text", "text": "docs", "marks": [
        {"type": "strong"},
        {"type": "link", "attrs": {"href": "https://example.com/x"}}
      ]},
      {"type": "text", "text": " for info"}
    ]});

    assert_eq!(extract_adf_text(&adf), "See [docs](https://example.com/x) for info");
  }

  #[test]
  fn test_empty_href_keeps_plain_text() {
    let adf = json!({"type": "text", "text": "orphan", "marks": [{"type": "link", "attrs": {"href": ""}}]});
    assert_eq!(extract_adf_text(&adf), "orphan");
  }

  #[test]
  fn test_inline_cards() {
    let card = json!({"type": "inlineCard", "attrs": {"url": "https://foo.atlassian.net/browse/PROJ-42?x=1"}});
    assert_eq!(
      extract_adf_text(&card),
      "[PROJ-42](https://foo.atlassian.net/browse/PROJ-42?x=1)"
    );

    let card = json!({"type": "inlineCard", "attrs": {"url": "https://foo.atlassian.net/browse/PROJ-7"}});
    assert_eq!(extract_adf_text(&card), "[PROJ-7](https://foo.atlassian.net/browse/PROJ-7)");

    let card = json!({"type": "inlineCard", "attrs": {"url": "https://github.com/org/repo/pull/1"}});
    assert_eq!(extract_adf_text(&card), "[link](https://github.com/org/repo/pull/1)");
  }

  #[test]
  fn test_mentions() {
    assert_eq!(
      extract_adf_text(&json!({"type": "mention", "attrs": {"text": "jdoe", "id": "abc123"}})),
      "@jdoe"
    );
    assert_eq!(
      extract_adf_text(&json!({"type": "mention", "attrs": {"id": "abc123"}})),
      "@abc123"
    );
    assert_eq!(
      extract_adf_text(&json!({"type": "mention", "attrs": {"text": "", "id": "abc123"}})),
      "@abc123"
    );
    assert_eq!(extract_adf_text(&json!({"type": "mention", "attrs": {}})), "");
  }

  #[test]
  fn test_lists() {
    let item = |text: &str| json!({"type": "listItem", "content": [{"type": "paragraph", "content": [{"type": "text", "text": text}]}]});
    let adf = json!({"type": "doc", "version": 1, "content": [
      {"type": "bulletList", "content": [item("alpha"), item("beta")]},
      {"type": "orderedList", "content": [item("first"), item("second"), item("third")]}
    ]});

    assert_eq!(extract_adf_text(&adf), "- alpha\n- beta\n1. first\n2. second\n3. third");
  }

  #[test]
  fn test_heading_levels() {
    let heading = |level: Value| json!({"type": "heading", "attrs": {"level": level}, "content": [{"type": "text", "text": "Title"}]});

    assert_eq!(extract_adf_text(&heading(json!(3))), "### Title");
    assert_eq!(extract_adf_text(&heading(json!(9))), "###### Title");
    assert_eq!(extract_adf_text(&heading(json!(0))), "Title");
    assert_eq!(extract_adf_text(&heading(json!("two"))), "# Title");
  }

  #[test]
  fn test_code_block_and_hard_break() {
    let adf = json!({"type": "doc", "version": 1, "content": [
      {"type": "paragraph", "content": [
        {"type": "text", "text": "before"},
        {"type": "hardBreak"},
        {"type": "text", "text": "after"}
      ]},
      {"type": "codeBlock", "attrs": {"language": "rust"}, "content": [{"type": "text", "text": "fn main() {}"}]}
    ]});

    assert_eq!(extract_adf_text(&adf), "before\nafter\n```\nfn main() {}\n```");
  }

  #[test]
  fn test_unknown_nodes_recurse_into_content() {
    let adf = json!({"type": "doc", "version": 1, "content": [
      {"type": "panel", "attrs": {"panelType": "info"}, "content": [
        {"type": "paragraph", "content": [{"type": "text", "text": "inside panel"}]}
      ]},
      {"type": "rule"},
      {"type": "emoji", "attrs": {"shortName": ":smile:"}}
    ]});

    assert_eq!(extract_adf_text(&adf), "inside panel");
  }

  #[test]
  fn test_newline_runs_collapse_to_two() {
    let adf = json!({"type": "doc", "version": 1, "content": [
      {"type": "paragraph", "content": [{"type": "text", "text": "top"}]},
      {"type": "paragraph", "content": [{"type": "text", "text": "\n\n\n\n"}]},
      {"type": "paragraph", "content": []},
      {"type": "paragraph", "content": [{"type": "text", "text": "bottom"}]}
    ]});

    let text = extract_adf_text(&adf);
    assert_eq!(text, "top\n\nbottom");
    assert!(!text.contains("\n\n\n"));
  }
}
