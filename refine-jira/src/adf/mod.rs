//! # Atlassian Document Format
//!
//! Jira Cloud stores descriptions and comment bodies as ADF, a JSON tree of
//! typed nodes. This module converts between ADF and the markdown-flavoured
//! plain text the CLI reads and prints:
//!
//! - [`text_to_adf`] turns text (with `[label](url)` links and bare URLs)
//!   into a document of paragraphs.
//! - [`extract_adf_text`] walks any ADF value Jira returns and flattens it
//!   back to text, keeping links, mentions, lists, headings and code blocks.
//!
//! Only the node types Jira emits in practice are modelled. Both directions
//! are pure and never fail: malformed input degrades to less output.

mod builder;
mod extract;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::null_as_default;

pub use builder::{text_to_adf, text_to_adf_content};
pub use extract::extract_adf_text;

/// ADF version Jira Cloud accepts
pub const ADF_VERSION: u32 = 1;

/// A top-level ADF document: `{"type": "doc", "version": 1, "content": [...]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "doc")]
pub struct AdfDocument {
  pub version: u32,
  #[serde(default, deserialize_with = "null_as_default")]
  pub content: Vec<AdfNode>,
}

impl AdfDocument {
  pub const fn new(content: Vec<AdfNode>) -> Self {
    Self {
      version: ADF_VERSION,
      content,
    }
  }

  /// The document as a JSON value, ready to embed in a request body
  pub fn to_value(&self) -> Value {
    serde_json::to_value(self).unwrap_or(Value::Null)
  }

  /// Flatten the document back to markdown-flavoured text
  pub fn to_markdown(&self) -> String {
    extract_adf_text(&self.to_value())
  }
}

/// Block and inline nodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AdfNode {
  Paragraph {
    #[serde(default, deserialize_with = "null_as_default")]
    content: Vec<AdfNode>,
  },
  Heading {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    attrs: Option<HeadingAttrs>,
    #[serde(default, deserialize_with = "null_as_default")]
    content: Vec<AdfNode>,
  },
  BulletList {
    #[serde(default, deserialize_with = "null_as_default")]
    content: Vec<AdfNode>,
  },
  OrderedList {
    #[serde(default, deserialize_with = "null_as_default")]
    content: Vec<AdfNode>,
  },
  ListItem {
    #[serde(default, deserialize_with = "null_as_default")]
    content: Vec<AdfNode>,
  },
  CodeBlock {
    #[serde(default, deserialize_with = "null_as_default")]
    content: Vec<AdfNode>,
  },
  Text {
    #[serde(default, deserialize_with = "null_as_default")]
    text: String,
    #[serde(
      default,
      deserialize_with = "null_as_default",
      skip_serializing_if = "Vec::is_empty"
    )]
    marks: Vec<AdfMark>,
  },
  InlineCard {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    attrs: Option<InlineCardAttrs>,
  },
  Mention {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    attrs: Option<MentionAttrs>,
  },
  HardBreak,
}

impl AdfNode {
  pub const fn paragraph(content: Vec<AdfNode>) -> Self {
    Self::Paragraph { content }
  }

  /// An unmarked text node
  pub fn text(text: impl Into<String>) -> Self {
    Self::Text {
      text: text.into(),
      marks: Vec::new(),
    }
  }

  /// A text node carrying a `link` mark
  pub fn link(text: impl Into<String>, href: impl Into<String>) -> Self {
    Self::Text {
      text: text.into(),
      marks: vec![AdfMark::Link {
        attrs: LinkAttrs { href: href.into() },
      }],
    }
  }
}

/// Annotations on text nodes. Only links are produced or interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AdfMark {
  Link { attrs: LinkAttrs },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkAttrs {
  pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingAttrs {
  pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineCardAttrs {
  #[serde(default, deserialize_with = "null_as_default")]
  pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionAttrs {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub text: Option<String>,
}
