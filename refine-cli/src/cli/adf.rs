//! # ADF Commands
//!
//! Offline conversion between plain text and Atlassian Document Format.
//! Handy for previewing what a description will look like before sending it
//! to Jira, or for reading ADF pulled from elsewhere.

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use refine_jira::adf::{extract_adf_text, text_to_adf};
use serde_json::Value;

/// Convert between plain text and ADF
#[derive(Args)]
pub struct AdfArgs {
  /// The subcommand to execute
  #[command(subcommand)]
  pub subcommand: AdfSubcommands,
}

/// Subcommands for the adf command
#[derive(Subcommand)]
pub enum AdfSubcommands {
  /// Render an ADF document (JSON) as markdown-flavoured text
  #[command(long_about = "Render an ADF document as markdown-flavoured text.\n\n\
            Accepts a bare ADF document, or any JSON whose description or body field\n\
            holds one (e.g. a ticket from 'refine get-ticket --json').")]
  ToText {
    /// JSON file to read; stdin when omitted or '-'
    #[arg(index = 1)]
    file: Option<PathBuf>,
  },

  /// Convert plain text to an ADF document (JSON)
  FromText {
    /// Text file to read; stdin when omitted or '-'
    #[arg(index = 1)]
    file: Option<PathBuf>,
  },
}

pub(crate) fn handle_adf_command(adf: AdfArgs) -> Result<()> {
  match adf.subcommand {
    AdfSubcommands::ToText { file } => {
      let input = read_input(file.as_deref())?;
      let value: Value = serde_json::from_str(&input).context("Input is not valid JSON")?;
      println!("{}", adf_to_text(&value));
      Ok(())
    }
    AdfSubcommands::FromText { file } => {
      let input = read_input(file.as_deref())?;
      println!("{}", text_to_adf_json(&input)?);
      Ok(())
    }
  }
}

/// Find the ADF document in `value` and extract its text
fn adf_to_text(value: &Value) -> String {
  let document = value
    .pointer("/fields/description")
    .or_else(|| value.get("body"))
    .filter(|candidate| candidate.is_object())
    .unwrap_or(value);
  extract_adf_text(document)
}

/// Convert text to pretty-printed ADF, ignoring the final newline most
/// editors and `echo` append
fn text_to_adf_json(input: &str) -> Result<String> {
  let text = input
    .strip_suffix("\r\n")
    .or_else(|| input.strip_suffix('\n'))
    .unwrap_or(input);
  serde_json::to_string_pretty(&text_to_adf(text)).context("Failed to serialize ADF document")
}

fn read_input(file: Option<&Path>) -> Result<String> {
  match file {
    Some(path) if path != Path::new("-") => {
      std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
    }
    _ => {
      let mut input = String::new();
      io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read stdin")?;
      Ok(input)
    }
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn test_adf_to_text_accepts_wrappers() {
    let doc = json!({
        "type": "doc",
        "version": 1,
        "content": [{"type": "paragraph", "content": [{"type": "text", "text": "hello"}]}]
    });

    assert_eq!(adf_to_text(&doc), "hello");
    assert_eq!(adf_to_text(&json!({"fields": {"description": doc.clone()}})), "hello");
    assert_eq!(adf_to_text(&json!({"body": doc})), "hello");
    assert_eq!(adf_to_text(&json!({"fields": {"description": null}})), "");
  }

  #[test]
  fn test_text_to_adf_json_drops_final_newline() {
    let output = text_to_adf_json("hello\n").unwrap();
    let value: Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value["type"], "doc");
    assert_eq!(value["content"].as_array().unwrap().len(), 1);
    assert_eq!(value["content"][0]["content"][0]["text"], "hello");
  }
}
