//! Build script for the refine CLI
//!
//! Embeds the commit hash and target triple shown by `refine --version`.

use std::env;
use std::process::Command;

fn main() {
  embed_build_info();
  set_rerun_conditions();
}

/// Expose `GIT_HASH` and `TARGET` to the crate at compile time.
///
/// `GIT_HASH` is `unknown` outside a git checkout.
fn embed_build_info() {
  let git_hash = Command::new("git")
    .args(["rev-parse", "--short", "HEAD"])
    .output()
    .ok()
    .filter(|output| output.status.success())
    .and_then(|output| String::from_utf8(output.stdout).ok())
    .map(|hash| hash.trim().to_string())
    .filter(|hash| !hash.is_empty())
    .unwrap_or_else(|| "unknown".to_string());
  println!("cargo:rustc-env=GIT_HASH={git_hash}");

  println!("cargo:rustc-env=TARGET={}", env::var("TARGET").unwrap_or_default());
}

fn set_rerun_conditions() {
  println!("cargo:rerun-if-changed=build.rs");
  println!("cargo:rerun-if-changed=../.git/HEAD");
  println!("cargo:rerun-if-env-changed=TARGET");
}
