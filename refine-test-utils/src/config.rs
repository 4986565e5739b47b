//! Configuration directory management for testing

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary configuration directory, removed when dropped
pub struct ConfigDirsTestGuard {
  temp_dir: TempDir,
  config_dir: PathBuf,
}

impl ConfigDirsTestGuard {
  /// Create an empty configuration directory
  pub fn new() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let config_dir = temp_dir.path().join("config").join("refine");
    fs::create_dir_all(&config_dir).expect("Failed to create config directory");

    Self { temp_dir, config_dir }
  }

  /// Create a configuration directory with a `config.toml` already written
  pub fn with_config(content: &str) -> Self {
    let guard = Self::new();
    guard.write_file("config.toml", content);
    guard
  }

  /// Write a file relative to the configuration directory
  pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
    let path = self.config_dir.join(name);
    fs::write(&path, content).expect("Failed to write config file");
    path
  }

  /// Path of the configuration directory
  pub fn config_dir(&self) -> &Path {
    &self.config_dir
  }

  /// Path of the `config.toml` inside the configuration directory
  pub fn config_path(&self) -> PathBuf {
    self.config_dir.join("config.toml")
  }

  /// Root of the temporary tree, useful as a stand-in working directory
  pub fn root(&self) -> &Path {
    self.temp_dir.path()
  }
}

impl Default for ConfigDirsTestGuard {
  fn default() -> Self {
    Self::new()
  }
}
