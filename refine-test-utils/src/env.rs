//! Environment variable management for testing
//!
//! Tests in one binary share a single process environment, so every guard
//! takes a global lock for its lifetime. Hold at most one guard per test.

use std::env;
use std::sync::{Mutex, MutexGuard};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// RAII guard that snapshots a set of environment variables and restores
/// them when dropped
pub struct EnvVarGuard {
  originals: Vec<(String, Option<String>)>,
  _lock: MutexGuard<'static, ()>,
}

impl EnvVarGuard {
  /// Snapshot the given variables and clear them so each test starts from a
  /// known state
  pub fn new(names: &[&str]) -> Self {
    let lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

    let originals = names
      .iter()
      .map(|name| (name.to_string(), env::var(name).ok()))
      .collect();

    for name in names {
      unsafe {
        env::remove_var(name);
      }
    }

    Self {
      originals,
      _lock: lock,
    }
  }

  /// Set a variable for the lifetime of this guard
  pub fn set(&self, name: &str, value: &str) {
    debug_assert!(
      self.originals.iter().any(|(tracked, _)| tracked == name),
      "variable {name} is not tracked by this guard"
    );
    unsafe {
      env::set_var(name, value);
    }
  }

  /// Remove a variable for the lifetime of this guard
  pub fn remove(&self, name: &str) {
    unsafe {
      env::remove_var(name);
    }
  }
}

impl Drop for EnvVarGuard {
  fn drop(&mut self) {
    for (name, value) in &self.originals {
      match value {
        Some(val) => unsafe {
          env::set_var(name, val);
        },
        None => unsafe {
          env::remove_var(name);
        },
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_guard_restores_original_value() {
    let name = "REFINE_TEST_UTILS_ENV_GUARD";
    unsafe {
      env::set_var(name, "original");
    }

    {
      let guard = EnvVarGuard::new(&[name]);
      assert!(env::var(name).is_err());
      guard.set(name, "changed");
      assert_eq!(env::var(name).unwrap(), "changed");
    }

    assert_eq!(env::var(name).unwrap(), "original");
    unsafe {
      env::remove_var(name);
    }
  }
}
