//! HOME directory management for testing
//!
//! This module provides utilities for isolating the HOME directory during
//! testing so the default `~/.docker` lookup never touches the user's real
//! home directory.

use std::env;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A test environment that overrides HOME with a temporary directory and
/// clears `DOCKER_CONFIG` so the default config location is used
pub struct HomeEnvTestGuard {
  /// The temporary directory that will be used as HOME
  pub temp_dir: TempDir,
  /// The original HOME value
  original_home: Option<String>,
  /// The original DOCKER_CONFIG value
  original_docker_config: Option<String>,
}

impl Default for HomeEnvTestGuard {
  fn default() -> Self {
    Self::new()
  }
}

impl HomeEnvTestGuard {
  /// Create a new test environment with a temporary HOME directory
  pub fn new() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");

    let original_home = env::var("HOME").ok();
    let original_docker_config = env::var("DOCKER_CONFIG").ok();

    unsafe {
      env::set_var("HOME", temp_dir.path());
      env::remove_var("DOCKER_CONFIG");
    }

    Self {
      temp_dir,
      original_home,
      original_docker_config,
    }
  }

  /// Get the path to the temporary HOME directory
  pub fn home_dir(&self) -> &Path {
    self.temp_dir.path()
  }

  /// Get the path to a file in the temporary HOME directory
  pub fn home_path(&self, relative_path: &str) -> PathBuf {
    self.temp_dir.path().join(relative_path)
  }
}

impl Drop for HomeEnvTestGuard {
  fn drop(&mut self) {
    unsafe {
      match &self.original_home {
        Some(val) => env::set_var("HOME", val),
        None => env::remove_var("HOME"),
      }
      match &self.original_docker_config {
        Some(val) => env::set_var("DOCKER_CONFIG", val),
        None => env::remove_var("DOCKER_CONFIG"),
      }
    }
  }
}
