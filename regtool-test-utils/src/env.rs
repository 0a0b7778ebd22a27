//! Environment variable management for testing
//!
//! This module provides utilities for managing the `DOCKER_CONFIG`
//! environment variable during testing so tests never read the user's real
//! Docker configuration.

use std::env;
use std::path::Path;

use tempfile::TempDir;

/// A test environment that points `DOCKER_CONFIG` at a per-test temporary
/// directory
pub struct EnvTestGuard {
  /// The temporary directory used as the Docker config directory
  pub temp_dir: TempDir,
  /// The original DOCKER_CONFIG value, if any
  original_docker_config: Option<String>,
}

impl Default for EnvTestGuard {
  fn default() -> Self {
    Self::new()
  }
}

impl EnvTestGuard {
  /// Docker config environment variable name
  pub const DOCKER_CONFIG: &'static str = "DOCKER_CONFIG";

  /// Create a new test environment with an overridden DOCKER_CONFIG
  pub fn new() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");

    // Save original environment variable
    let original_docker_config = env::var(Self::DOCKER_CONFIG).ok();

    unsafe {
      env::set_var(Self::DOCKER_CONFIG, temp_dir.path());
    }

    Self {
      temp_dir,
      original_docker_config,
    }
  }

  /// Get the path to the overridden config directory
  pub fn config_dir(&self) -> &Path {
    self.temp_dir.path()
  }
}

impl Drop for EnvTestGuard {
  fn drop(&mut self) {
    // Restore original environment variable
    match &self.original_docker_config {
      Some(val) => unsafe {
        env::set_var(EnvTestGuard::DOCKER_CONFIG, val);
      },
      None => unsafe {
        env::remove_var(EnvTestGuard::DOCKER_CONFIG);
      },
    }
  }
}
