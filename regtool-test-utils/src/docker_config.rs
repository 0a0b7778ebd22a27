//! Temporary Docker config directories for testing
//!
//! Tests point the resolver at one of these directories instead of the
//! user's real `~/.docker`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Map, Value, json};
use tempfile::TempDir;

/// Name of the Docker config file
const CONFIG_FILE_NAME: &str = "config.json";

/// Encode a `username:password` pair the way Docker stores it in `auth`
pub fn encode_auth(username: &str, password: &str) -> String {
  STANDARD.encode(format!("{username}:{password}"))
}

/// RAII guard for a temporary Docker config directory
///
/// The directory and its `config.json` are removed when the guard is
/// dropped.
pub struct DockerConfigGuard {
  temp_dir: TempDir,
  config_path: PathBuf,
}

impl DockerConfigGuard {
  /// Create a config directory whose `config.json` holds `content`
  pub fn new(content: &str) -> Self {
    let guard = Self::empty();
    guard.write_config(content).expect("Failed to write test config.json");
    guard
  }

  /// Create a config directory without a `config.json`
  pub fn empty() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join(CONFIG_FILE_NAME);

    Self { temp_dir, config_path }
  }

  /// Create a config directory with `auth` entries for each
  /// `(server, username, password)`
  pub fn with_auths(entries: &[(&str, &str, &str)]) -> Self {
    let mut auths = Map::new();
    for (server, username, password) in entries {
      auths.insert(
        (*server).to_string(),
        json!({ "auth": encode_auth(username, password) }),
      );
    }

    let content = json!({ "auths": Value::Object(auths) }).to_string();
    Self::new(&content)
  }

  /// Replace the contents of `config.json`
  pub fn write_config(&self, content: &str) -> Result<()> {
    fs::write(&self.config_path, content)
      .with_context(|| format!("Failed to write {}", self.config_path.display()))
  }

  /// Get the path to the config directory
  pub fn config_dir(&self) -> &Path {
    self.temp_dir.path()
  }

  /// Get the path to `config.json`
  pub fn config_path(&self) -> &Path {
    &self.config_path
  }
}
