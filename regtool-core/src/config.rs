//! # Docker Configuration
//!
//! Locates and loads the Docker client configuration (`config.json`) that
//! stores registry credentials, per-registry credential helpers and the
//! default credential store.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use directories::BaseDirs;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::auth::AuthConfig;

/// Name of the configuration file inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Environment variable that overrides the config directory
pub const DOCKER_CONFIG_ENV: &str = "DOCKER_CONFIG";

/// Config directory name under the user's home directory
const DEFAULT_CONFIG_DIR_NAME: &str = ".docker";

/// Errors raised while locating or loading a Docker config file.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("Failed to determine the home directory")]
  NoHomeDir,

  #[error("Failed to read config file {}", .path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("Failed to parse config file {}", .path.display())]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("Invalid auth configuration for {server}")]
  InvalidAuth { server: String },
}

/// Returns the Docker config directory.
///
/// `$DOCKER_CONFIG` wins when set and non-empty, otherwise `~/.docker`.
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
  if let Some(dir) = env::var_os(DOCKER_CONFIG_ENV).filter(|dir| !dir.is_empty()) {
    return Ok(PathBuf::from(dir));
  }

  let base_dirs = BaseDirs::new().ok_or(ConfigError::NoHomeDir)?;
  Ok(base_dirs.home_dir().join(DEFAULT_CONFIG_DIR_NAME))
}

/// A loaded Docker client configuration.
///
/// Only the credential-related sections are modelled; everything else in the
/// file is ignored. `auths` is ordered by server address.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
  #[serde(default)]
  pub auths: BTreeMap<String, AuthConfig>,

  #[serde(rename = "credHelpers", default)]
  pub cred_helpers: BTreeMap<String, String>,

  #[serde(rename = "credsStore", default)]
  pub creds_store: Option<String>,
}

impl ConfigFile {
  /// Get the path of the config file inside `dir`
  pub fn path_in(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE_NAME)
  }

  /// Load the config file from `dir`.
  ///
  /// A missing or blank file yields an empty configuration. Stored `auth`
  /// values are decoded into username and password, and every entry's
  /// server address is set to the key it was stored under.
  ///
  /// # Errors
  ///
  /// Returns an error if the file exists but cannot be read, is not valid
  /// JSON, or holds an `auth` value that is not base64 `username:password`.
  pub fn load(dir: &Path) -> Result<Self, ConfigError> {
    let path = Self::path_in(dir);
    if !path.exists() {
      debug!("No config file at {}, using empty configuration", path.display());
      return Ok(Self::default());
    }

    let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
      path: path.clone(),
      source,
    })?;

    let config = Self::from_json(&path, &contents)?;
    debug!(
      "Loaded config from {} ({} auths, {} credential helpers)",
      path.display(),
      config.auths.len(),
      config.cred_helpers.len()
    );
    Ok(config)
  }

  fn from_json(path: &Path, contents: &str) -> Result<Self, ConfigError> {
    if contents.trim().is_empty() {
      return Ok(Self::default());
    }

    let mut config: Self = serde_json::from_str(contents).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })?;

    for (server, entry) in config.auths.iter_mut() {
      if !entry.auth.is_empty() {
        let (username, password) = decode_auth(&entry.auth).ok_or_else(|| ConfigError::InvalidAuth {
          server: server.clone(),
        })?;
        entry.username = username;
        entry.password = password;
      }
      entry.server_address = server.clone();
    }

    Ok(config)
  }

  /// Returns true if any credentials, helpers or a default store are
  /// configured.
  pub fn contains_auth(&self) -> bool {
    self.default_store().is_some() || !self.cred_helpers.is_empty() || !self.auths.is_empty()
  }

  /// The default credential store, if one is configured
  pub fn default_store(&self) -> Option<&str> {
    self.creds_store.as_deref().filter(|store| !store.is_empty())
  }
}

/// Decode a base64 `username:password` pair.
fn decode_auth(auth: &str) -> Option<(String, String)> {
  let decoded = STANDARD.decode(auth.trim()).ok()?;
  let decoded = String::from_utf8(decoded).ok()?;
  let (username, password) = decoded.split_once(':')?;
  Some((username.to_string(), password.trim_end_matches('\0').to_string()))
}
