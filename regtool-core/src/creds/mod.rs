//! # Credential Stores
//!
//! Access to credentials kept outside `config.json`, in stores reached
//! through named credential helpers (OS keychains, cloud CLIs, ...).
//!
//! The resolver only depends on the [`CredentialStore`] trait so tests can
//! substitute a fake store instead of spawning helper processes.

pub mod native;

use std::io;

use thiserror::Error;

pub use native::NativeStore;

use crate::auth::AuthConfig;

/// Errors raised while querying a credential helper.
#[derive(Debug, Error)]
pub enum HelperError {
  #[error("Failed to run credential helper {program}")]
  Spawn {
    program: String,
    #[source]
    source: io::Error,
  },

  #[error("Failed to communicate with credential helper {program}")]
  Io {
    program: String,
    #[source]
    source: io::Error,
  },

  #[error("Credential helper {program} failed: {message}")]
  Failed { program: String, message: String },

  #[error("Failed to parse response from credential helper {program}")]
  InvalidResponse {
    program: String,
    #[source]
    source: serde_json::Error,
  },
}

/// A source of registry credentials keyed by helper name.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialStore {
  /// Get the credentials `helper` holds for `server_address`.
  fn get(&self, helper: &str, server_address: &str) -> Result<AuthConfig, HelperError>;
}
