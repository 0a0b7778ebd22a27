//! # Registry Authentication
//!
//! Credential types shared by the Docker config loader, the native
//! credential helpers and the resolver that picks one set of credentials for
//! a command.

pub mod resolver;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Credentials for a single container registry.
///
/// Field names follow the per-registry entries Docker writes to
/// `config.json`. Every field defaults to the empty string; an entry with no
/// username and no secrets represents anonymous access.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub username: String,

  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub password: String,

  /// Base64-encoded `username:password` as stored on disk
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub auth: String,

  #[serde(rename = "serveraddress", default, skip_serializing_if = "String::is_empty")]
  pub server_address: String,

  /// Token used to obtain a registry access token (OAuth refresh token)
  #[serde(rename = "identitytoken", default, skip_serializing_if = "String::is_empty")]
  pub identity_token: String,

  /// Bearer token sent to the registry as-is
  #[serde(rename = "registrytoken", default, skip_serializing_if = "String::is_empty")]
  pub registry_token: String,
}

impl AuthConfig {
  /// Build credentials from an explicit username, password and registry.
  pub fn new(username: impl Into<String>, password: impl Into<String>, server_address: impl Into<String>) -> Self {
    Self {
      username: username.into(),
      password: password.into(),
      server_address: server_address.into(),
      ..Default::default()
    }
  }

  /// Credentials that only name a registry, for anonymous access.
  pub fn anonymous(server_address: impl Into<String>) -> Self {
    Self {
      server_address: server_address.into(),
      ..Default::default()
    }
  }

  /// Returns true when no username and no secret of any kind is present.
  pub fn is_anonymous(&self) -> bool {
    self.username.is_empty()
      && self.password.is_empty()
      && self.identity_token.is_empty()
      && self.registry_token.is_empty()
  }
}

fn redact(value: &str) -> &'static str {
  if value.is_empty() { "" } else { "<redacted>" }
}

impl fmt::Debug for AuthConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("AuthConfig")
      .field("username", &self.username)
      .field("password", &redact(&self.password))
      .field("auth", &redact(&self.auth))
      .field("server_address", &self.server_address)
      .field("identity_token", &redact(&self.identity_token))
      .field("registry_token", &redact(&self.registry_token))
      .finish()
  }
}

/// Credential values passed explicitly on the command line.
///
/// Empty strings mean the flag was not given.
#[derive(Clone, Default)]
pub struct RegistryFlags {
  pub username: String,
  pub password: String,
  pub registry: String,
}

impl RegistryFlags {
  pub fn new(username: impl Into<String>, password: impl Into<String>, registry: impl Into<String>) -> Self {
    Self {
      username: username.into(),
      password: password.into(),
      registry: registry.into(),
    }
  }

  /// Flags that only name a registry.
  pub fn for_registry(registry: impl Into<String>) -> Self {
    Self {
      registry: registry.into(),
      ..Default::default()
    }
  }

  /// Returns true when username, password and registry are all set.
  pub fn is_complete(&self) -> bool {
    !self.username.is_empty() && !self.password.is_empty() && !self.registry.is_empty()
  }
}
