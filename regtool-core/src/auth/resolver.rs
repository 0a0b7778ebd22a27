//! # Credential Resolution
//!
//! Picks the registry credentials a command should use, from explicit flags,
//! a credential helper, or the entries stored in the Docker config file.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::auth::{AuthConfig, RegistryFlags};
use crate::config::{ConfigError, ConfigFile};
use crate::creds::{CredentialStore, HelperError, NativeStore};

/// Errors raised while resolving registry credentials.
#[derive(Debug, Error)]
pub enum AuthError {
  #[error("Loading config file failed")]
  ConfigLoad {
    #[source]
    source: ConfigError,
  },

  #[error("No auth was present in {}, please pass a registry, username, and password", .dir.display())]
  NoCredentials { dir: PathBuf },

  #[error("No authentication credentials exist for {registry}")]
  RegistryNotFound { registry: String },

  #[error("Unable to retrieve auth from Credential Store")]
  CredentialStore {
    #[source]
    source: HelperError,
  },

  #[error("Could not find any authentication credentials")]
  NoCredentialsFound,
}

/// Resolves registry credentials against one config directory.
pub struct AuthResolver {
  config_dir: PathBuf,
  store: Box<dyn CredentialStore>,
}

impl AuthResolver {
  /// Create a resolver reading `config.json` from `config_dir` and querying
  /// credential helpers through `store`
  pub fn new(config_dir: impl Into<PathBuf>, store: Box<dyn CredentialStore>) -> Self {
    Self {
      config_dir: config_dir.into(),
      store,
    }
  }

  /// Create a resolver that runs `docker-credential-*` helpers from `PATH`
  pub fn with_native_store(config_dir: impl Into<PathBuf>) -> Self {
    Self::new(config_dir, Box::new(NativeStore::new()))
  }

  /// Get the config directory this resolver reads from
  pub fn config_dir(&self) -> &Path {
    &self.config_dir
  }

  fn load_config(&self) -> Result<ConfigFile, AuthError> {
    ConfigFile::load(&self.config_dir).map_err(|source| AuthError::ConfigLoad { source })
  }

  /// Resolve the credentials to use for `flags`.
  ///
  /// The config file is always loaded, so a broken config fails even when
  /// the flags are complete. Resolution order:
  ///
  /// 1. Complete flags (username, password and registry) are returned as-is.
  /// 2. With nothing stored in the config, a registry alone resolves to
  ///    anonymous access; no registry is an error.
  /// 3. With a registry, its credential helper (or the default store) is
  ///    asked, otherwise its `auths` entry is used.
  /// 4. Without a registry, the first `auths` entry by server address.
  ///
  /// # Errors
  ///
  /// See [`AuthError`]; every failure ends resolution.
  pub fn resolve(&self, flags: &RegistryFlags) -> Result<AuthConfig, AuthError> {
    let config = self.load_config()?;

    if flags.is_complete() {
      debug!("Using credentials from flags for {}", flags.registry);
      return Ok(AuthConfig::new(&flags.username, &flags.password, &flags.registry));
    }

    if !config.contains_auth() {
      if !flags.registry.is_empty() {
        debug!(
          "No auth stored in {}, using anonymous access to {}",
          self.config_dir.display(),
          flags.registry
        );
        return Ok(AuthConfig::anonymous(&flags.registry));
      }
      return Err(AuthError::NoCredentials {
        dir: self.config_dir.clone(),
      });
    }

    if !flags.registry.is_empty() {
      return self.resolve_registry(&config, &flags.registry);
    }

    match config.auths.values().next() {
      Some(creds) => {
        debug!(
          "No registry given, using first stored credentials ({})",
          creds.server_address
        );
        Ok(creds.clone())
      }
      None => Err(AuthError::NoCredentialsFound),
    }
  }

  fn resolve_registry(&self, config: &ConfigFile, registry: &str) -> Result<AuthConfig, AuthError> {
    if let Some(helper) = configured_credential_store(config, registry) {
      debug!("Using credential helper {} for {}", helper, registry);
      return self
        .store
        .get(helper, registry)
        .map_err(|source| AuthError::CredentialStore { source });
    }

    match config.auths.get(registry) {
      Some(creds) => {
        debug!("Using stored credentials for {}", registry);
        Ok(creds.clone())
      }
      None => Err(AuthError::RegistryNotFound {
        registry: registry.to_string(),
      }),
    }
  }

  /// Get the credential helper configured for `registry`, falling back to
  /// the default store when `registry` is empty or has no dedicated helper.
  pub fn configured_helper(&self, registry: &str) -> Result<Option<String>, AuthError> {
    let config = self.load_config()?;
    Ok(configured_credential_store(&config, registry).map(str::to_string))
  }
}

/// Returns the helper configured for `server_address`, the default store,
/// or `None` if neither is configured.
fn configured_credential_store<'a>(config: &'a ConfigFile, server_address: &str) -> Option<&'a str> {
  if !server_address.is_empty()
    && let Some(helper) = config.cred_helpers.get(server_address)
  {
    return Some(helper.as_str());
  }
  config.default_store()
}
