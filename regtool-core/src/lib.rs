//! # Regtool Core Library
//!
//! Core library for the regtool command-line tool: resolves container
//! registry credentials from explicit flags, credential helpers, or the
//! Docker config file, and parses `repository[:tag|@digest]` arguments.

pub mod auth;
pub mod config;
pub mod creds;
pub mod output;
pub mod reference;

// Re-export main types for the CLI
pub use auth::resolver::{AuthError, AuthResolver};
pub use auth::{AuthConfig, RegistryFlags};
pub use config::{ConfigError, ConfigFile, default_config_dir};
pub use creds::{CredentialStore, HelperError, NativeStore};
pub use output::{ColorMode, print_info, print_success, print_warning};
pub use reference::{ReferenceError, RepoRef, parse_repo_and_ref};
