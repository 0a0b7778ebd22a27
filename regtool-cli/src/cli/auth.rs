//! # Auth Command
//!
//! Resolves registry credentials and reports which ones would be used,
//! without ever printing a secret.

use anyhow::Result;
use regtool_core::output::{format_path, format_registry, print_field};
use regtool_core::{AuthConfig, print_info, print_success, print_warning};
use tracing::info;

use super::RegistryArgs;

/// Handle the auth command
pub(crate) fn handle_auth_command(args: &RegistryArgs) -> Result<()> {
  if !args.password.is_empty() {
    print_warning("Passing --password on the command line exposes it in shell history and process lists.");
  }

  let resolver = args.resolver()?;
  info!("Resolving credentials from {}", resolver.config_dir().display());

  let creds = resolver.resolve(&args.flags())?;

  if creds.is_anonymous() {
    print_info(&format!(
      "No credentials found, using anonymous access to {}",
      format_registry(&creds.server_address)
    ));
    return Ok(());
  }

  print_success(&format!(
    "Resolved credentials for {}",
    format_registry(&creds.server_address)
  ));
  print_field("registry", &creds.server_address);
  if !creds.username.is_empty() {
    print_field("username", &creds.username);
  }
  print_field("secret", &secret_kinds(&creds).join(", "));
  print_field("config", &format_path(&resolver.config_dir().display().to_string()));

  Ok(())
}

/// Names of the secrets present in `creds`
fn secret_kinds(creds: &AuthConfig) -> Vec<&'static str> {
  let mut kinds = Vec::new();
  if !creds.password.is_empty() {
    kinds.push("password");
  }
  if !creds.identity_token.is_empty() {
    kinds.push("identity token");
  }
  if !creds.registry_token.is_empty() {
    kinds.push("registry token");
  }
  if kinds.is_empty() {
    kinds.push("none");
  }
  kinds
}
