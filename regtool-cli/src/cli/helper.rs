//! # Helper Command
//!
//! Reports the credential helper that would be asked for a registry.

use anyhow::Result;
use regtool_core::creds::native::HELPER_PREFIX;
use regtool_core::output::{format_command, format_registry};
use regtool_core::{print_info, print_success};

use super::RegistryArgs;

/// Handle the helper command
pub(crate) fn handle_helper_command(args: &RegistryArgs) -> Result<()> {
  let resolver = args.resolver()?;
  let helper = resolver.configured_helper(&args.registry)?;

  let target = if args.registry.is_empty() {
    "the default credential store".to_string()
  } else {
    format_registry(&args.registry)
  };

  match helper {
    Some(helper) => print_success(&format!(
      "Credentials for {} come from {}",
      target,
      format_command(&format!("{HELPER_PREFIX}{helper}"))
    )),
    None => print_info(&format!("No credential helper is configured for {target}")),
  }

  Ok(())
}
