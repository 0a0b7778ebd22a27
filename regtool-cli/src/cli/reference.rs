//! # Ref Command
//!
//! Parses a `repository[:tag|@digest]` argument and prints its parts.

use anyhow::Result;
use clap::Args;
use regtool_core::output::{format_reference, print_field};
use regtool_core::parse_repo_and_ref;

/// Command for parsing a repository reference
#[derive(Args)]
pub struct RefArgs {
  /// Repository with an optional :tag or @digest (only the first is used)
  #[arg(value_name = "REPOSITORY")]
  pub args: Vec<String>,
}

/// Handle the ref command
pub(crate) fn handle_ref_command(args: RefArgs) -> Result<()> {
  let parsed = parse_repo_and_ref(&args.args)?;

  print_field("repository", &format_reference(&parsed.repo));
  print_field("reference", &format_reference(&parsed.reference));

  Ok(())
}
