//! # Completion Command
//!
//! Derive-based implementation of the completion command for generating
//! shell completion scripts.

use std::io;

use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::{Shell, generate};

use super::Cli;

/// Command for generating shell completions
#[derive(Args)]
pub struct CompletionArgs {
  /// Shell to generate completions for
  #[arg(value_enum)]
  pub shell: Shell,
}

pub(crate) fn handle_completion_command(completion: CompletionArgs) -> Result<()> {
  generate_completions(completion.shell, &mut io::stdout());
  Ok(())
}

/// Generate shell completions for the specified shell
fn generate_completions(shell: Shell, out: &mut dyn io::Write) {
  let mut cmd = Cli::command();
  let app_name = cmd.get_name().to_string();

  generate(shell, &mut cmd, app_name, out);
}

#[cfg(test)]
mod tests {
  use clap_complete::Shell;

  use super::generate_completions;

  #[test]
  fn test_generate_completions_succeeds() {
    let shells = [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell];

    for shell in shells {
      let mut buf = Vec::new();
      generate_completions(shell, &mut buf);
      let script = String::from_utf8(buf).unwrap();
      assert!(script.contains("regtool"), "Missing command name in {shell:?} completions");
    }
  }
}
