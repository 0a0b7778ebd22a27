//! # Command Line Interface
//!
//! Defines the CLI structure and command handlers for the regtool tool,
//! including the global registry credential flags shared by every
//! subcommand.

mod auth;
mod completion;
mod helper;
mod reference;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Args, Parser, Subcommand};
use regtool_core::{AuthResolver, ColorMode, RegistryFlags, default_config_dir};

/// Top-level CLI command for the regtool tool
#[derive(Parser)]
#[command(name = "regtool")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(about = "Docker registry credential and reference helper")]
#[command(
  long_about = "Regtool resolves the credentials a registry command should use and parses\n\
        image references.\n\n\
        Credentials come from --username/--password/--registry when all three are\n\
        given, otherwise from the credential helpers and entries in the Docker\n\
        config file (config.json in $DOCKER_CONFIG or ~/.docker)."
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
#[command(subcommand_required(true))]
#[command(disable_help_subcommand = true)]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightGreen.on_default().bold().underline())
    .usage(AnsiColor::Green.on_default().bold())  // Make usage line stand out
    .literal(AnsiColor::BrightGreen.on_default().bold())  // Command names, flags bold
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
    .valid(AnsiColor::Green.on_default())
    .invalid(AnsiColor::BrightRed.on_default().bold())
)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    global = true,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,

  /// Controls when colored output is used
  #[arg(
    long,
    value_enum,
    ignore_case = true,
    global = true,
    default_value_t = ColorMode::Auto,
  )]
  pub colors: ColorMode,

  /// Registry credentials and config location
  #[command(flatten)]
  pub registry: RegistryArgs,

  /// Subcommands
  #[command(subcommand)]
  pub command: Commands,
}

/// Global flags selecting registry credentials
#[derive(Args, Clone, Default)]
pub struct RegistryArgs {
  /// Username for the registry
  #[arg(short = 'u', long, global = true, default_value = "")]
  pub username: String,

  /// Password for the registry
  #[arg(short = 'p', long, global = true, default_value = "", hide_default_value = true)]
  pub password: String,

  /// URL of the registry
  #[arg(short = 'r', long, global = true, default_value = "")]
  pub registry: String,

  /// Docker config directory (defaults to $DOCKER_CONFIG or ~/.docker)
  #[arg(long = "config", value_name = "DIR", global = true)]
  pub config_dir: Option<PathBuf>,
}

impl RegistryArgs {
  /// The credential flags as passed on the command line
  pub fn flags(&self) -> RegistryFlags {
    RegistryFlags::new(&self.username, &self.password, &self.registry)
  }

  /// Build a resolver for the selected config directory
  pub fn resolver(&self) -> Result<AuthResolver> {
    let config_dir = match &self.config_dir {
      Some(dir) => dir.clone(),
      None => default_config_dir().context("Failed to locate the Docker config directory")?,
    };
    Ok(AuthResolver::with_native_store(config_dir))
  }
}

/// Subcommands for the regtool tool
#[derive(Subcommand)]
pub enum Commands {
  /// Show which registry credentials would be used
  #[command(long_about = "Resolves registry credentials and shows which ones would be used.\n\n\
            Explicit --username, --password and --registry flags win when all three are\n\
            set. Otherwise the registry's credential helper, the default credential store,\n\
            or the entry stored in config.json is used. Secrets are never printed.")]
  Auth,

  /// Generate shell completions
  #[command(long_about = "Generates shell completion scripts for regtool commands.\n\n\
            This command generates completion scripts that provide tab completion for\n\
            regtool commands and options in your shell.")]
  Completion(completion::CompletionArgs),

  /// Show the credential helper configured for a registry
  #[command(long_about = "Shows the credential helper configured for --registry.\n\n\
            A helper listed under credHelpers for the registry wins over the default\n\
            credsStore. Without --registry only the default store is reported.")]
  Helper,

  /// Parse a repository[:tag|@digest] reference
  #[command(name = "ref")]
  #[command(long_about = "Splits the first argument into a repository and a reference.\n\n\
            A reference after '@' is a digest and one after ':' is a tag. Without either\n\
            the reference defaults to 'latest'. Additional arguments are ignored.")]
  Ref(reference::RefArgs),
}

pub fn handle_cli(cli: Cli) -> Result<()> {
  // Set global color override based on --colors argument
  cli.colors.apply();

  match cli.command {
    Commands::Auth => auth::handle_auth_command(&cli.registry),
    Commands::Completion(completion) => completion::handle_completion_command(completion),
    Commands::Helper => helper::handle_helper_command(&cli.registry),
    Commands::Ref(args) => reference::handle_ref_command(args),
  }
}
