//! # Repository References
//!
//! Splits a `repository[:tag]` or `repository@digest` command-line argument
//! into the repository name and the reference to fetch.

use thiserror::Error;
use tracing::debug;

/// Reference used when the argument names no tag or digest
pub const DEFAULT_REFERENCE: &str = "latest";

/// Errors raised while reading a repository argument.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReferenceError {
  #[error("pass the name of the repository")]
  MissingArgument,
}

/// A repository name and the tag or digest within it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
  pub repo: String,
  pub reference: String,
}

impl RepoRef {
  /// Split `arg` into repository and reference.
  ///
  /// The argument is split on every `@` when it contains one, otherwise on
  /// every `:`. The first part is the repository and the second the
  /// reference; any further parts are dropped. Without a separator the
  /// reference is [`DEFAULT_REFERENCE`].
  ///
  /// # Examples
  ///
  /// ```
  /// use regtool_core::reference::RepoRef;
  ///
  /// let parsed = RepoRef::parse("ubuntu:18.04");
  /// assert_eq!(parsed.repo, "ubuntu");
  /// assert_eq!(parsed.reference, "18.04");
  ///
  /// let parsed = RepoRef::parse("alpine@sha256:abcd");
  /// assert_eq!(parsed.reference, "sha256:abcd");
  ///
  /// assert_eq!(RepoRef::parse("busybox").reference, "latest");
  /// ```
  pub fn parse(arg: &str) -> Self {
    let separator = ['@', ':'].into_iter().find(|sep| arg.contains(*sep));

    let (repo, reference) = match separator {
      Some(sep) => {
        let mut parts = arg.split(sep);
        let repo = parts.next().unwrap_or(arg);
        let reference = parts.next();
        if parts.next().is_some() {
          debug!("Ignoring text after the second '{}' in {}", sep, arg);
        }
        (repo, reference)
      }
      None => (arg, None),
    };

    Self {
      repo: repo.to_string(),
      reference: reference.unwrap_or(DEFAULT_REFERENCE).to_string(),
    }
  }
}

/// Parse the repository and reference from positional arguments.
///
/// Only the first argument is used.
///
/// # Errors
///
/// Returns [`ReferenceError::MissingArgument`] when `args` is empty.
pub fn parse_repo_and_ref<S: AsRef<str>>(args: &[S]) -> Result<RepoRef, ReferenceError> {
  let arg = args.first().ok_or(ReferenceError::MissingArgument)?;
  Ok(RepoRef::parse(arg.as_ref()))
}
