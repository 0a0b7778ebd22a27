//! Credential helper processes following the `docker-credential-*` protocol.
//!
//! A helper named `osxkeychain` is the executable
//! `docker-credential-osxkeychain`. For a lookup it is run with the `get`
//! verb, receives the server address on stdin and answers with a JSON object
//! holding `ServerURL`, `Username` and `Secret`.

use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};

use serde::Deserialize;
use tracing::debug;

use super::{CredentialStore, HelperError};
use crate::auth::AuthConfig;

/// Prefix of every credential helper executable
pub const HELPER_PREFIX: &str = "docker-credential-";

/// Username a helper reports when the secret is an identity token
const TOKEN_USERNAME: &str = "<token>";

/// Message helpers print when nothing is stored for the server
const CREDENTIALS_NOT_FOUND: &str = "credentials not found in native keychain";

#[derive(Deserialize)]
struct HelperResponse {
  #[serde(rename = "Username", default)]
  username: String,
  #[serde(rename = "Secret", default)]
  secret: String,
}

/// Credential store backed by `docker-credential-<helper>` executables.
#[derive(Debug, Clone, Default)]
pub struct NativeStore {
  helper_dir: Option<PathBuf>,
}

impl NativeStore {
  /// Create a store that finds helpers on `PATH`
  pub fn new() -> Self {
    Self::default()
  }

  /// Create a store that runs helpers from `dir` instead of searching `PATH`
  pub fn with_helper_dir(dir: impl Into<PathBuf>) -> Self {
    Self {
      helper_dir: Some(dir.into()),
    }
  }

  fn program(&self, helper: &str) -> PathBuf {
    let name = format!("{HELPER_PREFIX}{helper}");
    match &self.helper_dir {
      Some(dir) => dir.join(name),
      None => PathBuf::from(name),
    }
  }
}

impl CredentialStore for NativeStore {
  fn get(&self, helper: &str, server_address: &str) -> Result<AuthConfig, HelperError> {
    let program = self.program(helper);
    let program_name = program.display().to_string();
    debug!("Running credential helper {} for {}", program_name, server_address);

    let mut child = Command::new(&program)
      .arg("get")
      .stdin(Stdio::piped())
      .stdout(Stdio::piped())
      .stderr(Stdio::piped())
      .spawn()
      .map_err(|source| HelperError::Spawn {
        program: program_name.clone(),
        source,
      })?;

    // Stdin is closed when this handle drops so the helper sees EOF. A helper
    // may exit without reading it; its answer is still in the output.
    if let Some(mut stdin) = child.stdin.take() {
      match stdin.write_all(server_address.as_bytes()) {
        Ok(()) => {}
        Err(err) if err.kind() == ErrorKind::BrokenPipe => {
          debug!("Credential helper {} closed stdin before reading it", program_name);
        }
        Err(source) => {
          return Err(HelperError::Io {
            program: program_name,
            source,
          });
        }
      }
    }

    let output = child.wait_with_output().map_err(|source| HelperError::Io {
      program: program_name.clone(),
      source,
    })?;

    interpret_output(
      &program_name,
      server_address,
      output.status.success(),
      &output.stdout,
      &output.stderr,
    )
  }
}

/// Turn a helper's exit status and output into credentials.
fn interpret_output(
  program: &str,
  server_address: &str,
  success: bool,
  stdout: &[u8],
  stderr: &[u8],
) -> Result<AuthConfig, HelperError> {
  if !success {
    let mut message = String::from_utf8_lossy(stdout).trim().to_string();
    if message.is_empty() {
      message = String::from_utf8_lossy(stderr).trim().to_string();
    }

    if message == CREDENTIALS_NOT_FOUND {
      debug!("Credential helper {} has no credentials for {}", program, server_address);
      return Ok(AuthConfig::anonymous(server_address));
    }

    return Err(HelperError::Failed {
      program: program.to_string(),
      message,
    });
  }

  let response: HelperResponse = serde_json::from_slice(stdout).map_err(|source| HelperError::InvalidResponse {
    program: program.to_string(),
    source,
  })?;

  let mut creds = AuthConfig::anonymous(server_address);
  if response.username == TOKEN_USERNAME {
    creds.identity_token = response.secret;
  } else {
    creds.username = response.username;
    creds.password = response.secret;
  }

  Ok(creds)
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  const PROGRAM: &str = "docker-credential-test";

  #[test]
  fn test_program_name() {
    let store = NativeStore::new();
    assert_eq!(store.program("osxkeychain"), PathBuf::from("docker-credential-osxkeychain"));

    let store = NativeStore::with_helper_dir("/opt/helpers");
    assert_eq!(
      store.program("pass"),
      PathBuf::from("/opt/helpers/docker-credential-pass")
    );
  }

  #[test]
  fn test_interpret_basic_credentials() {
    let stdout = br#"{"ServerURL":"ghcr.io","Username":"octocat","Secret":"ghp_token"}"#;

    let creds = interpret_output(PROGRAM, "ghcr.io", true, stdout, b"").unwrap();
    assert_eq!(creds.username, "octocat");
    assert_eq!(creds.password, "ghp_token");
    assert_eq!(creds.server_address, "ghcr.io");
    assert!(creds.identity_token.is_empty());
  }

  #[test]
  fn test_interpret_identity_token() {
    let stdout = br#"{"ServerURL":"myregistry.azurecr.io","Username":"<token>","Secret":"refresh"}"#;

    let creds = interpret_output(PROGRAM, "myregistry.azurecr.io", true, stdout, b"").unwrap();
    assert!(creds.username.is_empty());
    assert!(creds.password.is_empty());
    assert_eq!(creds.identity_token, "refresh");
    assert_eq!(creds.server_address, "myregistry.azurecr.io");
  }

  #[test]
  fn test_interpret_server_address_is_requested_registry() {
    let stdout = br#"{"ServerURL":"https://index.docker.io/v1/","Username":"u","Secret":"s"}"#;

    let creds = interpret_output(PROGRAM, "docker.io", true, stdout, b"").unwrap();
    assert_eq!(creds.server_address, "docker.io");
  }

  #[test]
  fn test_interpret_credentials_not_found() {
    let creds = interpret_output(
      PROGRAM,
      "quay.io",
      false,
      b"credentials not found in native keychain\n",
      b"",
    )
    .unwrap();
    assert!(creds.is_anonymous());
    assert_eq!(creds.server_address, "quay.io");
  }

  #[test]
  fn test_interpret_failure_prefers_stdout_then_stderr() {
    let err = interpret_output(PROGRAM, "quay.io", false, b"keychain locked\n", b"ignored").unwrap_err();
    assert!(matches!(
      err,
      HelperError::Failed { ref program, ref message } if program == PROGRAM && message == "keychain locked"
    ));

    let err = interpret_output(PROGRAM, "quay.io", false, b"", b"permission denied\n").unwrap_err();
    assert!(matches!(err, HelperError::Failed { ref message, .. } if message == "permission denied"));
    assert!(err.to_string().contains(PROGRAM));
  }

  #[test]
  fn test_interpret_invalid_response() {
    let err = interpret_output(PROGRAM, "quay.io", true, b"not json", b"").unwrap_err();
    assert!(matches!(err, HelperError::InvalidResponse { .. }));
  }

  #[test]
  fn test_missing_helper_fails_to_spawn() {
    let empty_dir = TempDir::new().unwrap();
    let store = NativeStore::with_helper_dir(empty_dir.path());

    let err = store.get("does-not-exist", "quay.io").unwrap_err();
    assert!(matches!(err, HelperError::Spawn { .. }));
    assert!(err.to_string().contains("docker-credential-does-not-exist"));
  }

  #[cfg(unix)]
  mod helper_process {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;

    use tempfile::TempDir;

    use super::super::{HELPER_PREFIX, NativeStore};
    use crate::creds::{CredentialStore, HelperError};

    fn write_helper(dir: &Path, name: &str, body: &str) {
      let path = dir.join(format!("{HELPER_PREFIX}{name}"));
      fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
      fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    // Process tests share one function so no helper script is still open for
    // writing while another test thread forks.
    #[test]
    fn test_get_runs_helper_process() {
      let dir = TempDir::new().unwrap();
      write_helper(
        dir.path(),
        "echo",
        r#"[ "$1" = "get" ] || { echo "unexpected verb $1"; exit 1; }
read -r server || true
printf '{"ServerURL":"%s","Username":"u-%s","Secret":"s-%s"}' "$server" "$server" "$server""#,
      );
      write_helper(
        dir.path(),
        "token",
        r#"read -r server || true
printf '{"ServerURL":"%s","Username":"<token>","Secret":"refresh"}' "$server""#,
      );
      write_helper(
        dir.path(),
        "notfound",
        "exec 0<&-\necho 'credentials not found in native keychain'\nexit 1",
      );
      write_helper(dir.path(), "locked", "exec 0<&-\necho 'keychain locked'\nexit 1");
      write_helper(dir.path(), "garbled", "read -r server || true\necho 'not json'");

      let store = NativeStore::with_helper_dir(dir.path());

      let creds = store.get("echo", "ghcr.io").unwrap();
      assert_eq!(creds.username, "u-ghcr.io");
      assert_eq!(creds.password, "s-ghcr.io");
      assert_eq!(creds.server_address, "ghcr.io");

      let creds = store.get("token", "myregistry.azurecr.io").unwrap();
      assert!(creds.username.is_empty());
      assert!(creds.password.is_empty());
      assert_eq!(creds.identity_token, "refresh");
      assert_eq!(creds.server_address, "myregistry.azurecr.io");

      let err = store.get("garbled", "quay.io").unwrap_err();
      assert!(matches!(err, HelperError::InvalidResponse { .. }));

      // Helpers that never read stdin must still be heard, every time.
      for _ in 0..50 {
        let creds = store.get("notfound", "quay.io").unwrap();
        assert!(creds.is_anonymous());
        assert_eq!(creds.server_address, "quay.io");

        let err = store.get("locked", "quay.io").unwrap_err();
        assert!(matches!(err, HelperError::Failed { ref message, .. } if message == "keychain locked"));
      }
    }
  }
}
