use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use regtool_test_utils::DockerConfigGuard;

#[test]
fn help_output_lists_subcommands() {
  cargo_bin_cmd!("regtool")
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("auth"))
    .stdout(predicate::str::contains("ref"))
    .stdout(predicate::str::contains("helper"))
    .stdout(predicate::str::contains("--registry"));
}

#[test]
fn ref_prints_repository_and_tag() {
  cargo_bin_cmd!("regtool")
    .args(["ref", "ubuntu:18.04"])
    .assert()
    .success()
    .stdout(predicate::str::contains("ubuntu"))
    .stdout(predicate::str::contains("18.04"));
}

#[test]
fn ref_defaults_to_latest() {
  cargo_bin_cmd!("regtool")
    .args(["ref", "busybox", "ignored:tag"])
    .assert()
    .success()
    .stdout(predicate::str::contains("busybox"))
    .stdout(predicate::str::contains("latest"))
    .stdout(predicate::str::contains("ignored").not());
}

#[test]
fn ref_without_argument_fails() {
  cargo_bin_cmd!("regtool")
    .arg("ref")
    .assert()
    .failure()
    .stderr(predicate::str::contains("pass the name of the repository"));
}

#[test]
fn auth_with_registry_and_empty_config_is_anonymous() {
  let guard = DockerConfigGuard::empty();

  cargo_bin_cmd!("regtool")
    .arg("--config")
    .arg(guard.config_dir())
    .args(["--registry", "myregistry.io", "auth"])
    .assert()
    .success()
    .stdout(predicate::str::contains("anonymous"))
    .stdout(predicate::str::contains("myregistry.io"));
}

#[test]
fn auth_without_registry_and_empty_config_fails() {
  let guard = DockerConfigGuard::empty();

  cargo_bin_cmd!("regtool")
    .arg("--config")
    .arg(guard.config_dir())
    .arg("auth")
    .assert()
    .failure()
    .stderr(predicate::str::contains("No auth was present"));
}

#[test]
fn auth_reads_stored_credentials_without_printing_secret() {
  let guard = DockerConfigGuard::with_auths(&[("registry.example.com", "robot", "topsecret")]);

  cargo_bin_cmd!("regtool")
    .arg("--config")
    .arg(guard.config_dir())
    .args(["auth", "-r", "registry.example.com"])
    .assert()
    .success()
    .stdout(predicate::str::contains("robot"))
    .stdout(predicate::str::contains("password"))
    .stdout(predicate::str::contains("topsecret").not());
}

#[test]
fn auth_reports_missing_registry() {
  let guard = DockerConfigGuard::with_auths(&[("r1", "user", "pass")]);

  cargo_bin_cmd!("regtool")
    .arg("--config")
    .arg(guard.config_dir())
    .args(["auth", "--registry", "r2"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("No authentication credentials exist for r2"));
}

#[test]
fn auth_reports_broken_config_even_with_explicit_credentials() {
  let guard = DockerConfigGuard::new("{ broken");

  cargo_bin_cmd!("regtool")
    .arg("--config")
    .arg(guard.config_dir())
    .args(["auth", "-u", "alice", "-p", "secret", "-r", "ghcr.io"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Loading config file failed"));
}

#[test]
fn helper_reports_configured_helper() {
  let guard = DockerConfigGuard::new(r#"{ "credHelpers": { "gcr.io": "gcloud" }, "credsStore": "desktop" }"#);

  cargo_bin_cmd!("regtool")
    .arg("--config")
    .arg(guard.config_dir())
    .args(["helper", "--registry", "gcr.io"])
    .assert()
    .success()
    .stdout(predicate::str::contains("docker-credential-gcloud"));

  cargo_bin_cmd!("regtool")
    .arg("--config")
    .arg(guard.config_dir())
    .arg("helper")
    .assert()
    .success()
    .stdout(predicate::str::contains("docker-credential-desktop"));
}
