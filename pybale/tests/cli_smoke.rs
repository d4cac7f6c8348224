//! CLI smoke tests for pybale.
//!
//! These exercise argument parsing and the failure paths that need neither a
//! Python interpreter nor network access.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn pybale_cmd() -> Command {
    cargo_bin_cmd!("pybale")
}

/// A minimal project: one module exposing an `application` object.
fn temp_project() -> TempDir {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir_all(temp.path().join("api")).unwrap();
    std::fs::write(temp.path().join("api/index.py"), "application = object()\n").unwrap();
    temp
}

#[test]
fn help_flag_works() {
    pybale_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("build"))
        .stdout(predicate::str::contains("runtimes"));
}

#[test]
fn version_flag_works() {
    pybale_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pybale"));
}

#[test]
fn runtimes_lists_supported_set() {
    pybale_cmd()
        .arg("runtimes")
        .assert()
        .success()
        .stdout(predicate::str::contains("python3.6"))
        .stdout(predicate::str::contains("python3.8 (default)"))
        .stdout(predicate::str::contains("python3.9"));
}

#[test]
fn build_requires_entrypoint() {
    let project = temp_project();
    pybale_cmd()
        .arg("build")
        .arg(project.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("--entrypoint"));
}

#[test]
fn build_rejects_unsupported_runtime() {
    let project = temp_project();
    pybale_cmd()
        .args(["build", "--entrypoint", "api/index", "--runtime", "nodejs99"])
        .arg(project.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported runtime 'nodejs99'"));
}

#[test]
fn build_rejects_missing_project_dir() {
    pybale_cmd()
        .args(["build", "--entrypoint", "api/index", "/nonexistent/pybale-project"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn build_rejects_malformed_entrypoint() {
    let project = temp_project();
    pybale_cmd()
        .args(["build", "--entrypoint", "api//index"])
        .arg(project.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid --entrypoint"));
}

#[test]
fn build_rejects_unreadable_config() {
    let project = temp_project();
    pybale_cmd()
        .args(["build", "--entrypoint", "api/index", "--config", "/nonexistent/build.json"])
        .arg(project.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("read config"));
}
