//! CLI integration tests
//!
//! These run the compiled binary and check output, side effects and exit codes.

mod support;

use serial_test::serial;
use std::process::Command;
use support::{jx_project_bin, packs_fixture, read, write};
use tempfile::TempDir;

fn jx_project() -> Command {
    let mut cmd = Command::new(jx_project_bin());
    cmd.env_remove("JX_PROJECT_PACKS_DIR")
        .env_remove("JX_PROJECT_LOG_LEVEL")
        .env_remove("JX_PROJECT_LOG_JSON")
        .env_remove("JX_PROJECT_DOCKER_REGISTRY_ORG")
        .env_remove("JX_PROJECT_GIT_HOST")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_cli_help() {
    let output = jx_project().arg("--help").output().expect("Failed to execute jx-project");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("detect"));
    assert!(stdout.contains("import"));
}

#[test]
fn test_cli_version() {
    let output = jx_project().arg("--version").output().expect("Failed to execute jx-project");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_detect_human() {
    let project = TempDir::new().unwrap();
    write(project.path(), "pom.xml", "<java.version>17</java.version>");

    let output = jx_project()
        .arg("detect")
        .arg(project.path())
        .arg("--packs-dir")
        .arg(packs_fixture())
        .output()
        .expect("Failed to execute jx-project");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "maven-java17\n");
}

#[test]
fn test_detect_json() {
    let project = TempDir::new().unwrap();
    write(project.path(), "main.go", "package main\n");

    let output = jx_project()
        .args(["detect", "--format", "json", "--packs-dir"])
        .arg(packs_fixture())
        .arg(project.path())
        .output()
        .expect("Failed to execute jx-project");

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["pack"], "go");
}

#[test]
#[serial]
fn test_packs_dir_from_environment() {
    let project = TempDir::new().unwrap();
    write(project.path(), "main.go", "package main\n");

    let output = jx_project()
        .env("JX_PROJECT_PACKS_DIR", packs_fixture())
        .arg("detect")
        .arg(project.path())
        .output()
        .expect("Failed to execute jx-project");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "go\n");
}

#[test]
fn test_detect_failure_exit_code() {
    let project = TempDir::new().unwrap();

    let output = jx_project()
        .arg("detect")
        .arg(project.path())
        .arg("--packs-dir")
        .arg(packs_fixture())
        .output()
        .expect("Failed to execute jx-project");

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("could not detect a build pack"));
}

#[test]
fn test_detect_missing_directory() {
    let project = TempDir::new().unwrap();

    let output = jx_project()
        .arg("detect")
        .arg(project.path().join("nope"))
        .arg("--packs-dir")
        .arg(packs_fixture())
        .output()
        .expect("Failed to execute jx-project");

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_import_yaml_output() {
    let root = TempDir::new().unwrap();
    let project = root.path().join("orders");
    write(&project, "pom.xml", "<project/>");

    let output = jx_project()
        .arg("import")
        .arg(&project)
        .arg("--packs-dir")
        .arg(packs_fixture())
        .args(["--org", "Acme", "--owner", "alice", "--format", "yaml"])
        .output()
        .expect("Failed to execute jx-project");

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let value: serde_yaml::Value = serde_yaml::from_slice(&output.stdout).unwrap();
    assert_eq!(value["pack"].as_str(), Some("maven"));
    assert_eq!(value["app_name"].as_str(), Some("orders"));
    assert_eq!(value["owners_created"].as_bool(), Some(true));
    assert!(read(&project, "charts/orders/values.yaml").contains("repository: acme/orders"));
}

#[test]
fn test_import_lighthouse_only() {
    let root = TempDir::new().unwrap();
    let project = root.path().join("svc");
    write(&project, "main.go", "package main\n");

    let output = jx_project()
        .arg("import")
        .arg(&project)
        .arg("--packs-dir")
        .arg(packs_fixture())
        .args(["--org", "acme", "--git-host", "gitlab.example.com", "--lighthouse-only"])
        .output()
        .expect("Failed to execute jx-project");

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(!project.join("charts").exists());
    assert!(!project.join("Dockerfile").exists());
    assert!(read(&project, ".lighthouse/jenkins-x/release.yaml")
        .contains("https://gitlab.example.com/acme/svc.git"));
}

#[test]
fn test_import_json_reports_skipped_pack_entries_relative_to_pack() {
    let root = TempDir::new().unwrap();
    let project = root.path().join("svc");
    write(&project, "main.go", "package main\n");

    let output = jx_project()
        .arg("import")
        .arg(&project)
        .arg("--packs-dir")
        .arg(packs_fixture())
        .args(["--org", "acme", "--format", "json"])
        .output()
        .expect("Failed to execute jx-project");

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["pack"], "go");
    assert_eq!(value["skipped"][0]["path"], "notes");
}

#[test]
fn test_import_rejects_app_name_with_separator() {
    let root = TempDir::new().unwrap();
    let project = root.path().join("svc");
    write(&project, "main.go", "package main\n");

    let output = jx_project()
        .arg("import")
        .arg(&project)
        .arg("--packs-dir")
        .arg(packs_fixture())
        .args(["--org", "acme", "--app-name", "../x"])
        .output()
        .expect("Failed to execute jx-project");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid application name"));
    assert!(!project.join("charts").exists());
    assert!(!root.path().join("x").exists());
}

#[test]
fn test_import_unknown_pack() {
    let project = TempDir::new().unwrap();

    let output = jx_project()
        .arg("import")
        .arg(project.path())
        .arg("--packs-dir")
        .arg(packs_fixture())
        .args(["--org", "acme", "--pack", "cobol"])
        .output()
        .expect("Failed to execute jx-project");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("build pack 'cobol' not found"));
}

#[test]
fn test_invalid_log_level_from_environment() {
    let project = TempDir::new().unwrap();
    write(project.path(), "main.go", "package main\n");

    let output = jx_project()
        .env("JX_PROJECT_LOG_LEVEL", "loud")
        .arg("detect")
        .arg(project.path())
        .arg("--packs-dir")
        .arg(packs_fixture())
        .output()
        .expect("Failed to execute jx-project");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid log level"));
}
