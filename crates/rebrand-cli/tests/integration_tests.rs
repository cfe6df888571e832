//! End-to-end tests for the `rebrand` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const MANIFEST: &str = "\
name: purplestack
description: A Purplestack app.
version: 1.0.0+1

environment:
  sdk: ^3.5.0
";

const GRADLE: &str = "\
android {
    namespace \"com.example.purplestack\"
    defaultConfig {
        applicationId \"com.example.purplestack\"
    }
}
";

const MAIN_DART: &str = "\
import 'package:purplestack/app.dart';

const title = 'Purplestack';
";

fn template() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "pubspec.yaml", MANIFEST);
    write(dir.path(), "android/app/build.gradle", GRADLE);
    write(dir.path(), "lib/main.dart", MAIN_DART);
    write(dir.path(), "README.md", "# Purplestack\n");
    dir
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn read(root: &Path, rel: &str) -> String {
    fs::read_to_string(root.join(rel)).unwrap()
}

fn rebrand(project: &Path) -> Command {
    let mut cmd = Command::cargo_bin("rebrand").unwrap();
    cmd.env_remove("RUST_LOG")
        .arg("--project-dir")
        .arg(project)
        .args(["--name", "Task Flow", "--app-id", "com.acme.taskflow"]);
    cmd
}

#[test]
fn help_lists_identity_flags() {
    Command::cargo_bin("rebrand")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--app-id"))
        .stdout(predicate::str::contains("--dry-run"));
}

#[test]
fn tool_version_flag() {
    Command::cargo_bin("rebrand")
        .unwrap()
        .arg("-V")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn renames_a_template_project() {
    let project = template();

    rebrand(project.path())
        .args(["--version", "2.0.0+3", "--no-refresh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task Flow"));

    let manifest = read(project.path(), "pubspec.yaml");
    assert!(manifest.contains("name: task_flow"));
    assert!(manifest.contains("version: 2.0.0+3"));
    assert!(manifest.contains("sdk: ^3.5.0"));

    let gradle = read(project.path(), "android/app/build.gradle");
    assert!(gradle.contains("applicationId \"com.acme.taskflow\""));
    assert!(!gradle.contains("purplestack"));

    let dart = read(project.path(), "lib/main.dart");
    assert!(dart.contains("package:task_flow/app.dart"));
    assert!(dart.contains("'Task Flow'"));
}

#[test]
fn dry_run_leaves_the_project_untouched() {
    let project = template();

    rebrand(project.path())
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"));

    assert_eq!(read(project.path(), "pubspec.yaml"), MANIFEST);
    assert_eq!(read(project.path(), "lib/main.dart"), MAIN_DART);
}

#[test]
fn json_output_is_a_run_summary() {
    let project = template();

    let output = rebrand(project.path())
        .args(["--dry-run", "--output-format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["phase"], "done");
    assert_eq!(summary["dry_run"], true);
    assert_eq!(summary["manifest_changed"], true);
    assert_eq!(summary["icons"], "not_requested");
}

#[test]
fn invalid_app_id_is_rejected_without_changes() {
    let project = template();

    Command::cargo_bin("rebrand")
        .unwrap()
        .arg("--project-dir")
        .arg(project.path())
        .args(["--name", "Task Flow", "--app-id", "TaskFlow"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid app id"));

    assert_eq!(read(project.path(), "pubspec.yaml"), MANIFEST);
}

#[test]
fn invalid_version_is_rejected() {
    let project = template();

    rebrand(project.path())
        .args(["--version", "1.2"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid version"));
}

#[test]
fn missing_icon_is_rejected() {
    let project = template();

    rebrand(project.path())
        .arg("--icon")
        .arg(project.path().join("art/missing.png"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("missing.png"));

    assert_eq!(read(project.path(), "lib/main.dart"), MAIN_DART);
}

#[test]
fn missing_manifest_is_not_found() {
    let project = TempDir::new().unwrap();

    rebrand(project.path())
        .arg("--no-refresh")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Manifest not found"));
}

#[test]
fn missing_config_file_is_a_config_error() {
    let project = template();

    rebrand(project.path())
        .arg("--config")
        .arg(project.path().join("nope.toml"))
        .assert()
        .code(4);
}

#[test]
fn project_config_overrides_refresh_commands() {
    let project = template();
    write(
        project.path(),
        ".rebrand.toml",
        "[commands]\nrefresh = [{ program = \"definitely-not-a-real-tool-xyz\", args = [] }]\n",
    );

    rebrand(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("definitely-not-a-real-tool-xyz"));

    assert!(read(project.path(), "pubspec.yaml").contains("name: task_flow"));
}

#[cfg(unix)]
#[test]
fn refresh_runs_in_the_project_root() {
    let project = template();
    write(
        project.path(),
        ".rebrand.toml",
        "[commands]\nrefresh = [{ program = \"sh\", args = [\"-c\", \"pwd > refreshed.txt\"] }]\n",
    );

    rebrand(project.path()).assert().success();

    let pwd = read(project.path(), "refreshed.txt");
    let expected = fs::canonicalize(project.path()).unwrap();
    assert_eq!(fs::canonicalize(pwd.trim()).unwrap(), expected);
}
