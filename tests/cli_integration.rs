//! CLI integration tests.
//!
//! These tests run the compiled binary and check the behaviors that do
//! not require network access: argument handling, config preconditions,
//! and completion generation.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn issuesmith() -> Command {
    let mut cmd = Command::cargo_bin("issuesmith").unwrap();
    // Keep the environment deterministic regardless of the host shell.
    cmd.env_remove("GITHUB_TOKEN");
    cmd.env_remove("OPENAI_API_KEY");
    cmd
}

#[test]
fn help_lists_commands() {
    issuesmith()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("preview"))
        .stdout(predicate::str::contains("completion"));
}

#[test]
fn version_prints_name() {
    issuesmith()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("issuesmith"));
}

#[test]
fn run_fails_when_config_file_is_missing() {
    issuesmith()
        .args(["run", "--config", "/nonexistent/issuesmith.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("loading config"));
}

#[test]
fn run_fails_on_incomplete_config() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
owner = "octocat"
repo = "hello-world"
github_token = "t"
openai_api_key = "k"
"#
    )
    .unwrap();

    issuesmith()
        .args(["run", "--config"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("project_description"));
}

#[test]
fn run_rejects_unknown_config_keys() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
owner = "octocat"
repo = "hello-world"
github_token = "t"
openai_api_key = "k"
project_description = "an app"
not_a_real_key = true
"#
    )
    .unwrap();

    issuesmith()
        .args(["run", "--config"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not_a_real_key"));
}

#[test]
fn invalid_delay_is_a_usage_error() {
    issuesmith()
        .args(["run", "--delay-ms", "soon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--delay-ms"));
}

#[test]
fn completion_bash_emits_script() {
    issuesmith()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("issuesmith"));
}

#[test]
fn completion_rejects_unknown_shell() {
    issuesmith()
        .args(["completion", "tcsh"])
        .assert()
        .failure();
}
