// Author: Eshan Roy
// SPDX-License-Identifier: MIT

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

/// A working directory holding a config that extends the conventional preset.
fn workspace(config: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("cklint.toml"), config).unwrap();
    dir
}

fn cklint(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("cklint").unwrap();
    cmd.current_dir(dir).env_remove("CKLINT_CONFIG");
    cmd
}

const SCOPED: &str = r#"
extends = "conventional"

[[rules]]
name = "scope-enum"
severity = "error"
kind = "enum"
field = "scope"
allowed = ["api", "ui"]
"#;

#[test]
fn valid_message_passes() {
    let dir = workspace(SCOPED);
    cklint(dir.path())
        .args(["check", "-m", "feat(api): add x"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Valid"));
}

#[test]
fn invalid_message_fails_with_findings() {
    let dir = workspace(SCOPED);
    cklint(dir.path())
        .args(["check", "-m", "Feat(db): Add x."])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("type-case"))
        .stdout(predicate::str::contains("scope-enum"))
        .stdout(predicate::str::contains("subject-full-stop"))
        .stderr(predicate::str::contains("Commit message rejected"));
}

#[test]
fn reads_commit_editmsg_with_comments() {
    let dir = workspace(SCOPED);
    let msg = dir.path().join("COMMIT_EDITMSG");
    std::fs::write(
        &msg,
        "fix(ui): align buttons\n\nKeep the toolbar on one row.\n# Please enter the commit message\n",
    )
    .unwrap();

    cklint(dir.path())
        .arg("check")
        .arg(&msg)
        .assert()
        .success();
}

#[test]
fn reads_stdin() {
    let dir = workspace(SCOPED);
    cklint(dir.path())
        .arg("check")
        .write_stdin("fix: handle empty body\n")
        .assert()
        .success();
}

#[test]
fn long_body_line_fails() {
    let dir = workspace(SCOPED);
    let message = format!("docs: explain setup\n\n{}\n", "x".repeat(73));
    cklint(dir.path())
        .args(["check", "-m", &message])
        .assert()
        .failure()
        .stdout(predicate::str::contains("body-max-line-length"))
        .stdout(predicate::str::contains("73"));
}

#[test]
fn missing_blank_line_before_body_fails() {
    let dir = workspace(SCOPED);
    cklint(dir.path())
        .args(["check", "-m", "docs: explain setup\nno separator"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("body-leading-blank"));
}

#[test]
fn non_ascii_header_fails() {
    let dir = workspace(SCOPED);
    cklint(dir.path())
        .args(["check", "-m", "feat: add café menu"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("header-format"))
        .stdout(predicate::str::contains("'é'"));
}

#[test]
fn strict_turns_warnings_into_failures() {
    let dir = workspace(
        r#"
extends = "none"

[[rules]]
name = "subject-min-length"
severity = "warning"
kind = "min-length"
field = "subject"
limit = 10
"#,
    );

    cklint(dir.path())
        .args(["check", "-m", "feat: add x"])
        .assert()
        .success()
        .stdout(predicate::str::contains("subject-min-length"));

    cklint(dir.path())
        .args(["check", "--strict", "-m", "feat: add x"])
        .assert()
        .failure();
}

#[test]
fn json_output() {
    let dir = workspace(SCOPED);
    let output = cklint(dir.path())
        .args(["--format", "json", "check", "-m", "feat(db): add x"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["has_errors"], true);
    assert_eq!(json["header"], "feat(db): add x");

    let failed: Vec<_> = json["findings"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|f| f["passed"] == false)
        .map(|f| f["rule_name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(failed, vec!["scope-enum"]);
}

#[test]
fn rules_lists_effective_rules() {
    let dir = workspace(SCOPED);
    cklint(dir.path())
        .arg("rules")
        .assert()
        .success()
        .stdout(predicate::str::contains("type-enum"))
        .stdout(predicate::str::contains("scope-enum"))
        .stdout(predicate::str::contains("max-length"));
}

#[test]
fn explicit_config_path() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("lint.toml");
    std::fs::write(&config, "extends = \"none\"\n").unwrap();

    cklint(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["check", "-m", "anything goes here"])
        .assert()
        .success();
}

#[test]
fn duplicate_rule_names_are_rejected() {
    let dir = workspace(
        r#"
extends = "none"

[[rules]]
name = "subject-empty"
severity = "error"
kind = "non-empty"
field = "subject"

[[rules]]
name = "subject-empty"
severity = "warning"
kind = "non-empty"
field = "subject"
"#,
    );

    cklint(dir.path())
        .args(["check", "-m", "feat: add x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Duplicate rule name"));
}

#[test]
fn init_writes_config_once() {
    let dir = tempfile::tempdir().unwrap();

    cklint(dir.path()).arg("init").assert().success();
    assert!(dir.path().join("cklint.toml").exists());

    cklint(dir.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    cklint(dir.path())
        .args(["init", "--force", "--preset", "minimal"])
        .assert()
        .success();
    let written = std::fs::read_to_string(dir.path().join("cklint.toml")).unwrap();
    assert!(written.contains("extends = \"none\""));
}

#[test]
fn version_prints_name() {
    let dir = tempfile::tempdir().unwrap();
    cklint(dir.path())
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("cklint "));
}

#[test]
fn misspelled_rule_parameter_is_rejected() {
    let dir = workspace(
        r#"
extends = "none"

[[rules]]
name = "body-max-line-length"
severity = "error"
kind = "max-length"
field = "body"
limit = 72
linewise = true
"#,
    );

    cklint(dir.path())
        .args(["check", "-m", "docs: explain setup"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("linewise"));
}
