//! Integration tests for the yp CLI
//!
//! Everything here runs offline: the configured base URL is never contacted
//! because the exercised commands only touch local storage.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use yprompt::schema::PromptField;

/// Write a config file pointing storage into the temp dir
fn write_config(temp: &TempDir) -> std::path::PathBuf {
    let storage_dir = temp.path().join("storage");
    let config_path = temp.path().join("yprompt.yml");
    fs::write(
        &config_path,
        format!(
            "base_url: http://127.0.0.1:1\nstorage_dir: {}\n",
            storage_dir.display()
        ),
    )
    .unwrap();
    config_path
}

fn yp(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("yp").unwrap();
    cmd.arg("--config").arg(config);
    cmd
}

#[test]
fn test_rules_list_shows_every_field() {
    let temp = TempDir::new().unwrap();
    let config = write_config(&temp);

    let mut cmd = yp(&config);
    cmd.args(["rules", "list"]);
    let assert = cmd.assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    for field in PromptField::ALL {
        assert!(stdout.contains(field.local_key()), "missing {}", field.local_key());
    }
}

#[test]
fn test_rules_set_get_roundtrip() {
    let temp = TempDir::new().unwrap();
    let config = write_config(&temp);

    yp(&config)
        .args(["rules", "set", "userPromptRules", "custom text from cli"])
        .assert()
        .success();

    yp(&config)
        .args(["rules", "get", "userPromptRules"])
        .assert()
        .success()
        .stdout(predicate::str::contains("custom text from cli"));

    // snake_case spelling addresses the same field
    yp(&config)
        .args(["rules", "get", "user_prompt_rules"])
        .assert()
        .success()
        .stdout(predicate::str::contains("custom text from cli"));
}

#[test]
fn test_rules_reset_restores_default() {
    let temp = TempDir::new().unwrap();
    let config = write_config(&temp);

    yp(&config)
        .args(["rules", "set", "requirementReportRules", "edited"])
        .assert()
        .success();
    yp(&config)
        .args(["rules", "reset", "requirementReportRules"])
        .assert()
        .success();

    yp(&config)
        .args(["rules", "get", "requirementReportRules"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            PromptField::RequirementReportRules.default_text().trim(),
        ));
}

#[test]
fn test_malformed_snapshot_does_not_crash() {
    let temp = TempDir::new().unwrap();
    let config = write_config(&temp);
    let storage_dir = temp.path().join("storage");
    fs::create_dir_all(&storage_dir).unwrap();
    fs::write(storage_dir.join("yprompt_config"), "{broken json").unwrap();

    yp(&config)
        .args(["rules", "get", "systemPromptRules"])
        .assert()
        .success()
        .stdout(predicate::str::contains("expert prompt engineer"));
}

#[test]
fn test_unknown_field_is_rejected() {
    let temp = TempDir::new().unwrap();
    let config = write_config(&temp);

    yp(&config)
        .args(["rules", "get", "noSuchField"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown prompt field"));
}

#[test]
fn test_sync_with_nothing_dirty_is_offline_noop() {
    let temp = TempDir::new().unwrap();
    let config = write_config(&temp);

    // Nothing has been edited, so sync succeeds without touching the
    // (unreachable) network.
    yp(&config)
        .args(["rules", "sync"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to sync"));
}

#[test]
fn test_dirty_fields_survive_across_invocations() {
    let temp = TempDir::new().unwrap();
    let config = write_config(&temp);

    yp(&config)
        .args(["rules", "set", "userPromptRules", "pending edit"])
        .assert()
        .success();

    // A fresh process still sees the pending field
    yp(&config)
        .args(["rules", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("userPromptRules").and(predicate::str::contains("(dirty)")));

    // Sync now has work to do: it gets past the dirty-set check and fails
    // on the missing session token instead of reporting nothing to sync
    yp(&config)
        .args(["rules", "sync"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));

    // The failed sync kept the marker
    yp(&config)
        .args(["rules", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(dirty)"));
}

#[test]
fn test_pull_requires_login() {
    let temp = TempDir::new().unwrap();
    let config = write_config(&temp);

    yp(&config)
        .args(["rules", "pull"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not logged in"));
}

#[test]
fn test_whoami_when_logged_out() {
    let temp = TempDir::new().unwrap();
    let config = write_config(&temp);

    yp(&config)
        .arg("whoami")
        .assert()
        .failure()
        .stdout(predicate::str::contains("not logged in"));
}
