//! Integration tests for the lettergrade CLI
//!
//! These tests run the lettergrade binary against reference files in a temp dir.

mod support;

use predicates::prelude::*;
use std::fs;
use support::{lettergrade, setup_reference, variant_of, write_reference};
use tempfile::tempdir;

// ============================================================================
// Help and version
// ============================================================================

#[test]
fn test_help_flag() {
    lettergrade()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: lettergrade"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("variant"))
        .stdout(predicate::str::contains("init"));
}

#[test]
fn test_no_command_prints_banner() {
    let dir = tempdir().unwrap();
    lettergrade()
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("lettergrade"));
}

#[test]
fn test_unknown_format_exit_code_2() {
    lettergrade()
        .args(["--format", "records", "variant", "--id", "x"])
        .assert()
        .code(2);
}

#[test]
fn test_missing_id_json_usage_error() {
    lettergrade()
        .args(["--format", "json", "check"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("\"type\":\"usage_error\""));
}

// ============================================================================
// check
// ============================================================================

#[test]
fn test_check_accepts_correct_submission() {
    let dir = setup_reference("hw-letters-alice", "A,3\nB,2\n");
    fs::write(dir.path().join("submit.csv"), "A,3\nB,2\n").unwrap();
    let variant = variant_of("hw-letters-alice");

    lettergrade()
        .current_dir(dir.path())
        .args([
            "check",
            "--id",
            "hw-letters-alice",
            "--submission",
            "submit.csv",
            "--reference-dir",
            "refs",
            "--reward-points",
            "10",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("ACCEPTED"))
        .stdout(predicate::str::contains("step score: 10"))
        .stdout(predicate::str::contains(format!("variant {variant}")));
}

#[test]
fn test_check_reads_stdin() {
    let dir = setup_reference("bob", "A,5\n");

    lettergrade()
        .current_dir(dir.path())
        .args(["check", "--id", "bob", "--reference-dir", "refs"])
        .args(["--max-error-budget", "2"])
        .write_stdin("a,7\n")
        .assert()
        .success();
}

#[test]
fn test_check_budget_exceeded_exit_code_1() {
    let dir = setup_reference("bob", "A,5\n");

    lettergrade()
        .current_dir(dir.path())
        .args(["check", "--id", "bob", "--reference-dir", "refs"])
        .args(["--max-error-budget", "1", "--submission", "-"])
        .write_stdin("A,7\n")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("REJECTED"))
        .stdout(predicate::str::contains("exceeds the allowed 1"))
        .stderr(predicate::str::contains("error_budget_exceeded"));
}

#[test]
fn test_check_duplicate_letter() {
    let dir = setup_reference("carol", "A,1\n");

    lettergrade()
        .current_dir(dir.path())
        .args(["check", "--id", "carol", "--reference-dir", "refs"])
        .write_stdin("A,1\nA,1\n")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("duplicate letter `A` (line 2)"));
}

#[test]
fn test_check_incomplete_and_lenient() {
    let dir = setup_reference("dave", "A,1\nB,2\n");

    lettergrade()
        .current_dir(dir.path())
        .args(["check", "--id", "dave", "--reference-dir", "refs"])
        .write_stdin("A,1\n")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("missing letters: B"));

    lettergrade()
        .current_dir(dir.path())
        .args(["check", "--id", "dave", "--reference-dir", "refs", "--lenient"])
        .write_stdin("A,1\n")
        .assert()
        .success();
}

#[test]
fn test_check_missing_reference_exit_code_3() {
    let dir = tempdir().unwrap();

    lettergrade()
        .current_dir(dir.path())
        .args(["check", "--id", "erin", "--reference-dir", "nowhere"])
        .write_stdin("A,1\n")
        .assert()
        .code(3)
        .stdout(predicate::str::contains("reference answers unavailable"));
}

#[test]
fn test_check_json_verdict() {
    let dir = setup_reference("frank", "A,1\n");

    let output = lettergrade()
        .current_dir(dir.path())
        .args(["--format", "json", "check", "--id", "frank"])
        .args(["--reference-dir", "refs"])
        .write_stdin("Z,1\n")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let verdict: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(verdict["accepted"], false);
    assert_eq!(verdict["rejection"]["kind"], "unknown_letter");
    assert_eq!(verdict["rejection"]["letter"], "Z");
    assert_eq!(verdict["variant"], variant_of("frank").get());

    let error: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(error["error"]["type"], "rejected");
}

#[test]
fn test_check_missing_submission_file() {
    let dir = setup_reference("gina", "A,1\n");

    lettergrade()
        .current_dir(dir.path())
        .args(["check", "--id", "gina", "--reference-dir", "refs"])
        .args(["--submission", "absent.csv"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to read submission"));
}

#[test]
fn test_quiet_accept_prints_nothing() {
    let dir = setup_reference("hank", "A,1\n");

    lettergrade()
        .current_dir(dir.path())
        .args(["--quiet", "check", "--id", "hank", "--reference-dir", "refs"])
        .write_stdin("A,1\n")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

// ============================================================================
// config
// ============================================================================

#[test]
fn test_config_file_supplies_defaults() {
    let dir = tempdir().unwrap();
    let refs = dir.path().join("refs");
    fs::create_dir_all(&refs).unwrap();
    write_reference(&refs, "ivan", "A,5\n");
    fs::write(
        dir.path().join("lettergrade.toml"),
        format!(
            "reference_dir = {:?}\nmax_error_budget = 2\nreward_points = 7\n",
            refs.display().to_string()
        ),
    )
    .unwrap();

    lettergrade()
        .current_dir(dir.path())
        .args(["check", "--id", "ivan"])
        .write_stdin("A,7\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("step score: 7"));
}

#[test]
fn test_explicit_config_path_and_bad_config() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "num_variants = [\n").unwrap();

    lettergrade()
        .current_dir(dir.path())
        .arg("--config")
        .arg(&path)
        .args(["variant", "--id", "x"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("invalid config"));
}

#[test]
fn test_init_refuses_overwrite() {
    let dir = tempdir().unwrap();

    lettergrade()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote lettergrade.toml"));

    lettergrade()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("already exists"));

    lettergrade()
        .current_dir(dir.path())
        .args(["init", "--force"])
        .assert()
        .success();
}

// ============================================================================
// variant
// ============================================================================

#[test]
fn test_variant_is_stable() {
    let dir = tempdir().unwrap();
    let expected = variant_of("hw-letters-alice").to_string();

    for _ in 0..2 {
        lettergrade()
            .current_dir(dir.path())
            .args(["variant", "--id", "hw-letters-alice"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with(format!("{expected}\n")));
    }
}

#[test]
fn test_variant_json_includes_image_url() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("lettergrade.toml"),
        "image_url_template = \"https://cdn.example.org/letters_{variant}.png\"\n",
    )
    .unwrap();
    let variant = variant_of("hw-letters-bob");

    let output = lettergrade()
        .current_dir(dir.path())
        .args(["--format", "json", "variant", "--repo-name", "hw-letters-bob"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["variant"], variant.get());
    assert_eq!(
        json["image_url"],
        format!("https://cdn.example.org/letters_{variant}.png")
    );
    assert!(json["reference"]
        .as_str()
        .unwrap()
        .ends_with(&format!("letters_{variant}.csv")));
}

// ============================================================================
// logging
// ============================================================================

#[test]
fn test_log_level_debug_shows_debug_messages() {
    let dir = tempdir().unwrap();

    lettergrade()
        .current_dir(dir.path())
        .args(["--log-level", "debug", "variant", "--id", "x"])
        .assert()
        .success()
        .stderr(predicate::str::contains("parse_args"));
}

#[test]
fn test_default_log_level_hides_debug_messages() {
    let dir = tempdir().unwrap();

    lettergrade()
        .current_dir(dir.path())
        .args(["variant", "--id", "x"])
        .assert()
        .success()
        .stderr(predicate::str::contains("parse_args").not());
}
