use std::{env, fs};

use assert_cmd::Command;
use predicates::prelude::*;
use tracing::info;

const FACTORIAL: &str =
    concat!(env!("CARGO_MANIFEST_DIR"), "/../engine/tests/fixtures/factorial.json");
const FIB: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../engine/tests/fixtures/fib.json");
const FAILURE: &str =
    concat!(env!("CARGO_MANIFEST_DIR"), "/../engine/tests/fixtures/failure.json");

/// `vdb --plain` isolated from any config in the caller's home directory
fn vdb() -> Command {
    let home = env::temp_dir().join("vdb-cli-tests-home");
    let mut cmd = Command::cargo_bin("vdb").unwrap();
    cmd.env_remove("VDB_CONFIG").env_remove("RUST_LOG").env("HOME", home).arg("--plain");
    cmd
}

#[test]
fn test_help_command() {
    vdb_common::logging::ensure_test_logging(None);
    info!("Testing CLI help command");

    let mut cmd = Command::cargo_bin("vdb").unwrap();
    cmd.arg("--help").assert().success().stdout(predicate::str::contains("Visual Debugger"));
}

#[test]
fn test_version_command() {
    vdb_common::logging::ensure_test_logging(None);
    info!("Running test");
    let mut cmd = Command::cargo_bin("vdb").unwrap();
    cmd.arg("--version").assert().success().stdout(predicate::str::contains("vdb"));
}

#[test]
fn test_missing_subcommand() {
    vdb_common::logging::ensure_test_logging(None);
    info!("Running test");
    let mut cmd = Command::cargo_bin("vdb").unwrap();
    cmd.assert().failure().stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_tree_at_last_step() {
    vdb_common::logging::ensure_test_logging(None);
    info!("Running test");
    vdb()
        .args(["tree", FACTORIAL])
        .assert()
        .success()
        .stdout(predicate::str::contains("step #11 of 12"))
        .stdout(predicate::str::contains("fact(3) → 6"))
        .stdout(predicate::str::contains("└── fact(1) → 1"))
        .stdout(predicate::str::contains("<module>").count(1));
}

#[test]
fn test_tree_step_is_clamped() {
    vdb_common::logging::ensure_test_logging(None);
    info!("Running test");
    vdb()
        .args(["tree", FACTORIAL, "--step", "-5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("step #0 of 12"))
        .stdout(predicate::str::contains("(no calls to show)"));
}

#[test]
fn test_failed_trace_reports_backend_error() {
    vdb_common::logging::ensure_test_logging(None);
    info!("Running test");
    vdb().args(["tree", FAILURE]).assert().failure().stderr(predicate::str::contains("cobol"));
}

#[test]
fn test_missing_trace_file() {
    vdb_common::logging::ensure_test_logging(None);
    info!("Running test");
    vdb()
        .args(["stats", "/nonexistent/trace.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read trace file"));
}

#[test]
fn test_stats_as_json() {
    vdb_common::logging::ensure_test_logging(None);
    info!("Running test");
    let output = vdb().args(["--json", "stats", FACTORIAL]).output().unwrap();
    assert!(output.status.success());

    let stats: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stats["totalSteps"], 12);
    assert_eq!(stats["exceptionCount"], 0);
    assert_eq!(stats["returns"].as_array().unwrap().len(), 3);
}

#[test]
fn test_complexity_of_branching_recursion() {
    vdb_common::logging::ensure_test_logging(None);
    info!("Running test");
    vdb()
        .args(["complexity", FIB])
        .assert()
        .success()
        .stdout(predicate::str::contains("Time: O(2^n) (heuristic)"))
        .stdout(predicate::str::contains("Recursion: yes"));
}

#[test]
fn test_inspect_call() {
    vdb_common::logging::ensure_test_logging(None);
    info!("Running test");
    vdb()
        .args(["inspect", FACTORIAL, "--call", "fact_3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("step #4 of 12 fact"))
        .stdout(predicate::str::contains("Active path: fact_3 ← fact_2 ← <module>_1"));

    vdb().args(["inspect", FACTORIAL, "--call", "nope"]).assert().failure();
}

#[test]
fn test_replay_commands_from_stdin() {
    vdb_common::logging::ensure_test_logging(None);
    info!("Running test");
    vdb()
        .args(["replay", FACTORIAL])
        .write_stdin("next\ngoto 999\nbogus\nmode full\nquit\nnext\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("step #1 of 12"))
        .stdout(predicate::str::contains("step #11 of 12"))
        .stdout(predicate::str::contains("error: unknown command 'bogus'"))
        .stdout(predicate::str::contains("(full)"))
        .stdout(predicate::str::contains("(vdb)").not());
}

#[test]
fn test_replay_rejects_stdin_trace() {
    vdb_common::logging::ensure_test_logging(None);
    info!("Running test");
    vdb().args(["replay", "-"]).write_stdin("").assert().failure();
}

#[test]
fn test_trace_from_stdin() {
    vdb_common::logging::ensure_test_logging(None);
    info!("Running test");
    vdb()
        .args(["tree", "-"])
        .write_stdin(fs::read_to_string(FACTORIAL).unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("fact(3) → 6"));
}

#[test]
fn test_config_file_sets_view_mode() {
    vdb_common::logging::ensure_test_logging(None);
    info!("Running test");
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vdb.toml");
    fs::write(&path, "[session]\nview_mode = \"full\"\n").unwrap();

    vdb()
        .arg("--config")
        .arg(&path)
        .args(["tree", FACTORIAL, "--step", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(full)"))
        .stdout(predicate::str::contains("fact(3) → 6"));
}
