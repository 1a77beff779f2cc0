//! CLI integration tests.
//!
//! Spawns the `logsim` binary on the files under `demos/` and on scratch
//! files, checking exit codes and the text written to stdout and stderr.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn demo(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("demos").join(name)
}

fn logsim() -> Command {
    let mut cmd = cargo_bin_cmd!("logsim");
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_exits_0() {
    logsim()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("DEFINITION_FILE"));
}

#[test]
fn valid_file_prints_summary() {
    logsim()
        .arg(demo("sr_latch.txt"))
        .assert()
        .success()
        .stdout("4 devices, 4 connections, 2 monitors\n  G1\n  G2\n");
}

#[test]
fn errors_exit_1_with_every_diagnostic() {
    logsim()
        .arg(demo("counter_errors.txt"))
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "ERROR (line 4, column 12): Qualifier is invalid for device type",
        ))
        .stdout(predicate::str::contains(
            "ERROR (line 6, column 5): Expected a semicolon here\n    XOR, 2 = X;\n    ^\n",
        ))
        .stdout(predicate::str::contains(
            "ERROR (line 11, column 13): Expected a dash here",
        ))
        .stdout(predicate::str::contains(
            "ERROR (line 15, column 10): Extra semicolons added",
        ))
        .stdout(predicate::str::ends_with("Parse failed with 4 error(s)\n"));
}

#[test]
fn no_locations_prints_one_line_per_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("circuit.txt");
    fs::write(&path, "DEVICES SWITCH, 1 = S END\nMAIN_END\n").unwrap();

    logsim()
        .arg("--no-locations")
        .arg(&path)
        .assert()
        .code(1)
        .stdout(
            "ERROR (line 1, column 23): Expected a semicolon here\n\
             ERROR (line 2, column 1): Expected a 'CONNECTIONS' statement here\n\
             ERROR (line 2, column 1): Expected a 'MONITOR' statement here\n\
             Parse failed with 3 error(s)\n",
        );
}

#[test]
fn missing_file_exits_2() {
    let dir = TempDir::new().unwrap();
    logsim()
        .arg(dir.path().join("absent.txt"))
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Failed to read definition file"));
}

#[test]
fn verbose_logs_to_stderr() {
    logsim()
        .arg("--verbose")
        .arg(demo("sr_latch.txt"))
        .assert()
        .success()
        .stderr(predicate::str::contains("parse finished"));
}
