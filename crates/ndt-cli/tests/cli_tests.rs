// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs, clippy::unwrap_used, clippy::expect_used)]
//! End-to-end runs of the `ndtest` binary.

use std::io::Write;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{NamedTempFile, TempDir};

const OLD: &str = "id\tx\tl\ta\tw\n1\t270\t100\t200\t320\n";
const NEW: &str = "id\tx\tl\ta\tw\n1\t320\t100\t20\t40\n5\t0\t10\t0\t10\n";

fn tsv(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write fixture");
    file
}

fn ndtest(old: &Path, new: &Path) -> Command {
    let mut cmd = Command::cargo_bin("ndtest").expect("binary built");
    cmd.env_remove("NDTEST_CONFIG")
        .env_remove("RUST_LOG")
        .arg("--old")
        .arg(old)
        .arg("--new")
        .arg(new);
    cmd
}

#[test]
fn text_report_lists_every_new_box() {
    let (old, new) = (tsv(OLD), tsv(NEW));
    ndtest(old.path(), new.path())
        .args(["--color", "never"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "New box <PipeRegion [id=5,x=0,l=10,a=0,w=10]> doesn't overlap old boxes!",
        ))
        .stdout(predicate::str::contains(
            "New box <PipeRegion [id=1,x=320,l=100,a=20,w=40]> overlaps 1 old box:",
        ))
        .stdout(predicate::str::contains(
            "    ----> percent overlap: new = 50.00 % - old = 6.25 %",
        ))
        .stdout(predicate::str::contains("\x1b[").not());
}

#[test]
fn reverse_organizes_by_old_boxes() {
    let (old, new) = (tsv(OLD), tsv(NEW));
    ndtest(old.path(), new.path())
        .args(["--reverse", "--color", "never", "--precision", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Old box <PipeRegion [id=1,x=270,l=100,a=200,w=320]> overlaps 1 new box:",
        ))
        .stdout(predicate::str::contains("new = 50.0 % - old = "))
        .stdout(predicate::str::contains("New box").not());
}

#[test]
fn missing_input_file_is_reported() {
    let old = tsv(OLD);
    ndtest(old.path(), Path::new("/definitely/not/here.tsv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("--new arguments must be a valid file path"));
}

#[test]
fn malformed_rows_name_the_row() {
    let old = tsv(OLD);
    let new = tsv("id\tx\tl\ta\tw\n1\t0\t1\t0\t1\n2\tfar\t1\t0\t1\n");
    ndtest(old.path(), new.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid data at row 2: columns must be numbers"));
}

#[test]
fn wrong_header_is_rejected() {
    let old = tsv("id,x,l,a,w\n1,0,1,0,1\n");
    let new = tsv(NEW);
    ndtest(old.path(), new.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid header"));
}

#[test]
fn json_report_is_machine_readable() {
    let (old, new) = (tsv(OLD), tsv(NEW));
    let output = ndtest(old.path(), new.path())
        .args(["--format", "json"])
        .output()
        .expect("run ndtest");
    assert!(output.status.success());
    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(doc["perspective"], "new");
    let sections = doc["sections"].as_array().expect("sections array");
    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0]["reference"]["id"], 5);
    assert!(sections[0]["matches"].as_array().expect("matches").is_empty());
    assert_eq!(sections[1]["matches"][0]["record"]["percent_old"], 6.25);
}

#[test]
fn config_file_supplies_defaults_that_flags_override() {
    let (old, new) = (tsv(OLD), tsv(NEW));
    let dir = TempDir::new().expect("temp dir");
    let config = dir.path().join("ndtest.json");
    std::fs::write(&config, r#"{"color": "never", "precision": 3}"#).expect("write config");

    ndtest(old.path(), new.path())
        .env("NDTEST_CONFIG", &config)
        .assert()
        .success()
        .stdout(predicate::str::contains("new = 50.000 % - old = 6.250 %"));

    ndtest(old.path(), new.path())
        .arg("--config")
        .arg(&config)
        .args(["--precision", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("new = 50 % - old = 6 %"));
}

#[test]
fn invalid_config_file_fails() {
    let (old, new) = (tsv(OLD), tsv(NEW));
    let config = tsv(r#"{"colour": "never"}"#);
    ndtest(old.path(), new.path())
        .arg("--config")
        .arg(config.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config"));
}
