// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
#![allow(clippy::expect_used, clippy::unwrap_used)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn tumble(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tumble").expect("binary");
    cmd.env_remove("RUST_LOG")
        .arg("--config-dir")
        .arg(dir.path());
    cmd
}

fn hash_of(dir: &TempDir, args: &[&str]) -> String {
    let out = tumble(dir).arg("hash").args(args).output().expect("run");
    assert!(out.status.success());
    String::from_utf8(out.stdout).expect("utf8").trim().to_owned()
}

#[test]
fn run_prints_table_and_hash() {
    let dir = tempfile::tempdir().expect("tempdir");
    tumble(&dir)
        .args(["run", "--frames", "30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Position"))
        .stdout(predicate::str::contains("frames: 30"))
        .stdout(predicate::str::is_match("hash: [0-9a-f]{64}").expect("regex"));
}

#[test]
fn run_json_lists_scattered_cubes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = tumble(&dir)
        .args(["run", "--frames", "5", "--scene", "scattered", "--cubes", "3"])
        .args(["--format", "json"])
        .output()
        .expect("run");
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).expect("json");
    assert_eq!(value["frames"], 5);
    assert_eq!(value["bodies"].as_array().map(Vec::len), Some(3));
}

#[test]
fn hash_is_reproducible_and_seed_sensitive() {
    let dir = tempfile::tempdir().expect("tempdir");
    let args = ["--scene", "scattered", "--seed", "3", "--frames", "20"];
    let a = hash_of(&dir, &args);
    let b = hash_of(&dir, &args);
    assert_eq!(a, b);
    assert_eq!(a.len(), 64);
    let c = hash_of(&dir, &["--scene", "scattered", "--seed", "4", "--frames", "20"]);
    assert_ne!(a, c);
}

#[test]
fn zero_substeps_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    tumble(&dir)
        .args(["run", "--substeps", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("sub_step_count"));
}

#[test]
fn config_init_then_show() {
    let dir = tempfile::tempdir().expect("tempdir");
    tumble(&dir)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sim.json"));
    tumble(&dir)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
    tumble(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"sub_step_count\": 10"));
}

#[test]
fn config_file_feeds_run() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("custom.json");
    std::fs::write(&path, r#"{ "frames": 4, "scene": "scattered", "cube_count": 2 }"#)
        .expect("write");
    let out = tumble(&dir)
        .args(["run", "--format", "json", "--config"])
        .arg(&path)
        .output()
        .expect("run");
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).expect("json");
    assert_eq!(value["frames"], 4);
    assert_eq!(value["bodies"].as_array().map(Vec::len), Some(2));
}
