mod common;

use common::TestEnv;
use predicates::prelude::*;
use predicates::str::contains;
use std::fs;

#[test]
fn mixed_landing_scenario() {
    let env = TestEnv::new();
    env.land("a.csv", b"0123456789");
    env.land("b.csv", b"");
    fs::create_dir(env.dir("landing").join("ignored")).unwrap();

    env.cmd()
        .assert()
        .success()
        .stdout(contains("Starting Bronze Ingestor Pipeline..."))
        .stdout(contains("Processed: a.csv (10 B) -> Bronze"))
        .stdout(contains("Rejected: b.csv -> Bad Data"))
        .stdout(contains("Files processed (Bronze): 1"))
        .stdout(contains("Files rejected (Bad Data): 1"))
        .stdout(contains("Errors: 0"))
        .stdout(contains("Total files in landing: 2"))
        .stdout(contains("✓ Landing directory is empty"))
        .stdout(contains("Process completed!"));

    assert_eq!(env.names("bronze"), vec!["a.csv"]);
    assert_eq!(env.names("bad_data"), vec!["b.csv"]);
    assert_eq!(env.names("landing"), vec!["ignored"]);
    assert_eq!(fs::read(env.dir("bronze").join("a.csv")).unwrap(), b"0123456789");
}

#[test]
fn summary_lines_come_after_per_file_lines() {
    let env = TestEnv::new();
    env.land("a.csv", b"x");

    let out = env.cmd().assert().success().get_output().stdout.clone();
    let stdout = String::from_utf8(out).unwrap();

    let processed = stdout.find("Processed: a.csv").unwrap();
    let summary = stdout.find("PROCESSING SUMMARY:").unwrap();
    let empty = stdout.find("Landing directory is empty").unwrap();
    assert!(processed < summary && summary < empty);
}

#[test]
fn missing_directory_aborts_with_error_code() {
    let env = TestEnv::new();
    env.land("a.csv", b"data");
    fs::remove_dir(env.dir("bad_data")).unwrap();

    env.cmd()
        .assert()
        .code(1)
        .stdout(contains("Error: directory 'bad_data' does not exist"))
        .stdout(contains("PROCESSING SUMMARY").not())
        .stdout(contains("Process completed!").not());

    assert_eq!(env.names("landing"), vec!["a.csv"]);
    assert!(env.names("bronze").is_empty());
}

#[test]
fn empty_landing_twice_is_a_no_op() {
    let env = TestEnv::new();
    env.land("a.csv", b"data");

    env.cmd().assert().success();
    env.cmd()
        .assert()
        .success()
        .stdout(contains("Files processed (Bronze): 0"))
        .stdout(contains("Files rejected (Bad Data): 0"))
        .stdout(contains("Errors: 0"))
        .stdout(contains("Total files in landing: 0"))
        .stdout(contains("✓ Landing directory is empty"));

    assert_eq!(env.names("bronze"), vec!["a.csv"]);
}

#[test]
fn collision_is_counted_and_exits_with_warning_code() {
    let env = TestEnv::new();
    fs::write(env.dir("bronze").join("dup.csv"), b"first").unwrap();
    env.land("dup.csv", b"second");
    env.land("ok.csv", b"fine");

    env.cmd()
        .assert()
        .code(2)
        .stdout(contains("Error processing dup.csv: destination already exists"))
        .stdout(contains("Processed: ok.csv"))
        .stdout(contains("Errors: 1"))
        .stdout(contains("⚠ 1 file(s) still in landing"));

    assert_eq!(env.names("landing"), vec!["dup.csv"]);
    assert_eq!(fs::read(env.dir("bronze").join("dup.csv")).unwrap(), b"first");
}

#[test]
fn log_environment_cannot_silence_the_report() {
    let env = TestEnv::new();
    env.land("a.csv", b"data");

    env.cmd()
        .env("RUST_LOG", "off")
        .assert()
        .success()
        .stdout(contains("Processed: a.csv (4 B) -> Bronze"))
        .stdout(contains("PROCESSING SUMMARY:"))
        .stdout(contains("Total files in landing: 1"))
        .stdout(contains("✓ Landing directory is empty"));
}
