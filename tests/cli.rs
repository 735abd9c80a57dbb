//! Drives the `hw-index` binary in a temp working directory.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const PAGE: &str = "<html><head><title>t</title></head><body><p>t</p></body></html>";

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hw-index"))
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap()
}

fn homework_dir(files: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::create_dir(tmp.path().join("hw")).unwrap();
    for name in files {
        fs::write(tmp.path().join("hw").join(name), PAGE).unwrap();
    }
    tmp
}

#[test]
fn build_succeeds_and_writes_index() {
    let tmp = homework_dir(&["hw2_question1.html", "hw1_question1.html"]);
    let out = run(tmp.path(), &["build"]);

    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let index = fs::read_to_string(tmp.path().join("index.html")).unwrap();
    let a = index.find("hw/hw1_question1.html").unwrap();
    let b = index.find("hw/hw2_question1.html").unwrap();
    assert!(a < b);
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Injected 2, already injected 0, failed 0"));
}

#[test]
fn missing_source_exits_non_zero_without_index() {
    let tmp = TempDir::new().unwrap();
    let out = run(tmp.path(), &["build"]);

    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("cannot list source directory"));
    assert!(!tmp.path().join("index.html").exists());
}

#[test]
fn broken_page_keeps_exit_code_zero() {
    let tmp = homework_dir(&["hw1.html"]);
    fs::write(tmp.path().join("hw/hw2.html"), "no anchors").unwrap();

    let out = run(tmp.path(), &["build"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("failed 1"));
}

#[test]
fn check_reports_broken_page_and_fails() {
    let tmp = homework_dir(&["hw1.html"]);
    fs::write(tmp.path().join("hw/hw2.html"), "no anchors").unwrap();

    let out = run(tmp.path(), &["check"]);
    assert!(!out.status.success());
    // Nothing written
    assert_eq!(fs::read_to_string(tmp.path().join("hw/hw1.html")).unwrap(), PAGE);
    assert!(!tmp.path().join("index.html").exists());
}

#[test]
fn scan_json_lists_sorted_entries() {
    let tmp = homework_dir(&["hw1_question2.html", "hw1_question1.html"]);
    let out = run(tmp.path(), &["scan", "--json"]);

    assert!(out.status.success());
    let entries: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(entries[0]["label"], "Homework 1 - Question 1");
    assert_eq!(entries[1]["href"], "hw/hw1_question2.html");
}

#[test]
fn config_file_and_flags_are_applied() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir(tmp.path().join("pages")).unwrap();
    fs::write(tmp.path().join("pages/hw1.html"), PAGE).unwrap();
    fs::write(
        tmp.path().join("hw-index.toml"),
        "title = \"Finance Homework\"\nmirror_source = true\n",
    )
    .unwrap();

    let out = run(tmp.path(), &["--source", "pages", "--output", "dist", "build"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let index = fs::read_to_string(tmp.path().join("dist/index.html")).unwrap();
    assert!(index.contains("<title>Finance Homework</title>"));
    assert!(tmp.path().join("dist/hw/hw1.html").is_file());
}

#[test]
fn mirror_inside_source_is_rejected() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("hw1.html"), PAGE).unwrap();
    fs::write(
        tmp.path().join("hw-index.toml"),
        "source_dir = \".\"\nmirror_source = true\n",
    )
    .unwrap();

    let out = run(tmp.path(), &["--output", "dist", "build"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("outside the source folder"));
    assert!(!tmp.path().join("dist").exists());
    assert_eq!(fs::read_to_string(tmp.path().join("hw1.html")).unwrap(), PAGE);
}

#[test]
fn invalid_config_is_fatal() {
    let tmp = homework_dir(&["hw1.html"]);
    fs::write(tmp.path().join("hw-index.toml"), "unknown_key = 1\n").unwrap();

    let out = run(tmp.path(), &["build"]);
    assert!(!out.status.success());
    assert!(!tmp.path().join("index.html").exists());
}

#[test]
fn gen_config_prints_stock_toml() {
    let tmp = TempDir::new().unwrap();
    let out = run(tmp.path(), &["gen-config"]);
    assert!(out.status.success());
    let text = String::from_utf8_lossy(&out.stdout);
    assert!(text.contains("source_dir = \"hw\""));
    assert!(text.contains("[colors.dark]"));
}
