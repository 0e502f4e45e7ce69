//! Integration tests for `toolbelt read` and `toolbelt append`.

use std::process::Command;
use tempfile::tempdir;

fn cargo_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO"));
    cmd.args(["run", "-q", "-p", "toolbelt-cli", "--bin", "toolbelt", "--"]);
    cmd
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("stdout should be valid JSON")
}

#[test]
fn test_read_prints_content() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("input.txt");
    std::fs::write(&path, "line one\nline two\n").unwrap();

    let output = cargo_bin()
        .args(["--json", "--chunk-size", "4", "read"])
        .arg(&path)
        .output()
        .expect("Failed to run read command");

    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["text"], "line one\nline two\n");
    assert_eq!(json["bytes"], 18);
    assert_eq!(json["chunk_size"], 4);
    // 18 bytes in 4-byte chunks
    assert_eq!(json["progress_reports"], 5);
}

#[test]
fn test_read_hash() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("hello.txt");
    std::fs::write(&path, "hello world").unwrap();

    let output = cargo_bin()
        .args(["--json", "read", "--hash"])
        .arg(&path)
        .output()
        .expect("Failed to run read command");

    let json = stdout_json(&output);
    assert_eq!(
        json["blake3"],
        "d74981efa70a0c880b8d8c1985d075dbcbf679b99a5f9914e5aaf96b831a9e24"
    );
}

#[test]
fn test_read_empty_file_reports_once() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.txt");
    std::fs::write(&path, "").unwrap();

    let output = cargo_bin()
        .args(["--json", "read"])
        .arg(&path)
        .output()
        .expect("Failed to run read command");

    let json = stdout_json(&output);
    assert_eq!(json["text"], "");
    assert_eq!(json["progress_reports"], 1);
}

#[test]
fn test_read_missing_file_fails() {
    let dir = tempdir().unwrap();

    let output = cargo_bin()
        .args(["--json", "read"])
        .arg(dir.path().join("absent.txt"))
        .output()
        .expect("Failed to run read command");

    assert!(!output.status.success());
    assert_eq!(stdout_json(&output)["ok"], false);
}

#[test]
fn test_read_out_transcodes() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("latin1.txt");
    let dst = dir.path().join("copy.txt");
    std::fs::write(&src, [b'c', 0xE9]).unwrap();

    let output = cargo_bin()
        .args(["--json", "--encoding", "latin1", "read", "--out"])
        .arg(&dst)
        .arg(&src)
        .output()
        .expect("Failed to run read command");

    assert!(output.status.success());
    assert_eq!(std::fs::read(&dst).unwrap(), vec![b'c', 0xE9]);
}

#[test]
fn test_append_text_and_file() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("log.txt");
    let extra = dir.path().join("extra.txt");
    std::fs::write(&extra, "tail").unwrap();

    let output = cargo_bin()
        .args(["--json", "append", "--text", "head "])
        .arg(&target)
        .output()
        .expect("Failed to run append command");
    assert_eq!(stdout_json(&output)["bytes_appended"], 5);

    let output = cargo_bin()
        .args(["--json", "append", "--from"])
        .arg(&extra)
        .arg(&target)
        .output()
        .expect("Failed to run append command");
    assert_eq!(stdout_json(&output)["bytes_appended"], 4);

    assert_eq!(std::fs::read_to_string(&target).unwrap(), "head tail");
}

#[test]
fn test_append_file_to_itself_fails() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("self.txt");
    std::fs::write(&target, "abc").unwrap();

    let output = cargo_bin()
        .args(["--json", "append", "--from"])
        .arg(&target)
        .arg(&target)
        .output()
        .expect("Failed to run append command");

    assert!(!output.status.success());
    assert_eq!(stdout_json(&output)["ok"], false);
    assert_eq!(std::fs::read_to_string(&target).unwrap(), "abc");
}
