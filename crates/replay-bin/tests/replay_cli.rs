use pretty_assertions::assert_eq;
use std::path::Path;
use std::process::{Command, Output};

fn run(dir: &Path, file: &str, args: &[&str]) -> Output {
    let path = dir.join("input.txt");
    std::fs::write(&path, file).unwrap();
    Command::new(env!("CARGO_BIN_EXE_edit-replay"))
        .arg(&path)
        .arg("--log-dir")
        .arg(dir)
        .arg("--config")
        .arg(dir.join("absent.toml"))
        .args(args)
        .output()
        .expect("spawn edit-replay")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn typing_and_navigation_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(dir.path(), "first\nsecond\n", &["--keys", r#"Down End " line" S-Home"#]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("status: input.txt L: 2    C: 1    * INS"), "{out}");
    assert!(out.contains("cursor: 1:0"));
    assert!(out.contains("selection: Shift 1:0-1:11"));
    let text = out.split("---\n").nth(1).unwrap();
    assert_eq!(text, "first\nsecond line\n\n");
    assert!(dir.path().join("edit-replay.log").exists());
}

#[test]
fn viewport_follows_in_a_small_window() {
    let dir = tempfile::tempdir().unwrap();
    let body: Vec<String> = (0..40).map(|i| format!("{i}")).collect();
    let output = run(
        dir.path(),
        &body.join("\n"),
        &["--keys", "C-End", "--height", "10", "--width", "20"],
    );
    let out = stdout(&output);
    assert!(out.contains("view: top 30:0 left 0 size 20x10 wrap None"), "{out}");
}

#[test]
fn wrap_flag_and_notifications() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(dir.path(), "abc", &["--keys", "C-z M-x C-g", "--wrap"]);
    let out = stdout(&output);
    assert!(out.contains("wrap Soft"));
    assert!(out.contains("notifications: [NothingToUndo, GotoLine]"));
    assert!(out.contains("unbound keys: 1"));
}

#[test]
fn bad_script_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(dir.path(), "abc", &["--keys", "Right Hyper"]);
    assert!(!output.status.success());
    let err = String::from_utf8(output.stderr).unwrap();
    assert!(err.contains("Hyper"));
}
