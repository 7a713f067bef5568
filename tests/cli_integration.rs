// CLI integration tests: one record line per invocation, exit codes per failure kind.
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::{Value, json};

fn cmd() -> Command {
    let exe = env!("CARGO_BIN_EXE_re");
    let mut command = Command::new(exe);
    command.env_remove("RUST_LOG");
    command
}

fn run_in(dir: &Path, args: &[&str]) -> Output {
    cmd()
        .current_dir(dir)
        .args(args)
        .output()
        .expect("run re")
}

fn stdout_line(output: &Output) -> String {
    let text = String::from_utf8(output.stdout.clone()).expect("utf8");
    let mut lines = text.lines();
    let line = lines.next().expect("record line").to_string();
    assert!(lines.next().is_none(), "expected a single line, got {text:?}");
    line
}

fn parse_json(value: &str) -> Value {
    serde_json::from_str(value).expect("valid json")
}

#[test]
fn save_prints_exact_record_lines() {
    let temp = tempfile::tempdir().expect("tempdir");

    let cases = [
        (["save", "foo", "0"], r#"{"foo": 0}"#),
        (["save", "bar", "baz"], r#"{"bar": "baz"}"#),
        (["save", "number", "\"0\""], r#"{"number": "0"}"#),
        (["save", "etc", "{\"file\": \"foo.py\"}"], r#"{"etc": {"file": "foo.py"}}"#),
    ];
    for (args, expected) in cases {
        let output = run_in(temp.path(), &args);
        assert!(output.status.success(), "{args:?}");
        assert_eq!(stdout_line(&output), expected);
    }
}

#[test]
fn save_file_checks_relative_paths() {
    let temp = tempfile::tempdir().expect("tempdir");
    fs::write(temp.path().join("foo.py"), b"print()").expect("write");
    fs::write(temp.path().join("ref1.txt"), b"1").expect("write");
    fs::write(temp.path().join("ref2.txt"), b"2").expect("write");

    let output = run_in(temp.path(), &["save-file", "etc", "foo.py"]);
    assert!(output.status.success());
    assert_eq!(stdout_line(&output), r#"{"etc": {"file": "foo.py"}}"#);

    let output = run_in(
        temp.path(),
        &["save-file", "etc", "foo.py", "ref1.txt", "ref2.txt"],
    );
    assert_eq!(
        parse_json(&stdout_line(&output)),
        json!({"etc": {"file": "foo.py", "refs": ["ref1.txt", "ref2.txt"]}})
    );

    let output = run_in(temp.path(), &["save-file", "etc", "missing.py"]);
    assert!(output.status.success());
    assert_eq!(
        stdout_line(&output),
        r#"{"proc.error": "Output 'etc' set to a missing file: 'missing.py'."}"#
    );
}

#[test]
fn dir_flag_sets_check_root() {
    let temp = tempfile::tempdir().expect("tempdir");
    let work = temp.path().join("work");
    fs::create_dir(&work).expect("mkdir");
    fs::write(work.join("a.txt"), b"a").expect("write");
    fs::write(work.join("a.idx"), b"i").expect("write");

    let output = cmd()
        .current_dir(temp.path())
        .args(["--dir", work.to_str().unwrap(), "save-file-list", "out", "a.txt:a.idx"])
        .output()
        .expect("run re");
    assert!(output.status.success());
    assert_eq!(
        stdout_line(&output),
        r#"{"out": [{"file": "a.txt", "refs": ["a.idx"]}]}"#
    );
}

#[test]
fn progress_and_checkrc_lines() {
    let temp = tempfile::tempdir().expect("tempdir");

    let output = run_in(temp.path(), &["progress", "0.1"]);
    assert_eq!(stdout_line(&output), r#"{"proc.progress": 0.1}"#);

    let output = run_in(temp.path(), &["progress", "1"]);
    assert_eq!(stdout_line(&output), r#"{"proc.progress": 1}"#);

    let output = run_in(temp.path(), &["progress", "-1"]);
    assert!(output.status.success());
    assert_eq!(
        stdout_line(&output),
        r#"{"proc.warning": "Progress must be float between 0 and 1."}"#
    );

    let output = run_in(temp.path(), &["progress", "one"]);
    assert_eq!(
        stdout_line(&output),
        r#"{"proc.warning": "Progress must be float."}"#
    );

    let output = run_in(temp.path(), &["checkrc", "1", "2", "Error"]);
    assert_eq!(
        stdout_line(&output),
        r#"{"proc.rc": 1, "proc.error": "Error"}"#
    );

    let output = run_in(temp.path(), &["checkrc", "2", "2"]);
    assert_eq!(stdout_line(&output), r#"{"proc.rc": 0}"#);
}

#[test]
fn severity_commands() {
    let temp = tempfile::tempdir().expect("tempdir");
    let cases = [
        ("info", "proc.info"),
        ("warning", "proc.warning"),
        ("error", "proc.error"),
    ];
    for (command, key) in cases {
        let output = run_in(temp.path(), &[command, "multi\nline text"]);
        assert!(output.status.success());
        assert_eq!(
            parse_json(&stdout_line(&output)),
            json!({ key: "multi line text" })
        );
    }
}

#[test]
fn usage_exit_code_for_wrong_arity() {
    let temp = tempfile::tempdir().expect("tempdir");
    let cases: [&[&str]; 4] = [
        &["save", "proc.rc"],
        &["save", "etc", "{file:", "foo.py}"],
        &["info", "First", "Second"],
        &["save-file", "etc"],
    ];
    for args in cases {
        let output = run_in(temp.path(), args);
        assert_eq!(output.status.code(), Some(2), "{args:?}");
        assert!(output.stdout.is_empty(), "{args:?}");

        let stderr = String::from_utf8_lossy(&output.stderr);
        let err = parse_json(stderr.lines().next().expect("error line"));
        assert_eq!(err["error"]["kind"], "Usage");
    }
}

#[test]
fn missing_dir_flag_is_io_error() {
    let temp = tempfile::tempdir().expect("tempdir");
    let missing = temp.path().join("nope");
    let output = cmd()
        .args(["--dir", missing.to_str().unwrap(), "save", "k", "v"])
        .output()
        .expect("run re");
    assert_eq!(output.status.code(), Some(8));
    assert!(output.stdout.is_empty());
}

#[cfg(unix)]
#[test]
fn legacy_entry_point_name() {
    let temp = tempfile::tempdir().expect("tempdir");
    let link = temp.path().join("re-save-list");
    std::os::unix::fs::symlink(env!("CARGO_BIN_EXE_re"), &link).expect("symlink");

    let output = Command::new(&link)
        .args(["samples", "1", "two"])
        .output()
        .expect("run re-save-list");
    assert!(output.status.success());
    assert_eq!(stdout_line(&output), r#"{"samples": [1, "two"]}"#);
}
