//! Purpose: Contract coverage for the public record API.
//! Exports: Integration tests only.
//! Role: Every builder yields one parseable line whose only key is the requested key,
//! or the severity key when the request is rejected.
//! Invariants: Tests go through `resolwe_runtime_utils::api` only.

use std::fs;

use resolwe_runtime_utils::api::{
    self, Arg, Command, Outcome, Record, Severity, checkrc, coerce, invoke, progress, save,
    save_file, save_file_list, save_list,
};
use serde_json::{Value, json};

fn single_key(record: &Record) -> String {
    let parsed: Value = serde_json::from_str(&record.to_line()).expect("valid json");
    let object = parsed.as_object().expect("object");
    assert_eq!(object.len(), 1, "record {record}");
    object.keys().next().expect("key").clone()
}

#[test]
fn builders_emit_one_key() {
    let temp = tempfile::tempdir().expect("tempdir");
    let file = temp.path().join("out.txt");
    fs::write(&file, b"x").expect("write");
    let file = file.to_str().expect("utf8").to_string();

    let records = [
        ("a", save("a", "{\"nested\": [1, 2]}")),
        ("b", save_list("b", ["1", "x"])),
        ("c", save_file("c", &file, [&file]).expect("save").into_record()),
        ("d", save_file_list("d", [&file]).expect("save").into_record()),
        ("proc.info", api::info("hello")),
        ("proc.warning", api::warning("careful")),
        ("proc.error", api::error("broken")),
    ];
    for (key, record) in records {
        assert_eq!(single_key(&record), key);
    }
}

#[test]
fn rejections_use_severity_key() {
    let temp = tempfile::tempdir().expect("tempdir");
    let missing = temp.path().join("absent.txt");
    let missing = missing.to_str().expect("utf8");

    let outcome = save_file("out", missing, [missing]).expect("save");
    let Outcome::Rejected(notice) = &outcome else {
        panic!("expected rejection");
    };
    assert_eq!(notice.severity, Severity::Error);
    assert_eq!(single_key(&outcome.into_record()), "proc.error");

    let outcome = progress(Arg::Float(3.0));
    assert_eq!(outcome.notice().map(|notice| notice.severity), Some(Severity::Warning));
}

#[test]
fn coercion_of_literal_equals_parse() {
    let literals = ["{\"file\": \"foo.py\"}", "[1, 2.5, null]", "false", "-7", "\"0\""];
    for literal in literals {
        let parsed: Value = serde_json::from_str(literal).expect("literal");
        assert_eq!(coerce(&Arg::from(literal)), parsed);
    }
}

#[test]
fn checkrc_keeps_rc_before_error() {
    let record = checkrc(1, [Arg::Int(2), Arg::from("Error")]).into_record();
    let keys: Vec<&str> = record.keys().collect();
    assert_eq!(keys, ["proc.rc", "proc.error"]);
    let value = serde_json::to_value(&record).expect("serialize");
    assert_eq!(value, json!({"proc.rc": 1, "proc.error": "Error"}));
}

#[test]
fn dispatcher_matches_direct_calls() {
    let args: Vec<String> = ["2", "2", "Error"].iter().map(|s| s.to_string()).collect();
    let via_invoke = invoke(Command::Checkrc, &args).expect("invoke");
    let direct = checkrc("2", ["2", "Error"]).into_record();
    assert_eq!(via_invoke, direct);
}
