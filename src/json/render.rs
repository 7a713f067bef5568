//! Purpose: Render a record as the single JSON line the orchestrator reads.
//! Exports: `record_line`.
//! Role: Small, pure formatter used by `Record::to_line` and the CLI emitter.
//! Invariants: Output is one line: `", "` between items, `": "` after keys.
//! Invariants: Non-ASCII text is escaped as `\uXXXX`, so output bytes are ASCII.
//! Invariants: ANSI escapes appear only when explicitly enabled.
use std::fmt::Write as _;

use serde_json::{Map, Value};

const COLOR_KEY: &str = "36";
const COLOR_STRING: &str = "32";
const COLOR_NUMBER: &str = "33";
const COLOR_BOOL: &str = "35";
const COLOR_NULL: &str = "39";

pub fn record_line(map: &Map<String, Value>, use_color: bool) -> String {
    let mut out = String::new();
    write_object(map, use_color, &mut out);
    out
}

fn write_value(value: &Value, use_color: bool, out: &mut String) {
    match value {
        Value::Null => push_colored("null", COLOR_NULL, use_color, out),
        Value::Bool(val) => {
            let text = if *val { "true" } else { "false" };
            push_colored(text, COLOR_BOOL, use_color, out);
        }
        Value::Number(num) => push_colored(&num.to_string(), COLOR_NUMBER, use_color, out),
        Value::String(text) => push_colored(&encode_string(text), COLOR_STRING, use_color, out),
        Value::Array(items) => write_array(items, use_color, out),
        Value::Object(map) => write_object(map, use_color, out),
    }
}

fn write_array(items: &[Value], use_color: bool, out: &mut String) {
    out.push('[');
    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            out.push_str(", ");
        }
        write_value(item, use_color, out);
    }
    out.push(']');
}

fn write_object(map: &Map<String, Value>, use_color: bool, out: &mut String) {
    out.push('{');
    for (idx, (key, value)) in map.iter().enumerate() {
        if idx > 0 {
            out.push_str(", ");
        }
        push_colored(&encode_string(key), COLOR_KEY, use_color, out);
        out.push_str(": ");
        write_value(value, use_color, out);
    }
    out.push('}');
}

// serde_json handles quotes, backslashes and control characters; everything
// outside ASCII is then rewritten as UTF-16 escapes.
fn encode_string(text: &str) -> String {
    let encoded = serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string());
    if encoded.is_ascii() {
        return encoded;
    }
    let mut out = String::with_capacity(encoded.len() + 8);
    let mut units = [0u16; 2];
    for ch in encoded.chars() {
        if ch.is_ascii() {
            out.push(ch);
            continue;
        }
        for unit in ch.encode_utf16(&mut units).iter() {
            let _ = write!(out, "\\u{unit:04x}");
        }
    }
    out
}

fn push_colored(text: &str, color: &str, use_color: bool, out: &mut String) {
    if !use_color {
        out.push_str(text);
        return;
    }
    out.push_str("\u{1b}[");
    out.push_str(color);
    out.push('m');
    out.push_str(text);
    out.push_str("\u{1b}[0m");
}
