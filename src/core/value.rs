//! Purpose: Resolve loosely-typed process arguments into JSON values.
//! Exports: `Arg`, `coerce`, `as_integer`.
//! Role: The single coercion boundary every record builder goes through.
//! Invariants: `coerce` never fails; unparseable text degrades to a JSON string.
//! Invariants: Only textual arguments have newlines folded into spaces.
use std::fmt;

use serde_json::Value;

/// A raw argument as handed over by a process runner or an embedding caller.
#[derive(Clone, Debug, PartialEq)]
pub enum Arg {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Arg::Text(value.to_string())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Arg::Text(value)
    }
}

impl From<&String> for Arg {
    fn from(value: &String) -> Self {
        Arg::Text(value.clone())
    }
}

impl From<i64> for Arg {
    fn from(value: i64) -> Self {
        Arg::Int(value)
    }
}

impl From<i32> for Arg {
    fn from(value: i32) -> Self {
        Arg::Int(i64::from(value))
    }
}

impl From<f64> for Arg {
    fn from(value: f64) -> Self {
        Arg::Float(value)
    }
}

impl From<bool> for Arg {
    fn from(value: bool) -> Self {
        Arg::Bool(value)
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Text(text) => f.write_str(text),
            Arg::Int(value) => write!(f, "{value}"),
            Arg::Float(value) => write!(f, "{value}"),
            Arg::Bool(value) => write!(f, "{value}"),
        }
    }
}

/// Converts an argument into the JSON value stored in a record.
///
/// Text is parsed as a JSON document after folding `\n` into spaces; if it is not
/// valid JSON the folded text itself becomes a JSON string. Numbers and booleans
/// pass through unchanged. Non-finite floats have no JSON form and become `null`.
pub fn coerce(arg: &Arg) -> Value {
    match arg {
        Arg::Text(text) => {
            let folded = text.replace('\n', " ");
            match serde_json::from_str::<Value>(&folded) {
                Ok(value) => value,
                Err(_) => Value::String(folded),
            }
        }
        Arg::Int(value) => Value::from(*value),
        Arg::Float(value) => Value::from(*value),
        Arg::Bool(value) => Value::Bool(*value),
    }
}

/// Integer view of an argument: booleans count as 0/1, floats truncate toward zero,
/// text must be a (whitespace-trimmed) decimal integer.
///
/// Codes are bounded to `i64`; text outside that range is not an integer here, so a
/// return code like `99999999999999999999` is rejected rather than wrapped.
pub fn as_integer(arg: &Arg) -> Option<i64> {
    match arg {
        Arg::Int(value) => Some(*value),
        Arg::Bool(value) => Some(i64::from(*value)),
        Arg::Float(value) if value.is_finite() => Some(value.trunc() as i64),
        Arg::Float(_) => None,
        Arg::Text(text) => text.trim().parse::<i64>().ok(),
    }
}
