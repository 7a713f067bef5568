//! Purpose: Validate and emit a step's fractional progress.
//! Exports: `progress`.
//! Invariants: Invalid input becomes a warning notice; progress never stops a step.
use serde_json::Value;

use crate::core::record::{Outcome, Record};
use crate::core::value::Arg;
use crate::notice::Notice;

pub const PROGRESS_KEY: &str = "proc.progress";

const NOT_FLOAT: &str = "Progress must be float.";
const OUT_OF_RANGE: &str = "Progress must be float between 0 and 1.";

/// Emits `{"proc.progress": fraction}` for a value in `[0, 1]`.
///
/// Text is parsed as JSON first. Booleans are deliberately treated as the integers
/// 0 and 1, so `true` reports full progress. Integral input is echoed as an integer.
pub fn progress(value: impl Into<Arg>) -> Outcome {
    let fraction = match value.into() {
        Arg::Text(text) => match serde_json::from_str::<Value>(&text) {
            Ok(parsed) => json_fraction(&parsed),
            Err(_) => None,
        },
        Arg::Int(value) => Some(Fraction::Whole(value)),
        Arg::Bool(value) => Some(Fraction::Whole(i64::from(value))),
        Arg::Float(value) => Some(Fraction::Real(value)),
    };

    let Some(fraction) = fraction else {
        tracing::debug!("progress value is not a number");
        return Outcome::Rejected(Notice::warning(NOT_FLOAT));
    };
    // NaN fails the range check.
    let real = fraction.as_f64();
    if !(0.0..=1.0).contains(&real) {
        tracing::debug!(fraction = real, "progress value out of range");
        return Outcome::Rejected(Notice::warning(OUT_OF_RANGE));
    }
    let value = match fraction {
        Fraction::Whole(whole) => Value::from(whole),
        Fraction::Real(real) => Value::from(real),
    };
    Outcome::Saved(Record::new(PROGRESS_KEY, value))
}

#[derive(Clone, Copy, Debug)]
enum Fraction {
    Whole(i64),
    Real(f64),
}

impl Fraction {
    fn as_f64(self) -> f64 {
        match self {
            Fraction::Whole(whole) => whole as f64,
            Fraction::Real(real) => real,
        }
    }
}

fn json_fraction(value: &Value) -> Option<Fraction> {
    match value {
        Value::Bool(flag) => Some(Fraction::Whole(i64::from(*flag))),
        Value::Number(number) => match number.as_i64() {
            Some(whole) => Some(Fraction::Whole(whole)),
            None => number.as_f64().map(Fraction::Real),
        },
        _ => None,
    }
}
