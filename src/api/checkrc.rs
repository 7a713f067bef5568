//! Purpose: Turn a tool's return code into a `proc.rc` record.
//! Exports: `checkrc`.
//! Role: Lets a step accept known non-zero codes and attach a message to real failures.
//! Invariants: Accepted codes are reported as 0.
//! Invariants: `proc.error` is added only for a non-zero code with a non-empty message.
use serde_json::Value;

use crate::core::record::{Outcome, Record};
use crate::core::value::{Arg, as_integer};
use crate::notice::{Notice, Severity};

pub const RC_KEY: &str = "proc.rc";

/// `args` lists acceptable codes. When the last element is not an integer it is the
/// error message for an unaccepted non-zero code rather than a code.
pub fn checkrc<I>(rc: impl Into<Arg>, args: I) -> Outcome
where
    I: IntoIterator,
    I::Item: Into<Arg>,
{
    let Some(rc) = as_integer(&rc.into()) else {
        return Outcome::Rejected(Notice::error("Return code must be integer."));
    };
    let args: Vec<Arg> = args.into_iter().map(Into::into).collect();

    let mut acceptable = Vec::with_capacity(args.len());
    let mut message = None;
    if let Some((last, leading)) = args.split_last() {
        for code in leading {
            match as_integer(code) {
                Some(code) => acceptable.push(code),
                None => {
                    return Outcome::Rejected(Notice::error("Return codes must be integers."));
                }
            }
        }
        match as_integer(last) {
            Some(code) => acceptable.push(code),
            None => message = Some(last.to_string()),
        }
    }

    let effective = if acceptable.contains(&rc) { 0 } else { rc };
    tracing::debug!(rc, effective, ?acceptable, "checked return code");

    let mut record = Record::new(RC_KEY, Value::from(effective));
    if effective != 0 {
        if let Some(message) = message.filter(|message| !message.is_empty()) {
            record = record.with_entry(Severity::Error.key(), Value::String(message));
        }
    }
    Outcome::Saved(record)
}

#[cfg(test)]
mod tests {
    use super::checkrc;
    use crate::core::value::Arg;

    const NONE: [i64; 0] = [];

    fn line(outcome: crate::core::record::Outcome) -> String {
        outcome.into_record().to_line()
    }

    #[test]
    fn integer_arguments() {
        assert_eq!(line(checkrc(0, NONE)), r#"{"proc.rc": 0}"#);
        assert_eq!(
            line(checkrc(2, [Arg::Int(2), Arg::from("Error")])),
            r#"{"proc.rc": 0}"#
        );
        assert_eq!(
            line(checkrc(1, [Arg::Int(2), Arg::from("Error")])),
            r#"{"proc.rc": 1, "proc.error": "Error"}"#
        );
        assert_eq!(line(checkrc(2, [2])), r#"{"proc.rc": 0}"#);
        assert_eq!(line(checkrc(1, [2])), r#"{"proc.rc": 1}"#);
    }

    #[test]
    fn string_arguments() {
        assert_eq!(line(checkrc("0", NONE)), r#"{"proc.rc": 0}"#);
        assert_eq!(line(checkrc("2", ["2", "Error"])), r#"{"proc.rc": 0}"#);
        assert_eq!(
            line(checkrc("1", ["2", "Error"])),
            r#"{"proc.rc": 1, "proc.error": "Error"}"#
        );
        assert_eq!(line(checkrc("3", ["1", "2", "3"])), r#"{"proc.rc": 0}"#);
    }

    #[test]
    fn message_alone_applies_to_any_failure() {
        assert_eq!(
            line(checkrc("5", ["Alignment failed"])),
            r#"{"proc.rc": 5, "proc.error": "Alignment failed"}"#
        );
        assert_eq!(line(checkrc("0", ["Alignment failed"])), r#"{"proc.rc": 0}"#);
        assert_eq!(line(checkrc("5", [""])), r#"{"proc.rc": 5}"#);
    }

    #[test]
    fn invalid_codes_become_error_records() {
        assert_eq!(
            line(checkrc("zero", NONE)),
            r#"{"proc.error": "Return code must be integer."}"#
        );
        assert_eq!(
            line(checkrc("1", ["x", "2", "Error"])),
            r#"{"proc.error": "Return codes must be integers."}"#
        );
    }

    #[test]
    fn codes_beyond_i64_are_not_integers() {
        assert_eq!(
            line(checkrc("99999999999999999999", NONE)),
            r#"{"proc.error": "Return code must be integer."}"#
        );
        // An oversized last argument is taken as the message.
        assert_eq!(
            line(checkrc("1", ["99999999999999999999"])),
            r#"{"proc.rc": 1, "proc.error": "99999999999999999999"}"#
        );
    }
}
