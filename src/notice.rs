//! Purpose: Non-fatal annotations a pipeline step emits instead of a requested output.
//! Exports: `Severity`, `Notice`.
//! Role: Shared shape for info/warning/error records and builder rejections.
//! Invariants: Notices never abort the caller; they are rendered as ordinary records.
//! Invariants: Severity keys (`proc.info`, `proc.warning`, `proc.error`) are stable.
use crate::core::record::Record;
use crate::core::value::{Arg, coerce};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn key(self) -> &'static str {
        match self {
            Severity::Info => "proc.info",
            Severity::Warning => "proc.warning",
            Severity::Error => "proc.error",
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

impl Notice {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Renders through the same coercion as `save`, so a rejection has exactly the
    /// shape an explicit `error`/`warning` call would produce.
    pub fn to_record(&self) -> Record {
        Record::new(
            self.severity.key(),
            coerce(&Arg::Text(self.message.clone())),
        )
    }
}
