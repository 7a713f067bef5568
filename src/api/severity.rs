//! Purpose: Fixed-key `save` wrappers for info, warning and error annotations.
//! Exports: `info`, `warning`, `error`.
use crate::api::builders::save;
use crate::core::record::Record;
use crate::core::value::Arg;
use crate::notice::Severity;

pub fn info(value: impl Into<Arg>) -> Record {
    save(Severity::Info.key(), value)
}

pub fn warning(value: impl Into<Arg>) -> Record {
    save(Severity::Warning.key(), value)
}

pub fn error(value: impl Into<Arg>) -> Record {
    save(Severity::Error.key(), value)
}
