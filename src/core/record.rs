//! Purpose: The record emitted as one output line, and the soft-fail outcome around it.
//! Exports: `Record`, `Outcome`.
//! Role: Shared output model for every builder and the CLI emission path.
//! Invariants: Key insertion order is the serialized order.
//! Invariants: A record always renders to one line of valid JSON.
use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::json::render::record_line;
use crate::notice::Notice;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        let mut map = Map::new();
        map.insert(key.into(), value);
        Self(map)
    }

    pub fn with_entry(mut self, key: impl Into<String>, value: Value) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Single-line JSON text without trailing newline.
    pub fn to_line(&self) -> String {
        record_line(&self.0, false)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_line())
    }
}

/// Result of a validating builder: the requested record, or a notice standing in
/// for it. Both arms are successful returns; callers branch on the arm.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Saved(Record),
    Rejected(Notice),
}

impl Outcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, Outcome::Saved(_))
    }

    pub fn notice(&self) -> Option<&Notice> {
        match self {
            Outcome::Saved(_) => None,
            Outcome::Rejected(notice) => Some(notice),
        }
    }

    pub fn into_record(self) -> Record {
        match self {
            Outcome::Saved(record) => record,
            Outcome::Rejected(notice) => notice.to_record(),
        }
    }
}

impl From<Record> for Outcome {
    fn from(record: Record) -> Self {
        Outcome::Saved(record)
    }
}

impl From<Notice> for Outcome {
    fn from(notice: Notice) -> Self {
        Outcome::Rejected(notice)
    }
}
