//! Purpose: Record builders for named outputs: values, lists, files and directories.
//! Exports: `save`, `save_list`, `save_file`, `save_file_list`, `save_dir`, `save_dir_list`.
//! Role: Main surface used by pipeline steps to declare their outputs.
//! Invariants: A missing path or ref yields an error notice, never a partial record.
//! Invariants: List builders stop at the first failing element.
//! Invariants: `refs`, when present, is non-empty and keeps caller order.
use serde_json::{Map, Value};

use crate::core::error::Error;
use crate::core::probe::{PathKind, probe};
use crate::core::record::{Outcome, Record};
use crate::core::value::{Arg, coerce};
use crate::notice::Notice;

pub fn save(key: &str, value: impl Into<Arg>) -> Record {
    Record::new(key, coerce(&value.into()))
}

pub fn save_list<I>(key: &str, values: I) -> Record
where
    I: IntoIterator,
    I::Item: Into<Arg>,
{
    let items = values
        .into_iter()
        .map(|value| coerce(&value.into()))
        .collect::<Vec<_>>();
    Record::new(key, Value::Array(items))
}

pub fn save_file<I>(key: &str, file_name: &str, refs: I) -> Result<Outcome, Error>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    save_entry(EntryKind::File, key, file_name, collect_refs(refs))
}

/// Each element is `path` or `path:ref1,ref2`; refs are trimmed of whitespace.
pub fn save_file_list<I>(key: &str, files: I) -> Result<Outcome, Error>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    save_entry_list(EntryKind::File, key, files)
}

pub fn save_dir<I>(key: &str, dir_name: &str, refs: I) -> Result<Outcome, Error>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    save_entry(EntryKind::Dir, key, dir_name, collect_refs(refs))
}

pub fn save_dir_list<I>(key: &str, dirs: I) -> Result<Outcome, Error>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    save_entry_list(EntryKind::Dir, key, dirs)
}

#[derive(Clone, Copy, Debug)]
enum EntryKind {
    File,
    Dir,
}

impl EntryKind {
    fn field(self) -> &'static str {
        match self {
            EntryKind::File => "file",
            EntryKind::Dir => "dir",
        }
    }

    fn noun(self) -> &'static str {
        match self {
            EntryKind::File => "file",
            EntryKind::Dir => "directory",
        }
    }

    fn matches(self, kind: PathKind) -> bool {
        match self {
            EntryKind::File => kind == PathKind::File,
            EntryKind::Dir => kind == PathKind::Dir,
        }
    }
}

fn collect_refs<I>(refs: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    refs.into_iter()
        .map(|reference| reference.as_ref().to_string())
        .collect()
}

fn save_entry(
    kind: EntryKind,
    key: &str,
    path: &str,
    refs: Vec<String>,
) -> Result<Outcome, Error> {
    Ok(match entry_value(kind, key, path, refs)? {
        Ok(value) => Outcome::Saved(Record::new(key, value)),
        Err(notice) => Outcome::Rejected(notice),
    })
}

fn save_entry_list<I>(kind: EntryKind, key: &str, specs: I) -> Result<Outcome, Error>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut entries = Vec::new();
    for spec in specs {
        let (path, refs) = match split_spec(kind, spec.as_ref()) {
            Ok(parts) => parts,
            Err(notice) => return Ok(Outcome::Rejected(notice)),
        };
        match entry_value(kind, key, &path, refs)? {
            Ok(value) => entries.push(value),
            Err(notice) => return Ok(Outcome::Rejected(notice)),
        }
    }
    Ok(Outcome::Saved(Record::new(key, Value::Array(entries))))
}

fn split_spec(kind: EntryKind, spec: &str) -> Result<(String, Vec<String>), Notice> {
    let mut parts = spec.split(':');
    let path = parts.next().unwrap_or_default().to_string();
    let refs = parts.next();
    if parts.next().is_some() {
        tracing::debug!(spec, "rejected output spec with several colons");
        return Err(Notice::error(format!(
            "Only one colon ':' allowed in {}-refs specification.",
            kind.field()
        )));
    }
    let refs = match refs {
        Some(refs) if !refs.is_empty() => refs
            .split(',')
            .map(|reference| reference.trim().to_string())
            .collect(),
        _ => Vec::new(),
    };
    Ok((path, refs))
}

fn entry_value(
    kind: EntryKind,
    key: &str,
    path: &str,
    refs: Vec<String>,
) -> Result<Result<Value, Notice>, Error> {
    if !kind.matches(probe(path)?) {
        tracing::debug!(key, path, noun = kind.noun(), "output set to a missing path");
        return Ok(Err(Notice::error(format!(
            "Output '{key}' set to a missing {}: '{path}'.",
            kind.noun()
        ))));
    }

    let mut missing = Vec::new();
    for reference in &refs {
        if !matches!(probe(reference)?, PathKind::File | PathKind::Dir) {
            missing.push(reference.as_str());
        }
    }
    if !missing.is_empty() {
        tracing::debug!(key, ?missing, "output references are missing");
        return Ok(Err(Notice::error(format!(
            "Output '{key}' set to missing references: '{}'.",
            missing.join(", ")
        ))));
    }

    let mut entry = Map::new();
    entry.insert(kind.field().to_string(), Value::String(path.to_string()));
    if !refs.is_empty() {
        let refs = refs.into_iter().map(Value::String).collect();
        entry.insert("refs".to_string(), Value::Array(refs));
    }
    Ok(Ok(Value::Object(entry)))
}
