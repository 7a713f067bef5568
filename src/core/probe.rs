//! Purpose: Read-only existence checks for output files, directories and refs.
//! Exports: `PathKind`, `probe`.
//! Role: Only filesystem access in the crate; used by the file/dir builders.
//! Invariants: "Not found" and "not a directory" mean missing; other I/O failures are errors.
//! Invariants: Symlinks are followed, matching what a consumer opening the path sees.
use std::fs;
use std::io;
use std::path::Path;

use crate::core::error::{Error, ErrorKind};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PathKind {
    File,
    Dir,
    Other,
    Missing,
}

pub fn probe(path: &str) -> Result<PathKind, Error> {
    let kind = match fs::metadata(Path::new(path)) {
        Ok(meta) if meta.is_file() => PathKind::File,
        Ok(meta) if meta.is_dir() => PathKind::Dir,
        Ok(_) => PathKind::Other,
        Err(err) if is_missing(&err) => PathKind::Missing,
        Err(err) => {
            return Err(Error::new(ErrorKind::Io)
                .with_message("failed to inspect output path")
                .with_path(path)
                .with_hint("Check permissions on the path and its parent directories.")
                .with_source(err));
        }
    };
    tracing::debug!(path, ?kind, "probed output path");
    Ok(kind)
}

fn is_missing(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}
