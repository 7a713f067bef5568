//! Purpose: Define the public Rust API for emitting pipeline output records.
//! Exports: Record builders, severity helpers, progress, checkrc, and the string dispatcher.
//! Role: Public, additive-only surface used by the CLI and embedding runners.
//! Invariants: Helpers are stateless; only file/dir builders touch the filesystem (read-only).

mod builders;
mod checkrc;
mod invoke;
mod progress;
mod severity;

pub use crate::core::error::{Error, ErrorKind, to_exit_code};
pub use crate::core::record::{Outcome, Record};
pub use crate::core::value::{Arg, coerce};
pub use crate::notice::{Notice, Severity};
pub use builders::{save, save_dir, save_dir_list, save_file, save_file_list, save_list};
pub use checkrc::{RC_KEY, checkrc};
pub use invoke::{Command, invoke, invoke_named};
pub use progress::{PROGRESS_KEY, progress};
pub use severity::{error, info, warning};
