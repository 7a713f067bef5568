//! Purpose: String-level entry point used by process runners and the `re` CLI.
//! Exports: `Command`, `invoke`, `invoke_named`.
//! Role: Enforce per-command arity, then delegate to the typed helpers.
//! Invariants: Arity violations and unknown commands are `Usage` errors, never records.
//! Invariants: Every other outcome, including rejections, is a record.
use crate::api::builders::{save, save_dir, save_dir_list, save_file, save_file_list, save_list};
use crate::api::checkrc::checkrc;
use crate::api::progress::progress;
use crate::api::severity::{error, info, warning};
use crate::core::error::{Error, ErrorKind};
use crate::core::record::Record;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Command {
    Save,
    SaveList,
    SaveFile,
    SaveFileList,
    SaveDir,
    SaveDirList,
    Info,
    Warning,
    Error,
    Progress,
    Checkrc,
}

impl Command {
    pub const ALL: [Command; 11] = [
        Command::Save,
        Command::SaveList,
        Command::SaveFile,
        Command::SaveFileList,
        Command::SaveDir,
        Command::SaveDirList,
        Command::Info,
        Command::Warning,
        Command::Error,
        Command::Progress,
        Command::Checkrc,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Command::Save => "save",
            Command::SaveList => "save-list",
            Command::SaveFile => "save-file",
            Command::SaveFileList => "save-file-list",
            Command::SaveDir => "save-dir",
            Command::SaveDirList => "save-dir-list",
            Command::Info => "info",
            Command::Warning => "warning",
            Command::Error => "error",
            Command::Progress => "progress",
            Command::Checkrc => "checkrc",
        }
    }

    pub fn from_name(name: &str) -> Option<Command> {
        Self::ALL.into_iter().find(|command| command.name() == name)
    }

    pub fn usage(self) -> &'static str {
        match self {
            Command::Save => "KEY VALUE",
            Command::SaveList => "KEY [VALUE]...",
            Command::SaveFile => "KEY FILE [REF]...",
            Command::SaveFileList => "KEY [FILE[:REF,...]]...",
            Command::SaveDir => "KEY DIR [REF]...",
            Command::SaveDirList => "KEY [DIR[:REF,...]]...",
            Command::Info | Command::Warning | Command::Error => "MESSAGE",
            Command::Progress => "FRACTION",
            Command::Checkrc => "RC [ACCEPTED_RC]... [MESSAGE]",
        }
    }

    /// Minimum and maximum (`None` = unbounded) argument counts.
    fn arity(self) -> (usize, Option<usize>) {
        match self {
            Command::Save => (2, Some(2)),
            Command::SaveList | Command::SaveFileList | Command::SaveDirList => (1, None),
            Command::SaveFile | Command::SaveDir => (2, None),
            Command::Info | Command::Warning | Command::Error | Command::Progress => {
                (1, Some(1))
            }
            Command::Checkrc => (1, None),
        }
    }

    fn check_arity(self, given: usize) -> Result<(), Error> {
        let (min, max) = self.arity();
        if given >= min && max.is_none_or(|max| given <= max) {
            return Ok(());
        }
        let expected = match max {
            Some(max) if max == min => format!("exactly {min}"),
            Some(max) => format!("{min} to {max}"),
            None => format!("at least {min}"),
        };
        Err(Error::new(ErrorKind::Usage)
            .with_message(format!(
                "{} takes {expected} argument{} ({given} given)",
                self.name(),
                if min == 1 { "" } else { "s" }
            ))
            .with_hint(format!("Usage: re {} {}", self.name(), self.usage())))
    }
}

pub fn invoke_named(name: &str, args: &[String]) -> Result<Record, Error> {
    let Some(command) = Command::from_name(name) else {
        return Err(Error::new(ErrorKind::Usage)
            .with_message(format!("unknown command '{name}'"))
            .with_hint("Run `re --help` for the list of commands."));
    };
    invoke(command, args)
}

pub fn invoke(command: Command, args: &[String]) -> Result<Record, Error> {
    command.check_arity(args.len())?;
    tracing::debug!(command = command.name(), args = args.len(), "invoking");

    let record = match (command, args) {
        (Command::Save, [key, value]) => save(key, value),
        (Command::SaveList, [key, values @ ..]) => save_list(key, values),
        (Command::SaveFile, [key, file, refs @ ..]) => save_file(key, file, refs)?.into_record(),
        (Command::SaveFileList, [key, files @ ..]) => save_file_list(key, files)?.into_record(),
        (Command::SaveDir, [key, dir, refs @ ..]) => save_dir(key, dir, refs)?.into_record(),
        (Command::SaveDirList, [key, dirs @ ..]) => save_dir_list(key, dirs)?.into_record(),
        (Command::Info, [message]) => info(message),
        (Command::Warning, [message]) => warning(message),
        (Command::Error, [message]) => error(message),
        (Command::Progress, [value]) => progress(value).into_record(),
        (Command::Checkrc, [rc, rest @ ..]) => checkrc(rc, rest).into_record(),
        _ => {
            return Err(Error::new(ErrorKind::Internal)
                .with_message(format!("unhandled arguments for {}", command.name())));
        }
    };
    Ok(record)
}
