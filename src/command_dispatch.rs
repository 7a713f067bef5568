//! Purpose: Hold top-level CLI command dispatch for `re`.
//! Exports: `dispatch_command`.
//! Role: Keep `main.rs` focused on parse/bootstrap; map subcommands onto `api::invoke`.
//! Invariants: Every step subcommand prints exactly one record line on success.

use clap::CommandFactory;
use resolwe_runtime_utils::api::{self, invoke};

use super::*;

pub(super) fn dispatch_command(
    command: Command,
    color_mode: ColorMode,
) -> Result<RunOutcome, Error> {
    let (step, args) = match command {
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::aot::generate(shell, &mut cmd, BIN_NAME, &mut io::stdout());
            return Ok(RunOutcome::ok());
        }
        Command::Save(step) => (api::Command::Save, step.args),
        Command::SaveList(step) => (api::Command::SaveList, step.args),
        Command::SaveFile(step) => (api::Command::SaveFile, step.args),
        Command::SaveFileList(step) => (api::Command::SaveFileList, step.args),
        Command::SaveDir(step) => (api::Command::SaveDir, step.args),
        Command::SaveDirList(step) => (api::Command::SaveDirList, step.args),
        Command::Info(step) => (api::Command::Info, step.args),
        Command::Warning(step) => (api::Command::Warning, step.args),
        Command::Error(step) => (api::Command::Error, step.args),
        Command::Progress(step) => (api::Command::Progress, step.args),
        Command::Checkrc(step) => (api::Command::Checkrc, step.args),
    };

    let record = invoke(step, &args)?;
    emit_record(&record, color_mode);
    Ok(RunOutcome::ok())
}
