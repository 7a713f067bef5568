//! Purpose: `re` CLI entry point for pipeline steps emitting output records.
//! Role: Binary crate root; parses args, runs one helper, prints one JSON line on stdout.
//! Invariants: stdout carries only the record line; logs and errors go to stderr.
//! Invariants: Rejection records (missing file, bad progress, ...) still exit 0.
//! Invariants: Process exit code for failures is derived from `api::to_exit_code`.
//! Invariants: Legacy `re-<command>` executable names select the matching subcommand.
use std::error::Error as StdError;
use std::ffi::OsString;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum, ValueHint, error::ErrorKind as ClapErrorKind};
use clap_complete::aot::Shell;
use serde_json::{Map, Value, json};
use tracing_subscriber::EnvFilter;

mod command_dispatch;

use resolwe_runtime_utils::api::{Error, ErrorKind, Record, to_exit_code};
use resolwe_runtime_utils::json::render::record_line;

const BIN_NAME: &str = "re";

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }

    fn with_code(exit_code: i32) -> Self {
        Self { exit_code }
    }
}

fn main() {
    let exit_code = match run() {
        Ok(outcome) => outcome.exit_code,
        Err((err, color_mode)) => {
            emit_error(&err, color_mode);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<RunOutcome, (Error, ColorMode)> {
    let cli = match Cli::try_parse_from(normalize_args(std::env::args_os())) {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    (
                        Error::new(ErrorKind::Io)
                            .with_message("failed to write help")
                            .with_source(io_err),
                        ColorMode::Auto,
                    )
                })?;
                let exit_code = if matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    2
                } else {
                    0
                };
                return Ok(RunOutcome::with_code(exit_code));
            }
            _ => {
                return Err((
                    Error::new(ErrorKind::Usage)
                        .with_message(clap_error_summary(&err))
                        .with_hint(format!("Try `{BIN_NAME} --help`.")),
                    ColorMode::Auto,
                ));
            }
        },
    };

    init_tracing();

    let color_mode = cli.color;
    if let Some(dir) = &cli.dir {
        enter_dir(dir).map_err(|err| (err, color_mode))?;
    }

    command_dispatch::dispatch_command(cli.command, color_mode).map_err(|err| (err, color_mode))
}

/// Rewrites `re-save KEY VALUE` (an entry point installed under a legacy name) into
/// `re save KEY VALUE`. Other invocations pass through untouched.
fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut args = args.into_iter();
    let Some(program) = args.next() else {
        return vec![OsString::from(BIN_NAME)];
    };
    let rest: Vec<OsString> = args.collect();

    match legacy_command_name(&program) {
        Some(command) => {
            let mut normalized = Vec::with_capacity(rest.len() + 2);
            normalized.push(OsString::from(BIN_NAME));
            normalized.push(OsString::from(command));
            normalized.extend(rest);
            normalized
        }
        None => {
            let mut normalized = Vec::with_capacity(rest.len() + 1);
            normalized.push(program);
            normalized.extend(rest);
            normalized
        }
    }
}

fn legacy_command_name(program: &OsString) -> Option<String> {
    let stem = Path::new(program).file_stem()?.to_str()?;
    let name = stem.strip_prefix("re-")?;
    resolwe_runtime_utils::api::Command::from_name(name).map(|command| command.name().to_string())
}

fn enter_dir(dir: &Path) -> Result<(), Error> {
    std::env::set_current_dir(dir).map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message("failed to enter output directory")
            .with_path(dir)
            .with_hint("Check that --dir names an existing, readable directory.")
            .with_source(err)
    })?;
    tracing::debug!(dir = %dir.display(), "checking outputs relative to directory");
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

#[derive(Parser)]
#[command(
    name = "re",
    version,
    about = "Emit single-line JSON output records from pipeline steps",
    long_about = None,
    after_help = r#"EXAMPLES
  $ re save count 42                         # {"count": 42}
  $ re save-file bam reads.bam reads.bai     # {"bam": {"file": "reads.bam", "refs": ["reads.bai"]}}
  $ re progress 0.5                          # {"proc.progress": 0.5}
  $ re checkrc $? 1 "Alignment failed"       # {"proc.rc": 0} when $? is 0 or 1

Each command prints exactly one JSON object on stdout. Problems with the
values themselves (a missing file, progress out of range) are reported as
"proc.error"/"proc.warning" records, not as failures.

Set RUST_LOG=debug to trace decisions on stderr."#,
    arg_required_else_help = true
)]
struct Cli {
    #[arg(
        long,
        help = "Directory that relative file and ref paths are checked against",
        value_hint = ValueHint::DirPath
    )]
    dir: Option<PathBuf>,
    #[arg(
        long,
        default_value = "auto",
        value_enum,
        help = "Colorize the record line (auto = only on a terminal)"
    )]
    color: ColorMode,
    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn use_color(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Save VALUE (parsed as JSON, else text) under KEY")]
    Save(StepArgs),
    #[command(about = "Save a list of VALUEs under KEY")]
    SaveList(StepArgs),
    #[command(about = "Save an existing FILE (and optional REFs) under KEY")]
    SaveFile(StepArgs),
    #[command(about = "Save a list of FILE[:REF,...] entries under KEY")]
    SaveFileList(StepArgs),
    #[command(about = "Save an existing DIR (and optional REFs) under KEY")]
    SaveDir(StepArgs),
    #[command(about = "Save a list of DIR[:REF,...] entries under KEY")]
    SaveDirList(StepArgs),
    #[command(about = "Emit a proc.info record")]
    Info(StepArgs),
    #[command(about = "Emit a proc.warning record")]
    Warning(StepArgs),
    #[command(about = "Emit a proc.error record")]
    Error(StepArgs),
    #[command(about = "Report progress as a fraction between 0 and 1")]
    Progress(StepArgs),
    #[command(about = "Report a return code, accepting RCs and attaching MESSAGE on failure")]
    Checkrc(StepArgs),
    #[command(about = "Generate shell completions")]
    Completion {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Raw positional strings; arity is checked by the library dispatcher.
#[derive(Args)]
struct StepArgs {
    #[arg(
        value_name = "ARG",
        num_args = 0..,
        allow_hyphen_values = true,
        trailing_var_arg = true
    )]
    args: Vec<String>,
}

fn emit_record(record: &Record, color_mode: ColorMode) {
    let use_color = color_mode.use_color(io::stdout().is_terminal());
    println!("{}", record_line(record.as_map(), use_color));
}

#[derive(Copy, Clone, Debug)]
enum AnsiColor {
    Red,
    Yellow,
}

fn colorize_label(label: &str, enabled: bool, color: AnsiColor) -> String {
    if !enabled {
        return label.to_string();
    }
    let code = match color {
        AnsiColor::Red => "31",
        AnsiColor::Yellow => "33",
    };
    format!("\u{1b}[{code}m{label}\u{1b}[0m")
}

fn emit_error(err: &Error, color_mode: ColorMode) {
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        eprintln!("{}", error_text(err, color_mode.use_color(is_tty)));
        return;
    }

    let value = error_json(err);
    let json = serde_json::to_string(&value).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::Internal => "internal error".to_string(),
        ErrorKind::Usage => "usage error".to_string(),
        ErrorKind::Io => "i/o error".to_string(),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut cur = err.source();
    while let Some(source) = cur {
        causes.push(source.to_string());
        cur = source.source();
    }
    causes
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(path) = err.path() {
        inner.insert("path".to_string(), json!(path.display().to_string()));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_text(err: &Error, use_color: bool) -> String {
    let mut lines = vec![format!(
        "{} {}",
        colorize_label("error:", use_color, AnsiColor::Red),
        error_message(err)
    )];
    if let Some(hint) = err.hint() {
        lines.push(format!(
            "{} {hint}",
            colorize_label("hint:", use_color, AnsiColor::Yellow)
        ));
    }
    if let Some(path) = err.path() {
        lines.push(format!(
            "{} {}",
            colorize_label("path:", use_color, AnsiColor::Yellow),
            path.display()
        ));
    }
    for cause in error_causes(err) {
        lines.push(format!(
            "{} {cause}",
            colorize_label("caused by:", use_color, AnsiColor::Yellow)
        ));
    }
    lines.join("\n")
}

fn clap_error_summary(err: &clap::Error) -> String {
    for line in err.to_string().lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("error:") {
            return rest.trim().to_string();
        }
        return trimmed.to_string();
    }
    "invalid arguments".to_string()
}
