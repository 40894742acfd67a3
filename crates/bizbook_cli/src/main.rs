//! `bizbook` command-line entry point.
//!
//! # Responsibility
//! - Resolve config, start logging and open the SQLite-backed store.
//! - Dispatch one command and map failures to a non-zero exit code.

mod commands;
mod config;

use bizbook_core::{init_logging, open_db, DocumentStore, MemorySlotStore, SqliteSlotStore};
use commands::{parse_args, run, CliError, Command};
use config::CliConfig;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match try_main(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=cli_command module=cli status=error error={err}");
            eprintln!("bizbook: {err}");
            ExitCode::FAILURE
        }
    }
}

fn try_main(args: &[String]) -> Result<(), CliError> {
    let invocation = parse_args(args)?;
    let mut stdout = std::io::stdout().lock();
    if !invocation.command.needs_store() {
        let scratch = DocumentStore::new(MemorySlotStore::new());
        return run(invocation.command, &scratch, &mut stdout);
    }

    let config = CliConfig::load(invocation.config_path.as_deref())?;
    let log_dir = config.resolved_log_dir()?;
    init_logging(&config.resolved_log_level(), &log_dir.to_string_lossy())
        .map_err(CliError::Logging)?;

    let conn = open_db(config.resolved_data_path()?)?;
    let store = DocumentStore::new(SqliteSlotStore::try_new(&conn)?);

    log::info!(
        "event=cli_command module=cli status=start command={}",
        command_name(&invocation.command)
    );
    run(invocation.command, &store, &mut stdout)
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Dashboard => "dashboard",
        Command::SalesWeek => "sales-week",
        Command::List { .. } => "list",
        Command::AddSale { .. } => "add-sale",
        Command::AddTask { .. } => "add-task",
        Command::ToggleTask { .. } => "toggle-task",
        Command::Delete { .. } => "delete",
        Command::Theme { .. } => "theme",
        Command::Export { .. } => "export",
        Command::Import { .. } => "import",
        Command::Clear => "clear",
        Command::Version => "version",
        Command::Help => "help",
    }
}
