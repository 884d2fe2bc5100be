use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

mod cli;
mod commands;
mod dispatch;
mod output;

use cli::Cli;
use commands::config::load_config;
use commands::{CommandContext, CommandError};
use dirq_directory::DirectoryStore;
use dispatch::{DataCommand, DataDispatch, NoDataCommand, NoDataDispatch};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                let error_json = serde_json::json!({
                    "error": {
                        "code": error_code(&e),
                        "message": e.to_string(),
                    }
                });
                eprintln!("{}", serde_json::to_string_pretty(&error_json).unwrap());
            } else {
                eprintln!("Error: {e}");
            }
            error_exit_code(&e)
        }
    }
}

fn run(cli: &Cli) -> commands::Result<()> {
    let ctx = CommandContext::from_cli(cli);

    // Commands that work without a loaded directory (explain, config,
    // completions, help)
    if let Some(dispatch) = NoDataDispatch::try_from_cli(cli) {
        return dispatch.execute(&ctx);
    }

    // Everything else queries a directory snapshot
    let data_path = resolve_data_path(cli)?;
    let store = DirectoryStore::new(data_path);
    if ctx.verbose {
        eprintln!("Loading directory from {}", store.path().display());
    }
    let directory = store.load()?;
    if ctx.verbose {
        eprintln!("Loaded {} records", directory.len());
    }

    if let Some(dispatch) = DataDispatch::from_cli(cli) {
        return dispatch.execute(&ctx, &directory);
    }

    Ok(())
}

/// Returns the error code string for JSON output.
fn error_code(e: &CommandError) -> &'static str {
    match e {
        CommandError::Filter(_) => "FILTER_ERROR",
        CommandError::Store(_) => "STORE_ERROR",
        CommandError::NotFound { .. } => "NOT_FOUND",
        CommandError::Config(_) => "CONFIG_ERROR",
        CommandError::Io(_) => "IO_ERROR",
        CommandError::Json(_) => "JSON_ERROR",
    }
}

/// Returns the exit code for an error.
fn error_exit_code(e: &CommandError) -> ExitCode {
    match e {
        CommandError::Filter(_) => ExitCode::from(1),
        CommandError::Json(_) => ExitCode::from(1),
        CommandError::Store(_) => ExitCode::from(3),
        CommandError::Io(_) => ExitCode::from(3),
        CommandError::NotFound { .. } => ExitCode::from(4),
        CommandError::Config(_) => ExitCode::from(5),
    }
}

/// Resolves the data file path with priority: flag/env > config.
///
/// The resolution order is:
/// 1. `--data` command line flag (clap also fills this from `DIRQ_DATA`)
/// 2. `data_path` from the config file (`~/.config/dirq/config.toml`)
fn resolve_data_path(cli: &Cli) -> commands::Result<PathBuf> {
    if let Some(path) = &cli.data {
        return Ok(path.clone());
    }

    if let Ok(config) = load_config() {
        if let Some(path) = config.data_path {
            return Ok(PathBuf::from(path));
        }
    }

    Err(CommandError::Config(
        "no data file configured; pass --data <FILE>, set DIRQ_DATA, \
         or run 'dirq config set data_path <FILE>'"
            .to_string(),
    ))
}
