//! Command dispatch module for routing CLI commands to their handlers.
//!
//! This module provides trait-based dispatch for CLI commands, splitting
//! them into those that need a loaded directory snapshot and those that
//! do not.

use dirq_directory::Directory;

use crate::cli::{Cli, Commands, ConfigCommands, Shell};
use crate::commands::{self, CommandContext, CommandError, Result};

/// Trait for commands that run without a loaded directory.
pub trait NoDataCommand {
    /// Execute the command.
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// Trait for commands that query a loaded directory.
pub trait DataCommand {
    /// Execute the command against the directory snapshot.
    fn execute(&self, ctx: &CommandContext, directory: &Directory) -> Result<()>;
}

/// Commands that don't need a directory.
pub enum NoDataDispatch<'a> {
    Explain { filter: &'a str },
    Config(&'a Option<ConfigCommands>),
    Completions(&'a Shell),
    Help,
}

impl<'a> NoDataDispatch<'a> {
    /// Try to create a no-data dispatch from the CLI command.
    /// Returns None if the command needs a directory.
    pub fn try_from_cli(cli: &'a Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::Explain { filter }) => Some(Self::Explain { filter }),
            Some(Commands::Config { command }) => Some(Self::Config(command)),
            Some(Commands::Completions { shell }) => Some(Self::Completions(shell)),
            None => Some(Self::Help),
            _ => None,
        }
    }
}

impl NoDataCommand for NoDataDispatch<'_> {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Self::Explain { filter } => commands::explain::execute(ctx, filter),
            Self::Config(command) => dispatch_config(ctx, command),
            Self::Completions(shell) => {
                commands::completions::execute(shell).map_err(CommandError::Io)
            }
            Self::Help => {
                if !ctx.quiet {
                    println!("dirq - directory query CLI");
                    println!("Use --help for usage information");
                }
                Ok(())
            }
        }
    }
}

/// Dispatch config subcommands.
fn dispatch_config(ctx: &CommandContext, command: &Option<ConfigCommands>) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::execute_show(ctx),
        Some(ConfigCommands::Set { key, value }) => {
            let opts = commands::config::ConfigSetOptions {
                key: key.clone(),
                value: value.clone(),
            };
            commands::config::execute_set(ctx, &opts)
        }
        Some(ConfigCommands::Path) => commands::config::execute_path(ctx),
        Some(ConfigCommands::Edit) => commands::config::execute_edit(ctx),
    }
}

/// Commands that query the directory.
pub enum DataDispatch<'a> {
    Search {
        filter: &'a Option<String>,
        attrs: &'a Option<String>,
        limit: u32,
        all: bool,
        sort: &'a Option<String>,
        reverse: bool,
        count: bool,
    },
    Show {
        account: &'a str,
    },
}

impl<'a> DataDispatch<'a> {
    /// Try to create a data dispatch from the CLI command.
    pub fn from_cli(cli: &'a Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::Search {
                filter,
                attrs,
                limit,
                all,
                sort,
                reverse,
                count,
            }) => Some(Self::Search {
                filter,
                attrs,
                limit: *limit,
                all: *all,
                sort,
                reverse: *reverse,
                count: *count,
            }),
            Some(Commands::Show { account }) => Some(Self::Show { account }),
            _ => None,
        }
    }
}

impl DataCommand for DataDispatch<'_> {
    fn execute(&self, ctx: &CommandContext, directory: &Directory) -> Result<()> {
        match self {
            Self::Search {
                filter,
                attrs,
                limit,
                all,
                sort,
                reverse,
                count,
            } => {
                let opts = commands::search::SearchOptions {
                    filter: (*filter).clone(),
                    attrs: (*attrs).clone(),
                    limit: *limit,
                    all: *all,
                    sort: (*sort).clone(),
                    reverse: *reverse,
                    count: *count,
                };
                commands::search::execute(ctx, &opts, directory)
            }
            Self::Show { account } => commands::show::execute(ctx, account, directory),
        }
    }
}
