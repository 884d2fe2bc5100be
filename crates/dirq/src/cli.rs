//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the dirq CLI.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// dirq - Query directory records with LDAP-style filters
#[derive(Parser, Debug)]
#[command(name = "dirq")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (show debug information)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Force JSON output
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Override data file path (default: from config)
    #[arg(long, global = true, env = "DIRQ_DATA")]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search records with a filter expression
    #[command(alias = "s")]
    Search {
        /// Filter expression, either key=value or LDAP-style
        /// (e.g. "(&(memberOf=Admins)(uidNumber>=1000))"); matches
        /// everything when omitted
        filter: Option<String>,

        /// Comma-separated attributes to display (default: common columns)
        #[arg(short, long)]
        attrs: Option<String>,

        /// Limit results (default: 50)
        #[arg(long, default_value = "50")]
        limit: u32,

        /// Show all matches (no limit)
        #[arg(long)]
        all: bool,

        /// Sort by attribute (numeric-aware; records without the attribute
        /// sort last)
        #[arg(long)]
        sort: Option<String>,

        /// Reverse sort order
        #[arg(long)]
        reverse: bool,

        /// Print only the number of matches
        #[arg(long)]
        count: bool,
    },

    /// Show a single record by account name
    Show {
        /// Account name (sAMAccountName, matched case-insensitively)
        account: String,
    },

    /// Parse a filter expression and print its structure
    Explain {
        /// Filter expression to parse
        filter: String,
    },

    /// View and manage configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (data_path, output.color)
        key: String,
        /// Value to set
        value: String,
    },

    /// Print the config file path
    Path,

    /// Open the config file in $EDITOR
    Edit,
}

/// Supported shells for completions
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}
