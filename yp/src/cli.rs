//! CLI argument parsing for yp

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "yp")]
#[command(author, version, about = "Prompt rule and account manager for yprompt", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in with a password or an OAuth code
    Login {
        /// OAuth authorization code
        #[arg(long, conflicts_with_all = ["username", "password"])]
        code: Option<String>,

        /// Account username
        #[arg(short, long, requires = "password")]
        username: Option<String>,

        /// Account password
        #[arg(short, long, requires = "username")]
        password: Option<String>,
    },

    /// Register a local account
    Register {
        /// Account username
        #[arg(required = true)]
        username: String,

        /// Account password
        #[arg(short, long)]
        password: String,

        /// Display name (defaults to the username server-side)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Log out and clear local application state
    Logout,

    /// Show the current session
    Whoami,

    /// Exchange the session token for a fresh one
    Refresh,

    /// Manage prompt rules
    Rules {
        #[command(subcommand)]
        command: RulesCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum RulesCommand {
    /// List all fields with their status
    List,

    /// Print a field's current value
    Get {
        /// Field name (camelCase or snake_case)
        #[arg(required = true)]
        field: String,
    },

    /// Set a field's value
    Set {
        /// Field name (camelCase or snake_case)
        #[arg(required = true)]
        field: String,

        /// New value (omit to read from --file)
        value: Option<String>,

        /// Read the value from a file
        #[arg(short, long, conflicts_with = "value")]
        file: Option<PathBuf>,
    },

    /// Restore a field to its compiled default
    Reset {
        /// Field name (camelCase or snake_case)
        #[arg(required = true)]
        field: String,

        /// Also delete the field from the remote account store
        #[arg(long)]
        remote: bool,
    },

    /// Restore every field to its compiled default (remote untouched)
    ResetAll,

    /// Push locally changed fields to the remote account store
    Sync,

    /// Pull the remote record (at most once per session unless --force)
    Pull {
        /// Clear the session guard and pull again
        #[arg(long)]
        force: bool,
    },

    /// Delete the whole remote record
    PurgeRemote,
}
