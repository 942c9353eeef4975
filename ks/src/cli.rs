//! CLI argument parsing for the ks inspection tool

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ks")]
#[command(author, version, about = "Inspect a file-backed key-value store", long_about = None)]
pub struct Cli {
    /// Store directory (default: the yprompt storage directory)
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the value stored under a key
    Get {
        /// Key to read
        #[arg(required = true)]
        key: String,
    },

    /// Store a value under a key
    Set {
        /// Key to write
        #[arg(required = true)]
        key: String,

        /// Value to store
        #[arg(required = true)]
        value: String,
    },

    /// Remove a key
    Remove {
        /// Key to remove
        #[arg(required = true)]
        key: String,
    },

    /// List all keys
    List,

    /// Remove every key starting with a prefix
    Purge {
        /// Key prefix
        #[arg(required = true)]
        prefix: String,
    },
}
