use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::path::PathBuf;

use keystore::LocalStore;
use keystore::cli::{Cli, Command};

fn setup_logging() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();
    Ok(())
}

fn default_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("yprompt")
        .join("storage")
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();
    let dir = cli.dir.unwrap_or_else(default_dir);
    let store = LocalStore::open(&dir)?;

    info!("ks operating on {}", dir.display());

    match cli.command {
        Command::Get { key } => match store.get(&key)? {
            Some(value) => println!("{}", value),
            None => {
                eprintln!("{} no such key: {}", "✗".red(), key.yellow());
                std::process::exit(1);
            }
        },
        Command::Set { key, value } => {
            store.set(&key, &value)?;
            println!("{} {}", "✓".green(), key.cyan());
        }
        Command::Remove { key } => {
            store.remove(&key)?;
            println!("{} removed {}", "✓".green(), key.cyan());
        }
        Command::List => {
            for key in store.keys()? {
                println!("{}", key);
            }
        }
        Command::Purge { prefix } => {
            let removed = store.remove_prefix(&prefix)?;
            println!("{} removed {} key(s) with prefix {}", "✓".green(), removed, prefix.cyan());
        }
    }

    Ok(())
}
