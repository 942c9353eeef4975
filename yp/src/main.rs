//! yp - CLI entry point for the yprompt client stores

use std::fs;
use std::sync::Arc;

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use tracing::warn;

use yprompt::api::{HttpApi, RemoteApi};
use yprompt::auth::{AuthStore, NoopSettings};
use yprompt::cli::{Cli, Command, RulesCommand};
use yprompt::config::Config;
use yprompt::schema::PromptField;
use yprompt::store::{LoadOutcome, PromptConfigStore};

use keystore::LocalStore;

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Priority: CLI --log-level > config file > default (warn)
    let level = cli_log_level.or(config_log_level).unwrap_or("warn");
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn parse_field(name: &str) -> Result<PromptField> {
    name.parse::<PromptField>().map_err(|e| eyre::eyre!(e))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    setup_logging(cli.log_level.as_deref(), config.log_level.as_deref())?;

    let storage = LocalStore::open(&config.storage_dir).context("Failed to open local storage")?;
    let api: Arc<dyn RemoteApi> = Arc::new(HttpApi::from_config(&config)?);

    let mut rules = PromptConfigStore::open(storage.clone(), api.clone());
    rules.set_use_slim_rules(config.use_slim_rules);
    let mut auth = AuthStore::open(storage, api);

    match cli.command {
        Command::Login { code, username, password } => {
            let mut settings = NoopSettings;
            let ok = match (code, username, password) {
                (Some(code), _, _) => auth.login_with_provider(&code, &mut rules, &mut settings).await,
                (None, Some(username), Some(password)) => {
                    auth.login_with_credentials(&username, &password, &mut rules, &mut settings).await
                }
                _ => {
                    eprintln!("{} provide either --code or --username and --password", "✗".red());
                    std::process::exit(2);
                }
            };
            if ok {
                let name = auth.user().map(|u| u.username.clone()).unwrap_or_default();
                println!("{} logged in as {}", "✓".green(), name.cyan());
            } else {
                eprintln!("{} login failed", "✗".red());
                std::process::exit(1);
            }
        }
        Command::Register { username, password, name } => {
            let outcome = auth.register(&username, &password, name.as_deref()).await;
            if outcome.success {
                println!("{} registered {}", "✓".green(), username.cyan());
            } else {
                eprintln!("{} {}", "✗".red(), outcome.error.unwrap_or_default());
                std::process::exit(1);
            }
        }
        Command::Logout => {
            auth.initialize().await;
            auth.logout(&mut rules).await;
            println!("{} logged out", "✓".green());
        }
        Command::Whoami => {
            auth.initialize().await;
            match auth.user() {
                Some(user) => {
                    println!("{} ({})", user.username.cyan(), user.name);
                    println!("auth: {}", user.auth_type);
                    if let Some(email) = &user.email {
                        println!("email: {}", email);
                    }
                    if user.is_admin != 0 {
                        println!("{}", "admin".yellow());
                    }
                }
                None => {
                    println!("{}", "not logged in".dimmed());
                    std::process::exit(1);
                }
            }
        }
        Command::Refresh => {
            if auth.refresh_token().await {
                println!("{} token refreshed", "✓".green());
            } else {
                eprintln!("{} token refresh failed", "✗".red());
                std::process::exit(1);
            }
        }
        Command::Rules { command } => match command {
            RulesCommand::List => {
                for field in PromptField::ALL {
                    let dirty = if rules.dirty_fields().contains(&field) { " (dirty)" } else { "" };
                    println!(
                        "{}  {} chars{}",
                        field.local_key().cyan(),
                        rules.get(field).len(),
                        dirty.yellow()
                    );
                }
            }
            RulesCommand::Get { field } => {
                let field = parse_field(&field)?;
                println!("{}", rules.get(field));
            }
            RulesCommand::Set { field, value, file } => {
                let field = parse_field(&field)?;
                let value = match (value, file) {
                    (Some(value), None) => value,
                    (None, Some(path)) => {
                        fs::read_to_string(&path).context(format!("Failed to read {}", path.display()))?
                    }
                    _ => {
                        eprintln!("{} provide a value or --file", "✗".red());
                        std::process::exit(2);
                    }
                };
                rules.update(field, value)?;
                println!("{} {} updated", "✓".green(), field.local_key().cyan());
            }
            RulesCommand::Reset { field, remote } => {
                let field = parse_field(&field)?;
                if remote {
                    rules.reset_field_remote(field).await?;
                } else {
                    rules.reset_field(field)?;
                }
                println!("{} {} reset to default", "✓".green(), field.local_key().cyan());
            }
            RulesCommand::ResetAll => {
                rules.reset_all()?;
                println!("{} all fields reset to defaults", "✓".green());
            }
            RulesCommand::Sync => {
                let synced = rules.sync_to_remote().await?;
                if synced == 0 {
                    println!("{}", "nothing to sync".dimmed());
                } else {
                    println!("{} synced {} field(s)", "✓".green(), synced);
                }
            }
            RulesCommand::Pull { force } => {
                let outcome = if force {
                    rules.force_reload().await
                } else {
                    rules.load_from_remote().await
                };
                match outcome {
                    Ok(LoadOutcome::Loaded) => println!("{} loaded remote prompt rules", "✓".green()),
                    Ok(LoadOutcome::UsedDefaults) => println!("{}", "no remote record, using defaults".dimmed()),
                    Ok(LoadOutcome::AlreadyLoaded) => println!("{}", "already loaded this session".dimmed()),
                    Ok(LoadOutcome::NotLoggedIn) => {
                        eprintln!("{} not logged in", "✗".red());
                        std::process::exit(1);
                    }
                    Err(e) => {
                        warn!(error = %e, "Remote pull failed");
                        return Err(e);
                    }
                }
            }
            RulesCommand::PurgeRemote => {
                rules.purge_remote().await?;
                println!("{} remote prompt rules deleted", "✓".green());
            }
        },
    }

    Ok(())
}
