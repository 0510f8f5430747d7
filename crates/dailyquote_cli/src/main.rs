//! Terminal front end for the daily quote core.
//!
//! # Responsibility
//! - Map subcommands onto one quote lifecycle session per invocation.
//! - Keep all rotation/favorite rules inside `dailyquote_core`.

mod commands;
mod output;
mod platform;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dailyquote_core::{init_logging, CoreConfig, QuoteCatalog};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dailyquote")]
#[command(author, version, about = "A new inspiring quote every day", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format: text (default) or json
    #[arg(long, global = true, default_value = "text")]
    format: output::OutputFormat,

    /// Override store path (or set DAILYQUOTE_DB_PATH)
    #[arg(long, env = "DAILYQUOTE_DB_PATH", global = true)]
    db: Option<PathBuf>,

    /// Load quotes from a JSON file instead of the built-in catalog
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error (or set DAILYQUOTE_LOG_LEVEL)
    #[arg(long, env = "DAILYQUOTE_LOG_LEVEL", global = true)]
    log_level: Option<String>,

    /// Write rolling logs to this absolute directory (or set DAILYQUOTE_LOG_DIR)
    #[arg(long, env = "DAILYQUOTE_LOG_DIR", global = true)]
    log_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show today's quote, rotating it on a new day
    Today,
    /// Replace the current quote with a different one
    Next,
    /// Toggle a quote as favorite (defaults to the current quote)
    Favorite {
        /// Quote id from the catalog
        id: Option<String>,
    },
    /// List favorite quotes
    Favorites,
    /// Copy a quote to the clipboard (defaults to the current quote)
    Share {
        /// Quote id from the catalog
        id: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    if let Some(log_dir) = &config.log_dir {
        let log_dir = log_dir
            .to_str()
            .context("log directory must be valid UTF-8")?;
        init_logging(config.log_level, log_dir)?;
    }

    let catalog = match &cli.catalog {
        Some(path) => QuoteCatalog::from_json_file(path)?,
        None => QuoteCatalog::builtin(),
    };

    let ctx = commands::Context {
        db_path: config.db_path,
        catalog,
        format: cli.format,
    };

    match cli.command {
        Commands::Today => commands::today(&ctx),
        Commands::Next => commands::next(&ctx),
        Commands::Favorite { id } => commands::favorite(&ctx, id.as_deref()),
        Commands::Favorites => commands::favorites(&ctx),
        Commands::Share { id } => commands::share(&ctx, id.as_deref()),
    }
}

fn resolve_config(cli: &Cli) -> Result<CoreConfig> {
    let mut config = CoreConfig::from_env()?;
    if let Some(db) = &cli.db {
        config.db_path = db.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = dailyquote_core::logging::normalize_level(level)?;
    }
    if let Some(dir) = &cli.log_dir {
        config.log_dir = Some(dir.clone());
    }
    Ok(config)
}
