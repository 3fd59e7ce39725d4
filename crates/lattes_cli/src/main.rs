//! Composition root for the Latency & Lattes core.
//!
//! # Responsibility
//! - Resolve configuration, start logging and open the store handle.
//! - Dispatch one use-case per invocation and print its result.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lattes_core::{
    init_logging, CoreConfig, Identity, ShopId, Store, StoreRepository, VoteDirection,
};

mod commands;
mod output;

/// Catalog coffee shops, their network speed and community votes
#[derive(Parser)]
#[command(name = "lattes", version, about, long_about = None)]
struct Cli {
    /// Store document path (overrides LATTES_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    /// Log level (overrides LATTES_LOG_LEVEL)
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// Absolute directory for rolling log files (overrides LATTES_LOG_DIR)
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Register a new user
    Register { username: String, password: String },
    /// Check credentials and print the user id
    Login { username: String, password: String },
    /// Add a coffee shop
    AddShop {
        /// Acting user id
        #[arg(long)]
        user: Identity,
        name: String,
        #[arg(long)]
        location: Option<String>,
    },
    /// Submit a speed test (Mbit/s) for a shop
    SpeedTest {
        /// Acting user id, or `anonymous`
        #[arg(long, default_value = "anonymous")]
        user: Identity,
        shop: ShopId,
        download: f64,
        upload: f64,
    },
    /// Vote a shop up or down
    Vote {
        /// Acting user id
        #[arg(long)]
        user: Identity,
        shop: ShopId,
        direction: VoteDirection,
    },
    /// List shops with vote tallies and average throughput
    Shops,
    /// Show one shop with all of its speed tests
    Show { shop: ShopId },
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = resolve_config(&cli)?;

    if let Some(log_dir) = &config.log_dir {
        init_logging(config.log_level, log_dir).context("failed to initialize logging")?;
    }
    log::info!(
        "event=cli_start module=cli status=ok core_version={}",
        lattes_core::core_version()
    );

    let mut store = Store::open(&config.store)
        .with_context(|| format!("cannot open store at {}", config.store.path.display()))?;
    let outcome = StoreRepository::try_new(&mut store)
        .map_err(anyhow::Error::from)
        .and_then(|repo| commands::execute(cli.command, repo, cli.json));
    // Close even after a failed command so a dirty store gets its retry.
    let closed = store.close();
    let code = outcome?;
    closed?;
    Ok(code)
}

fn resolve_config(cli: &Cli) -> Result<CoreConfig> {
    let mut config = CoreConfig::from_env()?;
    if let Some(path) = &cli.db {
        config.store.path = path.clone();
    }
    if let Some(level) = &cli.log_level {
        config = config.with_log_level(level)?;
    }
    if let Some(dir) = &cli.log_dir {
        config.log_dir = Some(dir.clone());
    }
    Ok(config)
}
