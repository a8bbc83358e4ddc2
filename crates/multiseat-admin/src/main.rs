//! Multiseat admin tool: entry point.
//!
//! # Usage
//!
//! ```text
//! multiseat-admin [--config <PATH>] [--log-file <PATH>] [COMMAND]
//!
//! Commands:
//!   shell        Interactive console (default)
//!   plan <FILE>  Run a seat plan non-interactively
//!   init-config  Write the default config file
//! ```
//!
//! # Startup
//!
//! 1. CLI arguments are parsed with `clap`.
//! 2. The config is loaded from `--config`, else the platform config dir,
//!    else built-in defaults.
//! 3. Logging goes to stdout and is appended to the log file.
//! 4. The chosen command runs against the OS-backed adapters.
//!
//! Creating accounts and enabling sharing need an elevated (administrator)
//! prompt; without one those commands fail and the console reports why.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tokio::io::BufReader;
use tracing::{info, warn};

use multiseat_admin::application::workstation::Workstation;
use multiseat_admin::infrastructure::console::{AdminServices, Console};
use multiseat_admin::infrastructure::logging::init_logging;
use multiseat_admin::infrastructure::storage::config::{
    config_file_path, load_config_from, save_config_to, AppConfig, ConfigError,
};
use multiseat_admin::infrastructure::storage::plan::load_plan;

// ── CLI argument definitions ──────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(
    name = "multiseat-admin",
    about = "Assign monitors, keyboards and mice to seats and create one account per seat",
    version
)]
struct Cli {
    /// Config file to use instead of the platform default.
    #[arg(long, global = true, env = "MULTISEAT_CONFIG")]
    config: Option<PathBuf>,

    /// Log file to append to, overriding `general.log_file`.
    #[arg(long, global = true, env = "MULTISEAT_LOG_FILE")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interactive console reading one command per line.
    Shell,
    /// Scan, assign, create users, apply and optionally share, from a TOML plan.
    Plan {
        /// Seat plan file.
        file: PathBuf,
    },
    /// Write the default config file.
    InitConfig {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    /// The config path in effect, if one can be determined.
    fn config_path(&self) -> Option<PathBuf> {
        match &self.config {
            Some(path) => Some(path.clone()),
            None => match config_file_path() {
                Ok(path) => Some(path),
                Err(ConfigError::NoPlatformConfigDir) => None,
                Err(e) => {
                    warn!("ignoring config location: {e}");
                    None
                }
            },
        }
    }
}

fn load(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    match path {
        Some(path) => load_config_from(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Ok(AppConfig::default()),
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config_path();

    if let Some(Command::InitConfig { force }) = &cli.command {
        let Some(path) = config_path.as_deref() else {
            bail!("no config location: pass --config <PATH>");
        };
        if path.exists() && !force {
            bail!("{} already exists (use --force to overwrite)", path.display());
        }
        save_config_to(&AppConfig::default(), path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    let config = load(config_path.as_deref())?;
    let log_file = cli
        .log_file
        .clone()
        .unwrap_or_else(|| config.general.log_file.clone());
    init_logging(&config.general.log_level, Some(&log_file))
        .context("failed to initialise logging")?;

    match &config_path {
        Some(path) => info!("Multiseat admin starting with config {}", path.display()),
        None => info!("Multiseat admin starting with built-in config"),
    }
    info!(
        "Logging to {}; up to {} seats.",
        log_file.display(),
        config.general.max_seats
    );

    let mut console = Console::new(
        AdminServices::native(&config),
        Workstation::new(config.general.max_seats),
    );

    match cli.command {
        None | Some(Command::Shell) => {
            console
                .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
                .await
                .context("console I/O failed")?;
        }
        Some(Command::Plan { file }) => {
            let plan = load_plan(&file)
                .with_context(|| format!("failed to load seat plan {}", file.display()))?;
            let outcome = console.run_plan(&plan).await;
            for failure in &outcome.failures {
                eprintln!("{failure}");
            }
            if !outcome.succeeded() {
                bail!(
                    "{} of {} plan steps failed",
                    outcome.failures.len(),
                    outcome.executed
                );
            }
        }
        Some(Command::InitConfig { .. }) => {}
    }

    info!("Multiseat admin stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
