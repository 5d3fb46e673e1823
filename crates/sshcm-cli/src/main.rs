//! SSH Config Manager CLI
//!
//! Reads the SSH client config, prints or exports it, and applies single-host
//! edits through the backup-first writer.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use sshcm_core::SafeWriter;
use sshcm_fs::{Settings, SettingsStore};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .map_err(|e| CliError::user(format!("Failed to set tracing subscriber: {}", e)))?;
        tracing::debug!("Verbose mode enabled");
    }

    let settings = resolve_settings(&cli)?;
    tracing::debug!(config = ?settings.config_path, "Using SSH config");
    let writer = SafeWriter::new(settings);

    match cli.command.unwrap_or(Commands::Print) {
        Commands::Print => commands::run_print(&writer),
        Commands::List => commands::run_list(&writer),
        Commands::Export => commands::run_export(&writer),
        Commands::Version => commands::run_version(&writer),
        Commands::Add { name, fields } => commands::run_add(&writer, &name, fields),
        Commands::Set { name, fields } => commands::run_set(&writer, &name, fields),
        Commands::Remove { name } => commands::run_remove(&writer, &name),
    }
}

/// Settings file first, then `--config`, then `~/.ssh/config`.
fn resolve_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = match &cli.settings {
        Some(path) => SettingsStore::new().load(path)?,
        None => Settings::for_config(match &cli.config {
            Some(path) => path.clone(),
            None => default_config_path()?,
        }),
    };
    if let Some(path) = &cli.config {
        settings.config_path = path.clone();
    }
    Ok(settings)
}

fn default_config_path() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| Settings::for_home(&home).config_path)
        .ok_or_else(|| CliError::user("Could not determine home directory; pass --config"))
}
