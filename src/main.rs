use clap::Parser;
use eyre::{Context, Result};
use log::info;
use std::fs;

mod admin;
mod chat;
mod cli;
mod commands;
mod config;
mod profile;
mod responder;
mod settings;
mod ui;

use cli::{Cli, Commands};
use config::{Config, LogLevel};
use settings::SettingsStore;

fn setup_logging(log_level: &LogLevel) -> Result<()> {
    let log_dir = Config::log_dir();

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("chaiclone.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    // RUST_LOG env var takes precedence, otherwise use config log_level
    let mut builder = env_logger::Builder::new();

    if std::env::var("RUST_LOG").is_ok() {
        builder.parse_default_env();
    } else {
        builder.filter_level(log_level.to_level_filter());
    }

    builder.target(env_logger::Target::Pipe(target)).init();

    info!("Logging initialized, writing to: {}", log_file.display());
    info!(
        "Log level: {} (from {})",
        log_level.as_filter(),
        if std::env::var("RUST_LOG").is_ok() { "RUST_LOG env" } else { "config" }
    );
    Ok(())
}

fn run(cli: Cli, config: Config) -> Result<()> {
    let settings_path = config.settings_path(cli.settings.as_ref());

    // Commands that never touch the settings document
    match cli.command {
        Commands::Completions { shell } => return commands::completions::run(shell),
        Commands::Config { action } => return commands::config::run(action, &config, &settings_path),
        _ => {}
    }

    // One store for the whole run, handed to whichever command needs it
    let mut store = SettingsStore::load(&settings_path)?;
    info!("Using settings at: {}", store.path().display());

    match cli.command {
        Commands::Chat => commands::chat::run(&config, &mut store),
        Commands::Send { messages } => commands::chat::send(&messages, &config, &mut store),
        Commands::Profile { action } => commands::profile::run(action, &store),
        Commands::Character { action } => commands::character::run(action, &mut store),
        Commands::Cloud { action } => commands::cloud::run(action, &mut store),
        Commands::Theme => commands::theme::run(&mut store),
        Commands::Admin { password, action } => commands::admin::run(password, action, &mut store),
        Commands::Completions { .. } | Commands::Config { .. } => Ok(()),
    }
}

fn main() -> Result<()> {
    // Parse CLI arguments first
    let cli = Cli::parse();

    // Load configuration (before logging, so log messages in Config::load are silent)
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    // Setup logging with log level from config (or RUST_LOG env var)
    setup_logging(&config.log_level).context("Failed to setup logging")?;

    info!("Starting chaiclone with config from: {:?}", cli.config);

    // Run the command
    run(cli, config).context("Command failed")?;

    Ok(())
}
