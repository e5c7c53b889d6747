use clap::Parser;
use eyre::{Context, Result};
use log::info;
use std::fs;

mod cli;
mod commands;
mod config;
mod filter;
mod node;

use cli::{Cli, Commands};
use commands::process::StdinMode;
use config::{Config, LogLevel};

fn effective_level(cli: &Cli, config_level: LogLevel) -> LogLevel {
    if cli.verbose {
        LogLevel::Debug
    } else if cli.quiet {
        LogLevel::Error
    } else {
        config_level
    }
}

fn setup_logging(log_level: LogLevel) -> Result<()> {
    let log_dir = Config::log_dir();
    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("tagfilter.log");

    // Log to a file so stdout stays clean for pipelines
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
    let registry = node::default_registry(&node::LogNotifier)?;

    match cli.command {
        Commands::Process {
            prompts,
            json,
            lines,
            rules,
            format,
        } => commands::process::run(prompts, StdinMode::from_flags(json, lines), &rules, format, &config),
        Commands::Rules { rules, format } => {
            commands::rules::run(&rules, cli::OutputFormat::resolve(format), &config)
        }
        Commands::Node { action } => commands::node::run(action, &registry),
        Commands::Config { action } => commands::config::run(action, &config),
        Commands::Completions { shell } => commands::completions::run(shell),
    }
}

fn main() -> Result<()> {
    // Parse CLI arguments first
    let cli = Cli::parse();

    // Load configuration (before logging, so log messages in Config::load are silent)
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    setup_logging(effective_level(&cli, config.log_level)).context("Failed to setup logging")?;

    info!("Starting tagfilter with config from: {:?}", cli.config);

    run(cli, config).context("Command failed")?;

    Ok(())
}
