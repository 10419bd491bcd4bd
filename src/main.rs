//! Signal engine worker binary.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use signal_config::load_config;
use signal_monitor::{setup_logging, LogFormat};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config_path, required) = cli.config_source();
    let config = load_config(&config_path, required)
        .with_context(|| format!("Failed to load configuration from {}", config_path.display()))?;

    // Setup logging; the command line wins over the config file
    let log_level = match cli.log_level {
        Some(level) => level.as_str().to_string(),
        None => config.logging.level.clone(),
    };
    let log_format = if cli.json_logs {
        LogFormat::Json
    } else {
        config.logging.format
    };
    let _log_guard = setup_logging(&log_level, log_format, config.logging.file.as_deref());

    // Execute command
    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => cli::commands::serve::run(&config).await,
        Commands::Eval(args) => cli::commands::eval::run(args, &config),
        Commands::ValidateConfig(args) => cli::commands::validate::run(args, &config, &config_path),
    }
}
