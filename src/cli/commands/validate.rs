//! Validate configuration command.

use anyhow::Result;
use signal_config::AppConfig;
use std::path::Path;

use crate::cli::ValidateArgs;

pub fn run(args: ValidateArgs, config: &AppConfig, config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    if let Err(e) = config.validate() {
        println!("Configuration error: {}", e);
        return Err(e.into());
    }

    println!("Configuration is valid!");
    println!();
    println!("App: {}", config.app.name);
    println!("Environment: {}", config.app.environment);
    println!("Log level: {}", config.logging.level);
    println!("Log format: {}", config.logging.format);
    println!(
        "RSI: period {}, oversold < {}, overbought > {}",
        config.policy.rsi_period, config.policy.oversold, config.policy.overbought
    );
    println!(
        "SMA crossover: {} vs {}, band {}%",
        config.policy.short_sma_period,
        config.policy.long_sma_period,
        config.policy.crossover_band * 100.0
    );
    println!(
        "Momentum: price[-{}], threshold {}%",
        config.policy.momentum_lookback + 1,
        config.policy.momentum_threshold * 100.0
    );
    println!(
        "History: HOLD below {}, RSI/SMA from {}",
        config.policy.min_history, config.policy.full_history
    );

    if args.show {
        println!();
        print!("{}", config.to_toml()?);
    }

    Ok(())
}
