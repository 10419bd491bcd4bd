//! Serve command: the stdin/stdout worker loop.

use anyhow::{Context, Result};
use signal_config::AppConfig;
use signal_policy::DecisionPolicy;
use signal_worker::run_stdio;
use tracing::info;

pub async fn run(config: &AppConfig) -> Result<()> {
    // Rejected before READY so a supervisor never sees a half-configured worker
    let policy =
        DecisionPolicy::new(config.policy.clone()).context("Invalid policy configuration")?;

    let thresholds = policy.config();
    info!(
        app = %config.app.name,
        environment = %config.app.environment,
        rsi_period = thresholds.rsi_period,
        oversold = thresholds.oversold,
        overbought = thresholds.overbought,
        full_history = thresholds.full_history,
        "Starting signal worker"
    );

    let stats = run_stdio(&policy).await.context("Signal worker I/O failed")?;
    info!(requests = stats.requests, signals = stats.signals(), "Signal worker stopped");

    Ok(())
}
