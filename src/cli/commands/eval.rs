//! Eval command: explain the decision for one price history.

use anyhow::{Context, Result};
use signal_config::AppConfig;
use signal_core::{traits::Indicator, types::PriceHistory};
use signal_policy::{Decision, DecisionPolicy};
use std::fmt::Write;

use crate::cli::{EvalArgs, OutputFormat};

pub fn run(args: EvalArgs, config: &AppConfig) -> Result<()> {
    let policy =
        DecisionPolicy::new(config.policy.clone()).context("Invalid policy configuration")?;
    let history = PriceHistory::new(args.prices);

    let decision = policy
        .evaluate(&history)
        .context("Signal computation failed")?;

    match args.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&decision)?),
        OutputFormat::Text => print!("{}", render(&history, &decision, &policy)),
    }

    Ok(())
}

fn value(v: Option<f64>) -> String {
    v.map_or_else(|| "-".to_string(), |v| format!("{:.2}", v))
}

fn render(history: &PriceHistory, decision: &Decision, policy: &DecisionPolicy) -> String {
    let indicators = &decision.indicators;
    let mut out = String::new();

    let _ = writeln!(out, "Prices:    {} samples", history.len());
    if let Some(current) = history.current() {
        let _ = writeln!(out, "Current:   {:.2}", current);
    }
    let _ = writeln!(out, "Signal:    {}", decision.signal);
    let _ = writeln!(out, "Rule:      {}", decision.rule.description());
    for (indicator, reading) in [
        (policy.rsi().label(), indicators.rsi),
        (policy.short_sma().label(), indicators.sma_short),
        (policy.long_sma().label(), indicators.sma_long),
    ] {
        let _ = writeln!(out, "{:<11}{}", format!("{}:", indicator), value(reading));
    }
    if let (Some(short), Some(long)) = (indicators.sma_short, indicators.sma_long) {
        let _ = writeln!(out, "Ratio:     {:.4}", short / long);
    }
    let momentum = indicators
        .momentum
        .map_or_else(|| "-".to_string(), |m| format!("{:+.2}%", m * 100.0));
    let _ = writeln!(out, "Momentum:  {}", momentum);

    out
}
