//! Policy thresholds.

use serde::{Deserialize, Serialize};
use signal_core::error::PolicyError;
use signal_indicators::DEFAULT_RSI_PERIOD;

/// Configuration for the decision policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Below this many prices the answer is always HOLD
    pub min_history: usize,
    /// From this many prices on, the RSI/SMA branch is used
    pub full_history: usize,
    /// RSI calculation period
    pub rsi_period: usize,
    /// Buy below this RSI
    pub oversold: f64,
    /// Sell above this RSI
    pub overbought: f64,
    /// Short SMA period
    pub short_sma_period: usize,
    /// Long SMA period
    pub long_sma_period: usize,
    /// Required separation between the SMAs, as a fraction of the long SMA
    pub crossover_band: f64,
    /// Steps back from the current price for the momentum reference
    pub momentum_lookback: usize,
    /// Minimum relative change for a momentum signal
    pub momentum_threshold: f64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            min_history: 2,
            full_history: 10,
            rsi_period: DEFAULT_RSI_PERIOD,
            oversold: 30.0,
            overbought: 70.0,
            short_sma_period: 5,
            long_sma_period: 10,
            crossover_band: 0.02, // 2%
            momentum_lookback: 2, // price[-3]
            momentum_threshold: 0.03, // 3%
        }
    }
}

impl PolicyConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.rsi_period == 0 {
            return Err(PolicyError::InvalidConfig(
                "RSI period must be greater than 0".into(),
            ));
        }
        if self.short_sma_period == 0 {
            return Err(PolicyError::InvalidConfig(
                "Short SMA period must be greater than 0".into(),
            ));
        }
        if self.short_sma_period >= self.long_sma_period {
            return Err(PolicyError::InvalidConfig(
                "Short SMA period must be less than long SMA period".into(),
            ));
        }
        if !(0.0..=100.0).contains(&self.oversold) || !(0.0..=100.0).contains(&self.overbought) {
            return Err(PolicyError::InvalidConfig(
                "RSI thresholds must be between 0 and 100".into(),
            ));
        }
        if self.overbought <= self.oversold {
            return Err(PolicyError::InvalidConfig(
                "Overbought must be greater than oversold".into(),
            ));
        }
        if !(self.crossover_band >= 0.0 && self.crossover_band < 1.0) {
            return Err(PolicyError::InvalidConfig(
                "Crossover band must be in [0, 1)".into(),
            ));
        }
        if self.momentum_lookback == 0 {
            return Err(PolicyError::InvalidConfig(
                "Momentum lookback must be greater than 0".into(),
            ));
        }
        if !(self.momentum_threshold >= 0.0 && self.momentum_threshold.is_finite()) {
            return Err(PolicyError::InvalidConfig(
                "Momentum threshold must be a non-negative number".into(),
            ));
        }
        if self.full_history < self.min_history {
            return Err(PolicyError::InvalidConfig(
                "Full history threshold must not be below minimum history".into(),
            ));
        }
        Ok(())
    }
}
