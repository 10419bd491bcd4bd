//! Rule cascade.

use serde::{Deserialize, Serialize};
use signal_core::{
    error::{ComputationError, EngineResult, PolicyError},
    traits::Indicator,
    types::{PriceHistory, Signal},
};
use signal_indicators::{Rsi, Sma};

use crate::PolicyConfig;

/// The rule that produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// Fewer prices than the minimum history
    InsufficientHistory,
    /// RSI below the oversold level
    Oversold,
    /// RSI above the overbought level
    Overbought,
    /// Short SMA above the long SMA by more than the band
    BullishCrossover,
    /// Short SMA below the long SMA by more than the band
    BearishCrossover,
    /// Price rose more than the momentum threshold
    BullishMomentum,
    /// Price fell more than the momentum threshold
    BearishMomentum,
    /// Nothing fired; default HOLD
    NoRule,
}

impl Rule {
    /// Short human-readable reason.
    pub fn description(&self) -> &'static str {
        match self {
            Rule::InsufficientHistory => "insufficient price history",
            Rule::Oversold => "RSI oversold",
            Rule::Overbought => "RSI overbought",
            Rule::BullishCrossover => "bullish SMA crossover",
            Rule::BearishCrossover => "bearish SMA crossover",
            Rule::BullishMomentum => "upward momentum",
            Rule::BearishMomentum => "downward momentum",
            Rule::NoRule => "no rule fired",
        }
    }
}

/// Indicator values computed while deciding.
///
/// Values are `None` when the branch that needs them was not reached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub rsi: Option<f64>,
    pub sma_short: Option<f64>,
    pub sma_long: Option<f64>,
    pub momentum: Option<f64>,
}

/// Outcome of one policy evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub signal: Signal,
    pub rule: Rule,
    pub indicators: IndicatorSnapshot,
}

impl Decision {
    fn new(signal: Signal, rule: Rule, indicators: IndicatorSnapshot) -> Self {
        Self {
            signal,
            rule,
            indicators,
        }
    }
}

/// Maps a price history to exactly one signal.
///
/// Holds only validated thresholds and the indicators built from them,
/// never per-request state.
#[derive(Debug, Clone)]
pub struct DecisionPolicy {
    config: PolicyConfig,
    rsi: Rsi,
    short_sma: Sma,
    long_sma: Sma,
}

impl DecisionPolicy {
    /// Create a policy from a configuration, validating it first.
    pub fn new(config: PolicyConfig) -> Result<Self, PolicyError> {
        config.validate()?;
        Ok(Self {
            rsi: Rsi::new(config.rsi_period)?,
            short_sma: Sma::new(config.short_sma_period)?,
            long_sma: Sma::new(config.long_sma_period)?,
            config,
        })
    }

    /// The active thresholds.
    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    pub fn rsi(&self) -> &Rsi {
        &self.rsi
    }

    pub fn short_sma(&self) -> &Sma {
        &self.short_sma
    }

    pub fn long_sma(&self) -> &Sma {
        &self.long_sma
    }

    /// Run the cascade and return the signal only.
    pub fn signal(&self, history: &PriceHistory) -> Result<Signal, ComputationError> {
        self.evaluate(history).map(|decision| decision.signal)
    }

    /// Run the cascade. The first rule that fires wins.
    pub fn evaluate(&self, history: &PriceHistory) -> Result<Decision, ComputationError> {
        let len = history.len();

        if len < self.config.min_history {
            return Ok(Decision::new(
                Signal::Hold,
                Rule::InsufficientHistory,
                IndicatorSnapshot::default(),
            ));
        }

        if len >= self.config.full_history {
            self.evaluate_full(history)
        } else {
            self.evaluate_short(history)
        }
    }

    /// RSI thresholds first, then the SMA crossover band.
    ///
    /// Comparisons run on raw IEEE values: an overflowed SMA fails both
    /// band checks and falls through to HOLD.
    fn evaluate_full(&self, history: &PriceHistory) -> Result<Decision, ComputationError> {
        let prices = history.as_slice();
        let mut snapshot = IndicatorSnapshot::default();

        // RSI re-applies its own short-history rule, so histories between
        // `full_history` and `rsi_period` see the neutral value here.
        let rsi = self.rsi.value(prices);
        snapshot.rsi = Some(rsi);

        if rsi < self.config.oversold {
            return Ok(Decision::new(Signal::Buy, Rule::Oversold, snapshot));
        }
        if rsi > self.config.overbought {
            return Ok(Decision::new(Signal::Sell, Rule::Overbought, snapshot));
        }

        snapshot.sma_short = self.short_sma.latest(prices);
        snapshot.sma_long = self.long_sma.latest(prices);

        if let (Some(short), Some(long)) = (snapshot.sma_short, snapshot.sma_long) {
            if short > long * (1.0 + self.config.crossover_band) {
                return Ok(Decision::new(Signal::Buy, Rule::BullishCrossover, snapshot));
            }
            if short < long * (1.0 - self.config.crossover_band) {
                return Ok(Decision::new(Signal::Sell, Rule::BearishCrossover, snapshot));
            }
        }

        Ok(Decision::new(Signal::Hold, Rule::NoRule, snapshot))
    }

    /// Relative change against the price `momentum_lookback` steps back.
    fn evaluate_short(&self, history: &PriceHistory) -> Result<Decision, ComputationError> {
        let mut snapshot = IndicatorSnapshot::default();
        let lookback = self.config.momentum_lookback;

        if let (Some(current), Some(reference)) = (history.current(), history.lookback(lookback)) {
            if reference == 0.0 {
                return Err(ComputationError::ZeroReferencePrice {
                    offset: lookback + 1,
                });
            }

            let change = (current - reference) / reference;
            snapshot.momentum = Some(change);

            if change > self.config.momentum_threshold {
                return Ok(Decision::new(Signal::Buy, Rule::BullishMomentum, snapshot));
            }
            if change < -self.config.momentum_threshold {
                return Ok(Decision::new(Signal::Sell, Rule::BearishMomentum, snapshot));
            }
        }

        Ok(Decision::new(Signal::Hold, Rule::NoRule, snapshot))
    }
}

/// Evaluate `prices` with the default thresholds.
pub fn generate_signal(prices: &[f64]) -> EngineResult<Signal> {
    let policy = DecisionPolicy::new(PolicyConfig::default())?;
    Ok(policy.signal(&PriceHistory::from(prices))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> DecisionPolicy {
        DecisionPolicy::new(PolicyConfig::default()).unwrap()
    }

    fn decide(prices: &[f64]) -> Decision {
        policy().evaluate(&PriceHistory::from(prices)).unwrap()
    }

    fn declining(len: usize) -> Vec<f64> {
        let mut prices = vec![100.0];
        prices.extend((0..len - 1).map(|i| 100.0 - i as f64));
        prices
    }

    #[test]
    fn test_single_price_holds() {
        let decision = decide(&[100.0]);
        assert_eq!(decision.signal, Signal::Hold);
        assert_eq!(decision.rule, Rule::InsufficientHistory);
    }

    #[test]
    fn test_empty_history_holds() {
        assert_eq!(generate_signal(&[]).unwrap(), Signal::Hold);
    }

    #[test]
    fn test_two_prices_hold_without_rule() {
        // Big move, but momentum needs three prices
        let decision = decide(&[100.0, 150.0]);
        assert_eq!(decision.signal, Signal::Hold);
        assert_eq!(decision.rule, Rule::NoRule);
        assert_eq!(decision.indicators.momentum, None);
    }

    #[test]
    fn test_upward_momentum_buys() {
        let decision = decide(&[95.0, 96.5, 98.0, 100.0, 102.5]);
        assert_eq!(decision.signal, Signal::Buy);
        assert_eq!(decision.rule, Rule::BullishMomentum);

        let momentum = decision.indicators.momentum.unwrap();
        assert!((momentum - 4.5 / 98.0).abs() < 1e-12);
    }

    #[test]
    fn test_downward_momentum_sells() {
        let decision = decide(&[105.0, 103.0, 101.0, 98.5, 96.0]);
        assert_eq!(decision.signal, Signal::Sell);
        assert_eq!(decision.rule, Rule::BearishMomentum);
    }

    #[test]
    fn test_sideways_holds() {
        let decision = decide(&[100.0, 100.5, 99.8, 100.2, 99.9, 100.1, 100.0]);
        assert_eq!(decision.signal, Signal::Hold);
        assert_eq!(decision.rule, Rule::NoRule);
        assert!(decision.indicators.momentum.unwrap().abs() < 0.03);
    }

    #[test]
    fn test_momentum_threshold_is_strict() {
        // Exactly +3% is not enough
        let decision = decide(&[100.0, 101.0, 103.0]);
        assert_eq!(decision.signal, Signal::Hold);
    }

    #[test]
    fn test_momentum_zero_reference_faults() {
        let result = policy().evaluate(&PriceHistory::from(vec![0.0, 1.0, 2.0]));
        assert_eq!(
            result,
            Err(ComputationError::ZeroReferencePrice { offset: 3 })
        );
    }

    #[test]
    fn test_generate_signal_reports_fault() {
        let err = generate_signal(&[0.0, 1.0, 2.0]).unwrap_err();
        assert!(err.to_string().starts_with("Computation error: momentum reference"));
    }

    #[test]
    fn test_overflowing_momentum_still_buys() {
        let decision = decide(&[1e-300, 1.0, 1e300]);
        assert_eq!(decision.signal, Signal::Buy);
        assert_eq!(decision.rule, Rule::BullishMomentum);
        assert_eq!(decision.indicators.momentum, Some(f64::INFINITY));
    }

    #[test]
    fn test_overflowing_sma_holds() {
        let decision = decide(&[1e308; 10]);
        assert_eq!(decision.signal, Signal::Hold);
        assert_eq!(decision.rule, Rule::NoRule);
        assert_eq!(decision.indicators.sma_short, Some(f64::INFINITY));
    }

    #[test]
    fn test_indicators_follow_config() {
        let policy = DecisionPolicy::new(PolicyConfig {
            rsi_period: 21,
            short_sma_period: 3,
            long_sma_period: 8,
            ..Default::default()
        })
        .unwrap();

        assert_eq!(policy.rsi().label(), "RSI(21)");
        assert_eq!(policy.short_sma().label(), "SMA(3)");
        assert_eq!(policy.long_sma().label(), "SMA(8)");
    }

    #[test]
    fn test_zero_price_outside_lookback_is_fine() {
        let decision = decide(&[0.0, 100.0, 100.0, 110.0]);
        assert_eq!(decision.signal, Signal::Buy);
    }

    #[test]
    fn test_declining_history_is_oversold() {
        let prices = declining(16);
        let decision = decide(&prices);

        assert_eq!(decision.signal, Signal::Buy);
        assert_eq!(decision.rule, Rule::Oversold);
        assert!(decision.indicators.rsi.unwrap() < 30.0);
        // Short-circuit: SMA never computed
        assert_eq!(decision.indicators.sma_short, None);
    }

    #[test]
    fn test_rising_history_is_overbought() {
        let prices: Vec<f64> = (0..16).map(|i| 100.0 + i as f64).collect();
        let decision = decide(&prices);

        assert_eq!(decision.signal, Signal::Sell);
        assert_eq!(decision.rule, Rule::Overbought);
    }

    #[test]
    fn test_flat_window_is_overbought() {
        // No losses means RSI 100
        let decision = decide(&[100.0; 15]);
        assert_eq!(decision.signal, Signal::Sell);
        assert_eq!(decision.indicators.rsi, Some(100.0));
    }

    #[test]
    fn test_flat_short_full_history_holds() {
        // 10..14 prices: RSI is neutral and the SMAs are equal
        let decision = decide(&[100.0; 12]);
        assert_eq!(decision.signal, Signal::Hold);
        assert_eq!(decision.indicators.rsi, Some(50.0));
        assert_eq!(decision.indicators.sma_short, Some(100.0));
    }

    #[test]
    fn test_bullish_crossover() {
        let prices = [95.0, 96.0, 97.0, 98.0, 99.0, 100.0, 101.0, 102.0, 104.0, 106.0, 108.0, 110.0];
        let decision = decide(&prices);

        assert_eq!(decision.signal, Signal::Buy);
        assert_eq!(decision.rule, Rule::BullishCrossover);
        assert_eq!(decision.indicators.rsi, Some(50.0));
        assert!((decision.indicators.sma_short.unwrap() - 106.0).abs() < 1e-10);
        assert!((decision.indicators.sma_long.unwrap() - 102.5).abs() < 1e-10);
    }

    #[test]
    fn test_bearish_crossover() {
        let prices = [110.0, 108.0, 106.0, 104.0, 102.0, 101.0, 100.0, 99.0, 98.0, 97.0, 96.0, 95.0];
        let decision = decide(&prices);

        assert_eq!(decision.signal, Signal::Sell);
        assert_eq!(decision.rule, Rule::BearishCrossover);
    }

    #[test]
    fn test_neutral_rsi_inside_band_holds() {
        // Alternating moves: RSI 50, SMAs within 2%
        let prices: Vec<f64> = (0..16)
            .map(|i| if i % 2 == 0 { 100.0 } else { 101.0 })
            .collect();
        let decision = decide(&prices);

        assert_eq!(decision.signal, Signal::Hold);
        assert_eq!(decision.rule, Rule::NoRule);
        assert!((decision.indicators.rsi.unwrap() - 50.0).abs() < 1e-10);
    }

    #[test]
    fn test_full_branch_ignores_momentum() {
        // Last three prices jump 10%, but with 10 prices momentum is not consulted
        let prices = [100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 110.0];
        let decision = decide(&prices);

        assert_eq!(decision.indicators.momentum, None);
        // SMA5 = 102, SMA10 = 101 -> within the band
        assert_eq!(decision.signal, Signal::Hold);
    }

    #[test]
    fn test_rsi_precedes_crossover() {
        // Steady decline: SMA says bearish, RSI 0 says oversold and wins
        let prices = declining(20);
        let decision = decide(&prices);
        assert_eq!(decision.signal, Signal::Buy);
        assert_eq!(decision.rule, Rule::Oversold);
    }

    #[test]
    fn test_custom_thresholds() {
        let policy = DecisionPolicy::new(PolicyConfig {
            momentum_threshold: 0.01,
            ..Default::default()
        })
        .unwrap();

        let signal = policy
            .signal(&PriceHistory::from(vec![100.0, 101.0, 102.0]))
            .unwrap();
        assert_eq!(signal, Signal::Buy);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = DecisionPolicy::new(PolicyConfig {
            rsi_period: 0,
            ..Default::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_decision_serializes() {
        let decision = decide(&[95.0, 96.5, 98.0, 100.0, 102.5]);
        let json = serde_json::to_value(decision).unwrap();

        assert_eq!(json["signal"], "BUY");
        assert_eq!(json["rule"], "bullish_momentum");
        assert!(json["indicators"]["rsi"].is_null());
    }
}
