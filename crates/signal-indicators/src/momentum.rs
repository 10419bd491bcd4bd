//! Momentum indicators.

use signal_core::{error::IndicatorError, traits::Indicator};

/// Period used when none is given.
pub const DEFAULT_RSI_PERIOD: usize = 14;

/// RSI reported when the history is too short to measure momentum.
pub const NEUTRAL_RSI: f64 = 50.0;

/// Relative Strength Index (RSI).
///
/// Uses plain averages of the last `period` gains and losses rather than
/// Wilder's smoothing, so the value depends only on the last `period + 1`
/// prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    /// Create a new RSI indicator.
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        if period == 0 {
            return Err(IndicatorError::InvalidParameter(
                "RSI period must be greater than 0".into(),
            ));
        }
        Ok(Self { period })
    }

    /// RSI of the trailing window, or [`NEUTRAL_RSI`] when the history is
    /// shorter than `period + 1`.
    pub fn value(&self, data: &[f64]) -> f64 {
        self.latest(data).unwrap_or(NEUTRAL_RSI)
    }

    /// RSI of exactly `period + 1` prices.
    fn window_rsi(window: &[f64]) -> f64 {
        let (gains, losses) = window.windows(2).fold((0.0_f64, 0.0_f64), |(g, l), w| {
            let change = w[1] - w[0];
            if change > 0.0 {
                (g + change, l)
            } else {
                (g, l - change)
            }
        });

        let changes = (window.len() - 1) as f64;
        let avg_gain = gains / changes;
        let avg_loss = losses / changes;

        // No losses in the window: maximal strength
        if avg_loss == 0.0 {
            return 100.0;
        }

        let rs = avg_gain / avg_loss;
        100.0 - 100.0 / (1.0 + rs)
    }
}

impl Indicator for Rsi {
    type Output = f64;

    fn latest(&self, data: &[f64]) -> Option<f64> {
        if data.len() <= self.period {
            return None;
        }
        Some(Self::window_rsi(&data[data.len() - self.period - 1..]))
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "RSI"
    }
}

/// RSI over the last `period` price changes.
///
/// Returns [`NEUTRAL_RSI`] when fewer than `period + 1` prices are given,
/// and for a zero period.
pub fn rsi(prices: &[f64], period: usize) -> f64 {
    match Rsi::new(period) {
        Ok(rsi) => rsi.value(prices),
        Err(_) => NEUTRAL_RSI,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rsi_bounds() {
        let rsi = Rsi::new(DEFAULT_RSI_PERIOD).unwrap();
        let data: Vec<f64> = (0..30)
            .map(|i| 100.0 + (i as f64 * 0.5).sin() * 5.0)
            .collect();

        for end in 15..=data.len() {
            let value = rsi.value(&data[..end]);
            assert!((0.0..=100.0).contains(&value));
        }
    }

    #[test]
    fn test_rsi_all_gains() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        assert!((rsi(&data, 5) - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_rsi_all_losses() {
        let data = vec![7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0];
        assert!(rsi(&data, 5).abs() < 1e-10);
    }

    #[test]
    fn test_rsi_flat_window_is_maximal() {
        let data = vec![100.0; 15];
        assert_eq!(rsi(&data, 14), 100.0);
    }

    #[test]
    fn test_rsi_neutral_when_short() {
        let data: Vec<f64> = (0..14).map(|i| 100.0 - i as f64).collect();
        assert_eq!(rsi(&data, 14), NEUTRAL_RSI);
        assert_eq!(rsi(&[], 14), NEUTRAL_RSI);
        assert_eq!(rsi(&[1.0, 2.0], 0), NEUTRAL_RSI);
    }

    #[test]
    fn test_rsi_balanced_moves() {
        // 7 gains of 1 and 7 losses of 1 in the last 14 changes
        let data: Vec<f64> = (0..16)
            .map(|i| if i % 2 == 0 { 100.0 } else { 101.0 })
            .collect();
        assert!((rsi(&data, 14) - 50.0).abs() < 1e-10);
    }

    #[test]
    fn test_rsi_uses_only_trailing_window() {
        // A large early drop is outside the last 3 changes
        let data = vec![200.0, 100.0, 101.0, 102.0, 103.0];
        assert_eq!(rsi(&data, 3), 100.0);
    }

    #[test]
    fn test_rsi_declining_history() {
        let mut data = vec![100.0];
        data.extend((0..15).map(|i| 100.0 - i as f64));
        assert_eq!(data.len(), 16);

        let value = rsi(&data, DEFAULT_RSI_PERIOD);
        assert!(value < 30.0);
        assert!(value.abs() < 1e-10);
    }

    #[test]
    fn test_rsi_mixed_value() {
        // Changes: +2, -1 -> avg gain 1, avg loss 0.5, rs 2
        let data = vec![10.0, 12.0, 11.0];
        assert!((rsi(&data, 2) - (100.0 - 100.0 / 3.0)).abs() < 1e-10);
    }

    #[test]
    fn test_rsi_zero_period_rejected() {
        assert!(Rsi::new(0).is_err());

        let rsi = Rsi::new(14).unwrap();
        assert_eq!(rsi.period(), 14);
        assert_eq!(rsi.label(), "RSI(14)");
        assert_eq!(rsi.latest(&[1.0; 14]), None);
        assert_eq!(rsi.latest(&[1.0; 15]), Some(100.0));
    }
}
