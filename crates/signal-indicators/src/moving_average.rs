//! Moving average indicators.

use signal_core::{error::IndicatorError, traits::Indicator};

/// Simple Moving Average (SMA).
///
/// The arithmetic mean of the last `period` prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sma {
    period: usize,
}

impl Sma {
    /// Create a new SMA with the specified period.
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        if period == 0 {
            return Err(IndicatorError::InvalidParameter(
                "SMA period must be greater than 0".into(),
            ));
        }
        Ok(Self { period })
    }
}

impl Indicator for Sma {
    type Output = f64;

    fn latest(&self, data: &[f64]) -> Option<f64> {
        if data.len() < self.period {
            return None;
        }
        let window = &data[data.len() - self.period..];
        Some(window.iter().sum::<f64>() / self.period as f64)
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "SMA"
    }
}

/// Mean of the last `period` prices, or `None` when fewer are available.
///
/// A zero period is never available.
pub fn sma(prices: &[f64], period: usize) -> Option<f64> {
    Sma::new(period).ok()?.latest(prices)
}
