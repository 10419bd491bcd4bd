//! Price history type.

/// Chronologically ordered prices, most recent last.
///
/// Built fresh for every request and dropped once the signal is produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceHistory {
    prices: Vec<f64>,
}

impl PriceHistory {
    /// Wrap a price sequence.
    pub fn new(prices: Vec<f64>) -> Self {
        Self { prices }
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Check if the history is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// The current (most recent) price.
    #[inline]
    pub fn current(&self) -> Option<f64> {
        self.prices.last().copied()
    }

    /// The price `steps` samples before the current one.
    ///
    /// `lookback(0)` is the current price, `lookback(2)` is `price[-3]`.
    pub fn lookback(&self, steps: usize) -> Option<f64> {
        let len = self.prices.len();
        if steps >= len {
            return None;
        }
        Some(self.prices[len - 1 - steps])
    }

    /// Borrow the raw prices.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.prices
    }
}

impl From<Vec<f64>> for PriceHistory {
    fn from(prices: Vec<f64>) -> Self {
        Self::new(prices)
    }
}

impl From<&[f64]> for PriceHistory {
    fn from(prices: &[f64]) -> Self {
        Self::new(prices.to_vec())
    }
}
