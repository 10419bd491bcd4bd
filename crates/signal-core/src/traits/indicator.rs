//! Indicator trait definitions.

/// Trait for technical indicators.
///
/// Indicators are pure functions of a price slice: no state is kept
/// between calls.
pub trait Indicator: Send + Sync {
    /// The output type of the indicator.
    type Output;

    /// Calculate the value over the trailing window of `data`.
    ///
    /// Returns `None` when there is not enough data.
    fn latest(&self, data: &[f64]) -> Option<Self::Output>;

    /// The period the indicator was configured with.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;

    /// Short label such as `SMA(5)`.
    fn label(&self) -> String {
        format!("{}({})", self.name(), self.period())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct WindowSum {
        period: usize,
    }

    impl Indicator for WindowSum {
        type Output = f64;

        fn latest(&self, data: &[f64]) -> Option<f64> {
            let start = data.len().checked_sub(self.period)?;
            Some(data[start..].iter().sum())
        }

        fn period(&self) -> usize {
            self.period
        }

        fn name(&self) -> &str {
            "SUM"
        }
    }

    #[test]
    fn test_indicator_latest() {
        let indicator = WindowSum { period: 3 };

        assert_eq!(indicator.latest(&[1.0, 2.0]), None);
        assert_eq!(indicator.latest(&[1.0, 2.0, 3.0, 4.0, 5.0]), Some(12.0));
    }

    #[test]
    fn test_indicator_label() {
        assert_eq!(WindowSum { period: 7 }.label(), "SUM(7)");
    }
}
