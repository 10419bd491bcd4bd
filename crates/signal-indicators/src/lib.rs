//! Technical indicators for signal generation.
//!
//! - Simple moving average (`Sma`, [`sma`])
//! - Relative strength index (`Rsi`, [`rsi`])
//!
//! Both are pure functions of a price slice. Short histories are not
//! errors: SMA reports "unavailable" (`None`) and RSI reports the neutral
//! value.

pub mod momentum;
pub mod moving_average;

pub use momentum::{rsi, Rsi, DEFAULT_RSI_PERIOD, NEUTRAL_RSI};
pub use moving_average::{sma, Sma};
