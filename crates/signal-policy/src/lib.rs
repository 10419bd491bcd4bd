//! Signal decision policy.
//!
//! A fixed, ordered rule cascade over a single price history:
//! - fewer than `min_history` prices: HOLD
//! - at least `full_history` prices: RSI oversold/overbought, then SMA crossover
//! - otherwise: short-lookback momentum
//!
//! The first rule that fires wins; nothing falls through to a later branch.
//! Evaluation is stateless, so every decision is reproducible from its input.

mod config;
mod policy;

pub use config::PolicyConfig;
pub use policy::{generate_signal, Decision, DecisionPolicy, IndicatorSnapshot, Rule};
