//! Error types for the signal engine.

use thiserror::Error;

/// Top-level signal engine error.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Policy error: {0}")]
    Policy(#[from] PolicyError),

    #[error("Computation error: {0}")]
    Computation(#[from] ComputationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A request line that is not valid JSON.
///
/// Invalid UTF-8 anywhere in the line lands here too. The worker answers
/// these with a diagnostic line only, never a signal.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Invalid JSON - {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Failure while turning a decoded request into a signal.
///
/// The worker answers these with a diagnostic line followed by `HOLD`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComputationError {
    #[error("momentum reference price at offset -{offset} is zero (division by zero)")]
    ZeroReferencePrice { offset: usize },

    #[error("malformed request: {0}")]
    InvalidRequest(String),

    #[error("signal evaluation panicked: {0}")]
    Panicked(String),
}

/// Policy configuration errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PolicyError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Indicator error: {0}")]
    Indicator(#[from] IndicatorError),
}

/// Indicator calculation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndicatorError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
