//! Core types and traits for the signal engine.
//!
//! This crate provides the foundational building blocks including:
//! - Price history and request envelope types
//! - The closed `Signal` enumeration
//! - The `Indicator` trait
//! - The error taxonomy shared by every other crate

pub mod types;
pub mod traits;
pub mod error;

pub use error::{
    ComputationError, DecodeError, EngineError, EngineResult, IndicatorError, PolicyError,
};
pub use types::*;
pub use traits::*;
