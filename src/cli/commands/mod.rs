//! CLI command implementations.

pub mod eval;
pub mod serve;
pub mod validate;
