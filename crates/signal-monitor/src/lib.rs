//! Logging for the signal engine.
//!
//! Stdout carries the worker protocol, so logs go to stderr or a file.

mod logging;

pub use logging::{setup_logging, LogFormat, LogGuard};
