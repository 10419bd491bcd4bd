//! Core data types for the signal engine.

mod history;
mod request;
mod signal;

pub use history::PriceHistory;
pub use request::Request;
pub use signal::Signal;
