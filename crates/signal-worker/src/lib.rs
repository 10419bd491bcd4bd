//! Signal worker.
//!
//! Reads one JSON request per input line and answers each with a signal
//! line, or with a diagnostic line when the request cannot be served.
//! A bad request only ever affects its own response.

mod protocol;
mod stats;
mod worker;

pub use protocol::{parse_line, request_from_value, Response, ERROR_PREFIX, READY_TOKEN};
pub use stats::WorkerStats;
pub use worker::{handle_line, run, run_stdio, Outcome};
