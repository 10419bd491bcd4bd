//! Wire format.
//!
//! Requests are single-line JSON objects. Responses are bare literals:
//! the readiness token, a signal, or a diagnostic line starting with
//! [`ERROR_PREFIX`].

use signal_core::{
    error::{ComputationError, DecodeError},
    types::{Request, Signal},
};
use std::fmt;

/// First line written, before any request is read.
pub const READY_TOKEN: &str = "READY";

/// Prefix of every diagnostic line.
pub const ERROR_PREFIX: &str = "ERROR: ";

/// One output line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Ready,
    Signal(Signal),
    Error(String),
}

impl Response {
    /// The line including its terminating newline.
    pub fn encode(&self) -> String {
        format!("{}\n", self)
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Ready => f.write_str(READY_TOKEN),
            Response::Signal(signal) => write!(f, "{}", signal),
            Response::Error(message) => {
                // Diagnostics must stay on one line
                let flat = message.replace(['\r', '\n'], " ");
                write!(f, "{}{}", ERROR_PREFIX, flat)
            }
        }
    }
}

/// Parse one raw input line as JSON.
///
/// Surrounding whitespace is ignored; anything else that is not a JSON
/// document, including an empty line or invalid UTF-8 anywhere in the
/// line, is a decode error.
pub fn parse_line(line: &[u8]) -> Result<serde_json::Value, DecodeError> {
    Ok(serde_json::from_slice(line)?)
}

/// Interpret a parsed JSON document as a request.
///
/// Valid JSON of the wrong shape is reported as a computation fault, so
/// the caller still answers with a fallback signal.
pub fn request_from_value(value: serde_json::Value) -> Result<Request, ComputationError> {
    Request::from_value(value).map_err(|e| ComputationError::InvalidRequest(e.to_string()))
}
