//! Session counters, logged at shutdown.

use signal_core::types::Signal;

use crate::Outcome;

/// What the worker emitted over its lifetime.
///
/// Observability only: nothing here feeds back into decisions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerStats {
    /// Input lines processed
    pub requests: u64,
    /// BUY lines written
    pub buy: u64,
    /// SELL lines written
    pub sell: u64,
    /// HOLD lines written, fallbacks included
    pub hold: u64,
    /// Lines rejected as malformed JSON
    pub decode_errors: u64,
    /// Requests that faulted and fell back to HOLD
    pub faults: u64,
}

impl WorkerStats {
    /// Account for one processed line.
    pub fn record(&mut self, outcome: &Outcome) {
        self.requests += 1;
        match outcome {
            Outcome::Decided(decision) => self.count_signal(decision.signal),
            Outcome::Rejected(_) => self.decode_errors += 1,
            Outcome::Faulted(_) => {
                self.faults += 1;
                self.count_signal(Signal::Hold);
            }
        }
    }

    /// Total signal lines written.
    pub fn signals(&self) -> u64 {
        self.buy + self.sell + self.hold
    }

    fn count_signal(&mut self, signal: Signal) {
        match signal {
            Signal::Buy => self.buy += 1,
            Signal::Sell => self.sell += 1,
            Signal::Hold => self.hold += 1,
        }
    }
}
