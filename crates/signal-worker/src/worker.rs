//! Request/response loop.

use signal_core::{
    error::{ComputationError, DecodeError, EngineResult},
    types::{PriceHistory, Signal},
};
use signal_policy::{Decision, DecisionPolicy};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, debug_span, field, info, warn, Span};

use crate::protocol::{self, Response};
use crate::WorkerStats;

/// Result of handling one input line.
#[derive(Debug)]
pub enum Outcome {
    /// The policy produced a decision.
    Decided(Decision),
    /// The line was not valid JSON. No signal is sent for it.
    Rejected(DecodeError),
    /// Deciding failed. A fallback HOLD is sent after the diagnostic.
    Faulted(ComputationError),
}

impl Outcome {
    /// Output lines for this outcome, in order.
    pub fn responses(&self) -> Vec<Response> {
        match self {
            Outcome::Decided(decision) => vec![Response::Signal(decision.signal)],
            Outcome::Rejected(err) => vec![Response::Error(err.to_string())],
            Outcome::Faulted(err) => vec![
                Response::Error(err.to_string()),
                Response::Signal(Signal::Hold),
            ],
        }
    }

    fn log(&self) {
        match self {
            Outcome::Decided(decision) => debug!(
                signal = %decision.signal,
                rule = decision.rule.description(),
                rsi = ?decision.indicators.rsi,
                sma_short = ?decision.indicators.sma_short,
                sma_long = ?decision.indicators.sma_long,
                momentum = ?decision.indicators.momentum,
                "Signal generated"
            ),
            Outcome::Rejected(err) => warn!(error = %err, "Rejected malformed request"),
            Outcome::Faulted(err) => {
                warn!(error = %err, "Signal computation failed, falling back to HOLD")
            }
        }
    }
}

/// Decode one raw input line and run the policy on it.
pub fn handle_line(policy: &DecisionPolicy, line: &[u8]) -> Outcome {
    let span = debug_span!("request", symbol = field::Empty, prices = field::Empty);
    let _enter = span.enter();

    let outcome = decode_and_evaluate(policy, line, &span);
    outcome.log();
    outcome
}

fn decode_and_evaluate(policy: &DecisionPolicy, line: &[u8], span: &Span) -> Outcome {
    let value = match protocol::parse_line(line) {
        Ok(value) => value,
        Err(err) => return Outcome::Rejected(err),
    };

    let request = match protocol::request_from_value(value) {
        Ok(request) => request,
        Err(err) => return Outcome::Faulted(err),
    };

    span.record("symbol", request.symbol.as_deref().unwrap_or("-"));
    span.record("prices", request.prices.len());

    match evaluate_isolated(policy, &request.into_history()) {
        Ok(decision) => Outcome::Decided(decision),
        Err(err) => Outcome::Faulted(err),
    }
}

/// Evaluate, turning a panic into a computation fault.
fn evaluate_isolated(
    policy: &DecisionPolicy,
    history: &PriceHistory,
) -> Result<Decision, ComputationError> {
    panic::catch_unwind(AssertUnwindSafe(|| policy.evaluate(history)))
        .unwrap_or_else(|payload| Err(ComputationError::Panicked(panic_message(payload.as_ref()))))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

async fn write_response<W>(writer: &mut W, response: &Response) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(response.encode().as_bytes()).await?;
    writer.flush().await
}

/// Serve requests from `reader` until it reaches end of stream.
///
/// Writes the readiness token first. Each line is fully answered before
/// the next one is read. Only I/O failures end the loop early.
pub async fn run<R, W>(
    policy: &DecisionPolicy,
    reader: R,
    mut writer: W,
) -> EngineResult<WorkerStats>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut stats = WorkerStats::default();
    let mut buf = Vec::new();

    write_response(&mut writer, &Response::Ready).await?;
    info!("Signal worker ready");

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        let outcome = handle_line(policy, &buf);
        stats.record(&outcome);

        for response in outcome.responses() {
            write_response(&mut writer, &response).await?;
        }
    }

    info!(
        requests = stats.requests,
        buy = stats.buy,
        sell = stats.sell,
        hold = stats.hold,
        decode_errors = stats.decode_errors,
        faults = stats.faults,
        "Input closed, worker stopping"
    );
    Ok(stats)
}

/// Serve requests on the process's stdin/stdout.
pub async fn run_stdio(policy: &DecisionPolicy) -> EngineResult<WorkerStats> {
    run(policy, tokio::io::stdin(), tokio::io::stdout()).await
}
