//! Request envelope decoded from one input line.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::PriceHistory;

/// One price-history request.
///
/// Unknown fields are ignored; a missing `prices` field is an empty history.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Request {
    /// Prices, oldest first.
    #[serde(default)]
    pub prices: Vec<f64>,
    /// Optional instrument label, used only for log context.
    ///
    /// Never rejects a request: numbers are rendered as text and any other
    /// non-string value is dropped.
    #[serde(default, deserialize_with = "lenient_label")]
    pub symbol: Option<String>,
}

fn lenient_label<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(label) => Some(label),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    })
}

impl Request {
    /// Decode a request from an already parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Consume the request into its price history.
    pub fn into_history(self) -> PriceHistory {
        PriceHistory::new(self.prices)
    }
}
