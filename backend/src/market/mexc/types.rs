use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

use crate::market::types::{PerpQuote, Venue};

/// Perpetual ticker response: `{ "success": true, "code": 0, "data": [...] }`.
///
/// Only `data` is read. An absent or null `data` is an empty ticker list.
#[derive(Debug, Deserialize)]
pub struct PerpEnvelope {
    #[serde(default)]
    pub data: Option<Vec<Value>>,
}

impl PerpEnvelope {
    pub fn into_quotes(self) -> Vec<PerpQuote> {
        decode_rows(Venue::Perpetual, self.data.unwrap_or_default())
    }
}

/// Decodes ticker rows one by one. A row that does not fit `T` (no string
/// `symbol`, not an object) is skipped; the rest of the snapshot survives.
pub fn decode_rows<T: DeserializeOwned>(venue: Venue, rows: Vec<Value>) -> Vec<T> {
    let total = rows.len();

    let decoded: Vec<T> = rows
        .into_iter()
        .filter_map(|row| serde_json::from_value(row).ok())
        .collect();

    if decoded.len() < total {
        debug!(
            %venue,
            skipped = total - decoded.len(),
            "skipped undecodable ticker rows"
        );
    }

    decoded
}

/// Decodes a venue number that may arrive as a JSON number, a numeric string,
/// `null`, or not at all.
///
/// Anything that does not yield a finite float becomes `None`; whether that
/// blocks the record or defaults to zero is decided per field downstream.
pub fn loose_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;

    let value = match raw {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    Ok(value.filter(|v| v.is_finite()))
}
