use serde::Serialize;

use crate::market::types::{CompareMode, ComparisonRecord};

/// Success envelope returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareResponse {
    pub success: bool,
    pub timestamp: String,
    pub total_pairs: usize,
    pub data: Vec<ComparisonRecord>,
}

/// Orders `records` for `mode` and wraps them with request metadata.
///
/// Ask/bid records are sorted by `spreadPercent`, widest first; ties keep join
/// order. Full-quote records keep join order.
pub fn assemble(
    mode: CompareMode,
    mut records: Vec<ComparisonRecord>,
    timestamp: String,
) -> CompareResponse {
    if mode == CompareMode::AskBid {
        records.sort_by(|a, b| {
            let a = a.spread_percent().unwrap_or(f64::NEG_INFINITY);
            let b = b.spread_percent().unwrap_or(f64::NEG_INFINITY);
            b.total_cmp(&a)
        });
    }

    CompareResponse {
        success: true,
        timestamp,
        total_pairs: records.len(),
        data: records,
    }
}
