//! Spot vs perpetual comparison pipeline.
//!
//! index spot -> join on normalized symbol -> validate -> build record -> assemble
//!
//! Pure over request-local data: the same snapshots and timestamp always give
//! the same response.

pub mod assemble;
pub mod matcher;
pub mod spread;
pub mod validate;

use tracing::debug;

use crate::market::mexc::QuoteSnapshot;
use crate::market::types::{CompareMode, ComparisonRecord};

pub use assemble::{CompareResponse, assemble};

/// Matched and validated records, in perpetual list order.
pub fn compare(mode: CompareMode, snapshot: &QuoteSnapshot) -> Vec<ComparisonRecord> {
    let index = matcher::SpotIndex::build(&snapshot.spot);
    let candidates = matcher::join(&index, &snapshot.perp);
    let matched = candidates.len();

    let records: Vec<_> = candidates
        .iter()
        .filter_map(|c| validate::validate(mode, c).map(|prices| spread::build_record(c, prices)))
        .collect();

    debug!(
        ?mode,
        spot = index.len(),
        perp = snapshot.perp.len(),
        matched,
        rejected = matched - records.len(),
        "comparison computed"
    );

    records
}

/// Full pipeline from snapshots to the response envelope.
pub fn run(mode: CompareMode, snapshot: &QuoteSnapshot, timestamp: String) -> CompareResponse {
    assemble(mode, compare(mode, snapshot), timestamp)
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::market::symbol::normalize;
    use crate::market::types::{PerpQuote, SpotQuote};
    use proptest::prelude::*;

    const BASES: &[&str] = &["BTC", "ETH", "SOL", "DOGE", "PEPE"];

    // Mix of valid, zero, negative and missing prices.
    fn price() -> impl Strategy<Value = Option<f64>> {
        prop_oneof![
            3 => (0.01..100_000.0f64).prop_map(Some),
            1 => Just(Some(0.0)),
            1 => (-100.0..0.0f64).prop_map(Some),
            1 => Just(None),
        ]
    }

    fn base() -> impl Strategy<Value = &'static str> {
        prop::sample::select(BASES)
    }

    fn spot_quote() -> impl Strategy<Value = SpotQuote> {
        (base(), price(), price(), price(), price()).prop_map(|(b, bid, bid_qty, ask, ask_qty)| {
            SpotQuote {
                symbol: format!("{b}USDT"),
                bid_price: bid,
                bid_qty,
                ask_price: ask,
                ask_qty,
            }
        })
    }

    fn perp_quote() -> impl Strategy<Value = PerpQuote> {
        (base(), any::<bool>(), price(), price(), price(), price()).prop_map(
            |(b, listed_on_spot_side, bid1, ask1, volume24, last_price)| PerpQuote {
                // Quote asset USDC never exists on the generated spot side.
                symbol: if listed_on_spot_side {
                    format!("{b}_USDT")
                } else {
                    format!("{b}_USDC")
                },
                bid1,
                ask1,
                bid_qty1: None,
                ask_qty1: None,
                volume24,
                last_price,
            },
        )
    }

    fn any_mode() -> impl Strategy<Value = CompareMode> {
        prop_oneof![Just(CompareMode::AskBid), Just(CompareMode::FullQuote)]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]
        #[test]
        fn test_pipeline_invariants(
            mode in any_mode(),
            spot in prop::collection::vec(spot_quote(), 0..12),
            perp in prop::collection::vec(perp_quote(), 0..12),
        ) {
            let snapshot = QuoteSnapshot { spot, perp };
            let out = run(mode, &snapshot, "ts".into());

            assert!(out.success);
            assert_eq!(out.total_pairs, out.data.len());

            for record in &out.data {
                // --- Join correctness ---
                assert_eq!(normalize(record.perp_symbol()), record.symbol());
                assert!(snapshot.spot.iter().any(|s| s.symbol == record.symbol()));
                assert!(snapshot.perp.iter().any(|p| p.symbol == record.perp_symbol()));
                assert!(!record.perp_symbol().ends_with("_USDC"), "unmatched contract leaked");

                // --- Validation ---
                match record {
                    ComparisonRecord::Spread(r) => {
                        assert_eq!(mode, CompareMode::AskBid);
                        assert!(r.perp_bid > 0.0 && r.spot_ask > 0.0);
                        assert!(r.spread_percent.is_finite() && r.spread_percent >= 0.0);
                    }
                    ComparisonRecord::Quote(r) => {
                        assert_eq!(mode, CompareMode::FullQuote);
                        assert!(r.spot_bid > 0.0 && r.spot_ask > 0.0);
                        assert!(r.perp_bid > 0.0 && r.perp_ask > 0.0);
                    }
                }
            }

            // --- Ordering ---
            if mode == CompareMode::AskBid {
                for pair in out.data.windows(2) {
                    assert!(pair[0].spread_percent() >= pair[1].spread_percent());
                }
            }

            // --- Idempotence ---
            let again = run(mode, &snapshot, "ts".into());
            assert_eq!(out, again);
        }

        #[test]
        fn test_every_valid_matched_contract_is_reported(
            spot in prop::collection::vec(spot_quote(), 0..12),
            perp in prop::collection::vec(perp_quote(), 0..12),
        ) {
            let snapshot = QuoteSnapshot { spot, perp };
            let out = compare(CompareMode::AskBid, &snapshot);

            // Last spot quote per symbol is the one the join sees.
            let expected = snapshot
                .perp
                .iter()
                .filter(|p| {
                    let key = normalize(&p.symbol);
                    snapshot
                        .spot
                        .iter()
                        .rev()
                        .find(|s| s.symbol == key)
                        .is_some_and(|s| {
                            s.ask_price.is_some_and(|a| a > 0.0) && p.bid1.is_some_and(|b| b > 0.0)
                        })
                })
                .count();

            assert_eq!(out.len(), expected);
        }
    }
}
