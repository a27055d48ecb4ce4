use crate::market::compare::matcher::Candidate;
use crate::market::types::CompareMode;

/// Prices a candidate must carry to be reported, all strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValidPrices {
    AskBid {
        perp_bid: f64,
        spot_ask: f64,
    },
    Full {
        spot_bid: f64,
        spot_ask: f64,
        perp_bid: f64,
        perp_ask: f64,
    },
}

/// Returns the required prices for `mode`, or `None` if any is missing,
/// unparseable, zero or negative. Quantities are never checked.
pub fn validate(mode: CompareMode, candidate: &Candidate<'_>) -> Option<ValidPrices> {
    let spot = candidate.spot;
    let perp = candidate.perp;

    match mode {
        CompareMode::AskBid => Some(ValidPrices::AskBid {
            perp_bid: positive(perp.bid1)?,
            spot_ask: positive(spot.ask_price)?,
        }),
        CompareMode::FullQuote => Some(ValidPrices::Full {
            spot_bid: positive(spot.bid_price)?,
            spot_ask: positive(spot.ask_price)?,
            perp_bid: positive(perp.bid1)?,
            perp_ask: positive(perp.ask1)?,
        }),
    }
}

fn positive(v: Option<f64>) -> Option<f64> {
    v.filter(|p| *p > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::types::{PerpQuote, SpotQuote};

    fn spot(bid: Option<f64>, ask: Option<f64>) -> SpotQuote {
        SpotQuote {
            symbol: "BTCUSDT".into(),
            bid_price: bid,
            bid_qty: None,
            ask_price: ask,
            ask_qty: None,
        }
    }

    fn perp(bid: Option<f64>, ask: Option<f64>) -> PerpQuote {
        PerpQuote {
            symbol: "BTC_USDT".into(),
            bid1: bid,
            ask1: ask,
            bid_qty1: None,
            ask_qty1: None,
            volume24: None,
            last_price: None,
        }
    }

    #[test]
    fn ask_bid_needs_only_perp_bid_and_spot_ask() {
        let s = spot(None, Some(100.0));
        let p = perp(Some(101.0), None);
        let c = Candidate { spot: &s, perp: &p };

        assert_eq!(
            validate(CompareMode::AskBid, &c),
            Some(ValidPrices::AskBid {
                perp_bid: 101.0,
                spot_ask: 100.0
            })
        );
        // Full mode also wants spot bid and perp ask.
        assert_eq!(validate(CompareMode::FullQuote, &c), None);
    }

    #[test]
    fn zero_negative_or_missing_prices_are_rejected() {
        for (bid, ask) in [
            (Some(0.0), Some(100.0)),
            (Some(101.0), Some(-1.0)),
            (None, Some(100.0)),
            (Some(101.0), None),
        ] {
            let s = spot(Some(1.0), ask);
            let p = perp(bid, Some(1.0));
            let c = Candidate { spot: &s, perp: &p };
            assert_eq!(validate(CompareMode::AskBid, &c), None, "bid={bid:?} ask={ask:?}");
        }
    }

    #[test]
    fn full_mode_accepts_all_four_positive() {
        let s = spot(Some(99.0), Some(100.0));
        let p = perp(Some(101.0), Some(102.0));
        let c = Candidate { spot: &s, perp: &p };

        assert_eq!(
            validate(CompareMode::FullQuote, &c),
            Some(ValidPrices::Full {
                spot_bid: 99.0,
                spot_ask: 100.0,
                perp_bid: 101.0,
                perp_ask: 102.0,
            })
        );
    }
}
