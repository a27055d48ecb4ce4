use crate::market::compare::matcher::Candidate;
use crate::market::compare::validate::ValidPrices;
use crate::market::types::{ComparisonRecord, QuoteRecord, SpreadRecord};

/// Spot-ask vs perpetual-bid discrepancy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpreadMetrics {
    pub difference: f64,
    pub average: f64,
    pub spread_percent: f64,
}

/// Cost of buying spot at `spot_ask` and selling the perpetual at `perp_bid`,
/// as a percentage of the mid of the two.
///
/// Both prices must be strictly positive, which keeps `average` non-zero.
pub fn ask_bid_spread(perp_bid: f64, spot_ask: f64) -> SpreadMetrics {
    let difference = perp_bid - spot_ask;
    let average = (perp_bid + spot_ask) / 2.0;

    SpreadMetrics {
        difference,
        average,
        spread_percent: difference.abs() / average * 100.0,
    }
}

/// Builds the output record for a validated candidate.
pub fn build_record(candidate: &Candidate<'_>, prices: ValidPrices) -> ComparisonRecord {
    let spot = candidate.spot;
    let perp = candidate.perp;

    let symbol = candidate.symbol().to_string();
    let perp_symbol = perp.symbol.clone();
    let volume24h = or_zero(perp.volume24);
    let last_price = or_zero(perp.last_price);

    match prices {
        ValidPrices::AskBid { perp_bid, spot_ask } => {
            let metrics = ask_bid_spread(perp_bid, spot_ask);

            ComparisonRecord::Spread(SpreadRecord {
                symbol,
                perp_symbol,
                spot_ask,
                perp_bid,
                difference: metrics.difference,
                spread_percent: metrics.spread_percent,
                spot_ask_qty: or_zero(spot.ask_qty),
                perp_bid_qty: or_zero(perp.bid_qty1),
                volume24h,
                last_price,
            })
        }
        ValidPrices::Full {
            spot_bid,
            spot_ask,
            perp_bid,
            perp_ask,
        } => ComparisonRecord::Quote(QuoteRecord {
            symbol,
            perp_symbol,
            spot_bid,
            spot_ask,
            spot_bid_qty: or_zero(spot.bid_qty),
            spot_ask_qty: or_zero(spot.ask_qty),
            perp_bid,
            perp_ask,
            perp_bid_qty: or_zero(perp.bid_qty1),
            perp_ask_qty: or_zero(perp.ask_qty1),
            volume24h,
            last_price,
        }),
    }
}

fn or_zero(v: Option<f64>) -> f64 {
    v.unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::types::{PerpQuote, SpotQuote};

    #[test]
    fn spread_of_101_over_100() {
        let m = ask_bid_spread(101.0, 100.0);

        assert_eq!(m.difference, 1.0);
        assert_eq!(m.average, 100.5);
        assert!((m.spread_percent - 0.995_024_875_6).abs() < 1e-9);
    }

    #[test]
    fn spread_is_unsigned_but_difference_is_not() {
        let m = ask_bid_spread(99.0, 100.0);

        assert_eq!(m.difference, -1.0);
        assert!(m.spread_percent > 0.0);
        assert_eq!(m.spread_percent, ask_bid_spread(100.0, 99.0).spread_percent);
    }

    #[test]
    fn descriptive_fields_default_to_zero() {
        let s = SpotQuote {
            symbol: "BTCUSDT".into(),
            bid_price: None,
            bid_qty: None,
            ask_price: Some(100.0),
            ask_qty: None,
        };
        let p = PerpQuote {
            symbol: "BTC_USDT".into(),
            bid1: Some(101.0),
            ask1: None,
            bid_qty1: Some(7.0),
            ask_qty1: None,
            volume24: None,
            last_price: None,
        };
        let c = Candidate { spot: &s, perp: &p };

        let ComparisonRecord::Spread(r) = build_record(
            &c,
            ValidPrices::AskBid {
                perp_bid: 101.0,
                spot_ask: 100.0,
            },
        ) else {
            panic!("expected spread record");
        };

        assert_eq!(r.symbol, "BTCUSDT");
        assert_eq!(r.perp_symbol, "BTC_USDT");
        assert_eq!(r.spot_ask_qty, 0.0);
        assert_eq!(r.perp_bid_qty, 7.0);
        assert_eq!(r.volume24h, 0.0);
        assert_eq!(r.last_price, 0.0);
    }
}
