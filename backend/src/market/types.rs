use std::fmt;

use serde::{Deserialize, Serialize};

use crate::market::mexc::types::loose_f64;

/// Upstream market a snapshot was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Venue {
    Spot,
    Perpetual,
}

impl fmt::Display for Venue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Venue::Spot => f.write_str("Spot"),
            Venue::Perpetual => f.write_str("Perpetual"),
        }
    }
}

/// Best bid/ask for one spot symbol (`BTCUSDT` naming).
///
/// Prices stay optional here; the validator decides which ones a mode requires.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotQuote {
    pub symbol: String,

    #[serde(default, deserialize_with = "loose_f64")]
    pub bid_price: Option<f64>,
    #[serde(default, deserialize_with = "loose_f64")]
    pub bid_qty: Option<f64>,

    #[serde(default, deserialize_with = "loose_f64")]
    pub ask_price: Option<f64>,
    #[serde(default, deserialize_with = "loose_f64")]
    pub ask_qty: Option<f64>,
}

/// Top of book for one perpetual contract (`BTC_USDT` naming).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerpQuote {
    pub symbol: String,

    #[serde(default, deserialize_with = "loose_f64")]
    pub bid1: Option<f64>,
    #[serde(default, deserialize_with = "loose_f64")]
    pub ask1: Option<f64>,

    #[serde(default, deserialize_with = "loose_f64")]
    pub bid_qty1: Option<f64>,
    #[serde(default, deserialize_with = "loose_f64")]
    pub ask_qty1: Option<f64>,

    /// 24h traded volume, descriptive only.
    #[serde(default, deserialize_with = "loose_f64")]
    pub volume24: Option<f64>,
    #[serde(default, deserialize_with = "loose_f64")]
    pub last_price: Option<f64>,
}

/// Selects which prices are required and whether the spread is computed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum CompareMode {
    /// Buy spot at ask, sell perpetual at bid. Spread computed and sorted server side.
    #[default]
    #[serde(rename = "askbid", alias = "spread")]
    AskBid,

    /// Both sides of both books passed through; the consumer picks a direction.
    #[serde(rename = "full", alias = "quote")]
    FullQuote,
}

/// Spot-ask vs perpetual-bid comparison with the spread already computed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpreadRecord {
    pub symbol: String,
    pub perp_symbol: String,

    pub spot_ask: f64,
    pub perp_bid: f64,

    /// `perp_bid - spot_ask`; positive when the perpetual trades rich.
    pub difference: f64,
    /// `|difference|` as a percentage of the mid of the two prices.
    pub spread_percent: f64,

    pub spot_ask_qty: f64,
    pub perp_bid_qty: f64,
    pub volume24h: f64,
    pub last_price: f64,
}

/// Raw four-price comparison, no derived metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRecord {
    pub symbol: String,
    pub perp_symbol: String,

    pub spot_bid: f64,
    pub spot_ask: f64,
    pub spot_bid_qty: f64,
    pub spot_ask_qty: f64,

    pub perp_bid: f64,
    pub perp_ask: f64,
    pub perp_bid_qty: f64,
    pub perp_ask_qty: f64,

    pub volume24h: f64,
    pub last_price: f64,
}

/// One matched and validated spot/perpetual pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ComparisonRecord {
    Spread(SpreadRecord),
    Quote(QuoteRecord),
}

impl ComparisonRecord {
    pub fn symbol(&self) -> &str {
        match self {
            Self::Spread(r) => &r.symbol,
            Self::Quote(r) => &r.symbol,
        }
    }

    pub fn perp_symbol(&self) -> &str {
        match self {
            Self::Spread(r) => &r.perp_symbol,
            Self::Quote(r) => &r.perp_symbol,
        }
    }

    /// Only present for records computed in [`CompareMode::AskBid`].
    pub fn spread_percent(&self) -> Option<f64> {
        match self {
            Self::Spread(r) => Some(r.spread_percent),
            Self::Quote(_) => None,
        }
    }
}
