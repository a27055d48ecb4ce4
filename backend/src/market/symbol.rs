//! Mapping between the perpetual venue's `BASE_QUOTE` symbols and the spot
//! venue's concatenated `BASEQUOTE` symbols.
//!
//! Only the first separator is removed. Symbols with no separator pass through
//! unchanged, and symbols with several keep everything after the first. Two
//! different contracts can therefore map onto the same spot symbol; no
//! disambiguation is attempted.

/// Separator used by the perpetual venue between base and quote asset.
pub const PERP_SEPARATOR: char = '_';

/// Perpetual symbol to spot symbol: `BTC_USDT` -> `BTCUSDT`.
pub fn normalize(perp_symbol: &str) -> String {
    match perp_symbol.split_once(PERP_SEPARATOR) {
        Some((base, quote)) => {
            let mut out = String::with_capacity(perp_symbol.len() - 1);
            out.push_str(base);
            out.push_str(quote);
            out
        }
        None => perp_symbol.to_string(),
    }
}
