use std::collections::HashMap;

use crate::market::symbol::normalize;
use crate::market::types::{PerpQuote, SpotQuote};

/// Spot quotes keyed by symbol. A repeated symbol keeps its last occurrence.
pub struct SpotIndex<'a> {
    by_symbol: HashMap<&'a str, &'a SpotQuote>,
}

impl<'a> SpotIndex<'a> {
    pub fn build(spot: &'a [SpotQuote]) -> Self {
        let mut by_symbol = HashMap::with_capacity(spot.len());
        for quote in spot {
            by_symbol.insert(quote.symbol.as_str(), quote);
        }
        Self { by_symbol }
    }

    pub fn get(&self, symbol: &str) -> Option<&'a SpotQuote> {
        self.by_symbol.get(symbol).copied()
    }

    pub fn len(&self) -> usize {
        self.by_symbol.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_symbol.is_empty()
    }
}

/// A perpetual quote paired with the spot quote of the same asset.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub spot: &'a SpotQuote,
    pub perp: &'a PerpQuote,
}

impl Candidate<'_> {
    /// Spot-convention symbol shared by both legs.
    pub fn symbol(&self) -> &str {
        &self.spot.symbol
    }
}

/// Inner join on normalized symbol, in perpetual list order.
/// Contracts without a spot counterpart are skipped.
pub fn join<'a>(index: &SpotIndex<'a>, perp: &'a [PerpQuote]) -> Vec<Candidate<'a>> {
    perp.iter()
        .filter_map(|p| {
            index
                .get(&normalize(&p.symbol))
                .map(|spot| Candidate { spot, perp: p })
        })
        .collect()
}
