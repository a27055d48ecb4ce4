pub mod client;
pub mod errors;
pub mod types;

pub use client::MexcClient;
pub use errors::MexcError;

use async_trait::async_trait;

use crate::market::types::{PerpQuote, SpotQuote};

/// Source of one spot snapshot and one perpetual snapshot per request.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn fetch_spot(&self) -> Result<Vec<SpotQuote>, MexcError>;

    async fn fetch_perp(&self) -> Result<Vec<PerpQuote>, MexcError>;
}

/// Both venue snapshots taken for a single request.
#[derive(Debug, Clone, Default)]
pub struct QuoteSnapshot {
    pub spot: Vec<SpotQuote>,
    pub perp: Vec<PerpQuote>,
}

/// Fetches both venues concurrently and waits for both.
///
/// If both fail, the spot error is reported.
pub async fn fetch_all(source: &dyn QuoteSource) -> Result<QuoteSnapshot, MexcError> {
    let (spot, perp) = tokio::join!(source.fetch_spot(), source.fetch_perp());
    Ok(QuoteSnapshot {
        spot: spot?,
        perp: perp?,
    })
}
