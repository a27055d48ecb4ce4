use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::AppConfig;
use crate::logger::warn_if_slow;
use crate::market::mexc::QuoteSource;
use crate::market::mexc::errors::MexcError;
use crate::market::mexc::types::{PerpEnvelope, decode_rows};
use crate::market::types::{PerpQuote, SpotQuote, Venue};

/// HTTP client for the MEXC spot book-ticker and contract ticker endpoints.
#[derive(Clone)]
pub struct MexcClient {
    http: Client,
    spot_url: String,
    perp_url: String,
    slow_fetch: Duration,
}

impl MexcClient {
    pub fn new(cfg: &AppConfig) -> Result<Self, MexcError> {
        let http = Client::builder()
            .timeout(cfg.http_timeout)
            .pool_idle_timeout(Duration::from_secs(30))
            .tcp_keepalive(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            spot_url: cfg.spot_url.clone(),
            perp_url: cfg.perp_url.clone(),
            slow_fetch: cfg.slow_fetch,
        })
    }

    /// Single GET, no retry. Non-2xx is `Upstream`, transport failure is
    /// `Network`, an undecodable body is `Parse`.
    async fn get_json<T: DeserializeOwned>(&self, venue: Venue, url: &str) -> Result<T, MexcError> {
        let started = Instant::now();

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| MexcError::Network { venue, source })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(MexcError::Upstream {
                venue,
                status: status.as_u16(),
            });
        }

        let body = resp
            .bytes()
            .await
            .map_err(|source| MexcError::Network { venue, source })?;

        let parsed =
            serde_json::from_slice(&body).map_err(|source| MexcError::Parse { venue, source })?;

        debug!(
            %venue,
            bytes = body.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "venue snapshot fetched"
        );

        Ok(parsed)
    }
}

#[async_trait]
impl QuoteSource for MexcClient {
    #[instrument(skip(self), fields(url = %self.spot_url), level = "debug")]
    async fn fetch_spot(&self) -> Result<Vec<SpotQuote>, MexcError> {
        let rows = warn_if_slow(
            "spot_fetch",
            self.slow_fetch,
            self.get_json::<Vec<Value>>(Venue::Spot, &self.spot_url),
        )
        .await?;

        Ok(decode_rows(Venue::Spot, rows))
    }

    #[instrument(skip(self), fields(url = %self.perp_url), level = "debug")]
    async fn fetch_perp(&self) -> Result<Vec<PerpQuote>, MexcError> {
        let envelope = warn_if_slow(
            "perp_fetch",
            self.slow_fetch,
            self.get_json::<PerpEnvelope>(Venue::Perpetual, &self.perp_url),
        )
        .await?;

        Ok(envelope.into_quotes())
    }
}
