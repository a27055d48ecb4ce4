use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_SPOT_URL: &str = "https://api.mexc.com/api/v3/ticker/bookTicker";
pub const DEFAULT_PERP_URL: &str = "https://contract.mexc.com/api/v1/contract/ticker";

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Address the HTTP listener binds to.
    pub bind_addr: SocketAddr,

    // =========================
    // Upstream venues
    // =========================
    /// Spot venue book-ticker endpoint.
    ///
    /// Must return a bare JSON array of `{ symbol, bidPrice, bidQty, askPrice, askQty }`.
    pub spot_url: String,

    /// Perpetual venue ticker endpoint.
    ///
    /// Must return an envelope whose `data` field holds the ticker array.
    pub perp_url: String,

    // =========================
    // Transport
    // =========================
    /// Whole-request timeout applied by the HTTP client to each upstream call.
    ///
    /// There is no retry: a timed out fetch fails the inbound request.
    pub http_timeout: Duration,

    /// Upstream fetches slower than this are logged under the `performance` target.
    pub slow_fetch: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            spot_url: DEFAULT_SPOT_URL.to_string(),
            perp_url: DEFAULT_PERP_URL.to_string(),
            http_timeout: Duration::from_secs(10),
            slow_fetch: Duration::from_millis(2_000),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    ///
    /// Missing keys keep their defaults. Values that fail to parse also keep
    /// their defaults and are reported at warn level.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            bind_addr: parsed(&lookup, "BIND_ADDR").unwrap_or(defaults.bind_addr),
            spot_url: lookup("MEXC_SPOT_URL").unwrap_or(defaults.spot_url),
            perp_url: lookup("MEXC_PERP_URL").unwrap_or(defaults.perp_url),
            http_timeout: parsed(&lookup, "HTTP_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.http_timeout),
            slow_fetch: parsed(&lookup, "SLOW_FETCH_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.slow_fetch),
        }
    }
}

fn parsed<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparseable config value");
            None
        }
    }
}
