use std::sync::Arc;

use anyhow::Context;
use spread_backend::{
    api::{AppState, router},
    config::AppConfig,
    logger::init_tracing,
    market::mexc::MexcClient,
};
use tokio::net::TcpListener;

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = ?e, "failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let is_production = std::env::var("APP_ENV").unwrap_or_default() == "production";
    init_tracing(is_production);

    tracing::info!("Starting spread backend...");

    let cfg = AppConfig::from_env();

    let client = MexcClient::new(&cfg).context("failed to build MEXC client")?;
    let app = router(AppState::new(Arc::new(client)));

    let listener = TcpListener::bind(cfg.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.bind_addr))?;

    tracing::info!(
        addr = %cfg.bind_addr,
        spot_url = %cfg.spot_url,
        perp_url = %cfg.perp_url,
        "listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}
