use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::{Instrument, error, info};

use crate::error::AppError;
use crate::logger::{TraceId, record_counts, request_span};
use crate::market::compare::{self, CompareResponse};
use crate::market::mexc::{QuoteSource, fetch_all};
use crate::market::types::CompareMode;
use crate::time::now_iso;

/// Inbound header whose value, when present, is reused as the request's trace id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn QuoteSource>,
}

impl AppState {
    pub fn new(source: Arc<dyn QuoteSource>) -> Self {
        Self { source }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CompareQuery {
    #[serde(default)]
    pub mode: CompareMode,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/compare", get(compare_handler).options(preflight))
        .route("/health", get(health))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, OPTIONS"),
        ))
        .with_state(state)
}

async fn compare_handler(
    State(state): State<AppState>,
    Query(query): Query<CompareQuery>,
    headers: HeaderMap,
) -> Result<Json<CompareResponse>, AppError> {
    let trace_id = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(TraceId::new)
        .unwrap_or_default();
    let mode = query.mode;

    async move {
        let snapshot = fetch_all(state.source.as_ref()).await.map_err(|e| {
            error!(error = %e, venue = ?e.venue(), "quote fetch failed");
            AppError::from(e)
        })?;

        let response = compare::run(mode, &snapshot, now_iso());

        record_counts(snapshot.spot.len(), snapshot.perp.len(), response.total_pairs);
        info!(pairs = response.total_pairs, "comparison served");

        Ok::<_, AppError>(Json(response))
    }
    .instrument(request_span(mode, &trace_id))
    .await
}

/// CORS preflight: 200, empty body, no upstream calls.
async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn health() -> &'static str {
    "ok"
}
