use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::error::TickerError;
use crate::format::build_reply;
use crate::model::{find_entry, MarketEntry};
use crate::provider::MarketFeed;

#[derive(Clone)]
pub struct AppState {
    pub feed: Arc<dyn MarketFeed>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TickerParams {
    pub coin: Option<String>,
    #[serde(rename = "includePriceChange")]
    pub include_price_change: Option<String>,
    #[serde(rename = "includeLink")]
    pub include_link: Option<String>,
}

impl TickerParams {
    // Flags switch on only for the exact text "true".
    fn change_enabled(&self) -> bool {
        self.include_price_change.as_deref() == Some("true")
    }

    fn link_enabled(&self) -> bool {
        self.include_link.as_deref() == Some("true")
    }
}

/// The whole ticker pipeline: validate the token, fetch one snapshot,
/// check its shape, look the asset up, build the reply.
async fn respond(feed: &dyn MarketFeed, params: &TickerParams) -> Result<String, TickerError> {
    let wanted = params.coin.as_deref().unwrap_or("").trim().to_lowercase();
    if wanted.is_empty() {
        return Err(TickerError::MissingCoin);
    }

    let raw = feed.fetch_top().await?;

    // Provider-reported failure rides in an `error` field instead of the
    // entry array.
    match raw.get("error") {
        None | Some(Value::Null) => {}
        Some(Value::String(s)) if s.is_empty() => {}
        Some(Value::String(s)) => return Err(TickerError::Upstream(s.clone())),
        Some(other) => return Err(TickerError::Upstream(other.to_string())),
    }

    // Sanity check on the first element only; the typed decode below
    // covers the rest.
    let first_symbol_is_text = raw
        .get(0)
        .and_then(|entry| entry.get("symbol"))
        .is_some_and(Value::is_string);
    if !first_symbol_is_text {
        return Err(TickerError::Malformed);
    }

    let entries: Vec<MarketEntry> = serde_json::from_value(raw).map_err(|err| {
        warn!("snapshot failed typed decode: {err}");
        TickerError::Malformed
    })?;

    let entry = find_entry(&entries, &wanted).ok_or(TickerError::NotFound)?;

    Ok(build_reply(
        entry,
        params.change_enabled(),
        params.link_enabled(),
        Utc::now(),
    ))
}

async fn ticker_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TickerParams>,
) -> Response {
    match respond(state.feed.as_ref(), &params).await {
        Ok(text) => {
            info!("{text}");
            (StatusCode::OK, text).into_response()
        }
        Err(err) => {
            warn!("ticker request failed: {err}");
            err.into_response()
        }
    }
}

async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn serve(state: Arc<AppState>, port: u16) -> anyhow::Result<()> {
    let app = Router::new()
        .route("/", any(ticker_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
