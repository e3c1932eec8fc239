use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub mod coingecko;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Narrow seam over the upstream market-data provider: fetch the current
/// top-of-market page and decode it as JSON. Shape validation and lookup
/// happen in the request handler.
#[async_trait]
pub trait MarketFeed: Send + Sync {
    async fn fetch_top(&self) -> Result<Value, FeedError>;
}

// Convenience re-export
pub use coingecko::CoinGeckoClient;
