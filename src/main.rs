use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

mod error;
mod format;
mod model;
mod provider;
mod server;

use crate::provider::{CoinGeckoClient, MarketFeed};
use crate::server::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // init logging
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let feed: Arc<dyn MarketFeed> = Arc::new(CoinGeckoClient::new());
    let state = Arc::new(AppState { feed });

    // start HTTP server on 8080
    server::serve(state, 8080).await?;

    Ok(())
}
