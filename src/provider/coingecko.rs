use async_trait::async_trait;
use serde_json::Value;

use super::{FeedError, MarketFeed};

const BASE_URL: &str = "https://api.coingecko.com";

// Top 10 by market cap, USD, with 1h/24h/7d change windows and no
// sparkline series.
const MARKETS_QUERY: &str = "vs_currency=usd&order=market_cap_desc&per_page=10&page=1&sparkline=false&price_change_percentage=1h,24h,7d";

#[derive(Clone)]
pub struct CoinGeckoClient {
    http: reqwest::Client,
}

impl CoinGeckoClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    fn markets_url() -> String {
        format!("{BASE_URL}/api/v3/coins/markets?{MARKETS_QUERY}")
    }
}

#[async_trait]
impl MarketFeed for CoinGeckoClient {
    async fn fetch_top(&self) -> Result<Value, FeedError> {
        // Error payloads come back with non-2xx statuses but a JSON body,
        // so the status is not checked here; the handler inspects the
        // decoded value instead.
        let raw: Value = self
            .http
            .get(Self::markets_url())
            .send()
            .await?
            .json()
            .await?;

        Ok(raw)
    }
}
