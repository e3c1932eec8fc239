use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::provider::FeedError;

/// Everything the ticker endpoint can answer with besides a reply text.
/// Variant messages are the response bodies, one line each.
#[derive(Error, Debug)]
pub enum TickerError {
    #[error("No coin/ticker found in parameters.")]
    MissingCoin,

    #[error("Coin/ticker was not found in top 250.")]
    NotFound,

    #[error("CoinGecko API reported an error ({0}).")]
    Upstream(String),

    #[error("Malformed API response.")]
    Malformed,

    #[error("Upstream request failed.")]
    Feed(#[from] FeedError),
}

impl TickerError {
    pub fn status(&self) -> StatusCode {
        match self {
            TickerError::MissingCoin | TickerError::NotFound => StatusCode::BAD_REQUEST,
            TickerError::Upstream(_) | TickerError::Malformed | TickerError::Feed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for TickerError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}
