//! HTTP API client.
//!
//! `WishApi` is the seam the board talks to; `HttpWishApi` implements it with
//! `fetch` against the `/api` backend. Every response body is decoded through
//! `decode_envelope`, which applies the `success` discriminator uniformly and
//! ignores the HTTP status.

use async_trait::async_trait;
use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use serde_json::Value;
use wt_api_types::{
    AddWishRequest, AddWishResponse, Prediction, PredictionResponse, RecentWishesResponse,
    StatsResponse, Wish,
};

use crate::error::ApiError;

#[async_trait(?Send)]
pub trait WishApi {
    async fn recent_wishes(&self, limit: usize) -> Result<Vec<Wish>, ApiError>;
    async fn stats(&self) -> Result<u64, ApiError>;
    async fn add_wish(&self, text: &str) -> Result<AddWishResponse, ApiError>;
    async fn random_prediction(&self) -> Result<Prediction, ApiError>;
}

/// Decode a `{success, ...}` body into its payload.
pub fn decode_envelope<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| ApiError::Transport(format!("response is not JSON: {e}")))?;

    if value.get("success").and_then(Value::as_bool) != Some(true) {
        let message = ["error", "message"]
            .iter()
            .find_map(|key| value.get(*key).and_then(Value::as_str))
            .map(str::to_owned);
        return Err(ApiError::Application(message));
    }

    serde_json::from_value(value)
        .map_err(|e| ApiError::Transport(format!("unexpected response shape: {e}")))
}

pub struct HttpWishApi {
    base: String,
}

impl HttpWishApi {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_owned(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn get_text(&self, path: &str) -> Result<String, ApiError> {
        let response = Request::get(&self.url(path))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))
    }

    async fn post_json(&self, path: &str, body: &impl serde::Serialize) -> Result<String, ApiError> {
        let response = Request::post(&self.url(path))
            .json(body)
            .map_err(|e| ApiError::Transport(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))
    }
}

#[async_trait(?Send)]
impl WishApi for HttpWishApi {
    /// GET /wishes/recent
    async fn recent_wishes(&self, limit: usize) -> Result<Vec<Wish>, ApiError> {
        let body = self.get_text(&format!("/wishes/recent?limit={limit}")).await?;
        decode_envelope::<RecentWishesResponse>(&body).map(|r| r.wishes)
    }

    /// GET /stats
    async fn stats(&self) -> Result<u64, ApiError> {
        let body = self.get_text("/stats").await?;
        decode_envelope::<StatsResponse>(&body).map(|r| r.total_wishes)
    }

    /// POST /wish/add
    async fn add_wish(&self, text: &str) -> Result<AddWishResponse, ApiError> {
        let request = AddWishRequest {
            text: text.to_owned(),
        };
        let body = self.post_json("/wish/add", &request).await?;
        decode_envelope(&body)
    }

    /// GET /prediction/random
    async fn random_prediction(&self) -> Result<Prediction, ApiError> {
        let body = self.get_text("/prediction/random").await?;
        decode_envelope::<PredictionResponse>(&body).map(|r| r.prediction)
    }
}
