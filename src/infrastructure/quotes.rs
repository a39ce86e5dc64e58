use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

const QUOTE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("Twelve Data API key not configured")]
    KeyNotConfigured,
    #[error("quote request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Passthrough to the Twelve Data quote API, keeping the API key on the
/// server side. The provider's JSON is returned opaquely.
pub struct QuoteProxy {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl QuoteProxy {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(QUOTE_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            api_key,
        })
    }

    pub async fn quote(&self, symbol: &str) -> Result<Value, QuoteError> {
        let key = self.api_key.as_ref().ok_or(QuoteError::KeyNotConfigured)?;
        let body = self
            .http
            .get(format!("{}/quote", self.base_url))
            .query(&[("symbol", symbol), ("apikey", key)])
            .send()
            .await?
            .json()
            .await?;
        Ok(body)
    }
}
