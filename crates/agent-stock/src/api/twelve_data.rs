//! Twelve Data API client
//!
//! Only two endpoints are used: `symbol_search` to turn a company name into
//! listings and `quote` to fetch the latest pricing for a ticker. Both answer
//! with flat JSON objects that are handed on as ordered [`Record`]s.

use crate::error::{Result, StockError};
use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};

/// Default Twelve Data API base URL
pub const DEFAULT_TWELVE_API_BASE: &str = "https://api.twelvedata.com";

/// A flat key/value record, in the key order the provider sent it
pub type Record = serde_json::Map<String, Value>;

/// Configuration for the Twelve Data client
#[derive(Debug, Clone)]
pub struct TwelveDataConfig {
    /// API key sent as `Authorization: apikey <key>`
    pub api_key: String,

    /// Base URL for the API
    pub api_base: String,

    /// Exchanges a ticker lookup may return, most preferred first
    pub exchanges: Vec<String>,

    /// Request timeout, none by default
    pub request_timeout: Option<Duration>,
}

impl Default for TwelveDataConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: DEFAULT_TWELVE_API_BASE.to_string(),
            exchanges: vec!["NYSE".to_string(), "NASDAQ".to_string()],
            request_timeout: None,
        }
    }
}

impl TwelveDataConfig {
    /// Create a config with the given API key and default settings
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Load from `TWELVE_API_KEY` and the optional `TWELVE_API_BASE`
    pub fn from_env() -> Result<Self> {
        let api_key = agent_utils::require_env("TWELVE_API_KEY")?;
        let api_base = agent_utils::env_or("TWELVE_API_BASE", DEFAULT_TWELVE_API_BASE);

        Ok(Self {
            api_key,
            api_base,
            ..Self::default()
        })
    }

    /// Set custom API base URL
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Replace the exchange allow-list
    pub fn with_exchanges<I, S>(mut self, exchanges: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exchanges = exchanges.into_iter().map(Into::into).collect();
        self
    }

    /// Set request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Whether listings on `exchange` may be returned
    pub fn allows_exchange(&self, exchange: &str) -> bool {
        self.exchanges.iter().any(|allowed| allowed == exchange)
    }
}

/// Twelve Data API client
#[derive(Debug, Clone)]
pub struct TwelveDataClient {
    client: Client,
    config: TwelveDataConfig,
}

impl TwelveDataClient {
    /// Create a new client
    pub fn new(config: TwelveDataConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(TwelveDataConfig::from_env()?)
    }

    /// Get the client configuration
    pub fn config(&self) -> &TwelveDataConfig {
        &self.config
    }

    /// Search listings matching `query`, in provider order
    #[instrument(skip(self))]
    pub async fn search_symbol(&self, query: &str) -> Result<Vec<Record>> {
        let Value::Object(mut body) = self.call("symbol_search", query).await? else {
            return Err(StockError::UnexpectedResponse(
                "symbol_search did not return an object".to_string(),
            ));
        };

        match body.remove("data") {
            Some(Value::Array(items)) => Ok(items
                .into_iter()
                .filter_map(|item| match item {
                    Value::Object(listing) => Some(listing),
                    _ => None,
                })
                .collect()),
            Some(_) => Err(StockError::UnexpectedResponse(
                "symbol_search data is not an array".to_string(),
            )),
            None if body.get("status").and_then(Value::as_str) == Some("error") => {
                let message = body
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown error");
                Err(StockError::ApiError(message.to_string()))
            }
            None => Err(StockError::UnexpectedResponse(
                "symbol_search returned no data".to_string(),
            )),
        }
    }

    /// Find the listing for `company` on an allowed exchange
    ///
    /// The first allowed listing in provider order wins. Returns `None` when
    /// the company has no listing on any allowed exchange.
    pub async fn lookup_ticker(&self, company: &str) -> Result<Option<Record>> {
        let listings = self.search_symbol(company).await?;
        let total = listings.len();

        let listing = listings.into_iter().find(|listing| {
            listing
                .get("exchange")
                .and_then(Value::as_str)
                .is_some_and(|exchange| self.config.allows_exchange(exchange))
        });

        debug!(
            company,
            listings = total,
            found = listing.is_some(),
            "Ticker lookup finished"
        );
        Ok(listing)
    }

    /// Fetch the latest quote for `ticker`
    ///
    /// The record is returned as sent. A provider error body (for an unknown
    /// symbol, say) is a record like any other.
    #[instrument(skip(self))]
    pub async fn get_quote(&self, ticker: &str) -> Result<Record> {
        match self.call("quote", ticker).await? {
            Value::Object(record) => Ok(record),
            other => Err(StockError::UnexpectedResponse(format!(
                "quote returned {other}"
            ))),
        }
    }

    /// GET `{base}/{function}?symbol={value}`
    async fn call(&self, function: &str, value: &str) -> Result<Value> {
        let url = format!("{}/{}", self.config.api_base.trim_end_matches('/'), function);

        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, format!("apikey {}", self.config.api_key))
            .query(&[("symbol", value)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<unreadable body: {e}>"));
            return Err(StockError::ApiError(format!("HTTP {status}: {body}")));
        }

        Ok(response.json().await?)
    }
}
