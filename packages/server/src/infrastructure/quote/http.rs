//! `QuoteFetcher` backed by an HTTP CSV endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::domain::{QuoteError, QuoteFetcher, StockQuote};

use super::table::parse_quote_table;

/// User agent sent with quote requests.
const USER_AGENT: &str = concat!("stockroom/", env!("CARGO_PKG_VERSION"));

/// Base URL and query template of the quote endpoint.
///
/// The template marks where the symbol goes with `{symbol}`; the older `%s`
/// marker is accepted as well.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteEndpoint {
    base_url: String,
    params: String,
}

impl QuoteEndpoint {
    pub fn new(base_url: impl Into<String>, params: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            params: params.into(),
        }
    }

    /// Request URL for `symbol`, percent-encoded into the template.
    pub fn url_for(&self, symbol: &str) -> String {
        let encoded = urlencoding::encode(symbol);
        let params = self
            .params
            .replace("{symbol}", &encoded)
            .replace("%s", &encoded);
        format!("{}{}", self.base_url, params)
    }
}

/// Fetches quotes with `reqwest` and parses the CSV reply.
pub struct HttpQuoteFetcher {
    client: Client,
    endpoint: QuoteEndpoint,
}

impl HttpQuoteFetcher {
    /// Create a fetcher whose requests give up after `timeout`.
    pub fn new(endpoint: QuoteEndpoint, timeout: Duration) -> Result<Self, QuoteError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| QuoteError::Transport(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl QuoteFetcher for HttpQuoteFetcher {
    async fn fetch(&self, symbol: &str) -> Result<StockQuote, QuoteError> {
        let url = self.endpoint.url_for(symbol);
        tracing::debug!("Fetching quote for '{}' from {}", symbol, url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| QuoteError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(QuoteError::Status(response.status().as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| QuoteError::Transport(format!("failed to read response: {}", e)))?;

        parse_quote_table(symbol, &body)
    }
}
