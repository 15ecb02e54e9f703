//! Stock quotes and the fetcher seam.

use std::fmt;

use async_trait::async_trait;

use super::error::QuoteError;

/// A price for one symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct StockQuote {
    pub symbol: String,
    pub price: f64,
}

impl StockQuote {
    pub fn new(symbol: impl Into<String>, price: f64) -> Self {
        Self {
            symbol: symbol.into(),
            price,
        }
    }
}

/// Formats as `<SYMBOL> quote is $<PRICE> per share`, price to two decimals.
impl fmt::Display for StockQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} quote is ${:.2} per share", self.symbol, self.price)
    }
}

/// Source of stock quotes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuoteFetcher: Send + Sync {
    /// Look up the current quote for `symbol`.
    async fn fetch(&self, symbol: &str) -> Result<StockQuote, QuoteError>;
}
