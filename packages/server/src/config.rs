//! Process configuration.
//!
//! Every option can be given on the command line or through the environment
//! variable of the same name. Missing required options abort startup.

use std::time::Duration;

use clap::Parser;

use crate::infrastructure::quote::QuoteEndpoint;

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "stockroom-server")]
#[command(about = "Multi-room WebSocket chat relay with stock quotes", long_about = None)]
pub struct Config {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT")]
    pub port: u16,

    /// Base URL of the quote endpoint
    #[arg(long, env = "STOCK_API_BASE_URL")]
    pub stock_api_base_url: String,

    /// Query template appended to the base URL; `{symbol}` marks the symbol
    #[arg(long, env = "STOCK_API_PARAMS")]
    pub stock_api_params: String,

    /// Timeout of one quote request, in seconds
    #[arg(long, env = "STOCK_API_TIMEOUT_SECS", default_value_t = 10)]
    pub stock_api_timeout_secs: u64,
}

impl Config {
    pub fn quote_endpoint(&self) -> QuoteEndpoint {
        QuoteEndpoint::new(&self.stock_api_base_url, &self.stock_api_params)
    }

    pub fn quote_timeout(&self) -> Duration {
        Duration::from_secs(self.stock_api_timeout_secs)
    }
}
