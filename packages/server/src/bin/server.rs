//! Stockroom relay server.
//!
//! Run with:
//! ```not_rust
//! PORT=8080 STOCK_API_BASE_URL=https://stooq.com/q/l/ \
//!   STOCK_API_PARAMS='?s={symbol}&f=sd2t2ohlcv&h&e=csv' \
//!   cargo run --bin stockroom-server
//! ```

use std::sync::Arc;

use clap::Parser;
use stockroom_server::{
    config::Config,
    infrastructure::{quote::HttpQuoteFetcher, repository::InMemoryRoomRepository},
    ui::Server,
};
use stockroom_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let config = Config::parse();

    // Initialize dependencies in order:
    // 1. Repository (room registry)
    // 2. QuoteFetcher
    // 3. Server (use cases + router)

    // 1. Create Repository (in-memory room registry)
    let repository = Arc::new(InMemoryRoomRepository::new());

    // 2. Create QuoteFetcher (HTTP implementation)
    let fetcher = match HttpQuoteFetcher::new(config.quote_endpoint(), config.quote_timeout()) {
        Ok(fetcher) => Arc::new(fetcher),
        Err(e) => {
            tracing::error!("Failed to create quote fetcher: {}", e);
            std::process::exit(1);
        }
    };

    // 3. Create and run the server
    let server = Server::assemble(repository, fetcher);
    if let Err(e) = server.run(config.host, config.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
