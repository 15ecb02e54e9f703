//! Stock quote source over HTTP.
//!
//! The endpoint answers with a small CSV table: a header row, then one data
//! row whose fifth column holds the price.

mod http;
mod table;

pub use http::{HttpQuoteFetcher, QuoteEndpoint};
pub use table::{PRICE_COLUMN, PRICE_UNAVAILABLE, parse_quote_table};
