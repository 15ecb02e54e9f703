//! Parsing of the quote endpoint's CSV response.

use crate::domain::{QuoteError, StockQuote};

/// Column of the data row holding the price.
pub const PRICE_COLUMN: usize = 4;

/// Price value the endpoint uses for unknown symbols.
pub const PRICE_UNAVAILABLE: &str = "N/D";

/// Extract the quote for `symbol` from a CSV response body.
///
/// Row 0 is the header and row 1 the data; the price is read from
/// [`PRICE_COLUMN`] of row 1.
pub fn parse_quote_table(symbol: &str, body: &str) -> Result<StockQuote, QuoteError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(body.as_bytes());
    let records = reader
        .records()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| QuoteError::Malformed(e.to_string()))?;

    let row = match records.get(1) {
        Some(row) => row,
        None => return Err(QuoteError::TooFewRows(records.len())),
    };
    let raw_price = row
        .get(PRICE_COLUMN)
        .ok_or(QuoteError::TooFewColumns(row.len()))?
        .trim();

    if raw_price == PRICE_UNAVAILABLE {
        return Err(QuoteError::Unavailable(symbol.to_string()));
    }

    let price: f64 = raw_price
        .parse()
        .map_err(|e: std::num::ParseFloatError| QuoteError::InvalidPrice {
            value: raw_price.to_string(),
            reason: e.to_string(),
        })?;
    if !price.is_finite() {
        return Err(QuoteError::InvalidPrice {
            value: raw_price.to_string(),
            reason: "price is not a finite number".to_string(),
        });
    }

    Ok(StockQuote::new(symbol, price))
}
