//! Domain error types.

use thiserror::Error;

use super::{connection::ConnectionId, value_object::RoomId};

/// Failure to deliver a message to one member.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MessagePushError {
    /// The member's outbound channel is gone (peer disconnected or socket error).
    #[error("connection {0} is closed")]
    ConnectionClosed(ConnectionId),
}

/// Failure to enqueue onto a room's mailbox.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoomError {
    #[error("mailbox of room '{0}' is closed")]
    MailboxClosed(RoomId),
}

/// Why a connection's inbound message sequence ended.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReadError {
    /// The peer closed the connection.
    #[error("connection closed by peer")]
    Closed,

    #[error("transport error: {0}")]
    Transport(String),
}

/// Failure of a stock quote lookup.
///
/// Every failure class of the quote source is its own variant so callers and
/// tests can tell them apart.
#[derive(Debug, Error, PartialEq)]
pub enum QuoteError {
    /// Network or transport failure talking to the quote endpoint.
    #[error("quote request failed: {0}")]
    Transport(String),

    /// The endpoint answered with a non-success HTTP status.
    #[error("quote endpoint returned HTTP {0}")]
    Status(u16),

    /// The response body is not a readable table.
    #[error("malformed quote table: {0}")]
    Malformed(String),

    /// Header and data rows are both required.
    #[error("quote table has {0} row(s), expected at least 2")]
    TooFewRows(usize),

    /// The data row does not reach the price column.
    #[error("quote row has {0} column(s), expected at least 5")]
    TooFewColumns(usize),

    /// The source reported the price as not available.
    #[error("stock price data is not available for '{0}'")]
    Unavailable(String),

    #[error("invalid stock price '{value}': {reason}")]
    InvalidPrice { value: String, reason: String },
}
