//! Stockroom: a multi-room WebSocket chat relay.
//!
//! Clients join a named room, every message a member sends is broadcast to
//! the whole room, and `/stock=<SYMBOL>` messages additionally make the
//! server look up a quote and post it into the room.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
