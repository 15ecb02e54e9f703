//! Domain layer.
//!
//! Entities, value objects and the traits the use cases depend on. Concrete
//! implementations of the traits live in the infrastructure layer.

pub mod command;
pub mod connection;
pub mod entity;
pub mod error;
pub mod quote;
pub mod repository;
pub mod room;
pub mod value_object;

pub use command::Command;
pub use connection::{CloseSignal, ConnectionHandle, ConnectionId, PusherChannel};
pub use entity::{ChatMessage, MessageOrigin, SYSTEM_USERNAME};
pub use error::{MessagePushError, QuoteError, ReadError, RoomError};
pub use quote::{QuoteFetcher, StockQuote};
#[cfg(test)]
pub use quote::MockQuoteFetcher;
pub use repository::RoomRepository;
pub use room::{MemberInfo, Room};
pub use value_object::{RoomId, Username};
