//! Use case layer.

mod dispatch_command;
mod error;
mod get_rooms;
mod join_room;
mod relay_connection;
mod send_message;

pub use dispatch_command::CommandDispatcher;
pub use error::{GetRoomDetailError, RelayError, SendMessageError};
pub use get_rooms::{GetRoomDetailUseCase, GetRoomsUseCase, RoomSnapshot};
pub use join_room::{JoinRoomUseCase, Session};
pub use relay_connection::RelayConnectionUseCase;
pub use send_message::SendMessageUseCase;
