//! Room registry trait.

use std::sync::Arc;

use async_trait::async_trait;

use super::{room::Room, value_object::RoomId};

/// Shared mapping from room id to [`Room`].
///
/// Rooms are created on first reference and never removed. Implementations
/// must be safe under concurrent use from any number of connections.
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Return the room for `room_id`, opening it on first reference.
    ///
    /// Concurrent first references to the same id yield the same room and
    /// start exactly one broadcast loop.
    async fn get_or_create(&self, room_id: &RoomId) -> Arc<Room>;

    /// Look a room up without creating it.
    async fn find(&self, room_id: &RoomId) -> Option<Arc<Room>>;

    /// Every room, sorted by id.
    async fn list(&self) -> Vec<Arc<Room>>;

    async fn count_rooms(&self) -> usize;
}
