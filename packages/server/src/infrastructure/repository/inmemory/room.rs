//! In-memory room registry.
//!
//! A `HashMap` behind one lock. The lock covers only the map; each room
//! guards its own membership.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Room, RoomId, RoomRepository};

/// Registry owned by the server and injected into the use cases.
#[derive(Default)]
pub struct InMemoryRoomRepository {
    rooms: Mutex<HashMap<RoomId, Arc<Room>>>,
}

impl InMemoryRoomRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn get_or_create(&self, room_id: &RoomId) -> Arc<Room> {
        // Held across check and insert so a room is opened at most once.
        let mut rooms = self.rooms.lock().await;
        rooms
            .entry(room_id.clone())
            .or_insert_with(|| Room::open(room_id.clone()))
            .clone()
    }

    async fn find(&self, room_id: &RoomId) -> Option<Arc<Room>> {
        let rooms = self.rooms.lock().await;
        rooms.get(room_id).cloned()
    }

    async fn list(&self) -> Vec<Arc<Room>> {
        let rooms = self.rooms.lock().await;
        let mut list: Vec<Arc<Room>> = rooms.values().cloned().collect();
        list.sort_by(|a, b| a.id().cmp(b.id()));
        list
    }

    async fn count_rooms(&self) -> usize {
        self.rooms.lock().await.len()
    }
}
