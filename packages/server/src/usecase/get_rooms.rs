//! UseCase: ルーム情報の取得

use std::sync::Arc;

use crate::domain::{MemberInfo, Room, RoomId, RoomRepository};

use super::error::GetRoomDetailError;

/// Point-in-time view of a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSnapshot {
    pub id: RoomId,
    pub members: Vec<MemberInfo>,
}

impl RoomSnapshot {
    async fn of(room: &Room) -> Self {
        Self {
            id: room.id().clone(),
            members: room.members().await,
        }
    }
}

/// ルーム一覧取得のユースケース
pub struct GetRoomsUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl GetRoomsUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// Every room the registry has seen, sorted by id.
    pub async fn execute(&self) -> Vec<RoomSnapshot> {
        let mut snapshots = Vec::new();
        for room in self.repository.list().await {
            snapshots.push(RoomSnapshot::of(&room).await);
        }
        snapshots
    }
}

/// ルーム詳細取得のユースケース
pub struct GetRoomDetailUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl GetRoomDetailUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// Look a room up by id without creating it.
    pub async fn execute(&self, room_id: String) -> Result<RoomSnapshot, GetRoomDetailError> {
        let room = self
            .repository
            .find(&RoomId::new(room_id.clone()))
            .await
            .ok_or(GetRoomDetailError::RoomNotFound(room_id))?;
        Ok(RoomSnapshot::of(&room).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ConnectionHandle, Username},
        infrastructure::repository::InMemoryRoomRepository,
    };
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_get_rooms_lists_members() {
        // テスト項目: ルーム一覧にメンバーが含まれる
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new());
        let room = repository.get_or_create(&RoomId::new("lobby")).await;
        let (tx, _rx) = mpsc::unbounded_channel();
        room.join(ConnectionHandle::new(Username::new("alice"), tx))
            .await;
        repository.get_or_create(&RoomId::new("empty")).await;
        let usecase = GetRoomsUseCase::new(repository);

        // when (操作):
        let rooms = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0].id.as_str(), "empty");
        assert!(rooms[0].members.is_empty());
        assert_eq!(rooms[1].id.as_str(), "lobby");
        assert_eq!(rooms[1].members[0].username.as_str(), "alice");
    }

    #[tokio::test]
    async fn test_get_room_detail_not_found() {
        // テスト項目: 存在しない Room は RoomNotFound になり、作成もされない
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new());
        let usecase = GetRoomDetailUseCase::new(repository.clone());

        // when (操作):
        let result = usecase.execute("ghost".to_string()).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(GetRoomDetailError::RoomNotFound("ghost".to_string()))
        );
        assert_eq!(repository.count_rooms().await, 0);
    }
}
