//! UseCase: ルームへの参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() と Session::leave()
//!
//! ### なぜこのテストが必要か
//! - 初回参加で Room が作成され、以降は同じ Room が使われることを保証
//! - 切断時にメンバーから一度だけ削除されることを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加と退出
//! - エッジケース：同じユーザー名での複数接続、ブロードキャストで既に削除済みの退出

use std::sync::Arc;

use crate::domain::{
    CloseSignal, ConnectionHandle, ConnectionId, PusherChannel, Room, RoomId, RoomRepository,
    Username,
};

/// A connection's membership in a room, held by its relay loop.
#[derive(Debug)]
pub struct Session {
    room: Arc<Room>,
    connection_id: ConnectionId,
    username: Username,
    closed: CloseSignal,
}

impl Session {
    pub fn room(&self) -> &Arc<Room> {
        &self.room
    }

    pub fn connection_id(&self) -> ConnectionId {
        self.connection_id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Wait until the room closes this member's handle.
    ///
    /// Must not be awaited again once it has completed.
    pub async fn closed(&mut self) {
        // Err only means the handle was dropped instead of closed
        let _ = (&mut self.closed).await;
    }

    /// Leave the room.
    ///
    /// Returns `false` when the broadcast loop already dropped this member.
    pub async fn leave(self) -> bool {
        let removed = self.room.leave(&self.connection_id).await;
        if !removed {
            tracing::debug!(
                "Connection {} was already removed from room '{}'",
                self.connection_id,
                self.room.id()
            );
        }
        removed
    }
}

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    /// Repository（ルームレジストリの抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl JoinRoomUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// Register a connection into `room_id`, creating the room if needed.
    ///
    /// # Arguments
    ///
    /// * `room_id` - Room to join; any string, including empty
    /// * `username` - Join-time name stamped on every message of this session
    /// * `sender` - Outbound channel of the connection
    pub async fn execute(
        &self,
        room_id: RoomId,
        username: Username,
        sender: PusherChannel,
    ) -> Session {
        let room = self.repository.get_or_create(&room_id).await;
        let (handle, closed) = ConnectionHandle::with_close_signal(username.clone(), sender);
        let connection_id = room.join(handle).await;

        Session {
            room,
            connection_id,
            username,
            closed,
        }
    }
}
