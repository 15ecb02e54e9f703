//! Shared application state.

use std::sync::Arc;

use crate::usecase::{GetRoomDetailUseCase, GetRoomsUseCase, RelayConnectionUseCase};

/// State handed to every handler.
pub struct AppState {
    /// RelayConnectionUseCase（接続ごとの中継ループ）
    pub relay_connection_usecase: Arc<RelayConnectionUseCase>,
    /// GetRoomsUseCase（ルーム一覧取得）
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// GetRoomDetailUseCase（ルーム詳細取得）
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
}
