//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::{
    domain::{QuoteFetcher, RoomRepository},
    usecase::{
        CommandDispatcher, GetRoomDetailUseCase, GetRoomsUseCase, JoinRoomUseCase,
        RelayConnectionUseCase, SendMessageUseCase,
    },
};

use super::{
    handler::{
        http::{get_room_detail, get_rooms, health_check},
        websocket::websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// WebSocket chat relay server
///
/// # Example
///
/// ```ignore
/// let server = Server::assemble(repository, fetcher);
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    /// RelayConnectionUseCase（接続ごとの中継ループ）
    relay_connection_usecase: Arc<RelayConnectionUseCase>,
    /// GetRoomsUseCase（ルーム一覧取得のユースケース）
    get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// GetRoomDetailUseCase（ルーム詳細取得のユースケース）
    get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
}

impl Server {
    pub fn new(
        relay_connection_usecase: Arc<RelayConnectionUseCase>,
        get_rooms_usecase: Arc<GetRoomsUseCase>,
        get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
    ) -> Self {
        Self {
            relay_connection_usecase,
            get_rooms_usecase,
            get_room_detail_usecase,
        }
    }

    /// Wire every use case around one registry and one quote fetcher.
    pub fn assemble(repository: Arc<dyn RoomRepository>, fetcher: Arc<dyn QuoteFetcher>) -> Self {
        let dispatcher = Arc::new(CommandDispatcher::new(fetcher));
        let join_room_usecase = Arc::new(JoinRoomUseCase::new(repository.clone()));
        let send_message_usecase = Arc::new(SendMessageUseCase::new(dispatcher));
        let relay_connection_usecase = Arc::new(RelayConnectionUseCase::new(
            join_room_usecase,
            send_message_usecase,
        ));

        Self::new(
            relay_connection_usecase,
            Arc::new(GetRoomsUseCase::new(repository.clone())),
            Arc::new(GetRoomDetailUseCase::new(repository)),
        )
    }

    /// Build the router without binding a socket.
    pub fn into_router(self) -> Router {
        let app_state = Arc::new(AppState {
            relay_connection_usecase: self.relay_connection_usecase,
            get_rooms_usecase: self.get_rooms_usecase,
            get_room_detail_usecase: self.get_room_detail_usecase,
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/", get(websocket_handler))
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(get_rooms))
            .route("/api/rooms/{room_id}", get(get_room_detail))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the server until a shutdown signal arrives
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.into_router();

        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!(
            "Stockroom relay listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/ws?room=<room>&username=<name>", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
