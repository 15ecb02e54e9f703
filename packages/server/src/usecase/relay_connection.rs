//! UseCase: 接続ごとのメッセージ中継ループ
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RelayConnectionUseCase::execute() メソッド
//! - 参加 → 受信ループ → 退出 のライフサイクル全体
//!
//! ### なぜこのテストが必要か
//! - 読み込み失敗時にメンバーから一度だけ削除されることを保証
//! - Room から削除された接続が中継を続けないことを保証
//! - 受信したメッセージが Room 全体に配信されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：メッセージ中継後のクローズ
//! - 異常系：トランスポートエラーでの終了
//! - 異常系：書き込み失敗で Room から削除された後の受信

use std::sync::Arc;

use futures_util::{Stream, StreamExt};

use crate::domain::{PusherChannel, ReadError, RoomId, Username};

use super::{error::RelayError, join_room::JoinRoomUseCase, send_message::SendMessageUseCase};

/// Per-connection control loop.
pub struct RelayConnectionUseCase {
    join_room: Arc<JoinRoomUseCase>,
    send_message: Arc<SendMessageUseCase>,
}

impl RelayConnectionUseCase {
    pub fn new(join_room: Arc<JoinRoomUseCase>, send_message: Arc<SendMessageUseCase>) -> Self {
        Self {
            join_room,
            send_message,
        }
    }

    /// Join `room_id`, relay every inbound message into it, then leave.
    ///
    /// Runs until `inbound` ends or yields an error, or until the room drops
    /// this member after a failed write. A peer close and a drop by the room
    /// both end the loop with `Ok(())`.
    ///
    /// # Arguments
    ///
    /// * `sender` - Outbound channel handed to the room; the loop keeps no copy
    /// * `inbound` - Message texts read from the peer
    pub async fn execute<S>(
        &self,
        room_id: RoomId,
        username: Username,
        sender: PusherChannel,
        mut inbound: S,
    ) -> Result<(), RelayError>
    where
        S: Stream<Item = Result<String, ReadError>> + Unpin,
    {
        let mut session = self.join_room.execute(room_id, username, sender).await;

        let outcome = loop {
            tokio::select! {
                item = inbound.next() => match item {
                    Some(Ok(text)) => {
                        if let Err(e) = self.send_message.execute(&session, text) {
                            break Err(RelayError::from(e));
                        }
                    }
                    Some(Err(ReadError::Closed)) | None => break Ok(()),
                    Some(Err(e)) => break Err(RelayError::from(e)),
                },
                _ = session.closed() => {
                    tracing::warn!(
                        "Room '{}' dropped '{}', ending its relay",
                        session.room().id(),
                        session.username()
                    );
                    break Ok(());
                }
            }
        };

        tracing::info!(
            "'{}' disconnected from room '{}'",
            session.username(),
            session.room().id()
        );
        session.leave().await;

        outcome
    }
}
