//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - 送信者名の上書き、コマンド実行、メールボックスへの投入
//!
//! ### なぜこのテストが必要か
//! - クライアントが送ってきたユーザー名を信用しないことを保証（なりすまし防止）
//! - コマンドメッセージ自体も通常どおり配信されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：通常メッセージの送信
//! - 正常系：コマンドメッセージの送信（本文 + システム応答）

use std::sync::Arc;

use crate::domain::ChatMessage;

use super::{dispatch_command::CommandDispatcher, error::SendMessageError, join_room::Session};

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// CommandDispatcher（コマンド実行）
    dispatcher: Arc<CommandDispatcher>,
}

impl SendMessageUseCase {
    pub fn new(dispatcher: Arc<CommandDispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Relay one inbound message into the session's room.
    ///
    /// The message is stamped with the session's join-time username,
    /// whatever the client claimed. Commands are dispatched before the
    /// message itself is enqueued, so the command text is broadcast as well.
    pub fn execute(&self, session: &Session, text: String) -> Result<(), SendMessageError> {
        let message = ChatMessage::from_user(session.username().clone(), text);
        tracing::debug!(
            "Relaying message from '{}' into room '{}'",
            message.username(),
            session.room().id()
        );

        self.dispatcher.dispatch(session.room(), &message);
        session.room().publish(message)?;

        Ok(())
    }
}
