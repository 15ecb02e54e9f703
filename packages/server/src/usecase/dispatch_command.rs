//! UseCase: チャットコマンドの実行
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - CommandDispatcher::dispatch() メソッド
//! - `/stock=<SYMBOL>` で株価取得が 1 回だけ起動され、結果が Room に流れること
//!
//! ### なぜこのテストが必要か
//! - コマンド以外のメッセージで外部 API が呼ばれないことを保証
//! - 取得結果・取得失敗のどちらもシステムメッセージとして Room に届くことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：株価の取得成功
//! - 異常系：取得失敗（データなし）
//! - エッジケース：コマンドに似た通常メッセージ

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::domain::{ChatMessage, Command, QuoteFetcher, Room};

/// Runs commands found in member messages.
pub struct CommandDispatcher {
    /// QuoteFetcher（株価取得の抽象化）
    fetcher: Arc<dyn QuoteFetcher>,
}

impl CommandDispatcher {
    pub fn new(fetcher: Arc<dyn QuoteFetcher>) -> Self {
        Self { fetcher }
    }

    /// Launch the side task for a command in `message`, if there is one.
    ///
    /// Returns immediately; the reply is published into `room` as a system
    /// message once the lookup finishes. Failures are logged and published
    /// too, never returned to the caller.
    pub fn dispatch(&self, room: &Arc<Room>, message: &ChatMessage) -> Option<JoinHandle<()>> {
        match Command::parse(message.text())? {
            Command::StockQuote { symbol } => {
                tracing::debug!(
                    "'{}' requested a quote for '{}' in room '{}'",
                    message.username(),
                    symbol,
                    room.id()
                );
                let fetcher = self.fetcher.clone();
                let room = room.clone();
                Some(tokio::spawn(async move {
                    let reply = quote_reply(fetcher.as_ref(), &symbol).await;
                    if let Err(e) = room.publish(reply) {
                        tracing::warn!("Failed to publish quote for '{}': {}", symbol, e);
                    }
                }))
            }
        }
    }
}

async fn quote_reply(fetcher: &dyn QuoteFetcher, symbol: &str) -> ChatMessage {
    match fetcher.fetch(symbol).await {
        Ok(quote) => ChatMessage::system(quote.to_string()),
        Err(e) => {
            tracing::warn!("Quote lookup for '{}' failed: {}", symbol, e);
            ChatMessage::system(format!("Could not fetch a quote for {}: {}", symbol, e))
        }
    }
}
