//! WebSocket message DTOs.

use serde::{Deserialize, Serialize};

/// Author kind on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageOrigin {
    User,
    System,
}

/// Message sent by a client.
///
/// `username` is accepted for compatibility and ignored; unknown fields such
/// as `room` are skipped. A missing `text` decodes as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InboundMessage {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub text: String,
}

impl InboundMessage {
    /// Decode a text frame.
    ///
    /// Frames that are not a JSON object are taken as plain text. An object
    /// whose fields have the wrong types yields an empty text.
    pub fn from_frame(frame: &str) -> Self {
        match serde_json::from_str::<serde_json::Value>(frame) {
            Ok(value @ serde_json::Value::Object(_)) => serde_json::from_value(value)
                .unwrap_or_else(|e| {
                    tracing::warn!("Message object has invalid fields, relaying empty text: {}", e);
                    Self::default()
                }),
            _ => {
                tracing::warn!("Frame is not a JSON message, using raw text");
                Self {
                    username: None,
                    text: frame.to_string(),
                }
            }
        }
    }
}

/// Message broadcast to room members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub username: String,
    pub text: String,
    pub origin: MessageOrigin,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inbound_ignores_extra_fields() {
        // テスト項目: room など未知のフィールドは無視される
        // given (前提条件):
        let frame = r#"{"username":"mallory","text":"hi","room":"lobby"}"#;

        // when (操作):
        let message = InboundMessage::from_frame(frame);

        // then (期待する結果):
        assert_eq!(message.text, "hi");
        assert_eq!(message.username.as_deref(), Some("mallory"));
    }

    #[test]
    fn test_inbound_without_username() {
        // テスト項目: username がなくてもデコードできる
        let message = InboundMessage::from_frame(r#"{"text":"/stock=AAPL.US"}"#);
        assert_eq!(message.text, "/stock=AAPL.US");
        assert_eq!(message.username, None);
    }

    #[test]
    fn test_inbound_plain_text_fallback() {
        // テスト項目: JSON でないフレームはそのまま本文として扱われる
        let message = InboundMessage::from_frame("just typing");
        assert_eq!(message.text, "just typing");
        assert_eq!(message.username, None);
    }

    #[test]
    fn test_inbound_object_without_text_is_empty_message() {
        // テスト項目: text の無い JSON オブジェクトはフレーム全体ではなく空の本文になる
        // given (前提条件):
        let frame = r#"{"username":"mallory"}"#;

        // when (操作):
        let message = InboundMessage::from_frame(frame);

        // then (期待する結果):
        assert_eq!(message.text, "");
        assert_eq!(message.username.as_deref(), Some("mallory"));
    }

    #[test]
    fn test_inbound_object_with_invalid_text_is_empty_message() {
        // テスト項目: text の型が不正な JSON オブジェクトも生のフレームとしては扱われない
        let message = InboundMessage::from_frame(r#"{"username":"mallory","text":42}"#);
        assert_eq!(message, InboundMessage::default());
    }

    #[test]
    fn test_inbound_json_scalar_is_plain_text() {
        // テスト項目: オブジェクトでない JSON (数値など) は入力どおりの本文になる
        let message = InboundMessage::from_frame("42");
        assert_eq!(message.text, "42");
    }

    #[test]
    fn test_outbound_wire_format() {
        // テスト項目: 送信メッセージの JSON 形式
        // given (前提条件):
        let message = OutboundMessage {
            username: "stock-bot".to_string(),
            text: "AAPL.US quote is $1.00 per share".to_string(),
            origin: MessageOrigin::System,
        };

        // when (操作):
        let json = serde_json::to_value(&message).unwrap();

        // then (期待する結果):
        assert_eq!(
            json,
            serde_json::json!({
                "username": "stock-bot",
                "text": "AAPL.US quote is $1.00 per share",
                "origin": "system",
            })
        );
    }
}
