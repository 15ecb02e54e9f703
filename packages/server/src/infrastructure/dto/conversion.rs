//! Conversion logic between DTOs and domain entities.

use crate::domain::{self, ChatMessage, MemberInfo};
use crate::infrastructure::dto::{http, websocket as dto};

// ========================================
// Domain Entity → DTO
// ========================================

impl From<domain::MessageOrigin> for dto::MessageOrigin {
    fn from(origin: domain::MessageOrigin) -> Self {
        match origin {
            domain::MessageOrigin::User => Self::User,
            domain::MessageOrigin::System => Self::System,
        }
    }
}

impl From<&ChatMessage> for dto::OutboundMessage {
    fn from(message: &ChatMessage) -> Self {
        Self {
            username: message.username().as_str().to_string(),
            text: message.text().to_string(),
            origin: message.origin().into(),
        }
    }
}

impl From<MemberInfo> for http::MemberDetailDto {
    fn from(member: MemberInfo) -> Self {
        Self {
            connection_id: member.connection_id.to_string(),
            username: member.username.into_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConnectionId, Username};

    #[test]
    fn test_user_message_to_dto() {
        // テスト項目: ユーザーメッセージが DTO に変換される
        // given (前提条件):
        let message = ChatMessage::from_user(Username::new("alice"), "Hello!");

        // when (操作):
        let dto_msg = dto::OutboundMessage::from(&message);

        // then (期待する結果):
        assert_eq!(dto_msg.username, "alice");
        assert_eq!(dto_msg.text, "Hello!");
        assert_eq!(dto_msg.origin, dto::MessageOrigin::User);
    }

    #[test]
    fn test_system_message_to_dto() {
        // テスト項目: システムメッセージは origin が system になる
        let dto_msg = dto::OutboundMessage::from(&ChatMessage::system("quote"));
        assert_eq!(dto_msg.origin, dto::MessageOrigin::System);
        assert_eq!(dto_msg.username, domain::SYSTEM_USERNAME);
    }

    #[test]
    fn test_member_info_to_dto() {
        // テスト項目: MemberInfo が DTO に変換される
        // given (前提条件):
        let connection_id = ConnectionId::generate();
        let member = MemberInfo {
            connection_id,
            username: Username::new("bob"),
        };

        // when (操作):
        let dto_member: http::MemberDetailDto = member.into();

        // then (期待する結果):
        assert_eq!(dto_member.connection_id, connection_id.to_string());
        assert_eq!(dto_member.username, "bob");
    }
}
