//! Room: membership set, mailbox and broadcast loop.
//!
//! ## Concurrency
//!
//! Each room owns one lock around its membership. Join, leave, inspection and
//! the broadcast loop's iterate-and-remove all go through it, so membership
//! is never read while another task mutates it.
//!
//! The mailbox is an unbounded channel with exactly one reader, the broadcast
//! loop started in [`Room::open`]. Publishing never blocks.

use std::{collections::HashMap, sync::Arc};

use tokio::sync::{Mutex, mpsc};

use super::{
    connection::{ConnectionHandle, ConnectionId},
    entity::ChatMessage,
    error::RoomError,
    value_object::{RoomId, Username},
};

type Members = HashMap<ConnectionId, ConnectionHandle>;

/// Snapshot of one member, for inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberInfo {
    pub connection_id: ConnectionId,
    pub username: Username,
}

/// A named room.
///
/// Rooms are created by the registry and live as long as it does. The
/// broadcast loop stops only when the room itself is dropped.
#[derive(Debug)]
pub struct Room {
    id: RoomId,
    members: Arc<Mutex<Members>>,
    mailbox: mpsc::UnboundedSender<ChatMessage>,
}

impl Room {
    /// Create an empty room and start its broadcast loop.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn open(id: RoomId) -> Arc<Self> {
        let members = Arc::new(Mutex::new(HashMap::new()));
        let (mailbox, inbox) = mpsc::unbounded_channel();

        tokio::spawn(broadcast_loop(id.clone(), members.clone(), inbox));
        tracing::info!("Room '{}' opened", id);

        Arc::new(Self {
            id,
            members,
            mailbox,
        })
    }

    pub fn id(&self) -> &RoomId {
        &self.id
    }

    /// Add a connection to the membership set.
    pub async fn join(&self, handle: ConnectionHandle) -> ConnectionId {
        let connection_id = handle.id();
        let mut members = self.members.lock().await;
        tracing::info!(
            "'{}' joined room '{}' as {}",
            handle.username(),
            self.id,
            connection_id
        );
        members.insert(connection_id, handle);
        connection_id
    }

    /// Remove a connection from the membership set.
    ///
    /// Returns `false` if it was already gone, e.g. dropped by the broadcast
    /// loop after a failed write.
    pub async fn leave(&self, connection_id: &ConnectionId) -> bool {
        let mut members = self.members.lock().await;
        match members.remove(connection_id) {
            Some(handle) => {
                tracing::info!("'{}' left room '{}'", handle.username(), self.id);
                handle.close();
                true
            }
            None => false,
        }
    }

    /// Enqueue a message for fan-out to every member.
    pub fn publish(&self, message: ChatMessage) -> Result<(), RoomError> {
        self.mailbox
            .send(message)
            .map_err(|_| RoomError::MailboxClosed(self.id.clone()))
    }

    /// Current members, sorted by username.
    pub async fn members(&self) -> Vec<MemberInfo> {
        let members = self.members.lock().await;
        let mut infos: Vec<MemberInfo> = members
            .values()
            .map(|handle| MemberInfo {
                connection_id: handle.id(),
                username: handle.username().clone(),
            })
            .collect();
        infos.sort_by(|a, b| {
            a.username
                .cmp(&b.username)
                .then(a.connection_id.cmp(&b.connection_id))
        });
        infos
    }

    pub async fn member_count(&self) -> usize {
        self.members.lock().await.len()
    }

    pub async fn is_member(&self, connection_id: &ConnectionId) -> bool {
        self.members.lock().await.contains_key(connection_id)
    }
}

/// Drain the mailbox, fanning each message out to the members present at
/// that moment.
async fn broadcast_loop(
    room_id: RoomId,
    members: Arc<Mutex<Members>>,
    mut inbox: mpsc::UnboundedReceiver<ChatMessage>,
) {
    while let Some(message) = inbox.recv().await {
        let message = Arc::new(message);
        let mut members = members.lock().await;
        fan_out(&room_id, &mut members, &message);
    }
    tracing::debug!("Broadcast loop of room '{}' stopped", room_id);
}

/// Deliver to every member, dropping the ones whose write fails.
///
/// Returns the number of members that received the message.
fn fan_out(room_id: &RoomId, members: &mut Members, message: &Arc<ChatMessage>) -> usize {
    members.retain(|_, handle| match handle.send(message.clone()) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(
                "Dropping '{}' from room '{}': {}",
                handle.username(),
                room_id,
                e
            );
            // the removed handle is dropped by retain, closing its channel
            false
        }
    });
    members.len()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::domain::MessageOrigin;

    const RECV_TIMEOUT: Duration = Duration::from_secs(1);

    fn member(name: &str) -> (ConnectionHandle, mpsc::UnboundedReceiver<Arc<ChatMessage>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ConnectionHandle::new(Username::new(name), tx), rx)
    }

    async fn recv(rx: &mut mpsc::UnboundedReceiver<Arc<ChatMessage>>) -> Option<Arc<ChatMessage>> {
        tokio::time::timeout(RECV_TIMEOUT, rx.recv())
            .await
            .expect("timed out waiting for broadcast")
    }

    #[tokio::test]
    async fn test_publish_reaches_every_member_including_sender() {
        // テスト項目: 送信者を含む全メンバーに 1 回ずつ配信される
        // given (前提条件):
        let room = Room::open(RoomId::new("lobby"));
        let (alice, mut alice_rx) = member("alice");
        let (bob, mut bob_rx) = member("bob");
        room.join(alice).await;
        room.join(bob).await;

        // when (操作):
        room.publish(ChatMessage::from_user(Username::new("alice"), "hello"))
            .unwrap();

        // then (期待する結果):
        let to_alice = recv(&mut alice_rx).await.unwrap();
        let to_bob = recv(&mut bob_rx).await.unwrap();
        assert_eq!(to_alice.text(), "hello");
        assert_eq!(to_bob.username().as_str(), "alice");
        assert_eq!(to_bob.origin(), MessageOrigin::User);
        assert!(alice_rx.try_recv().is_err());
        assert!(bob_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_messages_arrive_in_publish_order() {
        // テスト項目: メールボックスへの投入順に配信される
        // given (前提条件):
        let room = Room::open(RoomId::new("lobby"));
        let (alice, mut alice_rx) = member("alice");
        room.join(alice).await;

        // when (操作):
        for text in ["one", "two", "three"] {
            room.publish(ChatMessage::from_user(Username::new("alice"), text))
                .unwrap();
        }

        // then (期待する結果):
        for expected in ["one", "two", "three"] {
            assert_eq!(recv(&mut alice_rx).await.unwrap().text(), expected);
        }
    }

    #[tokio::test]
    async fn test_failed_write_drops_member_and_spares_others() {
        // テスト項目: 書き込みに失敗したメンバーだけが削除され、他は配信を受ける
        // given (前提条件):
        let room = Room::open(RoomId::new("lobby"));
        let (alice, mut alice_rx) = member("alice");
        let (bob, bob_rx) = member("bob");
        room.join(alice).await;
        let bob_id = room.join(bob).await;
        drop(bob_rx);

        // when (操作):
        room.publish(ChatMessage::system("first")).unwrap();

        // then (期待する結果):
        assert_eq!(recv(&mut alice_rx).await.unwrap().text(), "first");
        assert!(!room.is_member(&bob_id).await);
        assert_eq!(room.member_count().await, 1);

        room.publish(ChatMessage::system("second")).unwrap();
        assert_eq!(recv(&mut alice_rx).await.unwrap().text(), "second");
    }

    #[tokio::test]
    async fn test_leave_removes_exactly_once() {
        // テスト項目: leave は一度だけ成功し、以降は配信されない
        // given (前提条件):
        let room = Room::open(RoomId::new("lobby"));
        let (alice, mut alice_rx) = member("alice");
        let alice_id = room.join(alice).await;

        // when (操作):
        let first = room.leave(&alice_id).await;
        let second = room.leave(&alice_id).await;
        room.publish(ChatMessage::system("after leave")).unwrap();

        // then (期待する結果): ハンドルが閉じられ、チャンネルは終端する
        assert!(first);
        assert!(!second);
        assert_eq!(recv(&mut alice_rx).await, None);
    }

    #[tokio::test]
    async fn test_publish_to_empty_room_is_accepted() {
        // テスト項目: メンバーがいない Room にも publish できる
        // given (前提条件):
        let room = Room::open(RoomId::new("empty"));

        // when (操作):
        let result = room.publish(ChatMessage::system("nobody home"));

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(room.member_count().await, 0);
    }

    #[tokio::test]
    async fn test_members_are_sorted_by_username() {
        // テスト項目: メンバー一覧はユーザー名でソートされる
        // given (前提条件):
        let room = Room::open(RoomId::new("lobby"));
        let (charlie, _charlie_rx) = member("charlie");
        let (alice, _alice_rx) = member("alice");
        room.join(charlie).await;
        room.join(alice).await;

        // when (操作):
        let members = room.members().await;

        // then (期待する結果):
        let names: Vec<&str> = members.iter().map(|m| m.username.as_str()).collect();
        assert_eq!(names, vec!["alice", "charlie"]);
    }

    #[test]
    fn test_fan_out_counts_surviving_members() {
        // テスト項目: fan_out は配信できたメンバー数を返す
        // given (前提条件):
        let (alice, _alice_rx) = member("alice");
        let (bob, bob_rx) = member("bob");
        drop(bob_rx);
        let mut members: Members = HashMap::new();
        members.insert(alice.id(), alice);
        members.insert(bob.id(), bob);

        // when (操作):
        let delivered = fan_out(
            &RoomId::new("lobby"),
            &mut members,
            &Arc::new(ChatMessage::system("ping")),
        );

        // then (期待する結果):
        assert_eq!(delivered, 1);
        assert_eq!(members.len(), 1);
    }
}
