//! Connection handle: a room member's write path.
//!
//! The read side of a connection is consumed by the relay use case; what a
//! room holds is only the outbound half, an unbounded channel drained into
//! the socket by the connection's pusher task.
//!
//! A handle created with [`ConnectionHandle::with_close_signal`] also fires a
//! [`CloseSignal`] when it is closed or dropped, so the relay loop reading
//! that connection stops as soon as the room lets go of it.

use std::{fmt, sync::Arc};

use tokio::sync::{mpsc, oneshot};
use uuid::Uuid;

use super::{entity::ChatMessage, error::MessagePushError, value_object::Username};

/// Outbound channel towards one connection.
pub type PusherChannel = mpsc::UnboundedSender<Arc<ChatMessage>>;

/// Resolves once the paired [`ConnectionHandle`] is closed or dropped.
pub type CloseSignal = oneshot::Receiver<()>;

/// Identity of one accepted connection.
///
/// Usernames may collide, so membership is keyed by this instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One joined client, as seen by its room.
///
/// Dropping the handle closes the outbound channel, which makes the pusher
/// task close the socket, and fires the close signal if there is one.
#[derive(Debug)]
pub struct ConnectionHandle {
    id: ConnectionId,
    username: Username,
    sender: PusherChannel,
    closer: Option<oneshot::Sender<()>>,
}

impl ConnectionHandle {
    pub fn new(username: Username, sender: PusherChannel) -> Self {
        Self {
            id: ConnectionId::generate(),
            username,
            sender,
            closer: None,
        }
    }

    /// Create a handle together with the signal its reader waits on.
    pub fn with_close_signal(username: Username, sender: PusherChannel) -> (Self, CloseSignal) {
        let (closer, signal) = oneshot::channel();
        let handle = Self {
            closer: Some(closer),
            ..Self::new(username, sender)
        };
        (handle, signal)
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Queue one message for this connection.
    ///
    /// Fails once the peer is gone.
    pub fn send(&self, message: Arc<ChatMessage>) -> Result<(), MessagePushError> {
        self.sender
            .send(message)
            .map_err(|_| MessagePushError::ConnectionClosed(self.id))
    }

    /// Close the write path and notify the reader.
    pub fn close(self) {
        tracing::debug!("Closing connection {} ('{}')", self.id, self.username);
        if let Some(closer) = self.closer {
            // the reader may already be gone
            let _ = closer.send(());
        }
    }
}
