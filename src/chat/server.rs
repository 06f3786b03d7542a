use std::collections::HashMap;
use tokio::sync::{RwLock, mpsc};
use uuid::Uuid;

use crate::chat::protocol::ServerMessage;

/// A handle to send messages to a connected WebSocket client.
#[derive(Debug, Clone)]
pub struct ClientHandle {
    pub profile_id: Uuid,
    pub sender: mpsc::UnboundedSender<ServerMessage>,
}

/// Manages all active WebSocket connections, organized by conversation id.
///
/// Each conversation maps to a list of connected client handles. This allows
/// broadcasting new messages, read receipts, typing indicators, and presence
/// updates to both parties of a conversation.
pub struct ChatServer {
    /// conversation_id -> list of connected client handles
    rooms: RwLock<HashMap<Uuid, Vec<ClientHandle>>>,
}

impl ChatServer {
    pub fn new() -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new WebSocket connection for a conversation.
    /// Returns a receiver that the WebSocket session should listen on.
    pub async fn join(
        &self,
        conversation_id: Uuid,
        profile_id: Uuid,
    ) -> mpsc::UnboundedReceiver<ServerMessage> {
        let (tx, rx) = mpsc::unbounded_channel();

        let handle = ClientHandle {
            profile_id,
            sender: tx,
        };

        // Notify existing participants that this user came online.
        let presence_msg = ServerMessage::Presence {
            user_id: profile_id,
            online: true,
        };

        let mut rooms = self.rooms.write().await;
        let room = rooms.entry(conversation_id).or_insert_with(Vec::new);

        // Send presence to existing members before adding the new one.
        for client in room.iter() {
            if client.profile_id != profile_id {
                let _ = client.sender.send(presence_msg.clone());
            }
        }

        room.push(handle);

        rx
    }

    /// Remove a WebSocket connection for a conversation.
    pub async fn leave(&self, conversation_id: Uuid, profile_id: Uuid) {
        let mut rooms = self.rooms.write().await;

        if let Some(room) = rooms.get_mut(&conversation_id) {
            // Remove the first matching handle for this user.
            // (A user could have multiple connections, so only remove one.)
            if let Some(pos) = room.iter().position(|c| c.profile_id == profile_id) {
                room.remove(pos);
            }

            // Check if this user still has other connections in this room.
            let still_connected = room.iter().any(|c| c.profile_id == profile_id);

            if !still_connected {
                // Notify remaining participants that this user went offline.
                let presence_msg = ServerMessage::Presence {
                    user_id: profile_id,
                    online: false,
                };
                for client in room.iter() {
                    let _ = client.sender.send(presence_msg.clone());
                }
            }

            // Clean up empty rooms.
            if room.is_empty() {
                rooms.remove(&conversation_id);
            }
        }
    }

    /// Broadcast a message to all participants in a conversation, optionally
    /// excluding the sender.
    pub async fn broadcast(
        &self,
        conversation_id: Uuid,
        message: ServerMessage,
        exclude_user: Option<Uuid>,
    ) {
        let rooms = self.rooms.read().await;
        if let Some(room) = rooms.get(&conversation_id) {
            for client in room {
                if Some(client.profile_id) == exclude_user {
                    continue;
                }
                // If the send fails, the receiver has been dropped (disconnected)
                // and leave() will clean it up.
                let _ = client.sender.send(message.clone());
            }
        }
    }

    /// Check if a specific user is currently online in a conversation.
    pub async fn is_user_online(&self, conversation_id: Uuid, profile_id: Uuid) -> bool {
        let rooms = self.rooms.read().await;
        rooms
            .get(&conversation_id)
            .map(|room| room.iter().any(|c| c.profile_id == profile_id))
            .unwrap_or(false)
    }
}
