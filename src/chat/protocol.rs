use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ── Client -> Server messages ──

/// Messages the client sends to the server over WebSocket.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Send a chat message.
    SendMessage { content: String },
    /// Mark every message addressed to the caller in this conversation as read.
    MarkRead,
    /// Notify the other party that the user is typing.
    Typing,
    /// Notify the other party that the user stopped typing.
    StopTyping,
}

// ── Server -> Client messages ──

/// Messages the server sends to the client over WebSocket.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// A new message was received (or echo of the sender's own message).
    NewMessage {
        id: Uuid,
        sender_id: Uuid,
        content: String,
        created_at: String,
    },
    /// The counterpart caught up on the conversation.
    ConversationRead { reader_id: Uuid },
    /// The other user is typing.
    UserTyping { user_id: Uuid },
    /// The other user stopped typing.
    UserStopTyping { user_id: Uuid },
    /// Presence update: a user came online or went offline in this conversation.
    Presence { user_id: Uuid, online: bool },
    /// An error occurred.
    Error { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_messages_parse_by_snake_case_tag() {
        let msg: ClientMessage =
            serde_json::from_str(r#"{"type":"send_message","content":"hello"}"#).unwrap();
        assert!(matches!(msg, ClientMessage::SendMessage { content } if content == "hello"));

        let msg: ClientMessage = serde_json::from_str(r#"{"type":"mark_read"}"#).unwrap();
        assert!(matches!(msg, ClientMessage::MarkRead));

        assert!(serde_json::from_str::<ClientMessage>(r#"{"type":"unknown"}"#).is_err());
    }

    #[test]
    fn server_messages_serialize_with_tag_field() {
        let reader_id = Uuid::new_v4();
        let json =
            serde_json::to_value(ServerMessage::ConversationRead { reader_id }).unwrap();
        assert_eq!(json["type"], "conversation_read");
        assert_eq!(json["reader_id"], reader_id.to_string());
    }
}
