//! In-memory tests for the chat room manager.
//!
//! The `ChatServer` holds no database state, so join/leave/broadcast can be
//! exercised directly with unbounded channels.
//!
//! Run with: `cargo test --test chat_server_test`
use uuid::Uuid;

use ecoconecta_backend::chat::protocol::ServerMessage;
use ecoconecta_backend::chat::server::ChatServer;

#[tokio::test]
async fn broadcast_reaches_both_parties() {
    let server = ChatServer::new();
    let conversation_id = Uuid::new_v4();
    let client_id = Uuid::new_v4();
    let professional_id = Uuid::new_v4();

    let mut client_rx = server.join(conversation_id, client_id).await;
    let mut professional_rx = server.join(conversation_id, professional_id).await;

    // The client was already in the room, so it sees the professional come online.
    match client_rx.recv().await {
        Some(ServerMessage::Presence { user_id, online }) => {
            assert_eq!(user_id, professional_id);
            assert!(online);
        }
        other => panic!("expected presence update, got {other:?}"),
    }

    let message_id = Uuid::new_v4();
    server
        .broadcast(
            conversation_id,
            ServerMessage::NewMessage {
                id: message_id,
                sender_id: client_id,
                content: "hello".to_string(),
                created_at: "2025-06-01T12:00:00Z".to_string(),
            },
            None,
        )
        .await;

    for rx in [&mut client_rx, &mut professional_rx] {
        match rx.recv().await {
            Some(ServerMessage::NewMessage { id, content, .. }) => {
                assert_eq!(id, message_id);
                assert_eq!(content, "hello");
            }
            other => panic!("expected new message, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn broadcast_can_exclude_the_sender() {
    let server = ChatServer::new();
    let conversation_id = Uuid::new_v4();
    let typist_id = Uuid::new_v4();
    let other_id = Uuid::new_v4();

    let mut typist_rx = server.join(conversation_id, typist_id).await;
    let mut other_rx = server.join(conversation_id, other_id).await;

    // Drain the presence update the typist got when the other party joined.
    let _ = typist_rx.recv().await;

    server
        .broadcast(
            conversation_id,
            ServerMessage::UserTyping { user_id: typist_id },
            Some(typist_id),
        )
        .await;

    match other_rx.recv().await {
        Some(ServerMessage::UserTyping { user_id }) => assert_eq!(user_id, typist_id),
        other => panic!("expected typing indicator, got {other:?}"),
    }

    // The typist must not have received their own indicator.
    assert!(typist_rx.try_recv().is_err());
}

#[tokio::test]
async fn leave_updates_presence_and_cleans_the_room() {
    let server = ChatServer::new();
    let conversation_id = Uuid::new_v4();
    let leaver_id = Uuid::new_v4();
    let stayer_id = Uuid::new_v4();

    let _leaver_rx = server.join(conversation_id, leaver_id).await;
    let mut stayer_rx = server.join(conversation_id, stayer_id).await;

    assert!(server.is_user_online(conversation_id, leaver_id).await);

    server.leave(conversation_id, leaver_id).await;

    assert!(!server.is_user_online(conversation_id, leaver_id).await);

    match stayer_rx.recv().await {
        Some(ServerMessage::Presence { user_id, online }) => {
            assert_eq!(user_id, leaver_id);
            assert!(!online);
        }
        other => panic!("expected offline presence, got {other:?}"),
    }

    // Last one out empties the room entirely.
    server.leave(conversation_id, stayer_id).await;
    assert!(!server.is_user_online(conversation_id, stayer_id).await);
}

#[tokio::test]
async fn duplicate_connections_keep_presence_until_the_last_leaves() {
    let server = ChatServer::new();
    let conversation_id = Uuid::new_v4();
    let profile_id = Uuid::new_v4();

    let _first = server.join(conversation_id, profile_id).await;
    let _second = server.join(conversation_id, profile_id).await;

    server.leave(conversation_id, profile_id).await;
    assert!(server.is_user_online(conversation_id, profile_id).await);

    server.leave(conversation_id, profile_id).await;
    assert!(!server.is_user_online(conversation_id, profile_id).await);
}
