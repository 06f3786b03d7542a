use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::authorization::verify_conversation_party;
use crate::auth::middleware::AuthenticatedUser;
use crate::chat::protocol::ServerMessage;
use crate::chat::server::ChatServer;
use crate::db::conversations as conversation_db;
use crate::db::demands as demand_db;
use crate::db::messages as message_db;
use crate::db::profiles as profile_db;
use crate::models::conversations::{ConversationSummary, StartConversation, orient_pair};
use crate::models::messages::{CreateMessage, MessageQuery, MessageResponse, SendMessageRequest};

/// POST /api/chat/conversations — get or create the conversation between the
/// caller and another profile. The pair must be one client and one
/// professional; the unique pair index guarantees both callers of a race end
/// up in the same conversation.
pub async fn start_conversation(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<StartConversation>,
) -> impl Responder {
    let input = body.into_inner();

    if input.participant_id == user.0.id {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "You cannot start a conversation with yourself",
        }));
    }

    let participant = match profile_db::get_profile_by_id(db.get_ref(), input.participant_id).await
    {
        Ok(Some(p)) => p,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Profile {} not found", input.participant_id),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    let (client, professional) = match orient_pair(&user.0, &participant) {
        Some(pair) => pair,
        None => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "error": "Conversations connect a client with a professional",
            }));
        }
    };

    // When the conversation starts from a partnership demand, record which one.
    if let Some(demand_id) = input.demand_id {
        match demand_db::get_demand_by_id(db.get_ref(), demand_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return HttpResponse::BadRequest().json(serde_json::json!({
                    "error": format!("Demand {demand_id} does not exist"),
                }));
            }
            Err(e) => {
                return HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": format!("Database error: {e}"),
                }));
            }
        }
    }

    match conversation_db::get_or_create(db.get_ref(), client.id, professional.id, input.demand_id)
        .await
    {
        Ok(conversation) => HttpResponse::Ok().json(conversation),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to start conversation: {e}"),
        })),
    }
}

/// GET /api/chat/conversations
///
/// List all conversations for the authenticated user.
/// Returns a summary with the last message, unread count, and the other party's info.
pub async fn get_conversations(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> impl Responder {
    let profile_id = user.0.id;

    let conversations =
        match conversation_db::get_conversations_for_profile(db.get_ref(), profile_id).await {
            Ok(c) => c,
            Err(e) => {
                return HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": format!("Database error: {e}"),
                }));
            }
        };

    let conversation_ids: Vec<Uuid> = conversations.iter().map(|c| c.id).collect();

    // Batch the latest message and unread count for every conversation.
    let latest = match message_db::get_latest_messages_for_conversations(
        db.get_ref(),
        conversation_ids.clone(),
    )
    .await
    {
        Ok(map) => map,
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    let unread = match message_db::count_unread_for_conversations(
        db.get_ref(),
        conversation_ids,
        profile_id,
    )
    .await
    {
        Ok(map) => map,
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    let mut summaries: Vec<ConversationSummary> = Vec::new();

    for conversation in conversations {
        let other_party_id = conversation.other_party(profile_id);

        let other_party_name =
            match profile_db::get_profile_by_id(db.get_ref(), other_party_id).await {
                Ok(Some(p)) => p.full_name,
                _ => None,
            };

        let (last_message, last_message_at) = match latest.get(&conversation.id) {
            Some(msg) => (Some(msg.content.clone()), Some(msg.created_at)),
            None => (None, None),
        };

        summaries.push(ConversationSummary {
            conversation_id: conversation.id,
            other_party_id,
            other_party_name,
            demand_id: conversation.demand_id,
            last_message,
            last_message_at,
            unread_count: unread.get(&conversation.id).copied().unwrap_or(0),
        });
    }

    // Sort by last_message_at descending (most recent first), putting
    // conversations with no messages at the end.
    summaries.sort_by(|a, b| {
        let a_time = a.last_message_at.unwrap_or(chrono::DateTime::UNIX_EPOCH);
        let b_time = b.last_message_at.unwrap_or(chrono::DateTime::UNIX_EPOCH);
        b_time.cmp(&a_time)
    });

    HttpResponse::Ok().json(summaries)
}

/// GET /api/chat/{conversation_id}/messages?limit=50&cursor_created_at=&cursor_id=
///
/// Fetch message history, ascending by creation time with keyset pagination.
/// Only the two parties of the conversation can access this.
pub async fn get_messages(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    query: web::Query<MessageQuery>,
) -> impl Responder {
    let conversation_id = path.into_inner();

    if let Err(resp) = verify_conversation_party(db.get_ref(), conversation_id, user.0.id).await {
        return resp;
    }

    match message_db::get_messages_by_conversation(
        db.get_ref(),
        conversation_id,
        query.limit(),
        query.cursor_created_at,
        query.cursor_id,
    )
    .await
    {
        Ok(messages) => {
            let response: Vec<MessageResponse> = messages.into_iter().map(|m| m.into()).collect();
            HttpResponse::Ok().json(response)
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// POST /api/chat/{conversation_id}/messages — append a message over REST.
/// Connected WebSocket clients of the conversation get it pushed as well.
pub async fn send_message(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    chat_server: web::Data<Arc<ChatServer>>,
    path: web::Path<Uuid>,
    body: web::Json<SendMessageRequest>,
) -> impl Responder {
    let conversation_id = path.into_inner();
    let content = body.into_inner().content;

    if content.trim().is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Message content cannot be empty",
        }));
    }

    if let Err(resp) = verify_conversation_party(db.get_ref(), conversation_id, user.0.id).await {
        return resp;
    }

    let input = CreateMessage {
        conversation_id,
        sender_id: user.0.id,
        content,
    };

    match message_db::insert_message(db.get_ref(), input).await {
        Ok(saved) => {
            chat_server
                .broadcast(
                    conversation_id,
                    ServerMessage::NewMessage {
                        id: saved.id,
                        sender_id: saved.sender_id,
                        content: saved.content.clone(),
                        created_at: saved.created_at.to_rfc3339(),
                    },
                    None,
                )
                .await;

            let response: MessageResponse = saved.into();
            HttpResponse::Created().json(response)
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to send message: {e}"),
        })),
    }
}

/// PUT /api/chat/{conversation_id}/read
///
/// Mark every message addressed to the caller in this conversation as read.
/// Idempotent: a second call touches zero rows and existing read timestamps
/// are never overwritten.
pub async fn mark_conversation_read(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    chat_server: web::Data<Arc<ChatServer>>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let conversation_id = path.into_inner();

    if let Err(resp) = verify_conversation_party(db.get_ref(), conversation_id, user.0.id).await {
        return resp;
    }

    match message_db::mark_conversation_read(db.get_ref(), conversation_id, user.0.id).await {
        Ok(marked) => {
            if marked > 0 {
                chat_server
                    .broadcast(
                        conversation_id,
                        ServerMessage::ConversationRead {
                            reader_id: user.0.id,
                        },
                        Some(user.0.id),
                    )
                    .await;
            }
            HttpResponse::Ok().json(serde_json::json!({ "marked_read": marked }))
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to mark conversation as read: {e}"),
        })),
    }
}
