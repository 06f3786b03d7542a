use actix_web::HttpResponse;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::db::conversations as conversation_db;
use crate::models::conversations;
use crate::models::profiles::{self, UserType};

/// Fetch a conversation and verify the given profile is one of its parties.
pub async fn verify_conversation_party(
    db: &DatabaseConnection,
    conversation_id: Uuid,
    profile_id: Uuid,
) -> Result<conversations::Model, HttpResponse> {
    let conversation = conversation_db::get_conversation_by_id(db, conversation_id)
        .await
        .map_err(|e| {
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }))
        })?
        .ok_or_else(|| {
            HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Conversation {conversation_id} not found"),
            }))
        })?;

    if !conversation.has_party(profile_id) {
        return Err(HttpResponse::Forbidden().json(serde_json::json!({
            "error": "You are not a party to this conversation",
        })));
    }

    Ok(conversation)
}

/// Admin gate for catalog and plan management endpoints.
pub fn require_admin(profile: &profiles::Model) -> Result<(), HttpResponse> {
    if profile.user_type == UserType::Admin {
        Ok(())
    } else {
        Err(HttpResponse::Forbidden().json(serde_json::json!({
            "error": "This operation requires an admin account",
        })))
    }
}

/// Gate for operations reserved to professionals (applying, creating demands).
pub fn require_professional(profile: &profiles::Model) -> Result<(), HttpResponse> {
    if profile.user_type == UserType::Professional {
        Ok(())
    } else {
        Err(HttpResponse::Forbidden().json(serde_json::json!({
            "error": "This operation requires a professional account",
        })))
    }
}

/// Gate for operations reserved to clients (posting projects).
pub fn require_client(profile: &profiles::Model) -> Result<(), HttpResponse> {
    if profile.user_type == UserType::Client {
        Ok(())
    } else {
        Err(HttpResponse::Forbidden().json(serde_json::json!({
            "error": "This operation requires a client account",
        })))
    }
}
