use sea_orm::prelude::Expr;
use sea_orm::*;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use crate::models::messages::{self, CreateMessage};

/// Append a new message. Messages are never edited or deleted.
pub async fn insert_message(
    db: &DatabaseConnection,
    input: CreateMessage,
) -> Result<messages::Model, DbErr> {
    let new_message = messages::ActiveModel {
        id: Set(Uuid::new_v4()),
        conversation_id: Set(input.conversation_id),
        sender_id: Set(input.sender_id),
        content: Set(input.content),
        read_at: Set(None),
        created_at: Set(chrono::Utc::now()),
    };

    new_message.insert(db).await
}

/// Fetch message history for a conversation, ascending by (created_at, id)
/// with keyset pagination, so every page is non-decreasing by creation time.
pub async fn get_messages_by_conversation(
    db: &DatabaseConnection,
    conversation_id: Uuid,
    limit: u64,
    cursor_created_at: Option<chrono::DateTime<chrono::Utc>>,
    cursor_id: Option<Uuid>,
) -> Result<Vec<messages::Model>, DbErr> {
    let mut query =
        messages::Entity::find().filter(messages::Column::ConversationId.eq(conversation_id));

    if let (Some(cursor_created_at), Some(cursor_id)) = (cursor_created_at, cursor_id) {
        query = query.filter(
            Condition::any()
                .add(messages::Column::CreatedAt.gt(cursor_created_at))
                .add(
                    Condition::all()
                        .add(messages::Column::CreatedAt.eq(cursor_created_at))
                        .add(messages::Column::Id.gt(cursor_id)),
                ),
        );
    }

    query
        .order_by_asc(messages::Column::CreatedAt)
        .order_by_asc(messages::Column::Id)
        .limit(limit)
        .all(db)
        .await
}

/// Set read_at on every unread message in the conversation that was NOT sent
/// by the reader. Only rows with a NULL read_at are touched, so calling this
/// twice leaves the first timestamps in place and the second call affects
/// zero rows.
pub async fn mark_conversation_read(
    db: &DatabaseConnection,
    conversation_id: Uuid,
    reader_id: Uuid,
) -> Result<u64, DbErr> {
    let result = messages::Entity::update_many()
        .col_expr(messages::Column::ReadAt, Expr::value(chrono::Utc::now()))
        .filter(messages::Column::ConversationId.eq(conversation_id))
        .filter(messages::Column::SenderId.ne(reader_id))
        .filter(messages::Column::ReadAt.is_null())
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}

/// Count unread messages for many conversations in one query and return a
/// conversation_id -> unread_count map.
pub async fn count_unread_for_conversations(
    db: &DatabaseConnection,
    conversation_ids: Vec<Uuid>,
    profile_id: Uuid,
) -> Result<HashMap<Uuid, u64>, DbErr> {
    if conversation_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let unread_messages = messages::Entity::find()
        .filter(messages::Column::ConversationId.is_in(conversation_ids))
        .filter(messages::Column::SenderId.ne(profile_id))
        .filter(messages::Column::ReadAt.is_null())
        .all(db)
        .await?;

    let mut counts: HashMap<Uuid, u64> = HashMap::new();
    for message in unread_messages {
        *counts.entry(message.conversation_id).or_insert(0) += 1;
    }

    Ok(counts)
}

/// Get latest messages for many conversations in one query and return a
/// conversation_id -> message map.
pub async fn get_latest_messages_for_conversations(
    db: &DatabaseConnection,
    conversation_ids: Vec<Uuid>,
) -> Result<HashMap<Uuid, messages::Model>, DbErr> {
    if conversation_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = messages::Entity::find()
        .filter(messages::Column::ConversationId.is_in(conversation_ids))
        .order_by_asc(messages::Column::ConversationId)
        .order_by_desc(messages::Column::CreatedAt)
        .order_by_desc(messages::Column::Id)
        .all(db)
        .await?;

    let mut latest: HashMap<Uuid, messages::Model> = HashMap::new();
    let mut seen: HashSet<Uuid> = HashSet::new();

    for row in rows {
        if seen.insert(row.conversation_id) {
            latest.insert(row.conversation_id, row);
        }
    }

    Ok(latest)
}
