use sea_orm::*;
use uuid::Uuid;

use crate::models::conversations;

/// Look up the conversation for a (client, professional) pair.
pub async fn find_by_pair(
    db: &DatabaseConnection,
    client_id: Uuid,
    professional_id: Uuid,
) -> Result<Option<conversations::Model>, DbErr> {
    conversations::Entity::find()
        .filter(conversations::Column::ClientId.eq(client_id))
        .filter(conversations::Column::ProfessionalId.eq(professional_id))
        .one(db)
        .await
}

/// Get the conversation for a pair, creating it on first contact. Two callers
/// racing on the same pair both get the same row: the loser's insert hits the
/// unique pair index and falls back to re-fetching the winner's.
pub async fn get_or_create(
    db: &DatabaseConnection,
    client_id: Uuid,
    professional_id: Uuid,
    demand_id: Option<Uuid>,
) -> Result<conversations::Model, DbErr> {
    if let Some(existing) = find_by_pair(db, client_id, professional_id).await? {
        return Ok(existing);
    }

    let new_conversation = conversations::ActiveModel {
        id: Set(Uuid::new_v4()),
        client_id: Set(client_id),
        professional_id: Set(professional_id),
        demand_id: Set(demand_id),
        created_at: Set(chrono::Utc::now()),
    };

    match new_conversation.insert(db).await {
        Ok(created) => Ok(created),
        Err(err) => {
            if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                find_by_pair(db, client_id, professional_id)
                    .await?
                    .ok_or(err)
            } else {
                Err(err)
            }
        }
    }
}

/// Fetch a single conversation by ID.
pub async fn get_conversation_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<conversations::Model>, DbErr> {
    conversations::Entity::find_by_id(id).one(db).await
}

/// Fetch every conversation the profile participates in, on either side.
pub async fn get_conversations_for_profile(
    db: &DatabaseConnection,
    profile_id: Uuid,
) -> Result<Vec<conversations::Model>, DbErr> {
    conversations::Entity::find()
        .filter(
            Condition::any()
                .add(conversations::Column::ClientId.eq(profile_id))
                .add(conversations::Column::ProfessionalId.eq(profile_id)),
        )
        .all(db)
        .await
}
