use sea_orm::*;
use uuid::Uuid;

use crate::models::services::{self, CreateService, UpdateService};

/// Insert a new catalog service.
pub async fn insert_service(
    db: &DatabaseConnection,
    input: CreateService,
) -> Result<services::Model, DbErr> {
    let new_service = services::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(input.name),
        category: Set(input.category),
        description: Set(input.description),
        created_at: Set(chrono::Utc::now()),
    };

    new_service.insert(db).await
}

/// Fetch the whole service catalog, ordered by name.
pub async fn get_all_services(db: &DatabaseConnection) -> Result<Vec<services::Model>, DbErr> {
    services::Entity::find()
        .order_by_asc(services::Column::Name)
        .all(db)
        .await
}

/// Fetch a single service by ID.
pub async fn get_service_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<services::Model>, DbErr> {
    services::Entity::find_by_id(id).one(db).await
}

/// Update an existing service.
pub async fn update_service(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateService,
) -> Result<services::Model, DbErr> {
    let service = services::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Service not found".to_string()))?;

    let mut active: services::ActiveModel = service.into();

    if let Some(name) = input.name {
        active.name = Set(name);
    }
    if let Some(category) = input.category {
        active.category = Set(category);
    }
    if let Some(description) = input.description {
        active.description = Set(Some(description));
    }

    active.update(db).await
}

/// Delete a service by ID.
pub async fn delete_service(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    services::Entity::delete_by_id(id).exec(db).await
}
