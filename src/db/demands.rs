use sea_orm::*;
use uuid::Uuid;

use crate::models::demands::{self, CreateDemand, DemandListQuery, UpdateDemand};
use crate::models::status::EngagementStatus;

/// Insert a new partnership demand. Demands always start in Draft.
pub async fn insert_demand(
    db: &DatabaseConnection,
    input: CreateDemand,
    professional_id: Uuid,
) -> Result<demands::Model, DbErr> {
    let new_demand = demands::ActiveModel {
        id: Set(Uuid::new_v4()),
        professional_id: Set(professional_id),
        service_id: Set(input.service_id),
        title: Set(input.title),
        description: Set(input.description),
        collaboration_type: Set(input.collaboration_type),
        status: Set(EngagementStatus::Draft),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    new_demand.insert(db).await
}

/// Fetch a single demand by ID.
pub async fn get_demand_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<demands::Model>, DbErr> {
    demands::Entity::find_by_id(id).one(db).await
}

/// Browse listing with status/service/collaboration filters, newest first.
pub async fn list_demands(
    db: &DatabaseConnection,
    query: &DemandListQuery,
) -> Result<Vec<demands::Model>, DbErr> {
    let mut select = demands::Entity::find();

    if let Some(status) = &query.status {
        select = select.filter(demands::Column::Status.eq(status.clone()));
    }
    if let Some(service_id) = query.service_id {
        select = select.filter(demands::Column::ServiceId.eq(service_id));
    }
    if let Some(collaboration_type) = &query.collaboration_type {
        select = select.filter(demands::Column::CollaborationType.eq(collaboration_type.clone()));
    }

    select
        .order_by_desc(demands::Column::CreatedAt)
        .paginate(db, query.limit())
        .fetch_page(query.page().saturating_sub(1))
        .await
}

/// Fetch all demands created by a professional, newest first.
pub async fn get_demands_by_professional(
    db: &DatabaseConnection,
    professional_id: Uuid,
) -> Result<Vec<demands::Model>, DbErr> {
    demands::Entity::find()
        .filter(demands::Column::ProfessionalId.eq(professional_id))
        .order_by_desc(demands::Column::CreatedAt)
        .all(db)
        .await
}

/// Update an existing demand's descriptive fields.
pub async fn update_demand(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateDemand,
) -> Result<demands::Model, DbErr> {
    let demand = demands::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Demand not found".to_string()))?;

    let mut active: demands::ActiveModel = demand.into();

    if let Some(service_id) = input.service_id {
        active.service_id = Set(service_id);
    }
    if let Some(title) = input.title {
        active.title = Set(title);
    }
    if let Some(description) = input.description {
        active.description = Set(description);
    }
    if let Some(collaboration_type) = input.collaboration_type {
        active.collaboration_type = Set(collaboration_type);
    }
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Persist a status transition (the handler has already validated it).
pub async fn update_demand_status(
    db: &DatabaseConnection,
    id: Uuid,
    status: EngagementStatus,
) -> Result<demands::Model, DbErr> {
    let demand = demands::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Demand not found".to_string()))?;

    let mut active: demands::ActiveModel = demand.into();
    active.status = Set(status);
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Delete a demand by ID.
pub async fn delete_demand(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    demands::Entity::delete_by_id(id).exec(db).await
}
