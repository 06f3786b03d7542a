use sea_orm::*;
use uuid::Uuid;

use crate::models::projects::{self, CreateProject, ProjectListQuery, UpdateProject};
use crate::models::status::EngagementStatus;

/// Insert a new project. Projects always start in Draft.
pub async fn insert_project(
    db: &DatabaseConnection,
    input: CreateProject,
    client_id: Uuid,
) -> Result<projects::Model, DbErr> {
    let new_project = projects::ActiveModel {
        id: Set(Uuid::new_v4()),
        client_id: Set(client_id),
        service_id: Set(input.service_id),
        title: Set(input.title),
        description: Set(input.description),
        status: Set(EngagementStatus::Draft),
        budget_min: Set(input.budget_min),
        budget_max: Set(input.budget_max),
        city: Set(input.city),
        state: Set(input.state),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    new_project.insert(db).await
}

/// Fetch a single project by ID.
pub async fn get_project_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<projects::Model>, DbErr> {
    projects::Entity::find_by_id(id).one(db).await
}

/// Browse listing with status/service filters, newest first.
pub async fn list_projects(
    db: &DatabaseConnection,
    query: &ProjectListQuery,
) -> Result<Vec<projects::Model>, DbErr> {
    let mut select = projects::Entity::find();

    if let Some(status) = &query.status {
        select = select.filter(projects::Column::Status.eq(status.clone()));
    }
    if let Some(service_id) = query.service_id {
        select = select.filter(projects::Column::ServiceId.eq(service_id));
    }

    select
        .order_by_desc(projects::Column::CreatedAt)
        .paginate(db, query.limit())
        .fetch_page(query.page().saturating_sub(1))
        .await
}

/// Fetch all projects owned by a client, newest first.
pub async fn get_projects_by_client(
    db: &DatabaseConnection,
    client_id: Uuid,
) -> Result<Vec<projects::Model>, DbErr> {
    projects::Entity::find()
        .filter(projects::Column::ClientId.eq(client_id))
        .order_by_desc(projects::Column::CreatedAt)
        .all(db)
        .await
}

/// Update an existing project's descriptive fields.
pub async fn update_project(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateProject,
) -> Result<projects::Model, DbErr> {
    let project = projects::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Project not found".to_string()))?;

    let mut active: projects::ActiveModel = project.into();

    if let Some(service_id) = input.service_id {
        active.service_id = Set(service_id);
    }
    if let Some(title) = input.title {
        active.title = Set(title);
    }
    if let Some(description) = input.description {
        active.description = Set(description);
    }
    if let Some(budget_min) = input.budget_min {
        active.budget_min = Set(Some(budget_min));
    }
    if let Some(budget_max) = input.budget_max {
        active.budget_max = Set(Some(budget_max));
    }
    if let Some(city) = input.city {
        active.city = Set(Some(city));
    }
    if let Some(state) = input.state {
        active.state = Set(Some(state));
    }
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Persist a status transition (the handler has already validated it).
pub async fn update_project_status(
    db: &DatabaseConnection,
    id: Uuid,
    status: EngagementStatus,
) -> Result<projects::Model, DbErr> {
    let project = projects::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Project not found".to_string()))?;

    let mut active: projects::ActiveModel = project.into();
    active.status = Set(status);
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Delete a project by ID.
pub async fn delete_project(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    projects::Entity::delete_by_id(id).exec(db).await
}
