use sea_orm::prelude::Expr;
use sea_orm::*;
use uuid::Uuid;

use crate::models::applications::{self, ApplicationStatus};
use crate::models::projects;
use crate::models::status::EngagementStatus;

/// Insert a new application (defaults to Pending status). A duplicate
/// (project, professional) pair surfaces as a unique-constraint DbErr.
pub async fn insert_application(
    db: &DatabaseConnection,
    project_id: Uuid,
    professional_id: Uuid,
    proposal: Option<String>,
) -> Result<applications::Model, DbErr> {
    let new_application = applications::ActiveModel {
        id: Set(Uuid::new_v4()),
        project_id: Set(project_id),
        professional_id: Set(professional_id),
        proposal: Set(proposal),
        status: Set(ApplicationStatus::Pending),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    new_application.insert(db).await
}

/// Fetch a single application by ID.
pub async fn get_application_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<applications::Model>, DbErr> {
    applications::Entity::find_by_id(id).one(db).await
}

/// Fetch all applications for a project, oldest first.
pub async fn get_applications_by_project(
    db: &DatabaseConnection,
    project_id: Uuid,
) -> Result<Vec<applications::Model>, DbErr> {
    applications::Entity::find()
        .filter(applications::Column::ProjectId.eq(project_id))
        .order_by_asc(applications::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch all applications submitted by a professional, newest first.
pub async fn get_applications_by_professional(
    db: &DatabaseConnection,
    professional_id: Uuid,
) -> Result<Vec<applications::Model>, DbErr> {
    applications::Entity::find()
        .filter(applications::Column::ProfessionalId.eq(professional_id))
        .order_by_desc(applications::Column::CreatedAt)
        .all(db)
        .await
}

/// The accepted application for a project, if any.
pub async fn get_accepted_for_project(
    db: &DatabaseConnection,
    project_id: Uuid,
) -> Result<Option<applications::Model>, DbErr> {
    applications::Entity::find()
        .filter(applications::Column::ProjectId.eq(project_id))
        .filter(applications::Column::Status.eq(ApplicationStatus::Accepted))
        .one(db)
        .await
}

/// Accept one application and settle its project in a single transaction:
/// the application becomes Accepted, every sibling still Pending becomes
/// Rejected, and the project moves to InProgress. A failure in any step
/// rolls the whole cascade back.
pub async fn accept_application_cascade(
    db: &DatabaseConnection,
    application_id: Uuid,
) -> Result<applications::Model, DbErr> {
    let txn = db.begin().await?;
    let now = chrono::Utc::now();

    let application = applications::Entity::find_by_id(application_id)
        .one(&txn)
        .await?
        .ok_or(DbErr::RecordNotFound("Application not found".to_string()))?;
    let project_id = application.project_id;

    applications::Entity::update_many()
        .col_expr(
            applications::Column::Status,
            Expr::value(ApplicationStatus::Rejected),
        )
        .col_expr(applications::Column::UpdatedAt, Expr::value(now))
        .filter(applications::Column::ProjectId.eq(project_id))
        .filter(applications::Column::Id.ne(application_id))
        .filter(applications::Column::Status.eq(ApplicationStatus::Pending))
        .exec(&txn)
        .await?;

    let mut active: applications::ActiveModel = application.into();
    active.status = Set(ApplicationStatus::Accepted);
    active.updated_at = Set(Some(now));
    let accepted = active.update(&txn).await?;

    let project = projects::Entity::find_by_id(project_id)
        .one(&txn)
        .await?
        .ok_or(DbErr::RecordNotFound("Project not found".to_string()))?;

    let mut project_active: projects::ActiveModel = project.into();
    project_active.status = Set(EngagementStatus::InProgress);
    project_active.updated_at = Set(Some(now));
    project_active.update(&txn).await?;

    txn.commit().await?;
    Ok(accepted)
}

/// Mark a single application Rejected.
pub async fn reject_application(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<applications::Model, DbErr> {
    let application = applications::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Application not found".to_string()))?;

    let mut active: applications::ActiveModel = application.into();
    active.status = Set(ApplicationStatus::Rejected);
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Delete an application by ID (withdrawal).
pub async fn delete_application(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    applications::Entity::delete_by_id(id).exec(db).await
}
