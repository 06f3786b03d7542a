use sea_orm::prelude::Expr;
use sea_orm::*;
use uuid::Uuid;

use crate::models::demands;
use crate::models::partnership_applications::{self, ApplicationStatus};
use crate::models::status::EngagementStatus;

/// Insert a new partnership application (defaults to Pending status). A
/// duplicate (demand, professional) pair surfaces as a unique-constraint DbErr.
pub async fn insert_application(
    db: &DatabaseConnection,
    demand_id: Uuid,
    professional_id: Uuid,
    proposal: Option<String>,
) -> Result<partnership_applications::Model, DbErr> {
    let new_application = partnership_applications::ActiveModel {
        id: Set(Uuid::new_v4()),
        demand_id: Set(demand_id),
        professional_id: Set(professional_id),
        proposal: Set(proposal),
        status: Set(ApplicationStatus::Pending),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    new_application.insert(db).await
}

/// Fetch a single partnership application by ID.
pub async fn get_application_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<partnership_applications::Model>, DbErr> {
    partnership_applications::Entity::find_by_id(id).one(db).await
}

/// Fetch all applications for a demand, oldest first.
pub async fn get_applications_by_demand(
    db: &DatabaseConnection,
    demand_id: Uuid,
) -> Result<Vec<partnership_applications::Model>, DbErr> {
    partnership_applications::Entity::find()
        .filter(partnership_applications::Column::DemandId.eq(demand_id))
        .order_by_asc(partnership_applications::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch all partnership applications submitted by a professional, newest first.
pub async fn get_applications_by_professional(
    db: &DatabaseConnection,
    professional_id: Uuid,
) -> Result<Vec<partnership_applications::Model>, DbErr> {
    partnership_applications::Entity::find()
        .filter(partnership_applications::Column::ProfessionalId.eq(professional_id))
        .order_by_desc(partnership_applications::Column::CreatedAt)
        .all(db)
        .await
}

/// The accepted application for a demand, if any.
pub async fn get_accepted_for_demand(
    db: &DatabaseConnection,
    demand_id: Uuid,
) -> Result<Option<partnership_applications::Model>, DbErr> {
    partnership_applications::Entity::find()
        .filter(partnership_applications::Column::DemandId.eq(demand_id))
        .filter(partnership_applications::Column::Status.eq(ApplicationStatus::Accepted))
        .one(db)
        .await
}

/// Accept one partnership application and settle its demand in a single
/// transaction, mirroring the project cascade.
pub async fn accept_application_cascade(
    db: &DatabaseConnection,
    application_id: Uuid,
) -> Result<partnership_applications::Model, DbErr> {
    let txn = db.begin().await?;
    let now = chrono::Utc::now();

    let application = partnership_applications::Entity::find_by_id(application_id)
        .one(&txn)
        .await?
        .ok_or(DbErr::RecordNotFound("Application not found".to_string()))?;
    let demand_id = application.demand_id;

    partnership_applications::Entity::update_many()
        .col_expr(
            partnership_applications::Column::Status,
            Expr::value(ApplicationStatus::Rejected),
        )
        .col_expr(partnership_applications::Column::UpdatedAt, Expr::value(now))
        .filter(partnership_applications::Column::DemandId.eq(demand_id))
        .filter(partnership_applications::Column::Id.ne(application_id))
        .filter(partnership_applications::Column::Status.eq(ApplicationStatus::Pending))
        .exec(&txn)
        .await?;

    let mut active: partnership_applications::ActiveModel = application.into();
    active.status = Set(ApplicationStatus::Accepted);
    active.updated_at = Set(Some(now));
    let accepted = active.update(&txn).await?;

    let demand = demands::Entity::find_by_id(demand_id)
        .one(&txn)
        .await?
        .ok_or(DbErr::RecordNotFound("Demand not found".to_string()))?;

    let mut demand_active: demands::ActiveModel = demand.into();
    demand_active.status = Set(EngagementStatus::InProgress);
    demand_active.updated_at = Set(Some(now));
    demand_active.update(&txn).await?;

    txn.commit().await?;
    Ok(accepted)
}

/// Mark a single partnership application Rejected.
pub async fn reject_application(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<partnership_applications::Model, DbErr> {
    let application = partnership_applications::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Application not found".to_string()))?;

    let mut active: partnership_applications::ActiveModel = application.into();
    active.status = Set(ApplicationStatus::Rejected);
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Delete a partnership application by ID (withdrawal).
pub async fn delete_application(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    partnership_applications::Entity::delete_by_id(id).exec(db).await
}
