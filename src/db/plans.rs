use sea_orm::*;
use uuid::Uuid;

use crate::models::plans::{self, CreatePlan, UpdatePlan};

/// Insert a new plan (active by default).
pub async fn insert_plan(db: &DatabaseConnection, input: CreatePlan) -> Result<plans::Model, DbErr> {
    let new_plan = plans::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(input.name),
        description: Set(input.description),
        price_monthly: Set(input.price_monthly),
        max_open_projects: Set(input.max_open_projects),
        active: Set(true),
        created_at: Set(chrono::Utc::now()),
    };

    new_plan.insert(db).await
}

/// Fetch active plans, cheapest first.
pub async fn get_active_plans(db: &DatabaseConnection) -> Result<Vec<plans::Model>, DbErr> {
    plans::Entity::find()
        .filter(plans::Column::Active.eq(true))
        .order_by_asc(plans::Column::PriceMonthly)
        .all(db)
        .await
}

/// Fetch a single plan by ID.
pub async fn get_plan_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<plans::Model>, DbErr> {
    plans::Entity::find_by_id(id).one(db).await
}

/// Update an existing plan.
pub async fn update_plan(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdatePlan,
) -> Result<plans::Model, DbErr> {
    let plan = plans::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Plan not found".to_string()))?;

    let mut active: plans::ActiveModel = plan.into();

    if let Some(name) = input.name {
        active.name = Set(name);
    }
    if let Some(description) = input.description {
        active.description = Set(Some(description));
    }
    if let Some(price_monthly) = input.price_monthly {
        active.price_monthly = Set(price_monthly);
    }
    if let Some(max_open_projects) = input.max_open_projects {
        active.max_open_projects = Set(Some(max_open_projects));
    }
    if let Some(is_active) = input.active {
        active.active = Set(is_active);
    }

    active.update(db).await
}

/// Delete a plan by ID.
pub async fn delete_plan(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    plans::Entity::delete_by_id(id).exec(db).await
}
