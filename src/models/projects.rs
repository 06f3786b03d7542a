use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::status::EngagementStatus;

/// SeaORM entity for the `projects` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub client_id: Uuid,
    pub service_id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub status: EngagementStatus,
    #[sea_orm(column_type = "Double", nullable)]
    pub budget_min: Option<f64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub budget_max: Option<f64>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::applications::Entity")]
    Applications,
    #[sea_orm(
        belongs_to = "super::profiles::Entity",
        from = "Column::ClientId",
        to = "super::profiles::Column::Id"
    )]
    Client,
    #[sea_orm(
        belongs_to = "super::services::Entity",
        from = "Column::ServiceId",
        to = "super::services::Column::Id"
    )]
    Service,
}

impl Related<super::applications::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Applications.def()
    }
}

impl Related<super::profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl Related<super::services::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Service.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Budgets are optional on both ends; when both are present the range must
/// not be inverted.
pub fn budget_bounds_ok(budget_min: Option<f64>, budget_max: Option<f64>) -> bool {
    match (budget_min, budget_max) {
        (Some(min), Some(max)) => min <= max,
        _ => true,
    }
}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub service_id: Uuid,
    pub title: String,
    pub description: String,
    pub budget_min: Option<f64>,
    pub budget_max: Option<f64>,
    pub city: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProject {
    pub service_id: Option<Uuid>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub budget_min: Option<f64>,
    pub budget_max: Option<f64>,
    pub city: Option<String>,
    pub state: Option<String>,
}

/// Filters for the browse listing. Defaults to open projects.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectListQuery {
    pub status: Option<EngagementStatus>,
    pub service_id: Option<Uuid>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl ProjectListQuery {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(20).min(100)
    }
}

#[cfg(test)]
mod tests {
    use super::budget_bounds_ok;

    #[test]
    fn budget_range_accepts_missing_ends() {
        assert!(budget_bounds_ok(None, None));
        assert!(budget_bounds_ok(Some(100.0), None));
        assert!(budget_bounds_ok(None, Some(100.0)));
    }

    #[test]
    fn budget_range_rejects_inverted_bounds() {
        assert!(budget_bounds_ok(Some(100.0), Some(100.0)));
        assert!(budget_bounds_ok(Some(100.0), Some(250.0)));
        assert!(!budget_bounds_ok(Some(250.0), Some(100.0)));
    }
}
