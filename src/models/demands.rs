use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::status::EngagementStatus;

/// How the creating professional wants to collaborate, stored as a lowercase
/// string in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum CollaborationType {
    #[sea_orm(string_value = "subcontract")]
    Subcontract,
    #[sea_orm(string_value = "joint_project")]
    JointProject,
    #[sea_orm(string_value = "technical_referral")]
    TechnicalReferral,
    #[sea_orm(string_value = "other")]
    Other,
}

/// SeaORM entity for the `partnership_demands` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "partnership_demands")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub professional_id: Uuid,
    pub service_id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub collaboration_type: CollaborationType,
    pub status: EngagementStatus,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::partnership_applications::Entity")]
    Applications,
    #[sea_orm(
        belongs_to = "super::profiles::Entity",
        from = "Column::ProfessionalId",
        to = "super::profiles::Column::Id"
    )]
    Professional,
    #[sea_orm(
        belongs_to = "super::services::Entity",
        from = "Column::ServiceId",
        to = "super::services::Column::Id"
    )]
    Service,
}

impl Related<super::partnership_applications::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Applications.def()
    }
}

impl Related<super::profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Professional.def()
    }
}

impl Related<super::services::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Service.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct CreateDemand {
    pub service_id: Uuid,
    pub title: String,
    pub description: String,
    pub collaboration_type: CollaborationType,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateDemand {
    pub service_id: Option<Uuid>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub collaboration_type: Option<CollaborationType>,
}

/// Filters for the browse listing. Defaults to open demands.
#[derive(Debug, Clone, Deserialize)]
pub struct DemandListQuery {
    pub status: Option<EngagementStatus>,
    pub service_id: Option<Uuid>,
    pub collaboration_type: Option<CollaborationType>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl DemandListQuery {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(20).min(100)
    }
}
