use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Engagement status shared by projects and partnership demands, stored as a
/// lowercase string in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum EngagementStatus {
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "open")]
    Open,
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// Discriminates which table an engagement id points at (used by reviews).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum EngagementKind {
    #[sea_orm(string_value = "project")]
    Project,
    #[sea_orm(string_value = "partnership")]
    Partnership,
}

/// Request body for the status transition endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: EngagementStatus,
}
