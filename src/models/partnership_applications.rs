use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

pub use super::applications::ApplicationStatus;

/// SeaORM entity for the `partnership_applications` table (candidacies on
/// partnership demands, professional to professional).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "partnership_applications")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub demand_id: Uuid,
    pub professional_id: Uuid,
    #[sea_orm(column_type = "Text", nullable)]
    pub proposal: Option<String>,
    pub status: ApplicationStatus,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::demands::Entity",
        from = "Column::DemandId",
        to = "super::demands::Column::Id"
    )]
    Demand,
    #[sea_orm(
        belongs_to = "super::profiles::Entity",
        from = "Column::ProfessionalId",
        to = "super::profiles::Column::Id"
    )]
    Professional,
}

impl Related<super::demands::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Demand.def()
    }
}

impl Related<super::profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Professional.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
