use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `partnership_applications` table and its columns.
#[derive(DeriveIden)]
enum PartnershipApplications {
    Table,
    Id,
    DemandId,
    ProfessionalId,
    Proposal,
    Status,
    CreatedAt,
    UpdatedAt,
}

/// Re-declare parent table identifiers for foreign-key references.
#[derive(DeriveIden)]
enum PartnershipDemands {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Profiles {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PartnershipApplications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PartnershipApplications::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PartnershipApplications::DemandId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PartnershipApplications::ProfessionalId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PartnershipApplications::Proposal).text())
                    .col(
                        ColumnDef::new(PartnershipApplications::Status)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PartnershipApplications::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PartnershipApplications::UpdatedAt)
                            .timestamp_with_time_zone(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_partnership_applications_demand_id")
                            .from(
                                PartnershipApplications::Table,
                                PartnershipApplications::DemandId,
                            )
                            .to(PartnershipDemands::Table, PartnershipDemands::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_partnership_applications_professional_id")
                            .from(
                                PartnershipApplications::Table,
                                PartnershipApplications::ProfessionalId,
                            )
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_partnership_applications_demand_professional_unique")
                    .table(PartnershipApplications::Table)
                    .col(PartnershipApplications::DemandId)
                    .col(PartnershipApplications::ProfessionalId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(PartnershipApplications::Table)
                    .to_owned(),
            )
            .await
    }
}
