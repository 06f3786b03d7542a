use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `partnership_demands` table and its columns.
#[derive(DeriveIden)]
enum PartnershipDemands {
    Table,
    Id,
    ProfessionalId,
    ServiceId,
    Title,
    Description,
    CollaborationType,
    Status,
    CreatedAt,
    UpdatedAt,
}

/// Re-declare parent table identifiers for foreign-key references.
#[derive(DeriveIden)]
enum Profiles {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Services {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PartnershipDemands::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PartnershipDemands::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PartnershipDemands::ProfessionalId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PartnershipDemands::ServiceId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PartnershipDemands::Title)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PartnershipDemands::Description)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PartnershipDemands::CollaborationType)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PartnershipDemands::Status)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PartnershipDemands::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PartnershipDemands::UpdatedAt).timestamp_with_time_zone(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_partnership_demands_professional_id")
                            .from(
                                PartnershipDemands::Table,
                                PartnershipDemands::ProfessionalId,
                            )
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_partnership_demands_service_id")
                            .from(PartnershipDemands::Table, PartnershipDemands::ServiceId)
                            .to(Services::Table, Services::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PartnershipDemands::Table).to_owned())
            .await
    }
}
