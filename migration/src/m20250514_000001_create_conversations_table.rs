use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `conversations` table and its columns.
#[derive(DeriveIden)]
enum Conversations {
    Table,
    Id,
    ClientId,
    ProfessionalId,
    DemandId,
    CreatedAt,
}

/// Re-declare parent table identifiers for foreign-key references.
#[derive(DeriveIden)]
enum Profiles {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum PartnershipDemands {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Conversations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Conversations::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Conversations::ClientId).uuid().not_null())
                    .col(
                        ColumnDef::new(Conversations::ProfessionalId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Conversations::DemandId).uuid())
                    .col(
                        ColumnDef::new(Conversations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_conversations_client_id")
                            .from(Conversations::Table, Conversations::ClientId)
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_conversations_professional_id")
                            .from(Conversations::Table, Conversations::ProfessionalId)
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_conversations_demand_id")
                            .from(Conversations::Table, Conversations::DemandId)
                            .to(PartnershipDemands::Table, PartnershipDemands::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One conversation per client/professional pair. Concurrent creators race
        // on the insert; the loser re-fetches the winner's row.
        manager
            .create_index(
                Index::create()
                    .name("idx_conversations_pair_unique")
                    .table(Conversations::Table)
                    .col(Conversations::ClientId)
                    .col(Conversations::ProfessionalId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Conversations::Table).to_owned())
            .await
    }
}
