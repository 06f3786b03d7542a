use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Projects {
    Table,
    ClientId,
    Status,
    ServiceId,
}

#[derive(DeriveIden)]
enum PartnershipDemands {
    Table,
    ProfessionalId,
}

#[derive(DeriveIden)]
enum Applications {
    Table,
    ProfessionalId,
}

#[derive(DeriveIden)]
enum PartnershipApplications {
    Table,
    ProfessionalId,
}

#[derive(DeriveIden)]
enum Reviews {
    Table,
    ReviewedId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Index on projects.client_id for the client dashboard
        manager
            .create_index(
                Index::create()
                    .name("idx_projects_client_id")
                    .table(Projects::Table)
                    .col(Projects::ClientId)
                    .to_owned(),
            )
            .await?;

        // Index on (status, service_id) for the open-projects browse listing
        manager
            .create_index(
                Index::create()
                    .name("idx_projects_status_service")
                    .table(Projects::Table)
                    .col(Projects::Status)
                    .col(Projects::ServiceId)
                    .to_owned(),
            )
            .await?;

        // Index on partnership_demands.professional_id for the creator dashboard
        manager
            .create_index(
                Index::create()
                    .name("idx_partnership_demands_professional_id")
                    .table(PartnershipDemands::Table)
                    .col(PartnershipDemands::ProfessionalId)
                    .to_owned(),
            )
            .await?;

        // Index on applications.professional_id for "my applications"
        manager
            .create_index(
                Index::create()
                    .name("idx_applications_professional_id")
                    .table(Applications::Table)
                    .col(Applications::ProfessionalId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_partnership_applications_professional_id")
                    .table(PartnershipApplications::Table)
                    .col(PartnershipApplications::ProfessionalId)
                    .to_owned(),
            )
            .await?;

        // Index on reviews.reviewed_id for profile rating pages
        manager
            .create_index(
                Index::create()
                    .name("idx_reviews_reviewed_id")
                    .table(Reviews::Table)
                    .col(Reviews::ReviewedId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_projects_client_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_projects_status_service").to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_partnership_demands_professional_id")
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_applications_professional_id")
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_partnership_applications_professional_id")
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(Index::drop().name("idx_reviews_reviewed_id").to_owned())
            .await?;

        Ok(())
    }
}
