pub use sea_orm_migration::prelude::*;

mod m20250512_000001_create_profiles_table;
mod m20250512_000002_create_services_table;
mod m20250512_000003_create_plans_table;
mod m20250512_000004_create_projects_table;
mod m20250512_000005_create_partnership_demands_table;
mod m20250513_000001_create_applications_table;
mod m20250513_000002_create_partnership_applications_table;
mod m20250514_000001_create_conversations_table;
mod m20250514_000002_create_messages_table;
mod m20250520_000001_create_reviews_table;
mod m20250607_000001_add_listing_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250512_000001_create_profiles_table::Migration),
            Box::new(m20250512_000002_create_services_table::Migration),
            Box::new(m20250512_000003_create_plans_table::Migration),
            Box::new(m20250512_000004_create_projects_table::Migration),
            Box::new(m20250512_000005_create_partnership_demands_table::Migration),
            Box::new(m20250513_000001_create_applications_table::Migration),
            Box::new(m20250513_000002_create_partnership_applications_table::Migration),
            Box::new(m20250514_000001_create_conversations_table::Migration),
            Box::new(m20250514_000002_create_messages_table::Migration),
            Box::new(m20250520_000001_create_reviews_table::Migration),
            Box::new(m20250607_000001_add_listing_indexes::Migration),
        ]
    }
}
