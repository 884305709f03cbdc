use sea_orm_migration::prelude::*;

mod m20260801_000001_create_users;
mod m20260801_000002_create_cases;
mod m20260801_000003_create_sightings;
mod m20260801_000004_create_case_sequences;
mod m20260801_000005_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260801_000001_create_users::Migration),
            Box::new(m20260801_000002_create_cases::Migration),
            Box::new(m20260801_000003_create_sightings::Migration),
            Box::new(m20260801_000004_create_case_sequences::Migration),
            Box::new(m20260801_000005_add_indexes::Migration),
        ]
    }
}
