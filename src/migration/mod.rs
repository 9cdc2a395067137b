//! SeaORM database migrations.

pub use sea_orm_migration::prelude::*;

mod m20250601_000001_create_users;
mod m20250601_000002_create_uploads;
mod m20250601_000003_create_generated_designs;
mod m20250601_000004_create_contest_submissions;
mod m20250601_000005_create_shares;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_users::Migration),
            Box::new(m20250601_000002_create_uploads::Migration),
            Box::new(m20250601_000003_create_generated_designs::Migration),
            Box::new(m20250601_000004_create_contest_submissions::Migration),
            Box::new(m20250601_000005_create_shares::Migration),
        ]
    }
}
