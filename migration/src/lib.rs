pub use sea_orm_migration::prelude::*;

mod m20261001_000001_create_accounts;
mod m20261001_000002_create_coursework;
mod m20261001_000003_create_attendance_messaging;
mod m20261001_000004_create_admin;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261001_000001_create_accounts::Migration),
            Box::new(m20261001_000002_create_coursework::Migration),
            Box::new(m20261001_000003_create_attendance_messaging::Migration),
            Box::new(m20261001_000004_create_admin::Migration),
        ]
    }
}
