//! SeaORM database migrations.

pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_profiles;
mod m20260301_000002_create_user_roles;
mod m20260301_000003_create_audit_logs;
mod m20260301_000004_create_billing;
mod m20260301_000005_create_user_data_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_profiles::Migration),
            Box::new(m20260301_000002_create_user_roles::Migration),
            Box::new(m20260301_000003_create_audit_logs::Migration),
            Box::new(m20260301_000004_create_billing::Migration),
            Box::new(m20260301_000005_create_user_data_tables::Migration),
        ]
    }
}
