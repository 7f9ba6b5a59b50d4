pub use sea_orm_migration::prelude::*;

mod error;
mod m20240101_000001_create_fleet_tables;
mod m20240601_000001_add_store_commissions;
pub mod entity_iden;
pub mod run;

pub use error::MigrationError;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_fleet_tables::Migration),
            Box::new(m20240601_000001_add_store_commissions::Migration),
        ]
    }
}
