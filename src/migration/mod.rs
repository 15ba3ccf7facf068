pub use sea_orm_migration::prelude::*;

mod m20240212_000001_create_issue_table;
mod m20240213_000001_issue_timestamp_precision;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240212_000001_create_issue_table::Migration),
            Box::new(m20240213_000001_issue_timestamp_precision::Migration),
        ]
    }
}
