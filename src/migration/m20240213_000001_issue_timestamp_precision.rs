use sea_orm::DbBackend;
use sea_orm_migration::prelude::*;

use crate::entity::issue::{self, Entity};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // MySQL 의 `timestamp` 는 초 단위까지만 저장한다
        if manager.get_database_backend() != DbBackend::MySql {
            return Ok(());
        }

        manager
            .alter_table(
                Table::alter()
                    .table(Entity)
                    .modify_column(
                        ColumnDef::new(issue::Column::CreatedOn)
                            .custom(Alias::new("datetime(6)"))
                            .not_null(),
                    )
                    .modify_column(
                        ColumnDef::new(issue::Column::UpdatedOn)
                            .custom(Alias::new("datetime(6)"))
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        if manager.get_database_backend() != DbBackend::MySql {
            return Ok(());
        }

        manager
            .alter_table(
                Table::alter()
                    .table(Entity)
                    .modify_column(
                        ColumnDef::new(issue::Column::CreatedOn)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .modify_column(
                        ColumnDef::new(issue::Column::UpdatedOn)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }
}
