//! Create `events` table.
//! Events are addressed by name from the client, so names are unique.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(uuid(Events::Id).primary_key())
                    .col(string_len(Events::Name, 255).unique_key().not_null())
                    .col(date(Events::Date).not_null())
                    .col(string_len(Events::HostName, 255).not_null())
                    .col(time(Events::StartTime).not_null())
                    .col(time(Events::EndTime).not_null())
                    .col(
                        ColumnDef::new(Events::Location)
                            .string_len(512)
                            .null(),
                    )
                    .col(timestamp_with_time_zone(Events::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Events::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Events { Table, Id, Name, Date, HostName, StartTime, EndTime, Location, CreatedAt }
