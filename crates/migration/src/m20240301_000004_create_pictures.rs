//! Create `pictures` table with FK to `events`.
//! Hashtags are kept as one comma-joined string.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Pictures::Table)
                    .if_not_exists()
                    .col(uuid(Pictures::Id).primary_key())
                    .col(uuid(Pictures::EventId).not_null())
                    .col(string_len(Pictures::Url, 1024).not_null())
                    .col(text(Pictures::Hashtags).not_null())
                    .col(timestamp_with_time_zone(Pictures::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pictures_event")
                            .from(Pictures::Table, Pictures::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Pictures::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Pictures { Table, Id, EventId, Url, Hashtags, CreatedAt }

#[derive(DeriveIden)]
enum Events { Table, Id }
