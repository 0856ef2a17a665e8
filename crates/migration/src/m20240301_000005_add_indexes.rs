use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Pictures: looked up per event
        manager
            .create_index(
                Index::create()
                    .name("idx_pictures_event")
                    .table(Pictures::Table)
                    .col(Pictures::EventId)
                    .to_owned(),
            )
            .await?;

        // Events: listed in calendar order
        manager
            .create_index(
                Index::create()
                    .name("idx_events_date")
                    .table(Events::Table)
                    .col(Events::Date)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_events_date").table(Events::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_pictures_event").table(Pictures::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Pictures { Table, EventId }

#[derive(DeriveIden)]
enum Events { Table, Date }
