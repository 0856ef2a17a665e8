//! Create `event_attendees` table: the usernames that joined an event.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EventAttendees::Table)
                    .if_not_exists()
                    .col(uuid(EventAttendees::Id).primary_key())
                    .col(uuid(EventAttendees::EventId).not_null())
                    .col(string_len(EventAttendees::Username, 64).not_null())
                    .col(timestamp_with_time_zone(EventAttendees::JoinedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_attendees_event")
                            .from(EventAttendees::Table, EventAttendees::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // a username joins an event at most once
        manager
            .create_index(
                Index::create()
                    .name("uniq_event_attendees_event_username")
                    .table(EventAttendees::Table)
                    .col(EventAttendees::EventId)
                    .col(EventAttendees::Username)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EventAttendees::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum EventAttendees { Table, Id, EventId, Username, JoinedAt }

#[derive(DeriveIden)]
enum Events { Table, Id }
