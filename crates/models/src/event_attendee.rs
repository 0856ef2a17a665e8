use sea_orm::{entity::prelude::*, sea_query::OnConflict, ConnectionTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::Utc;

use crate::errors::ModelError;
use crate::user;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "event_attendees")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub event_id: Uuid,
    pub username: String,
    pub joined_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::event::Entity",
        from = "Column::EventId",
        to = "super::event::Column::Id",
        on_delete = "Cascade"
    )]
    Event,
}

impl Related<super::event::Entity> for Entity {
    fn to() -> RelationDef { Relation::Event.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Attendee names share the users column width.
pub fn check_username(username: &str) -> Result<(), ModelError> {
    if username.trim().chars().count() > user::USERNAME_MAX {
        return Err(ModelError::Validation(user::USERNAME_TOO_LONG.into()));
    }
    Ok(())
}

/// Adds `username` to the event unless it is already listed. Returns `true`
/// when a row was inserted. Relies on the unique `(event_id, username)` index,
/// so concurrent joins of the same user cannot conflict.
pub async fn add<C: ConnectionTrait>(db: &C, event_id: Uuid, username: &str) -> Result<bool, ModelError> {
    check_username(username)?;
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        event_id: Set(event_id),
        username: Set(username.to_string()),
        joined_at: Set(Utc::now().into()),
    };
    let inserted = Entity::insert(am)
        .on_conflict(
            OnConflict::columns([Column::EventId, Column::Username])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await
        .map_err(|e| ModelError::from_db(e, "attendee"))?;
    Ok(inserted > 0)
}

/// Usernames of an event in the order they joined.
pub async fn usernames<C: ConnectionTrait>(db: &C, event_id: Uuid) -> Result<Vec<String>, ModelError> {
    let rows = Entity::find()
        .filter(Column::EventId.eq(event_id))
        .order_by_asc(Column::JoinedAt)
        .all(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(rows.into_iter().map(|r| r.username).collect())
}
