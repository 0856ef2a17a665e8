use sea_orm::{entity::prelude::*, ConnectionTrait, DatabaseConnection, QueryOrder, Set, TransactionTrait};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{NaiveDate, NaiveTime, Utc};
use validator::Validate;

use crate::errors::ModelError;
use crate::validation::{self, not_blank};
use crate::{event_attendee, time_format, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "events")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    pub date: Date,
    pub host_name: String,
    pub start_time: Time,
    pub end_time: Time,
    pub location: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::picture::Entity")]
    Pictures,
    #[sea_orm(has_many = "super::event_attendee::Entity")]
    Attendees,
}

impl Related<super::picture::Entity> for Entity {
    fn to() -> RelationDef { Relation::Pictures.def() }
}

impl Related<super::event_attendee::Entity> for Entity {
    fn to() -> RelationDef { Relation::Attendees.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub const PAST_DATE: &str = "Event date cannot be in the past";

/// Event payload. Absent fields deserialize as empty/`None` so every
/// problem is reported as a violation message.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct NewEvent {
    #[validate(
        custom(function = "not_blank", message = "Event name cannot be blank"),
        length(max = 255, message = "Event name must be at most 255 characters")
    )]
    pub name: String,
    #[validate(required(message = "Event date cannot be null"))]
    pub date: Option<NaiveDate>,
    #[validate(
        custom(function = "not_blank", message = "Host name cannot be blank"),
        length(max = 255, message = "Host name must be at most 255 characters")
    )]
    pub host_name: String,
    #[validate(required(message = "Event start time cannot be null"))]
    #[serde(deserialize_with = "time_format::optional")]
    pub start_time: Option<NaiveTime>,
    #[validate(required(message = "Event end time cannot be null"))]
    #[serde(deserialize_with = "time_format::optional")]
    pub end_time: Option<NaiveTime>,
    #[validate(length(max = 512, message = "Location must be at most 512 characters"))]
    pub location: Option<String>,
    pub usernames: Vec<String>,
}

impl NewEvent {
    /// Field violations plus the past-date and attendee-name rules.
    pub fn violations(&self) -> Vec<String> {
        let mut out = validation::violations(self);
        if let Some(date) = self.date {
            if validation::not_in_past(&date).is_err() {
                out.push(PAST_DATE.to_string());
            }
        }
        if self.usernames.iter().any(|u| event_attendee::check_username(u).is_err()) {
            out.push(user::USERNAME_TOO_LONG.to_string());
        }
        out.sort();
        out
    }

    pub fn check(&self) -> Result<(), ModelError> {
        let v = self.violations();
        if v.is_empty() { Ok(()) } else { Err(ModelError::Validation(v.join("; "))) }
    }
}

/// Inserts the event and its initial attendees in one transaction.
pub async fn create(db: &DatabaseConnection, input: &NewEvent) -> Result<Model, ModelError> {
    input.check()?;
    let (Some(date), Some(start_time), Some(end_time)) = (input.date, input.start_time, input.end_time) else {
        return Err(ModelError::Validation("event is incomplete".into()));
    };
    let txn = db.begin().await.map_err(|e| ModelError::Db(e.to_string()))?;
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(input.name.trim().to_string()),
        date: Set(date),
        host_name: Set(input.host_name.trim().to_string()),
        start_time: Set(start_time),
        end_time: Set(end_time),
        location: Set(input.location.clone().filter(|l| !l.trim().is_empty())),
        created_at: Set(Utc::now().into()),
    };
    let event = am.insert(&txn).await.map_err(|e| ModelError::from_db(e, "event"))?;
    for username in input.usernames.iter().map(|u| u.trim()).filter(|u| !u.is_empty()) {
        event_attendee::add(&txn, event.id, username).await?;
    }
    txn.commit().await.map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(event)
}

pub async fn find_by_name<C: ConnectionTrait>(db: &C, name: &str) -> Result<Option<Model>, ModelError> {
    Entity::find()
        .filter(Column::Name.eq(name))
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Option<Model>, ModelError> {
    Entity::find_by_id(id).one(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn list<C: ConnectionTrait>(db: &C) -> Result<Vec<Model>, ModelError> {
    Entity::find()
        .order_by_asc(Column::Date)
        .order_by_asc(Column::StartTime)
        .all(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

/// Pictures and attendee rows go with it through the FK cascade.
pub async fn delete_by_name<C: ConnectionTrait>(db: &C, name: &str) -> Result<bool, ModelError> {
    let res = Entity::delete_many()
        .filter(Column::Name.eq(name))
        .exec(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn valid() -> NewEvent {
        NewEvent {
            name: "Test Event".into(),
            date: Some(Utc::now().date_naive() + Duration::days(1)),
            host_name: "Test Host".into(),
            start_time: NaiveTime::from_hms_opt(10, 0, 0),
            end_time: NaiveTime::from_hms_opt(12, 0, 0),
            location: None,
            usernames: vec![],
        }
    }

    fn only_violation(e: &NewEvent) -> String {
        let v = e.violations();
        assert_eq!(v.len(), 1, "expected exactly one violation, got {v:?}");
        v.into_iter().next().unwrap()
    }

    #[test]
    fn valid_event_has_no_violations() {
        assert!(valid().violations().is_empty());
    }

    #[test]
    fn today_is_allowed() {
        let e = NewEvent { date: Some(Utc::now().date_naive()), ..valid() };
        assert!(e.violations().is_empty());
    }

    #[test]
    fn blank_name_is_rejected() {
        let e = NewEvent { name: "   ".into(), ..valid() };
        assert_eq!(only_violation(&e), "Event name cannot be blank");
    }

    #[test]
    fn blank_host_is_rejected() {
        let e = NewEvent { host_name: "".into(), ..valid() };
        assert_eq!(only_violation(&e), "Host name cannot be blank");
    }

    #[test]
    fn missing_date_yields_only_null_violation() {
        let e = NewEvent { date: None, ..valid() };
        assert_eq!(only_violation(&e), "Event date cannot be null");
    }

    #[test]
    fn past_date_is_rejected() {
        let e = NewEvent { date: Some(Utc::now().date_naive() - Duration::days(1)), ..valid() };
        assert_eq!(only_violation(&e), PAST_DATE);
    }

    #[test]
    fn missing_times_are_rejected() {
        let e = NewEvent { start_time: None, ..valid() };
        assert_eq!(only_violation(&e), "Event start time cannot be null");
        let e = NewEvent { end_time: None, ..valid() };
        assert_eq!(only_violation(&e), "Event end time cannot be null");
    }

    #[test]
    fn body_accepts_short_times() {
        let e: NewEvent = serde_json::from_str(
            r#"{"name":"Party","date":"2999-01-01","hostName":"Ann","startTime":"18:00","endTime":"23:30:00"}"#,
        )
        .unwrap();
        assert_eq!(e.start_time, NaiveTime::from_hms_opt(18, 0, 0));
        assert_eq!(e.end_time, NaiveTime::from_hms_opt(23, 30, 0));
        assert!(e.usernames.is_empty());
        assert!(e.violations().is_empty());
    }

    #[test]
    fn missing_name_and_host_are_violations() {
        let e: NewEvent = serde_json::from_str(r#"{"date":"2999-01-01","startTime":"18:00","endTime":"23:00"}"#).unwrap();
        assert_eq!(e.violations(), vec!["Event name cannot be blank", "Host name cannot be blank"]);
    }

    #[test]
    fn overlong_fields_are_rejected() {
        let e = NewEvent { name: "n".repeat(256), ..valid() };
        assert_eq!(only_violation(&e), "Event name must be at most 255 characters");
        let e = NewEvent { usernames: vec!["u".repeat(65)], ..valid() };
        assert_eq!(only_violation(&e), user::USERNAME_TOO_LONG);
    }
}
