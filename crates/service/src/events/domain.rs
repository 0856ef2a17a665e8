use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Event as exposed to clients: attendee usernames and pictures included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetails {
    pub id: Uuid,
    pub name: String,
    pub date: NaiveDate,
    pub host_name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub location: Option<String>,
    pub usernames: Vec<String>,
    pub pictures: Vec<models::picture::Model>,
}

impl EventDetails {
    pub fn from_parts(e: models::event::Model, usernames: Vec<String>, pictures: Vec<models::picture::Model>) -> Self {
        Self {
            id: e.id,
            name: e.name,
            date: e.date,
            host_name: e.host_name,
            start_time: e.start_time,
            end_time: e.end_time,
            location: e.location,
            usernames,
            pictures,
        }
    }

    pub fn has_attendee(&self, username: &str) -> bool { self.usernames.iter().any(|u| u == username) }
}
