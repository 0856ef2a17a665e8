//! Demo data: a handful of users, events with attendees and pictures.
//! Runs at startup when `database.seed_demo_data` is on and wipes the
//! existing rows first.

use chrono::{Duration, Months, NaiveDate, NaiveTime, Utc};
use models::event::NewEvent;
use models::user::NewUser;
use models::{event, event_attendee, picture, user};
use sea_orm::{DatabaseConnection, EntityTrait};
use tracing::{info, instrument};

use crate::auth::errors::AuthError;
use crate::auth::password::hash_password;
use crate::errors::ServiceError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub users: usize,
    pub events: usize,
    pub pictures: usize,
}

struct DemoEvent {
    name: &'static str,
    date: NaiveDate,
    host: &'static str,
    start: (u32, u32),
    end: (u32, u32),
    location: &'static str,
    attendees: &'static [&'static str],
    pictures: &'static [(&'static str, &'static str)],
}

const DEMO_USERS: &[(&str, &str, &str, &str, &str)] = &[
    ("admin123", "admin@ucll.be", "Admin", "User", "password"),
    ("johndoe", "john.doe@email.com", "John", "Doe", "password123"),
    ("janesmith", "jane.smith@email.com", "Jane", "Smith", "password123"),
    ("mikeross", "mike.ross@email.com", "Mike", "Ross", "password123"),
    ("emilychen", "emily.chen@email.com", "Emily", "Chen", "password123"),
    ("davidlee", "david.lee@email.com", "David", "Lee", "password123"),
];

const UNSPLASH: &str = "https://images.unsplash.com/";

fn plus_months(d: NaiveDate, months: u32) -> NaiveDate { d.checked_add_months(Months::new(months)).unwrap_or(d) }

fn demo_events(today: NaiveDate) -> Vec<DemoEvent> {
    vec![
        DemoEvent {
            name: "Sarah's Birthday Bash",
            date: today + Duration::days(1),
            host: "Sarah Johnson",
            start: (18, 0),
            end: (23, 30),
            location: "123 Party Avenue, New York",
            attendees: &["johndoe", "janesmith", "mikeross", "emilychen"],
            pictures: &[
                ("photo-1530103862676-de8c9debad1d", "birthday,celebration,party,fun"),
                ("photo-1464349095431-e9a21285b5f3", "birthday,cake,candles,sweet"),
                ("photo-1514525253161-7a46d19cd819", "party,music,concert,celebration"),
            ],
        },
        DemoEvent {
            name: "Class of 2025 Graduation",
            date: plus_months(today, 6),
            host: "UCLL University",
            start: (10, 0),
            end: (14, 0),
            location: "University Campus, Main Hall",
            attendees: &["admin123", "johndoe", "janesmith", "davidlee"],
            pictures: &[
                ("photo-1523050854058-8df90110c9f1", "graduation,university,education,success"),
                ("photo-1566737236500-c8ac43014a67", "graduation,ceremony,achievement,graduate"),
                ("photo-1541339907198-e08756dedf3f", "graduation,celebration,diploma,proud"),
            ],
        },
        DemoEvent {
            name: "Emma & James Wedding",
            date: plus_months(today, 8),
            host: "Emma Davis",
            start: (15, 0),
            end: (23, 0),
            location: "Sunset Garden, California",
            attendees: &["janesmith", "mikeross", "emilychen", "davidlee"],
            pictures: &[
                ("photo-1519741497674-611481863552", "wedding,marriage,couple,love"),
                ("photo-1606800052052-a08af7148866", "wedding,bride,groom,ceremony"),
                ("photo-1465495976277-4387d4b0b4c6", "wedding,flowers,decoration,beautiful"),
                ("photo-1511285560929-80b456fea0bc", "wedding,reception,party,celebration"),
            ],
        },
        DemoEvent {
            name: "Summer Music Festival",
            date: today + Duration::weeks(2),
            host: "Live Events Co.",
            start: (17, 0),
            end: (22, 0),
            location: "Central Park, Main Stage",
            attendees: &["johndoe", "mikeross", "emilychen"],
            pictures: &[
                ("photo-1470229722913-7c0e2dbbafd3", "concert,music,festival,crowd"),
                ("photo-1501281668745-f7f57925c3b4", "concert,stage,performance,lights"),
                ("photo-1459749411175-04bf5292ceea", "music,festival,summer,outdoor"),
            ],
        },
        DemoEvent {
            name: "Tech Innovation Summit 2026",
            date: plus_months(today, 11),
            host: "Tech Leaders Network",
            start: (9, 0),
            end: (18, 0),
            location: "Convention Center, Downtown",
            attendees: &["admin123", "johndoe", "davidlee"],
            pictures: &[
                ("photo-1540575467063-178a50c2df87", "conference,technology,presentation,business"),
                ("photo-1591115765373-5207764f72e7", "conference,networking,professional,tech"),
                ("photo-1475721027785-f74eccf877e2", "conference,speaker,seminar,innovation"),
            ],
        },
        DemoEvent {
            name: "High School Reunion",
            date: plus_months(today, 15),
            host: "Class Committee",
            start: (19, 0),
            end: (23, 59),
            location: "Grand Hotel, Ballroom",
            attendees: &["janesmith", "mikeross", "emilychen", "davidlee"],
            pictures: &[
                ("photo-1511795409834-ef04bbd61622", "reunion,friends,group,memories"),
                ("photo-1529156069898-49953e39b3ac", "reunion,party,celebration,together"),
                ("photo-1528605248644-14dd04022da1", "reunion,dinner,gathering,fun"),
            ],
        },
    ]
}

fn time(hm: (u32, u32)) -> Option<NaiveTime> { NaiveTime::from_hms_opt(hm.0, hm.1, 0) }

fn auth_to_service(e: AuthError) -> ServiceError { ServiceError::Db(e.to_string()) }

/// Deletes pictures, events (attendees cascade) and users.
pub async fn clear_all(db: &DatabaseConnection) -> Result<(), ServiceError> {
    picture::Entity::delete_many().exec(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    event_attendee::Entity::delete_many().exec(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    event::Entity::delete_many().exec(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    user::Entity::delete_many().exec(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(())
}

#[instrument(skip(db))]
pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<SeedReport, ServiceError> {
    clear_all(db).await?;
    let mut report = SeedReport::default();

    for (username, email, first, last, password) in DEMO_USERS {
        let hash = hash_password(password).map_err(auth_to_service)?;
        user::create(db, &NewUser::new(username, email, first, last, password), hash).await?;
        report.users += 1;
    }

    for demo in demo_events(Utc::now().date_naive()) {
        let input = NewEvent {
            name: demo.name.into(),
            date: Some(demo.date),
            host_name: demo.host.into(),
            start_time: time(demo.start),
            end_time: time(demo.end),
            location: Some(demo.location.into()),
            usernames: demo.attendees.iter().map(|u| u.to_string()).collect(),
        };
        let created = event::create(db, &input).await?;
        report.events += 1;
        for (photo, tags) in demo.pictures {
            picture::create(db, created.id, &format!("{UNSPLASH}{photo}"), tags).await?;
            report.pictures += 1;
        }
    }

    info!(users = report.users, events = report.events, pictures = report.pictures, "demo data seeded");
    Ok(report)
}
