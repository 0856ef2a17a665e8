use crate::db::connect;
use crate::{event, event_attendee, picture, user};
use crate::errors::ModelError;
use anyhow::Result;
use chrono::{Duration, NaiveTime, Utc};
use migration::MigratorTrait;
use sea_orm::{DatabaseConnection, EntityTrait};
use uuid::Uuid;

/// Connects and migrates, or returns `None` so the test can bail out.
async fn setup_test_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let db = match connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {}", e);
            return None;
        }
    };
    if let Err(e) = migration::Migrator::up(&db, None).await {
        eprintln!("skip: migrate up failed: {}", e);
        return None;
    }
    Some(db)
}

fn new_event(name: &str, usernames: Vec<String>) -> event::NewEvent {
    event::NewEvent {
        name: name.to_string(),
        date: Some(Utc::now().date_naive() + Duration::days(7)),
        host_name: "Host".into(),
        start_time: NaiveTime::from_hms_opt(18, 0, 0),
        end_time: NaiveTime::from_hms_opt(22, 0, 0),
        location: Some("Leuven".into()),
        usernames,
    }
}

#[tokio::test]
async fn user_create_and_lookup() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };
    let tag = Uuid::new_v4().simple().to_string();
    let input = user::NewUser::new(&format!("u_{tag}"), &format!("{tag}@example.com"), "Ann", "Lee", "secret1");

    let created = user::create(&db, &input, "$argon2id$fake".into()).await?;
    assert_eq!(created.username, input.username);

    let by_name = user::find_by_username(&db, &input.username).await?;
    assert_eq!(by_name.map(|u| u.id), Some(created.id));
    let by_mail = user::find_by_email(&db, &input.email).await?;
    assert_eq!(by_mail.map(|u| u.id), Some(created.id));
    assert!(user::exists_by_username(&db, &input.username).await?);

    let dup = user::create(&db, &input, "$argon2id$fake".into()).await;
    assert!(matches!(dup, Err(ModelError::Conflict(_))));

    user::Entity::delete_by_id(created.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn event_with_attendees_and_pictures_cascades() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };
    let name = format!("event_{}", Uuid::new_v4());
    let created = event::create(&db, &new_event(&name, vec!["ann".into(), "bob".into(), "ann".into()])).await?;

    assert_eq!(event_attendee::usernames(&db, created.id).await?, vec!["ann", "bob"]);
    assert!(!event_attendee::add(&db, created.id, "bob").await?);

    let pic = picture::create(&db, created.id, "https://cdn/x.jpg", "beach, summer").await?;
    assert_eq!(pic.hashtags, "beach,summer");
    assert_eq!(picture::list_by_event(&db, created.id).await?.len(), 1);

    assert!(event::delete_by_name(&db, &name).await?);
    assert!(event::find_by_name(&db, &name).await?.is_none());
    assert!(picture::find_by_id(&db, pic.id).await?.is_none());
    assert!(event_attendee::usernames(&db, created.id).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn invalid_event_is_not_inserted() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };
    let name = format!("event_{}", Uuid::new_v4());
    let mut input = new_event(&name, vec![]);
    input.date = None;
    let res = event::create(&db, &input).await;
    assert!(matches!(res, Err(ModelError::Validation(m)) if m == "Event date cannot be null"));
    assert!(event::find_by_name(&db, &name).await?.is_none());
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_joins_keep_one_attendee() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };
    let name = format!("event_{}", Uuid::new_v4());
    let created = event::create(&db, &new_event(&name, vec![])).await?;

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let db = db.clone();
            tokio::spawn(async move { event_attendee::add(&db, created.id, "carol").await })
        })
        .collect();
    let mut inserted = 0;
    for t in tasks {
        if t.await?? {
            inserted += 1;
        }
    }
    assert_eq!(inserted, 1);
    assert_eq!(event_attendee::usernames(&db, created.id).await?, vec!["carol"]);

    let too_long = event_attendee::add(&db, created.id, &"x".repeat(65)).await;
    assert!(matches!(too_long, Err(ModelError::Validation(_))));

    event::delete_by_name(&db, &name).await?;
    Ok(())
}
