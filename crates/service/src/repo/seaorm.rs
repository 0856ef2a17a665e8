use async_trait::async_trait;
use models::event::NewEvent;
use models::picture::Model as Picture;
use models::{event, event_attendee, picture, user};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::domain::{AuthUser, Credentials, SignupInput};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;
use crate::errors::ServiceError;
use crate::events::domain::EventDetails;
use crate::events::repository::EventRepository;
use crate::pictures::repository::PictureRepository;

/// Postgres-backed repository; every call delegates to the `models` helpers.
#[derive(Clone)]
pub struct SeaOrmRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    async fn details(&self, e: event::Model) -> Result<EventDetails, ServiceError> {
        let usernames = event_attendee::usernames(&self.db, e.id).await?;
        let pictures = picture::list_by_event(&self.db, e.id).await?;
        Ok(EventDetails::from_parts(e, usernames, pictures))
    }
}

#[async_trait]
impl AuthRepository for SeaOrmRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<Credentials>, AuthError> {
        Ok(user::find_by_username(&self.db, username).await?.map(Credentials::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Credentials>, AuthError> {
        Ok(user::find_by_email(&self.db, email).await?.map(Credentials::from))
    }

    async fn create_user(&self, input: &SignupInput, password_hash: String) -> Result<AuthUser, AuthError> {
        Ok(user::create(&self.db, input, password_hash).await?.into())
    }

    async fn list_users(&self) -> Result<Vec<AuthUser>, AuthError> {
        Ok(user::list(&self.db).await?.into_iter().map(AuthUser::from).collect())
    }
}

#[async_trait]
impl EventRepository for SeaOrmRepository {
    async fn list_events(&self) -> Result<Vec<EventDetails>, ServiceError> {
        let mut out = Vec::new();
        for e in event::list(&self.db).await? {
            out.push(self.details(e).await?);
        }
        Ok(out)
    }

    async fn find_event_by_name(&self, name: &str) -> Result<Option<EventDetails>, ServiceError> {
        match event::find_by_name(&self.db, name).await? {
            Some(e) => Ok(Some(self.details(e).await?)),
            None => Ok(None),
        }
    }

    async fn find_event_by_id(&self, id: Uuid) -> Result<Option<EventDetails>, ServiceError> {
        match event::find_by_id(&self.db, id).await? {
            Some(e) => Ok(Some(self.details(e).await?)),
            None => Ok(None),
        }
    }

    async fn create_event(&self, input: &NewEvent) -> Result<EventDetails, ServiceError> {
        let created = event::create(&self.db, input).await?;
        self.details(created).await
    }

    async fn add_attendee(&self, event_id: Uuid, username: &str) -> Result<(), ServiceError> {
        event_attendee::add(&self.db, event_id, username).await?;
        Ok(())
    }

    async fn delete_event_by_name(&self, name: &str) -> Result<bool, ServiceError> {
        Ok(event::delete_by_name(&self.db, name).await?)
    }
}

#[async_trait]
impl PictureRepository for SeaOrmRepository {
    async fn list_pictures(&self) -> Result<Vec<Picture>, ServiceError> { Ok(picture::list(&self.db).await?) }

    async fn find_picture(&self, id: Uuid) -> Result<Option<Picture>, ServiceError> {
        Ok(picture::find_by_id(&self.db, id).await?)
    }

    async fn pictures_of_event(&self, event_id: Uuid) -> Result<Vec<Picture>, ServiceError> {
        Ok(picture::list_by_event(&self.db, event_id).await?)
    }

    async fn event_exists(&self, event_id: Uuid) -> Result<bool, ServiceError> {
        Ok(event::find_by_id(&self.db, event_id).await?.is_some())
    }

    async fn create_picture(&self, event_id: Uuid, url: &str, hashtags: &str) -> Result<Picture, ServiceError> {
        Ok(picture::create(&self.db, event_id, url, hashtags).await?)
    }

    async fn delete_picture(&self, id: Uuid) -> Result<bool, ServiceError> { Ok(picture::delete(&self.db, id).await?) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use chrono::{Duration, NaiveTime, Utc};

    #[tokio::test]
    async fn event_lifecycle_against_postgres() {
        let Some(db) = get_db().await else { return };
        let repo = SeaOrmRepository::new(db);
        let name = format!("repo_{}", Uuid::new_v4());
        let input = NewEvent {
            name: name.clone(),
            date: Some(Utc::now().date_naive() + Duration::days(1)),
            host_name: "Host".into(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0),
            end_time: NaiveTime::from_hms_opt(17, 0, 0),
            location: None,
            usernames: vec!["ann".into()],
        };
        let created = repo.create_event(&input).await.unwrap();
        repo.add_attendee(created.id, "bob").await.unwrap();
        repo.add_attendee(created.id, "bob").await.unwrap();
        repo.create_picture(created.id, "https://img/1", "a,b").await.unwrap();

        let found = repo.find_event_by_name(&name).await.unwrap().unwrap();
        assert_eq!(found.usernames, vec!["ann", "bob"]);
        assert_eq!(found.pictures.len(), 1);
        assert!(repo.event_exists(created.id).await.unwrap());

        assert!(repo.delete_event_by_name(&name).await.unwrap());
        assert!(repo.pictures_of_event(created.id).await.unwrap().is_empty());
    }
}
