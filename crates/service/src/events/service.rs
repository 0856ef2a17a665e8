use std::sync::Arc;

use models::event::NewEvent;
use tracing::{info, instrument};
use uuid::Uuid;

use super::domain::EventDetails;
use super::repository::EventRepository;
use crate::errors::ServiceError;

pub const NAME_TAKEN: &str = "Event name is already in use.";

pub struct EventService<R: EventRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: EventRepository + ?Sized> EventService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn list_events(&self) -> Result<Vec<EventDetails>, ServiceError> { self.repo.list_events().await }

    pub async fn get_event(&self, name: &str) -> Result<EventDetails, ServiceError> {
        self.repo
            .find_event_by_name(name)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Event not found: {name}")))
    }

    pub async fn get_event_by_id(&self, id: Uuid) -> Result<EventDetails, ServiceError> {
        self.repo.find_event_by_id(id).await?.ok_or_else(|| ServiceError::not_found("Event"))
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_event(&self, input: NewEvent) -> Result<EventDetails, ServiceError> {
        input.check()?;
        if self.repo.find_event_by_name(input.name.trim()).await?.is_some() {
            return Err(ServiceError::Conflict(NAME_TAKEN.into()));
        }
        let created = self.repo.create_event(&input).await?;
        info!(event_id = %created.id, attendees = created.usernames.len(), "event_created");
        Ok(created)
    }

    /// Adds `username` to the attendees; joining twice keeps one entry.
    #[instrument(skip(self))]
    pub async fn join_event(&self, name: &str, username: &str) -> Result<EventDetails, ServiceError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(ServiceError::Validation("Username cannot be blank".into()));
        }
        models::event_attendee::check_username(username)?;
        let event = self.get_event(name).await?;
        if event.has_attendee(username) {
            return Ok(event);
        }
        self.repo.add_attendee(event.id, username).await?;
        info!(event_id = %event.id, username, "event_joined");
        self.get_event(name).await
    }

    #[instrument(skip(self))]
    pub async fn delete_event(&self, name: &str) -> Result<(), ServiceError> {
        if !self.repo.delete_event_by_name(name).await? {
            return Err(ServiceError::NotFound(format!("Event not found: {name}")));
        }
        info!(name, "event_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::InMemoryRepository;
    use chrono::{Duration, NaiveTime, Utc};

    fn party(name: &str) -> NewEvent {
        NewEvent {
            name: name.into(),
            date: Some(Utc::now().date_naive() + Duration::days(3)),
            host_name: "Sarah Johnson".into(),
            start_time: NaiveTime::from_hms_opt(18, 0, 0),
            end_time: NaiveTime::from_hms_opt(23, 30, 0),
            location: Some("123 Party Avenue".into()),
            usernames: vec!["johndoe".into()],
        }
    }

    fn svc() -> EventService<InMemoryRepository> { EventService::new(Arc::new(InMemoryRepository::default())) }

    #[tokio::test]
    async fn create_then_get() {
        let svc = svc();
        let created = svc.create_event(party("Bash")).await.unwrap();
        assert_eq!(created.usernames, vec!["johndoe"]);
        assert!(created.pictures.is_empty());
        assert_eq!(svc.get_event("Bash").await.unwrap().id, created.id);
        assert_eq!(svc.get_event_by_id(created.id).await.unwrap().name, "Bash");
        assert_eq!(svc.list_events().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn duplicate_name_conflicts() {
        let svc = svc();
        svc.create_event(party("Bash")).await.unwrap();
        assert!(matches!(svc.create_event(party("Bash")).await, Err(ServiceError::Conflict(_))));
    }

    #[tokio::test]
    async fn invalid_event_is_rejected() {
        let svc = svc();
        let mut input = party("Bash");
        input.date = Some(Utc::now().date_naive() - Duration::days(1));
        let err = svc.create_event(input).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref m) if m == "Event date cannot be in the past"));
    }

    #[tokio::test]
    async fn joining_twice_keeps_one_entry() {
        let svc = svc();
        svc.create_event(party("Bash")).await.unwrap();
        svc.join_event("Bash", "janesmith").await.unwrap();
        let after = svc.join_event("Bash", "janesmith").await.unwrap();
        assert_eq!(after.usernames, vec!["johndoe", "janesmith"]);
    }

    #[tokio::test]
    async fn join_rejects_overlong_username() {
        let svc = svc();
        svc.create_event(party("Bash")).await.unwrap();
        let err = svc.join_event("Bash", &"x".repeat(65)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref m) if m == models::user::USERNAME_TOO_LONG));
        let ok = svc.join_event("Bash", &"y".repeat(64)).await.unwrap();
        assert!(ok.has_attendee(&"y".repeat(64)));
    }

    #[tokio::test]
    async fn join_unknown_event_is_not_found() {
        let svc = svc();
        assert!(matches!(svc.join_event("Nope", "ann").await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_event_then_missing() {
        let svc = svc();
        svc.create_event(party("Bash")).await.unwrap();
        svc.delete_event("Bash").await.unwrap();
        assert!(matches!(svc.get_event("Bash").await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.delete_event("Bash").await, Err(ServiceError::NotFound(_))));
    }
}
