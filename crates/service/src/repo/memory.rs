use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use models::event::NewEvent;
use models::picture::Model as Picture;
use models::{event, user};
use uuid::Uuid;

use crate::auth::domain::{AuthUser, Credentials, SignupInput};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;
use crate::errors::ServiceError;
use crate::events::domain::EventDetails;
use crate::events::repository::EventRepository;
use crate::pictures::repository::PictureRepository;

#[derive(Default)]
struct State {
    users: Vec<user::Model>,
    events: Vec<event::Model>,
    /// (event_id, username) in join order
    attendees: Vec<(Uuid, String)>,
    pictures: Vec<Picture>,
}

impl State {
    fn details(&self, e: &event::Model) -> EventDetails {
        let usernames = self.attendees.iter().filter(|(id, _)| *id == e.id).map(|(_, u)| u.clone()).collect();
        let pictures = self.pictures.iter().filter(|p| p.event_id == e.id).cloned().collect();
        EventDetails::from_parts(e.clone(), usernames, pictures)
    }

    fn add_attendee(&mut self, event_id: Uuid, username: &str) {
        if !self.attendees.iter().any(|(id, u)| *id == event_id && u == username) {
            self.attendees.push((event_id, username.to_string()));
        }
    }
}

/// In-process repository for unit tests, router tests and doc examples.
/// Mirrors the relational rules: unique usernames/emails/event names and
/// cascading deletes.
#[derive(Default)]
pub struct InMemoryRepository {
    state: Mutex<State>,
}

impl InMemoryRepository {
    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl AuthRepository for InMemoryRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<Credentials>, AuthError> {
        Ok(self.state().users.iter().find(|u| u.username == username).cloned().map(Credentials::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Credentials>, AuthError> {
        Ok(self.state().users.iter().find(|u| u.email == email).cloned().map(Credentials::from))
    }

    async fn create_user(&self, input: &SignupInput, password_hash: String) -> Result<AuthUser, AuthError> {
        let mut st = self.state();
        let username = input.username.trim();
        let email = input.email.trim();
        if st.users.iter().any(|u| u.username == username || u.email == email) {
            return Err(AuthError::Conflict("user already exists".into()));
        }
        let now = Utc::now().into();
        let model = user::Model {
            id: Uuid::new_v4(),
            username: username.to_string(),
            email: email.to_string(),
            first_name: input.first_name.trim().to_string(),
            last_name: input.last_name.trim().to_string(),
            password_hash,
            created_at: now,
            updated_at: now,
        };
        st.users.push(model.clone());
        Ok(model.into())
    }

    async fn list_users(&self) -> Result<Vec<AuthUser>, AuthError> {
        let mut users: Vec<AuthUser> = self.state().users.iter().cloned().map(AuthUser::from).collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }
}

#[async_trait]
impl EventRepository for InMemoryRepository {
    async fn list_events(&self) -> Result<Vec<EventDetails>, ServiceError> {
        let st = self.state();
        let mut events: Vec<&event::Model> = st.events.iter().collect();
        events.sort_by_key(|e| (e.date, e.start_time));
        Ok(events.into_iter().map(|e| st.details(e)).collect())
    }

    async fn find_event_by_name(&self, name: &str) -> Result<Option<EventDetails>, ServiceError> {
        let st = self.state();
        Ok(st.events.iter().find(|e| e.name == name).map(|e| st.details(e)))
    }

    async fn find_event_by_id(&self, id: Uuid) -> Result<Option<EventDetails>, ServiceError> {
        let st = self.state();
        Ok(st.events.iter().find(|e| e.id == id).map(|e| st.details(e)))
    }

    async fn create_event(&self, input: &NewEvent) -> Result<EventDetails, ServiceError> {
        input.check()?;
        let (Some(date), Some(start_time), Some(end_time)) = (input.date, input.start_time, input.end_time) else {
            return Err(ServiceError::Validation("event is incomplete".into()));
        };
        let mut st = self.state();
        let name = input.name.trim();
        if st.events.iter().any(|e| e.name == name) {
            return Err(ServiceError::Conflict("event already exists".into()));
        }
        let model = event::Model {
            id: Uuid::new_v4(),
            name: name.to_string(),
            date,
            host_name: input.host_name.trim().to_string(),
            start_time,
            end_time,
            location: input.location.clone().filter(|l| !l.trim().is_empty()),
            created_at: Utc::now().into(),
        };
        st.events.push(model.clone());
        for username in input.usernames.iter().map(|u| u.trim()).filter(|u| !u.is_empty()) {
            st.add_attendee(model.id, username);
        }
        Ok(st.details(&model))
    }

    async fn add_attendee(&self, event_id: Uuid, username: &str) -> Result<(), ServiceError> {
        models::event_attendee::check_username(username)?;
        let mut st = self.state();
        if !st.events.iter().any(|e| e.id == event_id) {
            return Err(ServiceError::not_found("Event"));
        }
        st.add_attendee(event_id, username);
        Ok(())
    }

    async fn delete_event_by_name(&self, name: &str) -> Result<bool, ServiceError> {
        let mut st = self.state();
        let Some(pos) = st.events.iter().position(|e| e.name == name) else { return Ok(false) };
        let removed = st.events.remove(pos);
        st.attendees.retain(|(id, _)| *id != removed.id);
        st.pictures.retain(|p| p.event_id != removed.id);
        Ok(true)
    }
}

#[async_trait]
impl PictureRepository for InMemoryRepository {
    async fn list_pictures(&self) -> Result<Vec<Picture>, ServiceError> { Ok(self.state().pictures.clone()) }

    async fn find_picture(&self, id: Uuid) -> Result<Option<Picture>, ServiceError> {
        Ok(self.state().pictures.iter().find(|p| p.id == id).cloned())
    }

    async fn pictures_of_event(&self, event_id: Uuid) -> Result<Vec<Picture>, ServiceError> {
        Ok(self.state().pictures.iter().filter(|p| p.event_id == event_id).cloned().collect())
    }

    async fn event_exists(&self, event_id: Uuid) -> Result<bool, ServiceError> {
        Ok(self.state().events.iter().any(|e| e.id == event_id))
    }

    async fn create_picture(&self, event_id: Uuid, url: &str, hashtags: &str) -> Result<Picture, ServiceError> {
        models::picture::check_url(url)?;
        let mut st = self.state();
        if !st.events.iter().any(|e| e.id == event_id) {
            return Err(ServiceError::not_found("Event"));
        }
        let pic = Picture {
            id: Uuid::new_v4(),
            event_id,
            url: url.to_string(),
            hashtags: hashtags.to_string(),
            created_at: Utc::now().into(),
        };
        st.pictures.push(pic.clone());
        Ok(pic)
    }

    async fn delete_picture(&self, id: Uuid) -> Result<bool, ServiceError> {
        let mut st = self.state();
        let before = st.pictures.len();
        st.pictures.retain(|p| p.id != id);
        Ok(st.pictures.len() != before)
    }
}
