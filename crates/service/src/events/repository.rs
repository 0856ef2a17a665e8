use async_trait::async_trait;
use models::event::NewEvent;
use uuid::Uuid;

use super::domain::EventDetails;
use crate::errors::ServiceError;

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn list_events(&self) -> Result<Vec<EventDetails>, ServiceError>;
    async fn find_event_by_name(&self, name: &str) -> Result<Option<EventDetails>, ServiceError>;
    async fn find_event_by_id(&self, id: Uuid) -> Result<Option<EventDetails>, ServiceError>;
    async fn create_event(&self, input: &NewEvent) -> Result<EventDetails, ServiceError>;
    /// Idempotent: an existing attendee is left as is.
    async fn add_attendee(&self, event_id: Uuid, username: &str) -> Result<(), ServiceError>;
    async fn delete_event_by_name(&self, name: &str) -> Result<bool, ServiceError>;
}
