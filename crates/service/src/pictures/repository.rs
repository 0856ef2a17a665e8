use async_trait::async_trait;
use models::picture::Model as Picture;
use uuid::Uuid;

use crate::errors::ServiceError;

#[async_trait]
pub trait PictureRepository: Send + Sync {
    async fn list_pictures(&self) -> Result<Vec<Picture>, ServiceError>;
    async fn find_picture(&self, id: Uuid) -> Result<Option<Picture>, ServiceError>;
    async fn pictures_of_event(&self, event_id: Uuid) -> Result<Vec<Picture>, ServiceError>;
    async fn event_exists(&self, event_id: Uuid) -> Result<bool, ServiceError>;
    async fn create_picture(&self, event_id: Uuid, url: &str, hashtags: &str) -> Result<Picture, ServiceError>;
    async fn delete_picture(&self, id: Uuid) -> Result<bool, ServiceError>;
}
