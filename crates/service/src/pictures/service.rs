use std::sync::Arc;

use models::picture::{self, Model as Picture};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::repository::PictureRepository;
use super::upload::{content_type_for_ext, decode_base64_image, extension_of, object_key};
use crate::errors::ServiceError;
use crate::storage::ObjectStore;

pub const EMPTY_FILE: &str = "File is empty";

/// Raw file as it arrives from a multipart form.
#[derive(Debug, Clone, Default)]
pub struct FileUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

pub struct PictureService<R: PictureRepository + ?Sized> {
    repo: Arc<R>,
    store: Arc<dyn ObjectStore>,
}

impl<R: PictureRepository + ?Sized> PictureService<R> {
    pub fn new(repo: Arc<R>, store: Arc<dyn ObjectStore>) -> Self { Self { repo, store } }

    pub async fn list_pictures(&self) -> Result<Vec<Picture>, ServiceError> { self.repo.list_pictures().await }

    pub async fn get_picture(&self, id: Uuid) -> Result<Picture, ServiceError> {
        self.repo.find_picture(id).await?.ok_or_else(|| ServiceError::not_found("Picture"))
    }

    /// Unknown events simply have no pictures.
    pub async fn pictures_by_event(&self, event_id: Uuid) -> Result<Vec<Picture>, ServiceError> {
        self.repo.pictures_of_event(event_id).await
    }

    pub async fn pictures_by_hashtag(&self, tag: &str) -> Result<Vec<Picture>, ServiceError> {
        let all = self.repo.list_pictures().await?;
        Ok(all.into_iter().filter(|p| p.matches_hashtag(tag)).collect())
    }

    #[instrument(skip(self))]
    pub async fn save_picture(&self, event_id: Uuid, url: &str, hashtags: &str) -> Result<Picture, ServiceError> {
        if url.trim().is_empty() {
            return Err(ServiceError::Validation("Picture url cannot be blank".into()));
        }
        self.ensure_event(event_id).await?;
        let saved = self.repo.create_picture(event_id, url.trim(), &normalize_tags(hashtags)).await?;
        info!(picture_id = %saved.id, %event_id, "picture_saved");
        Ok(saved)
    }

    #[instrument(skip(self, file), fields(size = file.bytes.len(), file_name = file.file_name.as_deref().unwrap_or("")))]
    pub async fn upload_file(&self, event_id: Uuid, file: FileUpload, hashtags: &str) -> Result<Picture, ServiceError> {
        self.ensure_event(event_id).await?;
        if file.bytes.is_empty() {
            return Err(ServiceError::Validation(EMPTY_FILE.into()));
        }
        let ext = extension_of(file.file_name.as_deref());
        let content_type = file
            .content_type
            .filter(|c| !c.trim().is_empty() && c != "application/octet-stream")
            .unwrap_or_else(|| content_type_for_ext(&ext).to_string());
        self.store_and_save(event_id, &ext, &content_type, file.bytes, hashtags).await
    }

    #[instrument(skip(self, data), fields(len = data.len()))]
    pub async fn upload_base64(&self, event_id: Uuid, data: &str, hashtags: &str) -> Result<Picture, ServiceError> {
        self.ensure_event(event_id).await?;
        let decoded = decode_base64_image(data)?;
        if decoded.bytes.is_empty() {
            return Err(ServiceError::Validation(EMPTY_FILE.into()));
        }
        self.store_and_save(event_id, &decoded.ext, &decoded.content_type, decoded.bytes, hashtags).await
    }

    /// Drops the row, then the stored object on a best-effort basis.
    #[instrument(skip(self))]
    pub async fn delete_picture(&self, id: Uuid) -> Result<(), ServiceError> {
        let pic = self.get_picture(id).await?;
        if !self.repo.delete_picture(id).await? {
            return Err(ServiceError::not_found("Picture"));
        }
        if let Err(e) = self.store.delete(&pic.url).await {
            warn!(picture_id = %id, url = %pic.url, error = %e, "stored object not removed");
        }
        info!(picture_id = %id, "picture_deleted");
        Ok(())
    }

    async fn ensure_event(&self, event_id: Uuid) -> Result<(), ServiceError> {
        if !self.repo.event_exists(event_id).await? {
            return Err(ServiceError::NotFound(format!("Event not found: {event_id}")));
        }
        Ok(())
    }

    async fn store_and_save(
        &self,
        event_id: Uuid,
        ext: &str,
        content_type: &str,
        bytes: Vec<u8>,
        hashtags: &str,
    ) -> Result<Picture, ServiceError> {
        let key = object_key(event_id, ext);
        let url = self.store.upload(&key, bytes, content_type).await?;
        info!(%event_id, key = %key, backend = self.store.backend_name(), "picture_uploaded");
        match self.repo.create_picture(event_id, &url, &normalize_tags(hashtags)).await {
            Ok(saved) => Ok(saved),
            Err(e) => {
                if let Err(cleanup) = self.store.delete(&url).await {
                    warn!(%url, error = %cleanup, "orphaned object not removed");
                }
                Err(e)
            }
        }
    }
}

fn normalize_tags(raw: &str) -> String { picture::join_hashtags(&picture::split_hashtags(raw)) }
