use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use tracing::{debug, instrument};

use super::{check_key, ObjectStore, StorageError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for a storage HTTP API laid out as
/// `{base}/storage/v1/object/{bucket}/{key}`.
pub struct HttpObjectStore {
    client: reqwest::Client,
    base_url: String,
    service_key: String,
    bucket: String,
}

impl HttpObjectStore {
    pub fn new(base_url: &str, service_key: &str, bucket: &str) -> Result<Self, StorageError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key: service_key.to_string(),
            bucket: bucket.to_string(),
        })
    }

    pub fn object_url(&self, key: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base_url, self.bucket, key)
    }

    pub fn public_url(&self, key: &str) -> String {
        format!("{}/storage/v1/object/public/{}/{}", self.base_url, self.bucket, key)
    }

    /// Object path inside the bucket: everything after the first `<bucket>/`.
    pub fn object_path_from_url<'a>(&self, url: &'a str) -> Result<&'a str, StorageError> {
        let marker = format!("{}/", self.bucket);
        match url.find(&marker) {
            Some(idx) => {
                let path = &url[idx + marker.len()..];
                if path.is_empty() {
                    return Err(StorageError::InvalidUrl(url.to_string()));
                }
                Ok(path)
            }
            None => Err(StorageError::InvalidUrl(url.to_string())),
        }
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    #[instrument(skip(self, bytes), fields(bucket = %self.bucket, size = bytes.len()))]
    async fn upload(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<String, StorageError> {
        check_key(key)?;
        let resp = self
            .client
            .post(self.object_url(key))
            .header(AUTHORIZATION, format!("Bearer {}", self.service_key))
            .header(CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;
        let status = resp.status();
        if status != StatusCode::OK && status != StatusCode::CREATED {
            let body = resp.text().await.unwrap_or_default();
            return Err(StorageError::HttpStatus { status: status.as_u16(), body });
        }
        debug!(key, "object uploaded");
        Ok(self.public_url(key))
    }

    #[instrument(skip(self), fields(bucket = %self.bucket))]
    async fn delete(&self, url: &str) -> Result<(), StorageError> {
        let path = self.object_path_from_url(url)?;
        let resp = self
            .client
            .delete(self.object_url(path))
            .header(AUTHORIZATION, format!("Bearer {}", self.service_key))
            .send()
            .await?;
        let status = resp.status();
        if status != StatusCode::OK && status != StatusCode::NO_CONTENT {
            let body = resp.text().await.unwrap_or_default();
            return Err(StorageError::HttpStatus { status: status.as_u16(), body });
        }
        Ok(())
    }

    fn backend_name(&self) -> &'static str { "http" }
}
