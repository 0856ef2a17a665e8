use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use super::{check_key, ObjectStore, StorageError};

/// URL prefix the server mounts the upload directory under.
pub const PUBLIC_PREFIX: &str = "/uploads";

/// Writes objects below `root` and returns `/uploads/<key>` URLs.
pub struct LocalDirStore {
    root: PathBuf,
}

impl LocalDirStore {
    pub fn new(root: impl Into<PathBuf>) -> Self { Self { root: root.into() } }

    pub fn root(&self) -> &std::path::Path { &self.root }
}

#[async_trait]
impl ObjectStore for LocalDirStore {
    async fn upload(&self, key: &str, bytes: Vec<u8>, _content_type: &str) -> Result<String, StorageError> {
        check_key(key)?;
        let path = self.root.join(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, bytes).await?;
        debug!(path = %path.display(), "object written");
        Ok(format!("{PUBLIC_PREFIX}/{key}"))
    }

    async fn delete(&self, url: &str) -> Result<(), StorageError> {
        let key = url
            .strip_prefix(PUBLIC_PREFIX)
            .and_then(|k| k.strip_prefix('/'))
            .ok_or_else(|| StorageError::InvalidUrl(url.to_string()))?;
        check_key(key).map_err(|_| StorageError::InvalidUrl(url.to_string()))?;
        match tokio::fs::remove_file(self.root.join(key)).await {
            Ok(()) => Ok(()),
            // already gone
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn backend_name(&self) -> &'static str { "local" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn writes_and_deletes_under_root() {
        let root = std::env::temp_dir().join(format!("recall-store-{}", uuid::Uuid::new_v4()));
        let store = LocalDirStore::new(&root);

        let url = store.upload("event-7/x.jpg", b"jpeg".to_vec(), "image/jpeg").await.unwrap();
        assert_eq!(url, "/uploads/event-7/x.jpg");
        assert_eq!(tokio::fs::read(root.join("event-7/x.jpg")).await.unwrap(), b"jpeg");

        store.delete(&url).await.unwrap();
        assert!(!root.join("event-7/x.jpg").exists());
        // second delete is a no-op
        store.delete(&url).await.unwrap();

        assert!(matches!(store.delete("https://cdn/x.jpg").await, Err(StorageError::InvalidUrl(_))));
        let _ = tokio::fs::remove_dir_all(&root).await;
    }
}
