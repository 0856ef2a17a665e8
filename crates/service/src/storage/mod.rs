//! Object storage for picture bytes.
//!
//! [`ObjectStore`] uploads bytes under a key and hands back the URL clients
//! should use to fetch them. Three backends:
//! - [`HttpObjectStore`]: external storage HTTP API (`/storage/v1/object/...`)
//! - [`LocalDirStore`]: files on disk, served by the server under `/uploads`
//! - [`MemoryStore`]: in-process map for tests

use async_trait::async_trait;
use thiserror::Error;

pub mod http;
pub mod local;
pub mod memory;

pub use http::HttpObjectStore;
pub use local::LocalDirStore;
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid file URL")]
    InvalidUrl(String),
    #[error("invalid object key: {0}")]
    InvalidKey(String),
    #[error("storage request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("storage returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Stores `bytes` under `key` and returns the public URL.
    async fn upload(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<String, StorageError>;

    /// Removes the object a previously returned public URL points at.
    async fn delete(&self, url: &str) -> Result<(), StorageError>;

    fn backend_name(&self) -> &'static str;
}

/// Keys are relative, slash-separated and never climb out of their root.
pub(crate) fn check_key(key: &str) -> Result<(), StorageError> {
    let bad = key.is_empty()
        || key.starts_with('/')
        || key.contains('\\')
        || key.split('/').any(|seg| seg.is_empty() || seg == "." || seg == "..");
    if bad {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}
