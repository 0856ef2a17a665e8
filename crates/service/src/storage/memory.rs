use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{check_key, ObjectStore, StorageError};

const SCHEME: &str = "memory://";

/// Keeps objects in a map; URLs look like `memory://<key>`.
#[derive(Default)]
pub struct MemoryStore {
    objects: Mutex<HashMap<String, (Vec<u8>, String)>>,
}

impl MemoryStore {
    pub fn new() -> Self { Self::default() }

    /// Bytes and content type stored under `key`.
    pub fn get(&self, key: &str) -> Option<(Vec<u8>, String)> {
        self.objects.lock().ok()?.get(key).cloned()
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.objects.lock().map(|m| m.keys().cloned().collect()).unwrap_or_default();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize { self.objects.lock().map(|m| m.len()).unwrap_or(0) }

    pub fn is_empty(&self) -> bool { self.len() == 0 }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn upload(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<String, StorageError> {
        check_key(key)?;
        if let Ok(mut m) = self.objects.lock() {
            m.insert(key.to_string(), (bytes, content_type.to_string()));
        }
        Ok(format!("{SCHEME}{key}"))
    }

    async fn delete(&self, url: &str) -> Result<(), StorageError> {
        let key = url.strip_prefix(SCHEME).ok_or_else(|| StorageError::InvalidUrl(url.to_string()))?;
        if let Ok(mut m) = self.objects.lock() {
            m.remove(key);
        }
        Ok(())
    }

    fn backend_name(&self) -> &'static str { "memory" }
}
