#[cfg(test)]
#[path = "object_url_test.rs"]
mod tests;

use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

#[cfg(test)]
use mockall::automock;

use crate::config::APP_NAME;

pub const OBJECT_URL_SCHEME: &str = "blob:";

/// Hands out transient URLs for in-memory file contents. A URL stays
/// resolvable until it is revoked.
#[cfg_attr(test, automock)]
pub trait ObjectUrls {
    fn create(&self, data: Arc<[u8]>, mime: &str) -> String;
    fn resolve(&self, url: &str) -> Option<Arc<[u8]>>;
    /// Returns whether the URL was still live.
    fn revoke(&self, url: &str) -> bool;
}

pub type ArcObjectUrls = Arc<dyn ObjectUrls + Send + Sync>;

pub fn is_object_url(url: &str) -> bool {
    url.starts_with(OBJECT_URL_SCHEME)
}

struct ObjectEntry {
    data: Arc<[u8]>,
    mime: String,
}

#[derive(Default)]
pub struct MemoryObjectUrls {
    entries: RwLock<HashMap<String, ObjectEntry>>,
}

impl MemoryObjectUrls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn mime(&self, url: &str) -> Option<String> {
        self.read().get(url).map(|entry| entry.mime.clone())
    }

    // Writers only insert or remove whole entries, so a poisoned map is
    // still consistent.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, ObjectEntry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, ObjectEntry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ObjectUrls for MemoryObjectUrls {
    fn create(&self, data: Arc<[u8]>, mime: &str) -> String {
        let url = format!(
            "{}{}/{}",
            OBJECT_URL_SCHEME,
            APP_NAME,
            uuid::Uuid::new_v4()
        );
        self.write().insert(
            url.clone(),
            ObjectEntry {
                data,
                mime: mime.to_string(),
            },
        );
        url
    }

    fn resolve(&self, url: &str) -> Option<Arc<[u8]>> {
        self.read().get(url).map(|entry| Arc::clone(&entry.data))
    }

    fn revoke(&self, url: &str) -> bool {
        self.write().remove(url).is_some()
    }
}
