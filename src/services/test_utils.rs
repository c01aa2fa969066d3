use std::{collections::HashSet, sync::Arc, time::Duration};

use async_trait::async_trait;
use eyre::{Result, bail};

use crate::{
    models::{DBFile, UploadFile},
    services::{BlockService, MemoryObjectUrls},
    storage::{ArcFileStore, FileStore, sqlite::Sqlite},
};

pub(crate) async fn memory_store() -> Arc<Sqlite> {
    let db = Sqlite::new(None).await.expect("open in-memory db");
    db.run_migration().await.expect("run migration");
    Arc::new(db)
}

pub(crate) async fn memory_block_service() -> (BlockService, Arc<Sqlite>, Arc<MemoryObjectUrls>) {
    let store = memory_store().await;
    let urls = Arc::new(MemoryObjectUrls::new());
    let service = BlockService::new(store.clone(), urls.clone());
    (service, store, urls)
}

pub(crate) fn text_file(name: &str, content: &str) -> UploadFile {
    UploadFile::new(name, "text/plain", content.as_bytes().to_vec())
}

/// Wraps a store and lets tests slow down or break individual records.
/// Records are matched by their mime type for `put` and by id for
/// `delete`.
pub(crate) struct ScriptedStore {
    inner: ArcFileStore,
    slow_mimes: Vec<(String, Duration)>,
    failing_put_mimes: HashSet<String>,
    failing_delete_ids: HashSet<String>,
}

impl ScriptedStore {
    pub(crate) fn new(inner: ArcFileStore) -> Self {
        Self {
            inner,
            slow_mimes: vec![],
            failing_put_mimes: HashSet::new(),
            failing_delete_ids: HashSet::new(),
        }
    }

    pub(crate) fn with_slow_put(mut self, mime: &str, delay: Duration) -> Self {
        self.slow_mimes.push((mime.to_string(), delay));
        self
    }

    pub(crate) fn with_failing_put(mut self, mime: &str) -> Self {
        self.failing_put_mimes.insert(mime.to_string());
        self
    }

    pub(crate) fn with_failing_delete(mut self, id: &str) -> Self {
        self.failing_delete_ids.insert(id.to_string());
        self
    }
}

#[async_trait]
impl FileStore for ScriptedStore {
    async fn put(&self, file: DBFile) -> Result<()> {
        if let Some((_, delay)) = self.slow_mimes.iter().find(|(m, _)| *m == file.mime) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing_put_mimes.contains(&file.mime) {
            bail!("quota exceeded");
        }
        self.inner.put(file).await
    }

    async fn get(&self, id: &str) -> Result<Option<DBFile>> {
        self.inner.get(id).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        if self.failing_delete_ids.contains(id) {
            bail!("storage is corrupted");
        }
        self.inner.delete(id).await
    }
}
