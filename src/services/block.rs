#[cfg(test)]
#[path = "block_test.rs"]
mod tests;

use std::sync::Arc;

use eyre::{Context, Result};

use crate::{
    models::{DBFile, FileBlock, UploadFile},
    services::object_url::{ArcObjectUrls, is_object_url},
    storage::ArcFileStore,
};

/// Turns uploaded files into message blocks and tears them down again.
#[derive(Clone)]
pub struct BlockService {
    store: ArcFileStore,
    urls: ArcObjectUrls,
}

impl BlockService {
    pub fn new(store: ArcFileStore, urls: ArcObjectUrls) -> Self {
        Self { store, urls }
    }

    pub fn urls(&self) -> &ArcObjectUrls {
        &self.urls
    }

    /// Persists the file and allocates an object URL for it. The URL is
    /// only allocated once the record is stored.
    pub async fn create_file_block(&self, file: UploadFile) -> Result<FileBlock> {
        let id = uuid::Uuid::new_v4().to_string();

        self.store
            .put(DBFile {
                id: id.clone(),
                mime: file.mime().to_string(),
                blob: file.data().to_vec(),
            })
            .await
            .wrap_err(format!("persisting {}", file.name()))?;

        let url = self.urls.create(Arc::clone(file.data()), file.mime());
        log::debug!("Created file block {} for {}", id, file.name());

        Ok(FileBlock {
            id,
            name: file.name().to_string(),
            mime: file.mime().to_string(),
            url,
        })
    }

    /// Releases the block's object URL, then removes its stored record.
    /// The URL is released even when the storage delete fails.
    pub async fn delete_file_block(&self, block: &FileBlock) -> Result<()> {
        if is_object_url(&block.url) && !self.urls.revoke(&block.url) {
            log::debug!("Object URL {} was already released", block.url);
        }
        self.store
            .delete(&block.id)
            .await
            .wrap_err(format!("deleting file block {}", block.id))?;
        log::debug!("Deleted file block {}", block.id);
        Ok(())
    }

    pub async fn load_file_block(&self, block: &FileBlock) -> Result<Option<DBFile>> {
        self.store.get(&block.id).await
    }

    /// Allocates a fresh object URL from the stored bytes, e.g. after the
    /// previous one was released. Returns `None` if the record is gone.
    pub async fn restore_url(&self, block: &FileBlock) -> Result<Option<String>> {
        let Some(file) = self.store.get(&block.id).await? else {
            return Ok(None);
        };
        let data: Arc<[u8]> = file.blob.into();
        Ok(Some(self.urls.create(data, &file.mime)))
    }
}
