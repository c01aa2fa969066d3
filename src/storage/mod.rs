pub mod sqlite;

use std::sync::Arc;

use crate::{config::StorageConfig, config::resolve_path, models::DBFile};
use async_trait::async_trait;
use eyre::{Context, Result};
use sqlite::Sqlite;
use tokio::sync::OnceCell;

/// Durable key-value store for uploaded files, keyed by file id.
#[async_trait]
pub trait FileStore {
    /// Insert or replace the record with the same id.
    async fn put(&self, file: DBFile) -> Result<()>;
    async fn get(&self, id: &str) -> Result<Option<DBFile>>;
    /// Remove the record. Deleting an unknown id is not an error.
    async fn delete(&self, id: &str) -> Result<()>;
}

pub type ArcFileStore = Arc<dyn FileStore + Send + Sync>;

static FILE_STORE: OnceCell<ArcFileStore> = OnceCell::const_new();

/// Returns the process-wide file store, opening it on first use. Later
/// calls return the same handle whatever config they pass.
pub async fn file_store(config: &StorageConfig) -> Result<ArcFileStore> {
    let store = FILE_STORE
        .get_or_try_init(|| new_file_store(config))
        .await?;
    Ok(Arc::clone(store))
}

pub async fn new_file_store(config: &StorageConfig) -> Result<ArcFileStore> {
    let store: ArcFileStore = match config {
        StorageConfig::Sqlite(sqlite_config) => {
            let path = match sqlite_config.path() {
                Some(path) => {
                    let path = resolve_path(path)?;
                    crate::config::init_parent_dir(&path)?;
                    Some(path)
                }
                None => None,
            };
            let db = Sqlite::new(path.as_deref()).await?;
            db.run_migration().await.wrap_err("migrating file store")?;
            Arc::new(db)
        }
    };
    Ok(store)
}
