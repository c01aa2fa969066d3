#[cfg(test)]
#[path = "sqlite_test.rs"]
mod tests;

pub(crate) mod migration;

use async_trait::async_trait;
use eyre::{Context, Result};
use tokio_rusqlite::{Connection, OptionalExtension, named_params, params};

use crate::{models::DBFile, storage::FileStore};

pub struct Sqlite {
    conn: Connection,
}

impl Sqlite {
    pub async fn new(path: Option<&str>) -> Result<Self> {
        let conn = match path {
            Some(path) => Connection::open(path)
                .await
                .wrap_err(format!("opening database path: {}", path))?,
            None => Connection::open_in_memory()
                .await
                .wrap_err("opening in-memory database")?,
        };

        Ok(Self { conn })
    }

    /// Creates the `files` table when it does not exist yet. Safe to run
    /// any number of times.
    pub async fn run_migration(&self) -> Result<()> {
        self.conn
            .call(|conn| {
                conn.execute_batch(migration::MIGRATION)?;
                conn.pragma_update(None, "user_version", migration::SCHEMA_VERSION)?;
                Ok::<_, tokio_rusqlite::Error>(())
            })
            .await
            .wrap_err("executing migration")?;
        Ok(())
    }

    pub async fn schema_version(&self) -> Result<i64> {
        let version = self
            .conn
            .call(|conn| {
                Ok::<_, tokio_rusqlite::Error>(conn.query_row("PRAGMA user_version", [], |row| {
                    row.get(0)
                })?)
            })
            .await
            .wrap_err("reading schema version")?;
        Ok(version)
    }
}

#[async_trait]
impl FileStore for Sqlite {
    async fn put(&self, file: DBFile) -> Result<()> {
        let id = file.id.clone();
        self.conn
            .call(move |conn| {
                conn.execute(
                    "INSERT INTO files (id, mime, blob) VALUES (:id, :mime, :blob)
                     ON CONFLICT(id) DO UPDATE SET mime = excluded.mime, blob = excluded.blob",
                    named_params! {
                        ":id": file.id,
                        ":mime": file.mime,
                        ":blob": file.blob,
                    },
                )?;
                Ok::<_, tokio_rusqlite::Error>(())
            })
            .await
            .wrap_err(format!("storing file {}", id))?;
        log::trace!("Stored file {}", id);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<DBFile>> {
        let id = id.to_string();
        let file = self
            .conn
            .call(move |conn| {
                let file = conn
                    .query_row(
                        "SELECT id, mime, blob FROM files WHERE id = ?",
                        params![id],
                        |row| {
                            Ok(DBFile {
                                id: row.get(0)?,
                                mime: row.get(1)?,
                                blob: row.get(2)?,
                            })
                        },
                    )
                    .optional()?;
                Ok::<_, tokio_rusqlite::Error>(file)
            })
            .await
            .wrap_err("loading file")?;
        Ok(file)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let id = id.to_string();
        let affected = self
            .conn
            .call(move |conn| {
                Ok::<_, tokio_rusqlite::Error>(
                    conn.execute("DELETE FROM files WHERE id = ?", params![id])?,
                )
            })
            .await
            .wrap_err("deleting file")?;
        log::trace!("Deleted {} file record(s)", affected);
        Ok(())
    }
}
