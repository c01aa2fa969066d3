use std::sync::Arc;

use super::*;
use crate::config::{SqliteStorage, StorageConfig};
use crate::storage::{file_store, new_file_store};

async fn setup_db() -> Sqlite {
    let db = Sqlite::new(None).await.unwrap();
    db.run_migration().await.unwrap();
    db
}

fn fake_file(id: &str, content: &[u8]) -> DBFile {
    DBFile {
        id: id.to_string(),
        mime: "text/plain".to_string(),
        blob: content.to_vec(),
    }
}

#[tokio::test]
async fn test_migration_is_idempotent() {
    let db = setup_db().await;
    db.put(fake_file("f1", b"hello")).await.unwrap();

    db.run_migration().await.unwrap();
    db.run_migration().await.unwrap();

    assert_eq!(db.schema_version().await.unwrap(), migration::SCHEMA_VERSION);
    let file = db.get("f1").await.unwrap();
    assert_eq!(file, Some(fake_file("f1", b"hello")));
}

#[tokio::test]
async fn test_put_and_get() {
    let db = setup_db().await;

    assert_eq!(db.get("missing").await.unwrap(), None);

    db.put(fake_file("f1", b"hello")).await.unwrap();
    db.put(fake_file("f2", &[0, 159, 146, 150])).await.unwrap();

    let f1 = db.get("f1").await.unwrap().expect("f1 exists");
    assert_eq!(f1.mime, "text/plain");
    assert_eq!(f1.blob, b"hello");

    let f2 = db.get("f2").await.unwrap().expect("f2 exists");
    assert_eq!(f2.blob, vec![0, 159, 146, 150]);
}

#[tokio::test]
async fn test_put_upserts() {
    let db = setup_db().await;

    db.put(fake_file("f1", b"hello")).await.unwrap();
    db.put(DBFile {
        id: "f1".to_string(),
        mime: "application/pdf".to_string(),
        blob: b"%PDF".to_vec(),
    })
    .await
    .unwrap();

    let file = db.get("f1").await.unwrap().expect("f1 exists");
    assert_eq!(file.mime, "application/pdf");
    assert_eq!(file.blob, b"%PDF");
}

#[tokio::test]
async fn test_delete() {
    let db = setup_db().await;

    db.put(fake_file("f1", b"hello")).await.unwrap();
    db.delete("f1").await.unwrap();
    assert_eq!(db.get("f1").await.unwrap(), None);

    // deleting an absent id is fine
    db.delete("f1").await.unwrap();
    db.delete("never-existed").await.unwrap();
}

#[tokio::test]
async fn test_new_file_store_in_memory() {
    let config = StorageConfig::Sqlite(SqliteStorage::default());
    let store = new_file_store(&config).await.unwrap();

    store.put(fake_file("f1", b"x")).await.unwrap();
    assert!(store.get("f1").await.unwrap().is_some());
}

#[tokio::test]
async fn test_file_store_is_opened_once() {
    let config = StorageConfig::Sqlite(SqliteStorage::default());
    let first = file_store(&config).await.unwrap();
    let second = file_store(&config).await.unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    first.put(fake_file("shared", b"x")).await.unwrap();
    assert!(second.get("shared").await.unwrap().is_some());
}

#[tokio::test]
async fn test_migration_records_schema_version() {
    let db = Sqlite::new(None).await.unwrap();
    assert_eq!(db.schema_version().await.unwrap(), 0);

    db.run_migration().await.unwrap();
    assert_eq!(db.schema_version().await.unwrap(), migration::SCHEMA_VERSION);
}
