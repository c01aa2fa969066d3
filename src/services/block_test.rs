use super::*;
use crate::services::object_url::{MemoryObjectUrls, MockObjectUrls, ObjectUrls};
use crate::services::test_utils::{ScriptedStore, memory_block_service, memory_store, text_file};
use crate::storage::FileStore;

#[tokio::test]
async fn test_create_file_block() {
    let (service, store, urls) = memory_block_service().await;

    let block = service
        .create_file_block(text_file("notes.txt", "hello"))
        .await
        .expect("create block");

    assert_eq!(block.name, "notes.txt");
    assert_eq!(block.mime, "text/plain");
    assert!(is_object_url(&block.url));
    assert_eq!(urls.resolve(&block.url).as_deref(), Some(&b"hello"[..]));

    let stored = store.get(&block.id).await.unwrap().expect("record exists");
    assert_eq!(stored.id, block.id);
    assert_eq!(stored.mime, "text/plain");
    assert_eq!(stored.blob, b"hello");
}

#[tokio::test]
async fn test_create_then_delete_leaves_nothing() {
    let (service, store, urls) = memory_block_service().await;

    let block = service
        .create_file_block(text_file("a.txt", "a"))
        .await
        .unwrap();
    service.delete_file_block(&block).await.unwrap();

    assert_eq!(store.get(&block.id).await.unwrap(), None);
    assert!(urls.resolve(&block.url).is_none());
    assert!(urls.is_empty());
}

#[tokio::test]
async fn test_create_fails_without_allocating_url() {
    let inner = memory_store().await;
    let store = Arc::new(ScriptedStore::new(inner).with_failing_put("text/plain"));
    let urls = Arc::new(MemoryObjectUrls::new());
    let service = BlockService::new(store, urls.clone());

    let err = service
        .create_file_block(text_file("a.txt", "a"))
        .await
        .expect_err("put must fail");
    assert!(format!("{err:?}").contains("quota exceeded"));
    assert!(urls.is_empty());
}

#[tokio::test]
async fn test_delete_releases_url_even_if_storage_fails() {
    let inner = memory_store().await;
    inner
        .put(DBFile {
            id: "f1".to_string(),
            mime: "text/plain".to_string(),
            blob: b"x".to_vec(),
        })
        .await
        .unwrap();
    let store = Arc::new(ScriptedStore::new(inner.clone()).with_failing_delete("f1"));

    let mut urls = MockObjectUrls::new();
    urls.expect_revoke()
        .withf(|url| url.to_string() == "blob:parley/f1")
        .times(1)
        .returning(|_| true);
    let service = BlockService::new(store, Arc::new(urls));

    let block = FileBlock {
        id: "f1".to_string(),
        name: "f1.txt".to_string(),
        mime: "text/plain".to_string(),
        url: "blob:parley/f1".to_string(),
    };

    let err = service.delete_file_block(&block).await.expect_err("delete fails");
    assert!(format!("{err:?}").contains("storage is corrupted"));
    assert!(inner.get("f1").await.unwrap().is_some());
}

#[tokio::test]
async fn test_delete_skips_revoke_for_remote_urls() {
    let store = memory_store().await;
    let mut urls = MockObjectUrls::new();
    urls.expect_revoke().never();
    let service = BlockService::new(store, Arc::new(urls));

    let block = FileBlock {
        id: "remote".to_string(),
        name: "cat.png".to_string(),
        mime: "image/png".to_string(),
        url: "https://example.com/cat.png".to_string(),
    };
    service.delete_file_block(&block).await.unwrap();
}

#[tokio::test]
async fn test_load_and_restore_url() {
    let (service, _, urls) = memory_block_service().await;

    let block = service
        .create_file_block(text_file("a.txt", "content"))
        .await
        .unwrap();
    urls.revoke(&block.url);

    let file = service.load_file_block(&block).await.unwrap().expect("stored");
    assert_eq!(file.blob, b"content");

    let url = service.restore_url(&block).await.unwrap().expect("restored");
    assert_ne!(url, block.url);
    assert_eq!(urls.resolve(&url).as_deref(), Some(&b"content"[..]));

    service.delete_file_block(&block).await.unwrap();
    assert_eq!(service.restore_url(&block).await.unwrap(), None);
}
