//! Integration tests for the clip catalog

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use tempfile::TempDir;
use video_diary::adapters::{FileKeyValueStore, MemoryKeyValueStore};
use video_diary::ports::KeyValueStorePort;
use video_diary::*;

fn memory_catalog() -> (Arc<MemoryKeyValueStore>, ClipCatalog) {
    let store = Arc::new(MemoryKeyValueStore::new());
    let catalog = ClipCatalog::with_default_key(Arc::clone(&store) as Arc<dyn KeyValueStorePort>);
    (store, catalog)
}

fn trip() -> NewClip {
    NewClip::new("Trip", "file://a.mp4", 4.5)
}

#[tokio::test]
async fn test_add_then_remove_scenario() {
    let (_store, catalog) = memory_catalog();
    assert!(catalog.list_all().await.unwrap().is_empty());

    let id = catalog.add(trip()).await.unwrap();
    assert_eq!(catalog.list_all().await.unwrap().len(), 1);

    assert!(catalog.remove(&id).await.unwrap());
    assert!(catalog.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_returns_what_was_added() {
    let (_store, catalog) = memory_catalog();
    let input = NewClip::new("Beach", "file:///clips/b.mp4", 3.25)
        .with_description("sunset")
        .with_asset_id("asset-1");

    let before = Utc::now();
    let id = catalog.add(input.clone()).await.unwrap();
    let clip = catalog.get(&id).await.unwrap().expect("clip should exist");

    assert_eq!(clip.id, id);
    assert_eq!(clip.to_new(), input);
    assert!(clip.created_at >= before - chrono::Duration::seconds(1));
}

#[tokio::test]
async fn test_get_unknown_id_is_none() {
    let (_store, catalog) = memory_catalog();
    catalog.add(trip()).await.unwrap();
    assert_eq!(catalog.get(&ClipId::new("missing")).await.unwrap(), None);
}

#[tokio::test]
async fn test_remove_absent_id_changes_nothing() {
    let (store, catalog) = memory_catalog();
    catalog.add(trip()).await.unwrap();
    let before = catalog.list_all().await.unwrap();
    let writes = store.write_count();

    assert!(!catalog.remove(&ClipId::new("missing")).await.unwrap());
    assert_eq!(catalog.list_all().await.unwrap(), before);
    assert_eq!(store.write_count(), writes);
}

#[tokio::test]
async fn test_insertion_order_and_unique_ids() {
    let (_store, catalog) = memory_catalog();
    let mut ids = Vec::new();
    for i in 0..20 {
        ids.push(
            catalog
                .add(NewClip::new(format!("clip {}", i), "file://a.mp4", 1.0))
                .await
                .unwrap(),
        );
    }

    let unique: HashSet<_> = ids.iter().cloned().collect();
    assert_eq!(unique.len(), ids.len());

    let listed: Vec<ClipId> = catalog
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .map(|clip| clip.id)
        .collect();
    assert_eq!(listed, ids);
}

#[tokio::test]
async fn test_new_id_skips_ids_already_stored() {
    let now = Utc::now().timestamp_millis();
    let seeded: Vec<String> = (now..now + 50).map(|ms| ms.to_string()).collect();
    let snapshot: Vec<serde_json::Value> = seeded
        .iter()
        .map(|id| {
            serde_json::json!({
                "id": id,
                "name": "old",
                "description": "",
                "videoUri": "file://old.mp4",
                "createdAt": "2024-01-01T00:00:00Z",
                "duration": 1.0
            })
        })
        .collect();
    let store = Arc::new(
        MemoryKeyValueStore::new().with_entry("videos", serde_json::to_vec(&snapshot).unwrap()),
    );
    let catalog = ClipCatalog::with_default_key(store as Arc<dyn KeyValueStorePort>);

    let id = catalog.add(trip()).await.unwrap();
    assert!(!seeded.contains(&id.to_string()));
    assert_eq!(catalog.list_all().await.unwrap().len(), 51);
}

#[tokio::test]
async fn test_non_finite_duration_keeps_catalog_readable() {
    let (_store, catalog) = memory_catalog();
    let first = catalog.add(trip()).await.unwrap();

    let endless = catalog
        .add(NewClip::new("Endless", "file://b.mp4", f64::INFINITY))
        .await
        .unwrap();
    let unknown = catalog
        .add(NewClip::new("Unknown", "file://c.mp4", f64::NAN))
        .await
        .unwrap();

    let clips = catalog.list_all().await.unwrap();
    assert_eq!(clips.len(), 3);
    assert_eq!(clips[0].id, first);
    let endless = catalog.get(&endless).await.unwrap().unwrap();
    assert_eq!(endless.duration_seconds, 0.0);
    let unknown = catalog.get(&unknown).await.unwrap().unwrap();
    assert_eq!(unknown.duration_seconds, 0.0);
}

#[tokio::test]
async fn test_failed_write_leaves_no_trace() {
    let (store, catalog) = memory_catalog();
    let first = catalog.add(trip()).await.unwrap();
    let cached_before = catalog.cached().await;

    store.set_fail_writes(true);
    let err = catalog.add(NewClip::new("Lost", "file://b.mp4", 2.0)).await.unwrap_err();
    assert!(matches!(err, DomainError::StorageWrite { .. }));
    assert_eq!(catalog.cached().await, cached_before);

    let err = catalog.remove(&first).await.unwrap_err();
    assert!(matches!(err, DomainError::StorageWrite { .. }));

    store.set_fail_writes(false);
    let clips = catalog.list_all().await.unwrap();
    assert_eq!(clips.len(), 1);
    assert_eq!(clips[0].id, first);
}

#[tokio::test]
async fn test_unreadable_store_is_distinct_from_empty() {
    let (store, catalog) = memory_catalog();
    store.set_fail_reads(true);

    let err = catalog.list_all().await.unwrap_err();
    assert!(matches!(err, DomainError::StorageRead { .. }));
    assert!(err.is_storage());
    assert!(catalog.add(trip()).await.is_err());

    store.set_fail_reads(false);
    assert!(catalog.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_snapshot_is_read_error() {
    let store = Arc::new(MemoryKeyValueStore::new().with_entry("videos", "{not json"));
    let catalog = ClipCatalog::with_default_key(store as Arc<dyn KeyValueStorePort>);

    assert!(matches!(
        catalog.list_all().await,
        Err(DomainError::StorageRead { .. })
    ));
    assert!(matches!(
        catalog.get(&ClipId::new("1")).await,
        Err(DomainError::StorageRead { .. })
    ));
    assert_eq!(catalog.cached().await, None);
}

#[tokio::test]
async fn test_snapshot_is_a_json_array_under_one_key() {
    let (store, catalog) = memory_catalog();
    let id = catalog.add(trip()).await.unwrap();

    let raw = store.read("videos").await.unwrap().expect("snapshot written");
    let value: serde_json::Value = serde_json::from_slice(&raw).unwrap();
    let entries = value.as_array().expect("array snapshot");

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["id"], id.as_str());
    assert_eq!(entries[0]["name"], "Trip");
    assert_eq!(entries[0]["videoUri"], "file://a.mp4");
    assert_eq!(entries[0]["duration"], 4.5);
    assert!(entries[0]["createdAt"].is_string());
}

#[tokio::test]
async fn test_catalog_survives_restart() {
    let dir = TempDir::new().unwrap();
    let id = {
        let store = Arc::new(FileKeyValueStore::new(dir.path()).unwrap());
        let catalog = ClipCatalog::with_default_key(store as Arc<dyn KeyValueStorePort>);
        catalog.add(trip()).await.unwrap()
    };

    let store = Arc::new(FileKeyValueStore::new(dir.path()).unwrap());
    let reopened = ClipCatalog::with_default_key(store as Arc<dyn KeyValueStorePort>);
    assert_eq!(reopened.cached().await, None);

    let clip = reopened.get(&id).await.unwrap().expect("clip persisted");
    assert_eq!(clip.name, "Trip");
    assert_eq!(reopened.list_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_reads_see_writes_from_another_instance() {
    let store: Arc<dyn KeyValueStorePort> = Arc::new(MemoryKeyValueStore::new());
    let screen_a = ClipCatalog::with_default_key(Arc::clone(&store));
    let screen_b = ClipCatalog::with_default_key(Arc::clone(&store));

    assert!(screen_b.list_all().await.unwrap().is_empty());
    let id = screen_a.add(trip()).await.unwrap();

    assert!(screen_b.get(&id).await.unwrap().is_some());
    assert!(screen_b.remove(&id).await.unwrap());
    assert!(screen_a.list_all().await.unwrap().is_empty());
}
