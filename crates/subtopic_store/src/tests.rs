use subtopic_core::{NewTopic, Topic};

use crate::error::StoreError;
use crate::memory::MemoryTopicStore;
use crate::store::{TopicDocument, TopicStore};

fn new_topic(name: &str) -> NewTopic {
    NewTopic {
        name: name.to_string(),
        created_by: "tester".to_string(),
    }
}

fn names(documents: &[TopicDocument]) -> Vec<String> {
    documents
        .iter()
        .map(|d| {
            Topic::from_document(d.id.clone(), &d.data)
                .unwrap()
                .name
        })
        .collect()
}

#[tokio::test]
async fn test_insert_assigns_distinct_ids() {
    let store = MemoryTopicStore::default();

    let a = store.insert(&new_topic("alpha")).await.unwrap();
    let b = store.insert(&new_topic("beta")).await.unwrap();

    assert_ne!(a, b);
    assert!(!a.is_empty());
}

#[tokio::test]
async fn test_fetch_returns_newest_first() {
    let store = MemoryTopicStore::default();
    store.insert(&new_topic("alpha")).await.unwrap();
    store.insert(&new_topic("beta")).await.unwrap();
    store.insert(&new_topic("gamma")).await.unwrap();

    let documents = store.fetch().await.unwrap();
    assert_eq!(names(&documents), vec!["gamma", "beta", "alpha"]);
}

#[tokio::test]
async fn test_watch_receives_initial_then_mutation_snapshots() {
    let store = MemoryTopicStore::default();
    let mut rx = store.watch();

    let initial = rx.recv().await.unwrap().unwrap();
    assert!(initial.documents.is_empty());
    assert!(!initial.from_cache);

    store.insert(&new_topic("alpha")).await.unwrap();

    let confirmed = rx.recv().await.unwrap().unwrap();
    assert_eq!(names(&confirmed.documents), vec!["alpha"]);
    assert!(!confirmed.from_cache);
}

#[tokio::test]
async fn test_offline_insert_fails_and_stores_nothing() {
    let store = MemoryTopicStore::default();
    store.set_network_enabled(false).await.unwrap();

    let err = store.insert(&new_topic("alpha")).await.unwrap_err();
    assert_eq!(err, StoreError::Unavailable);

    store.set_network_enabled(true).await.unwrap();
    assert!(store.fetch().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_offline_fetch_fails() {
    let store = MemoryTopicStore::default();
    store.set_network_enabled(false).await.unwrap();

    assert_eq!(store.fetch().await.unwrap_err(), StoreError::Unavailable);
}

#[tokio::test]
async fn test_delete_batch_removes_all_listed() {
    let store = MemoryTopicStore::default();
    let a = store.insert(&new_topic("alpha")).await.unwrap();
    store.insert(&new_topic("beta")).await.unwrap();
    let c = store.insert(&new_topic("gamma")).await.unwrap();

    store.delete_batch(&[a, c]).await.unwrap();

    let documents = store.fetch().await.unwrap();
    assert_eq!(names(&documents), vec!["beta"]);
}

#[tokio::test]
async fn test_delete_batch_offline_applies_nothing() {
    let store = MemoryTopicStore::default();
    let a = store.insert(&new_topic("alpha")).await.unwrap();
    let b = store.insert(&new_topic("beta")).await.unwrap();

    store.set_network_enabled(false).await.unwrap();
    let err = store.delete_batch(&[a, b]).await.unwrap_err();
    assert_eq!(err, StoreError::Unavailable);

    store.set_network_enabled(true).await.unwrap();
    assert_eq!(store.fetch().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_network_toggle_broadcasts_cache_only_snapshot() {
    let store = MemoryTopicStore::default();
    store.insert(&new_topic("alpha")).await.unwrap();

    let mut rx = store.watch();
    let initial = rx.recv().await.unwrap().unwrap();
    assert!(!initial.from_cache);

    store.set_network_enabled(false).await.unwrap();
    let offline = rx.recv().await.unwrap().unwrap();
    assert!(offline.from_cache);
    assert_eq!(names(&offline.documents), vec!["alpha"]);
}

#[tokio::test]
async fn test_watch_while_offline_starts_cache_only() {
    let store = MemoryTopicStore::default();
    store.insert(&new_topic("alpha")).await.unwrap();
    store.set_network_enabled(false).await.unwrap();

    let mut rx = store.watch();
    let initial = rx.recv().await.unwrap().unwrap();
    assert!(initial.from_cache);
    assert_eq!(names(&initial.documents), vec!["alpha"]);
}

#[tokio::test]
async fn test_emit_cache_snapshot_delivers_payload_verbatim() {
    let store = MemoryTopicStore::default();
    let mut rx = store.watch();
    rx.recv().await.unwrap().unwrap(); // initial

    let doc = TopicDocument {
        id: "stale-1".to_string(),
        data: serde_json::json!({
            "name": "stale",
            "created_by": "u1",
            "created_at": { "type": "pending" }
        }),
    };
    store.emit_cache_snapshot(vec![doc]);

    let replay = rx.recv().await.unwrap().unwrap();
    assert!(replay.from_cache);
    assert_eq!(replay.documents[0].id, "stale-1");
}

#[tokio::test]
async fn test_emit_watch_error_keeps_channel_open() {
    let store = MemoryTopicStore::default();
    let mut rx = store.watch();
    rx.recv().await.unwrap().unwrap(); // initial

    store.emit_watch_error(StoreError::Backend("listen failed".to_string()));
    assert!(rx.recv().await.unwrap().is_err());

    store.insert(&new_topic("alpha")).await.unwrap();
    let confirmed = rx.recv().await.unwrap().unwrap();
    assert_eq!(names(&confirmed.documents), vec!["alpha"]);
}

#[tokio::test]
async fn test_fetch_count_tracks_one_shot_queries() {
    let store = MemoryTopicStore::default();
    assert_eq!(store.fetch_count(), 0);

    store.fetch().await.unwrap();
    store.fetch().await.unwrap();
    assert_eq!(store.fetch_count(), 2);
}
