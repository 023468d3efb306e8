//! In-process store emulator
//!
//! Behaves like the real store from the sync layer's point of view:
//! - confirmed mutations broadcast a full ordered snapshot to every open
//!   watcher
//! - a new watcher receives its initial result set asynchronously on its
//!   own channel
//! - while offline, fetches and writes fail with `Unavailable` and
//!   snapshots replay as cache-only
//! - batch deletes apply all-or-nothing
//!
//! Snapshot ordering is newest-created-first; entries created within the
//! same instant fall back to insertion sequence, the same role the
//! timestamp-prefixed keys play in a chronological store scan.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::error;
use uuid::Uuid;

use subtopic_core::{CreatedAt, NewTopic, TopicFields};

use crate::error::StoreError;
use crate::store::{TopicDocument, TopicSnapshot, TopicStore, WatchReceiver};

type WatchSender = UnboundedSender<Result<TopicSnapshot, StoreError>>;

#[derive(Debug, Clone)]
struct StoredTopic {
    fields: TopicFields,
    seq: u64,
}

#[derive(Debug, Default)]
struct StoreInner {
    docs: HashMap<String, StoredTopic>,
    watchers: Vec<WatchSender>,
    next_seq: u64,
}

#[derive(Debug)]
pub struct MemoryTopicStore {
    collection: String,
    inner: Mutex<StoreInner>,
    online: AtomicBool,
    fetches: AtomicUsize,
}

impl MemoryTopicStore {
    /// Create an empty, online store for the named collection.
    pub fn new(collection: &str) -> Self {
        Self {
            collection: collection.to_string(),
            inner: Mutex::new(StoreInner::default()),
            online: AtomicBool::new(true),
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }

    /// Number of one-shot `fetch` calls served so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Replay an arbitrary unconfirmed snapshot to every watcher, the way
    /// a store serving from a stale local cache would.
    pub fn emit_cache_snapshot(&self, documents: Vec<TopicDocument>) {
        let snapshot = TopicSnapshot {
            documents,
            from_cache: true,
        };
        let mut inner = self.inner.lock().unwrap();
        inner
            .watchers
            .retain(|w| w.send(Ok(snapshot.clone())).is_ok());
    }

    /// Deliver a listener error in-band to every watcher.
    pub fn emit_watch_error(&self, err: StoreError) {
        let mut inner = self.inner.lock().unwrap();
        inner.watchers.retain(|w| w.send(Err(err.clone())).is_ok());
    }

    fn snapshot_locked(inner: &StoreInner, from_cache: bool) -> TopicSnapshot {
        let mut rows: Vec<(&String, &StoredTopic)> = inner.docs.iter().collect();
        rows.sort_by(|a, b| {
            let ka = (a.1.fields.created_at.sort_key(), a.1.seq);
            let kb = (b.1.fields.created_at.sort_key(), b.1.seq);
            kb.cmp(&ka)
        });

        let documents = rows
            .into_iter()
            .filter_map(|(id, stored)| match serde_json::to_value(&stored.fields) {
                Ok(data) => Some(TopicDocument {
                    id: id.clone(),
                    data,
                }),
                Err(e) => {
                    error!("failed to serialize document {id}: {e}");
                    None
                }
            })
            .collect();

        TopicSnapshot {
            documents,
            from_cache,
        }
    }

    fn broadcast(&self) {
        let from_cache = !self.is_online();
        let mut inner = self.inner.lock().unwrap();
        let snapshot = Self::snapshot_locked(&inner, from_cache);
        inner
            .watchers
            .retain(|w| w.send(Ok(snapshot.clone())).is_ok());
    }
}

impl Default for MemoryTopicStore {
    fn default() -> Self {
        Self::new("topics")
    }
}

#[async_trait]
impl TopicStore for MemoryTopicStore {
    fn watch(&self) -> WatchReceiver {
        let (tx, rx) = mpsc::unbounded_channel();
        let from_cache = !self.is_online();
        let mut inner = self.inner.lock().unwrap();
        let initial = Self::snapshot_locked(&inner, from_cache);
        let _ = tx.send(Ok(initial));
        inner.watchers.push(tx);
        rx
    }

    async fn fetch(&self) -> Result<Vec<TopicDocument>, StoreError> {
        if !self.is_online() {
            return Err(StoreError::Unavailable);
        }
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let inner = self.inner.lock().unwrap();
        Ok(Self::snapshot_locked(&inner, false).documents)
    }

    async fn insert(&self, topic: &NewTopic) -> Result<String, StoreError> {
        if !self.is_online() {
            return Err(StoreError::Unavailable);
        }

        let id = Uuid::new_v4().to_string();
        {
            let mut inner = self.inner.lock().unwrap();
            let seq = inner.next_seq;
            inner.next_seq += 1;
            // The emulator resolves the server timestamp at commit time.
            inner.docs.insert(
                id.clone(),
                StoredTopic {
                    fields: TopicFields {
                        name: topic.name.clone(),
                        created_by: topic.created_by.clone(),
                        created_at: CreatedAt::Resolved { at: Utc::now() },
                    },
                    seq,
                },
            );
        }
        self.broadcast();

        Ok(id)
    }

    async fn delete_batch(&self, ids: &[String]) -> Result<(), StoreError> {
        if !self.is_online() {
            // Nothing applied: the batch is all-or-nothing.
            return Err(StoreError::Unavailable);
        }

        {
            let mut inner = self.inner.lock().unwrap();
            for id in ids {
                // Deleting a missing id is a no-op, as in the real store.
                inner.docs.remove(id);
            }
        }
        self.broadcast();

        Ok(())
    }

    async fn set_network_enabled(&self, enabled: bool) -> Result<(), StoreError> {
        self.online.store(enabled, Ordering::SeqCst);
        // Connectivity changes are observable as metadata-only snapshots.
        self.broadcast();
        Ok(())
    }
}
