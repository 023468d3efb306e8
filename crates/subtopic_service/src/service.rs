//! Topic synchronization service
//!
//! Mediates every read and write between the UI and the remote store,
//! and decides whether an incoming realtime event is authoritative or a
//! stale cache-only echo to be discarded in favor of the local snapshot.
//!
//! Locking notes: the cache lives behind a `std::sync::Mutex` and the
//! lock is never held across an await point. Store round trips complete
//! before any cache mutation, so a failed write leaves the snapshot
//! untouched.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::{error, info, warn};

use subtopic_core::{CreatedAt, NewTopic, Topic, TopicCache};
use subtopic_store::{StoreError, TopicDocument, TopicStore};

use crate::subscription::SubscriptionHandle;

pub struct TopicSyncService<S> {
    store: Arc<S>,
    cache: Arc<Mutex<TopicCache>>,
}

impl<S: TopicStore + 'static> TopicSyncService<S> {
    /// Wire a service to a store. The freshness window is configuration,
    /// not a baked-in constant, so each instance (and each test) gets its
    /// own cache lifetime.
    pub fn new(store: Arc<S>, freshness_window_ms: i64) -> Self {
        Self {
            store,
            cache: Arc::new(Mutex::new(TopicCache::new(freshness_window_ms))),
        }
    }

    /// The current snapshot, regardless of freshness.
    pub fn cached_topics(&self) -> Vec<Topic> {
        self.cache.lock().unwrap().topics().to_vec()
    }

    /// Attach a realtime listener.
    ///
    /// `on_update` receives the ordered topic list plus whether it was
    /// served from cache rather than confirmed by the server. A
    /// cache-only event arriving while the local snapshot is still fresh
    /// is discarded; the snapshot is delivered in its place. Events are
    /// only ever delivered asynchronously, and listener errors are
    /// logged without ending the subscription.
    pub fn subscribe<F>(&self, mut on_update: F) -> SubscriptionHandle
    where
        F: FnMut(Vec<Topic>, bool) + Send + 'static,
    {
        let mut events = self.store.watch();
        let cache = self.cache.clone();
        let detached = Arc::new(AtomicBool::new(false));
        let flag = detached.clone();

        let task = tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                if flag.load(Ordering::SeqCst) {
                    break;
                }

                let snapshot = match event {
                    Ok(snapshot) => snapshot,
                    Err(e) => {
                        error!("Error on topic listener: {e}");
                        continue;
                    }
                };

                let (topics, from_cache) = {
                    let mut cache = cache.lock().unwrap();
                    if snapshot.from_cache && cache.is_fresh() {
                        // Stale cache-only echo from the store; the local
                        // snapshot is still authoritative.
                        (cache.topics().to_vec(), true)
                    } else {
                        let topics = decode_documents(&snapshot.documents);
                        cache.replace_all(topics.clone());
                        (topics, snapshot.from_cache)
                    }
                };

                if flag.load(Ordering::SeqCst) {
                    break;
                }
                on_update(topics, from_cache);
            }
        });

        SubscriptionHandle::new(task, detached)
    }

    /// Create a topic remotely, then prepend an optimistic entry with a
    /// locally synthesized creation instant (the server-resolved one is
    /// not known yet). Returns the assigned id.
    pub async fn add_topic(&self, topic: NewTopic) -> Result<String, StoreError> {
        let id = self.store.insert(&topic).await?;

        let topic = Topic {
            id: id.clone(),
            name: topic.name,
            created_by: topic.created_by,
            created_at: CreatedAt::Local { at: Utc::now() },
        };
        self.cache.lock().unwrap().insert(topic);

        Ok(id)
    }

    /// Return the snapshot, hitting the store only once it has gone stale.
    pub async fn get_topics(&self) -> Result<Vec<Topic>, StoreError> {
        {
            let cache = self.cache.lock().unwrap();
            if cache.is_fresh() {
                return Ok(cache.topics().to_vec());
            }
        }

        let documents = self.store.fetch().await?;
        let topics = decode_documents(&documents);
        self.cache.lock().unwrap().replace_all(topics.clone());

        Ok(topics)
    }

    /// Delete the listed topics in one all-or-nothing batch, then drop
    /// them from the snapshot. On failure the snapshot is untouched and
    /// the error propagates.
    pub async fn delete_topics(&self, ids: &[String]) -> Result<(), StoreError> {
        self.store.delete_batch(ids).await?;

        let ids: HashSet<String> = ids.iter().cloned().collect();
        self.cache.lock().unwrap().remove_many(&ids);

        Ok(())
    }

    pub async fn delete_topic(&self, id: &str) -> Result<(), StoreError> {
        self.delete_topics(&[id.to_string()]).await
    }

    /// Switch the store to serving from its local cache. The result may
    /// be ignored; failures are also logged for operators.
    pub async fn enable_offline_mode(&self) -> Result<(), StoreError> {
        self.set_network(false).await
    }

    /// Restore network connectivity. Same contract as
    /// `enable_offline_mode`.
    pub async fn enable_online_mode(&self) -> Result<(), StoreError> {
        self.set_network(true).await
    }

    async fn set_network(&self, enabled: bool) -> Result<(), StoreError> {
        match self.store.set_network_enabled(enabled).await {
            Ok(()) => {
                info!(
                    "{} mode enabled",
                    if enabled { "Online" } else { "Offline" }
                );
                Ok(())
            }
            Err(e) => {
                warn!("Failed to toggle network (enabled={enabled}): {e}");
                Err(e)
            }
        }
    }
}

fn decode_documents(documents: &[TopicDocument]) -> Vec<Topic> {
    documents
        .iter()
        .filter_map(|doc| match Topic::from_document(doc.id.clone(), &doc.data) {
            Ok(topic) => Some(topic),
            Err(e) => {
                warn!("Skipping undecodable topic document {}: {e}", doc.id);
                None
            }
        })
        .collect()
}
