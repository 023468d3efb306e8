//! Store port
//!
//! `TopicStore` is the contract a remote realtime document store must
//! satisfy for the sync layer. Ordering contract: `fetch` and every
//! snapshot delivered on a watch channel list documents
//! newest-created-first.

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::mpsc::UnboundedReceiver;

use subtopic_core::NewTopic;

use crate::error::StoreError;

/// A raw document as the store delivers it: the assigned id plus the
/// undecoded payload.
#[derive(Debug, Clone)]
pub struct TopicDocument {
    pub id: String,
    pub data: Value,
}

/// One realtime listener event: the full ordered result set plus whether
/// it was served from the store's local cache without server
/// confirmation.
#[derive(Debug, Clone)]
pub struct TopicSnapshot {
    pub documents: Vec<TopicDocument>,
    pub from_cache: bool,
}

pub type WatchReceiver = UnboundedReceiver<Result<TopicSnapshot, StoreError>>;

#[async_trait]
pub trait TopicStore: Send + Sync {
    /// Open a realtime listener. Events arrive asynchronously on the
    /// returned channel, including the initial result set. Listener
    /// errors are delivered in-band and do not close the channel.
    fn watch(&self) -> WatchReceiver;

    /// One-shot ordered query.
    async fn fetch(&self) -> Result<Vec<TopicDocument>, StoreError>;

    /// Insert a new document. The store attaches the creation instant
    /// and returns the generated id.
    async fn insert(&self, topic: &NewTopic) -> Result<String, StoreError>;

    /// Delete every listed id in one all-or-nothing batch.
    async fn delete_batch(&self, ids: &[String]) -> Result<(), StoreError>;

    /// Toggle the store's network connectivity.
    async fn set_network_enabled(&self, enabled: bool) -> Result<(), StoreError>;
}
