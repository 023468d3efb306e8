//! In-memory topic snapshot
//!
//! `TopicCache` holds the ordered newest-first view of topics plus the
//! epoch-millis instant it was last populated from an authoritative
//! source. Every mutation stamps the freshness instant; `is_fresh`
//! decides whether the snapshot can stand in for a remote read.
//!
//! Concurrency note: all operations are synchronous and non-suspending.
//! Callers hold the cache behind a lock and must not keep that lock
//! across I/O.

use std::collections::HashSet;

use subtopic_utils::time::now_millis;

use crate::topic::Topic;

#[derive(Debug)]
pub struct TopicCache {
    entries: Vec<Topic>,
    last_refreshed_ms: i64,
    freshness_window_ms: i64,
}

impl TopicCache {
    /// Snapshots older than this are treated as stale.
    pub const DEFAULT_FRESHNESS_WINDOW_MS: i64 = 5 * 60 * 1000;

    /// Create an empty, never-refreshed cache with the given window.
    pub fn new(freshness_window_ms: i64) -> Self {
        Self {
            entries: Vec::new(),
            last_refreshed_ms: 0,
            freshness_window_ms,
        }
    }

    /// Whether the snapshot was populated within the freshness window.
    pub fn is_fresh(&self) -> bool {
        now_millis() - self.last_refreshed_ms < self.freshness_window_ms
    }

    /// The current snapshot, newest-created-first.
    pub fn topics(&self) -> &[Topic] {
        &self.entries
    }

    /// Epoch millis of the last mutation; 0 means never populated.
    pub fn last_refreshed_ms(&self) -> i64 {
        self.last_refreshed_ms
    }

    /// Overwrite the snapshot with an authoritative ordered sequence.
    pub fn replace_all(&mut self, topics: Vec<Topic>) {
        debug_assert!({
            let mut seen = HashSet::new();
            topics.iter().all(|t| seen.insert(t.id.as_str()))
        });
        self.entries = topics;
        self.last_refreshed_ms = now_millis();
    }

    /// Prepend a topic. The caller guarantees the id is not already present.
    pub fn insert(&mut self, topic: Topic) {
        debug_assert!(self.entries.iter().all(|t| t.id != topic.id));
        self.entries.insert(0, topic);
        self.last_refreshed_ms = now_millis();
    }

    /// Remove every entry whose id is in `ids`.
    pub fn remove_many(&mut self, ids: &HashSet<String>) {
        self.entries.retain(|t| !ids.contains(&t.id));
        self.last_refreshed_ms = now_millis();
    }
}

impl Default for TopicCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FRESHNESS_WINDOW_MS)
    }
}
