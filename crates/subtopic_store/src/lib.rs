//! subtopic_store
//!
//! Remote document store contract for the topic synchronization layer:
//! - `TopicStore`: the port the sync service talks through (realtime
//!   watch, one-shot fetch, insert, atomic batch delete, network toggle).
//! - `StoreError`: the failure taxonomy stores surface.
//! - `MemoryTopicStore`: an in-process emulator with realtime watchers
//!   and an offline mode, used by tests and the demo binary.
//!
//! Documents travel untyped (`TopicDocument` wraps a JSON payload);
//! decoding into `Topic` is the consumer's job.

pub mod error;
pub mod memory;
pub mod store;

pub use error::StoreError;
pub use memory::MemoryTopicStore;
pub use store::{TopicDocument, TopicSnapshot, TopicStore, WatchReceiver};

#[cfg(test)]
mod tests;
