//! subtopic_core
//!
//! Domain model for the topic synchronization layer:
//! - `Topic` / `NewTopic` / `TopicFields`: the topic entity and the
//!   document payload it travels as.
//! - `CreatedAt`: the three creation-instant shapes a document can carry
//!   (pending server placeholder, server-resolved, locally synthesized).
//! - `TopicCache`: the in-memory snapshot with a freshness window.
//!
//! This crate is pure state and serialization. All I/O lives in
//! `subtopic_store` and `subtopic_service`.

pub mod cache;
pub mod topic;

pub use cache::TopicCache;
pub use topic::{CreatedAt, NewTopic, Topic, TopicFields};
