//! subtopic_service
//!
//! The synchronization layer between the UI and the remote topic store.
//!
//! `TopicSyncService` forwards realtime events through a freshness
//! filter, keeps the shared `TopicCache` consistent with confirmed
//! remote state, and applies optimistic local updates for writes. The UI
//! holds only a subscribe/read handle; the service owns the snapshot for
//! the life of the process.

pub mod service;
pub mod subscription;

pub use service::TopicSyncService;
pub use subscription::SubscriptionHandle;
