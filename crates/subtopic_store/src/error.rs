use thiserror::Error;

/// Failures surfaced by a remote topic store.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// The store cannot reach its backend (offline mode, network down).
    #[error("remote store unavailable")]
    Unavailable,
    /// Any other backend-reported failure.
    #[error("remote store backend error: {0}")]
    Backend(String),
}
