//! Subscription lifecycle
//!
//! Each subscription runs its own forwarding task. `unsubscribe` raises
//! the detach flag and aborts the task; the flag is checked right before
//! every callback so nothing fires after detach.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::task::JoinHandle;

#[derive(Debug)]
pub struct SubscriptionHandle {
    task: JoinHandle<()>,
    detached: Arc<AtomicBool>,
}

impl SubscriptionHandle {
    pub(crate) fn new(task: JoinHandle<()>, detached: Arc<AtomicBool>) -> Self {
        Self { task, detached }
    }

    /// Detach the listener. Idempotent.
    pub fn unsubscribe(&self) {
        if !self.detached.swap(true, Ordering::SeqCst) {
            self.task.abort();
        }
    }

    pub fn is_detached(&self) -> bool {
        self.detached.load(Ordering::SeqCst)
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
