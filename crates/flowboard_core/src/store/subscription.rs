//! Scoped-acquisition subscription capability.
//!
//! # Responsibility
//! - Represent one live feed registration as an owned handle.
//! - Guarantee that no observer callback fires after release, even one
//!   already scheduled at release time.
//!
//! # Invariants
//! - Release is idempotent.
//! - Dropping the handle releases it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared activity flag checked by the store immediately before every
/// observer callback.
#[derive(Debug)]
pub(crate) struct SubscriberSlot {
    active: AtomicBool,
}

impl SubscriberSlot {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            active: AtomicBool::new(true),
        })
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    fn deactivate(&self) {
        self.active.store(false, Ordering::Release);
    }
}

/// Live feed capability returned by `TaskStore::subscribe`.
///
/// Holding the handle keeps the feed alive; releasing it (or dropping it)
/// stops all further callbacks for this registration.
#[derive(Debug)]
pub struct Subscription {
    slot: Arc<SubscriberSlot>,
}

impl Subscription {
    pub(crate) fn new(slot: Arc<SubscriberSlot>) -> Self {
        Self { slot }
    }

    /// Stops all further callbacks. Safe to call more than once.
    pub fn release(&self) {
        self.slot.deactivate();
    }

    /// Whether this registration has been released.
    pub fn is_released(&self) -> bool {
        !self.slot.is_active()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}
