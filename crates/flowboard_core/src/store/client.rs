//! Store client interface consumed by the board layer.
//!
//! # Responsibility
//! - Define the subscribe/mutate contract every store backend implements.
//! - Keep callers decoupled from the backend's wire protocol.
//!
//! # Invariants
//! - `subscribe` feeds observers complete snapshots, never diffs.
//! - Mutation calls return exactly one completion signal and are never
//!   retried by the client.

use std::sync::Arc;

use crate::model::task::{Task, TaskDraft, TaskId, TaskStatus};
use crate::store::subscription::Subscription;
use crate::store::{StoreError, StoreResult};

/// Receiver side of the live snapshot feed.
///
/// Callbacks run to completion on the delivering thread of control; an
/// observer must not assume it sees every intermediate snapshot, only that
/// each delivered one is internally consistent.
pub trait SnapshotObserver: Send + Sync {
    /// Called with the full current task set on every change.
    fn on_snapshot(&self, snapshot: &[Task]);

    /// Called on connection or permission failures of the feed itself.
    fn on_subscription_error(&self, error: &StoreError);
}

/// Subscribe/mutate contract over the remote task collection.
pub trait TaskStore {
    /// Opens the live feed for the scoped collection.
    ///
    /// Returns a capability that stops all further callbacks when released.
    ///
    /// # Errors
    /// - `StoreError::Unavailable` when the connection/session is not ready.
    fn subscribe(&self, observer: Arc<dyn SnapshotObserver>) -> StoreResult<Subscription>;

    /// Inserts a new task with status `todo` and a server-assigned
    /// creation timestamp. The draft must already be validated.
    ///
    /// # Errors
    /// - `StoreError::Unavailable` when the connection/session is not ready.
    fn create(&self, draft: &TaskDraft) -> StoreResult<TaskId>;

    /// Partial update of the single `status` field.
    ///
    /// # Errors
    /// - `StoreError::Unavailable` when the connection/session is not ready.
    /// - `StoreError::NotFound` when the task no longer exists.
    fn update_status(&self, id: TaskId, status: TaskStatus) -> StoreResult<()>;

    /// Irreversibly deletes a task.
    ///
    /// # Errors
    /// - `StoreError::Unavailable` when the connection/session is not ready.
    /// - `StoreError::NotFound` when the task no longer exists.
    fn remove(&self, id: TaskId) -> StoreResult<()>;
}
