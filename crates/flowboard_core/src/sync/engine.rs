//! Canonical task list owner and lifecycle state machine.
//!
//! # Responsibility
//! - Replace the canonical list on every ingested snapshot.
//! - Expose read-only, recomputed per-column views.
//! - Track the subscription lifecycle: Uninitialized -> Subscribing ->
//!   Ready <-> Error, with Closed as the only terminal state.
//!
//! # Invariants
//! - The canonical list is ordered by `created_at` ascending, ties broken
//!   by arrival order (stable sort).
//! - An error never discards last-known data.
//! - After `close()`, ingest and error callbacks are ignored.

use log::{debug, info, warn};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::model::task::{Task, TaskId, TaskStatus};
use crate::store::client::SnapshotObserver;
use crate::store::StoreError;

/// Subscription lifecycle of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Constructed, no subscription attempted.
    Uninitialized,
    /// Subscription requested, no snapshot ingested yet.
    Subscribing,
    /// At least one snapshot ingested; data is current.
    Ready,
    /// Feed failure; last-known data remains visible.
    Error,
    /// Deliberate teardown; no further state changes.
    Closed,
}

/// Owner of the canonical task list.
pub struct SyncEngine {
    tasks: Vec<Task>,
    state: EngineState,
    last_error: Option<StoreError>,
}

impl SyncEngine {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            state: EngineState::Uninitialized,
            last_error: None,
        }
    }

    /// Records that a subscription has been requested.
    pub fn mark_subscribing(&mut self) {
        if self.state == EngineState::Uninitialized {
            self.state = EngineState::Subscribing;
        }
    }

    /// Replaces the canonical list with an authoritative snapshot.
    ///
    /// Clears any stale error state and signals readiness. Ignored after
    /// `close()`.
    pub fn ingest(&mut self, mut snapshot: Vec<Task>) {
        if self.state == EngineState::Closed {
            debug!("event=snapshot_dropped module=sync status=closed");
            return;
        }
        // Stable sort keeps arrival order for equal timestamps.
        snapshot.sort_by_key(|task| task.created_at);
        info!(
            "event=snapshot_ingested module=sync status=ok count={}",
            snapshot.len()
        );
        self.tasks = snapshot;
        self.last_error = None;
        self.state = EngineState::Ready;
    }

    /// Marks the feed as failed while retaining last-known data.
    pub fn on_subscription_error(&mut self, error: StoreError) {
        if self.state == EngineState::Closed {
            return;
        }
        warn!("event=subscription_error module=sync status=error error={error}");
        self.last_error = Some(error);
        self.state = EngineState::Error;
    }

    /// Terminal teardown; all later callbacks are ignored.
    pub fn close(&mut self) {
        info!("event=engine_closed module=sync status=ok");
        self.state = EngineState::Closed;
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn last_error(&self) -> Option<&StoreError> {
        self.last_error.as_ref()
    }

    /// Read-only view of the canonical list.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Looks one task up in the canonical list.
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Derived view: canonical subsequence with the given status,
    /// recomputed on demand, order preserved.
    pub fn column_view(&self, status: TaskStatus) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|task| task.status == status)
            .cloned()
            .collect()
    }
}

impl Default for SyncEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Injectable shared handle over one `SyncEngine` instance.
///
/// Cloned into the store subscription as the snapshot observer and passed by
/// reference to the board controller; there is no ambient singleton.
#[derive(Clone)]
pub struct SharedSyncEngine {
    inner: Arc<Mutex<SyncEngine>>,
}

impl SharedSyncEngine {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(SyncEngine::new())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SyncEngine> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn mark_subscribing(&self) {
        self.lock().mark_subscribing();
    }

    pub fn close(&self) {
        self.lock().close();
    }

    pub fn state(&self) -> EngineState {
        self.lock().state()
    }

    pub fn last_error(&self) -> Option<StoreError> {
        self.lock().last_error().cloned()
    }

    pub fn task(&self, id: TaskId) -> Option<Task> {
        self.lock().task(id).cloned()
    }

    pub fn task_count(&self) -> usize {
        self.lock().tasks().len()
    }

    pub fn column_view(&self, status: TaskStatus) -> Vec<Task> {
        self.lock().column_view(status)
    }
}

impl Default for SharedSyncEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotObserver for SharedSyncEngine {
    fn on_snapshot(&self, snapshot: &[Task]) {
        self.lock().ingest(snapshot.to_vec());
    }

    fn on_subscription_error(&self, error: &StoreError) {
        self.lock().on_subscription_error(error.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::{EngineState, SyncEngine};
    use crate::model::task::{Task, TaskStatus};
    use crate::store::StoreError;
    use uuid::Uuid;

    fn task(title: &str, status: TaskStatus, created_at: i64) -> Task {
        Task {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: None,
            status,
            created_at,
        }
    }

    #[test]
    fn ingest_sorts_by_created_at_keeping_arrival_order_for_ties() {
        let mut engine = SyncEngine::new();
        let late = task("late", TaskStatus::Todo, 300);
        let tie_a = task("tie a", TaskStatus::Todo, 100);
        let tie_b = task("tie b", TaskStatus::Todo, 100);
        engine.ingest(vec![late.clone(), tie_a.clone(), tie_b.clone()]);

        let ids: Vec<_> = engine.tasks().iter().map(|task| task.id).collect();
        assert_eq!(ids, vec![tie_a.id, tie_b.id, late.id]);
        assert_eq!(engine.state(), EngineState::Ready);
    }

    #[test]
    fn column_views_partition_the_canonical_list() {
        let mut engine = SyncEngine::new();
        engine.ingest(vec![
            task("a", TaskStatus::Todo, 1),
            task("b", TaskStatus::InProgress, 2),
            task("c", TaskStatus::Done, 3),
            task("d", TaskStatus::Todo, 4),
        ]);

        let mut union = Vec::new();
        for status in TaskStatus::COLUMNS {
            let view = engine.column_view(status);
            assert!(view.iter().all(|task| task.status == status));
            union.extend(view);
        }
        union.sort_by_key(|task| task.created_at);
        assert_eq!(union, engine.tasks().to_vec());
    }

    #[test]
    fn error_retains_last_known_data_and_ready_recovers() {
        let mut engine = SyncEngine::new();
        engine.mark_subscribing();
        engine.ingest(vec![task("keep me", TaskStatus::Todo, 1)]);

        engine.on_subscription_error(StoreError::Unavailable);
        assert_eq!(engine.state(), EngineState::Error);
        assert_eq!(engine.last_error(), Some(&StoreError::Unavailable));
        assert_eq!(engine.tasks().len(), 1);

        engine.ingest(vec![task("fresh", TaskStatus::Todo, 2)]);
        assert_eq!(engine.state(), EngineState::Ready);
        assert_eq!(engine.last_error(), None);
    }

    #[test]
    fn closed_engine_ignores_all_callbacks() {
        let mut engine = SyncEngine::new();
        engine.ingest(vec![task("before close", TaskStatus::Todo, 1)]);
        engine.close();

        engine.ingest(vec![]);
        engine.on_subscription_error(StoreError::Unavailable);
        assert_eq!(engine.state(), EngineState::Closed);
        assert_eq!(engine.tasks().len(), 1);
    }

    #[test]
    fn mark_subscribing_only_leaves_uninitialized() {
        let mut engine = SyncEngine::new();
        engine.mark_subscribing();
        assert_eq!(engine.state(), EngineState::Subscribing);

        engine.ingest(vec![]);
        engine.mark_subscribing();
        assert_eq!(engine.state(), EngineState::Ready);
    }
}
