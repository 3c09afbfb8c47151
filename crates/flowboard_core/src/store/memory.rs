//! In-memory task store backend.
//!
//! # Responsibility
//! - Emulate the remote collection for tests and embedded host shells.
//! - Assign server-side fields (id, creation timestamp) and fan out full
//!   snapshots to active subscribers.
//!
//! # Invariants
//! - `created_at` is monotonically non-decreasing per store instance.
//! - Snapshot construction completes before any observer callback runs.
//! - Observer callbacks are dispatched outside the internal lock, so an
//!   observer may call back into the store.

use log::{debug, info, warn};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::model::task::{Task, TaskDraft, TaskId, TaskStatus};
use crate::store::client::{SnapshotObserver, TaskStore};
use crate::store::subscription::{SubscriberSlot, Subscription};
use crate::store::{CollectionPath, StoreError, StoreResult};

struct SubscriberEntry {
    slot: Arc<SubscriberSlot>,
    observer: Arc<dyn SnapshotObserver>,
}

struct StoreInner {
    path: CollectionPath,
    tasks: Vec<Task>,
    last_created_at: i64,
    available: bool,
    subscribers: Vec<SubscriberEntry>,
}

/// Reference `TaskStore` backend holding the collection in process memory.
pub struct InMemoryTaskStore {
    inner: Mutex<StoreInner>,
}

impl InMemoryTaskStore {
    /// Opens an available store scoped to the given collection.
    pub fn new(path: CollectionPath) -> Self {
        info!("event=store_open module=store status=ok collection={path}");
        Self {
            inner: Mutex::new(StoreInner {
                path,
                tasks: Vec::new(),
                last_created_at: 0,
                available: true,
                subscribers: Vec::new(),
            }),
        }
    }

    /// Switches connection availability.
    ///
    /// Going offline notifies active subscribers through their error
    /// callback; coming back online re-delivers a full snapshot, which is
    /// the only self-healing mechanism the client contract offers.
    pub fn set_available(&self, available: bool) {
        let (snapshot, targets, changed) = {
            let mut inner = self.lock();
            let changed = inner.available != available;
            inner.available = available;
            (inner.tasks.clone(), drain_active(&mut inner), changed)
        };
        if !changed {
            return;
        }
        if available {
            info!("event=store_online module=store status=ok");
            dispatch_snapshot(&targets, &snapshot);
        } else {
            warn!("event=store_offline module=store status=degraded");
            for (slot, observer) in &targets {
                if slot.is_active() {
                    observer.on_subscription_error(&StoreError::Unavailable);
                }
            }
        }
    }

    /// Current number of documents, regardless of subscriber state.
    pub fn len(&self) -> usize {
        self.lock().tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().tasks.is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn mutate<F>(&self, apply: F) -> StoreResult<()>
    where
        F: FnOnce(&mut StoreInner) -> StoreResult<()>,
    {
        let (snapshot, targets) = {
            let mut inner = self.lock();
            if !inner.available {
                return Err(StoreError::Unavailable);
            }
            apply(&mut inner)?;
            (inner.tasks.clone(), drain_active(&mut inner))
        };
        dispatch_snapshot(&targets, &snapshot);
        Ok(())
    }
}

impl TaskStore for InMemoryTaskStore {
    fn subscribe(&self, observer: Arc<dyn SnapshotObserver>) -> StoreResult<Subscription> {
        let (snapshot, slot) = {
            let mut inner = self.lock();
            if !inner.available {
                return Err(StoreError::Unavailable);
            }
            let slot = SubscriberSlot::new();
            inner.subscribers.push(SubscriberEntry {
                slot: slot.clone(),
                observer: observer.clone(),
            });
            debug!(
                "event=store_subscribe module=store status=ok collection={} subscribers={}",
                inner.path,
                inner.subscribers.len()
            );
            (inner.tasks.clone(), slot)
        };
        // Initial delivery: the feed always starts with the current state.
        if slot.is_active() {
            observer.on_snapshot(&snapshot);
        }
        Ok(Subscription::new(slot))
    }

    fn create(&self, draft: &TaskDraft) -> StoreResult<TaskId> {
        let id = Uuid::new_v4();
        self.mutate(|inner| {
            let created_at = now_ms().max(inner.last_created_at);
            inner.last_created_at = created_at;
            inner.tasks.push(Task {
                id,
                title: draft.title.clone(),
                description: draft.description.clone(),
                status: TaskStatus::Todo,
                created_at,
            });
            debug!("event=store_create module=store status=ok task={id}");
            Ok(())
        })?;
        Ok(id)
    }

    fn update_status(&self, id: TaskId, status: TaskStatus) -> StoreResult<()> {
        self.mutate(|inner| {
            let task = inner
                .tasks
                .iter_mut()
                .find(|task| task.id == id)
                .ok_or(StoreError::NotFound(id))?;
            task.status = status;
            debug!("event=store_update_status module=store status=ok task={id} to={status}");
            Ok(())
        })
    }

    fn remove(&self, id: TaskId) -> StoreResult<()> {
        self.mutate(|inner| {
            let before = inner.tasks.len();
            inner.tasks.retain(|task| task.id != id);
            if inner.tasks.len() == before {
                return Err(StoreError::NotFound(id));
            }
            debug!("event=store_remove module=store status=ok task={id}");
            Ok(())
        })
    }
}

type DispatchTarget = (Arc<SubscriberSlot>, Arc<dyn SnapshotObserver>);

/// Prunes released registrations and clones the remaining dispatch targets
/// so callbacks can run without holding the store lock.
fn drain_active(inner: &mut StoreInner) -> Vec<DispatchTarget> {
    inner.subscribers.retain(|entry| entry.slot.is_active());
    inner
        .subscribers
        .iter()
        .map(|entry| (entry.slot.clone(), entry.observer.clone()))
        .collect()
}

fn dispatch_snapshot(targets: &[DispatchTarget], snapshot: &[Task]) {
    for (slot, observer) in targets {
        // Re-checked per callback: a release between snapshot construction
        // and dispatch must suppress the delivery.
        if slot.is_active() {
            observer.on_snapshot(snapshot);
        }
    }
}

fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}
