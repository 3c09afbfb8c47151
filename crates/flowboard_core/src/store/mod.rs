//! Task store client contracts and in-memory reference implementation.
//!
//! # Responsibility
//! - Abstract the remote task collection into subscribe/mutate operations.
//! - Deliver full snapshots on every change, never partial deltas.
//!
//! # Invariants
//! - Mutations are never retried here; the next snapshot is the only
//!   self-healing mechanism.
//! - A released subscription observes no further callbacks.

use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::identity::UserId;
use crate::model::task::TaskId;

pub mod client;
pub mod memory;
pub mod subscription;

pub use client::{SnapshotObserver, TaskStore};
pub use memory::InMemoryTaskStore;
pub use subscription::Subscription;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level failures for subscription setup and single mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The connection or session is not ready.
    Unavailable,
    /// The mutation targeted a deleted or nonexistent task.
    NotFound(TaskId),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable => write!(f, "task store is unavailable"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
        }
    }
}

impl Error for StoreError {}

/// Collection scope for one user's tasks: `{tenant}/{user}/tasks`.
///
/// The tenant value is an opaque string supplied by the hosting environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionPath {
    tenant: String,
    user: UserId,
}

impl CollectionPath {
    pub fn new(tenant: impl Into<String>, user: UserId) -> Self {
        Self {
            tenant: tenant.into(),
            user,
        }
    }

    pub fn user(&self) -> &UserId {
        &self.user
    }
}

impl Display for CollectionPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/tasks", self.tenant, self.user)
    }
}
