//! Core realtime-sync and celebration engine for Flowboard.
//! This crate is the single source of truth for board invariants.

pub mod board;
pub mod identity;
pub mod logging;
pub mod model;
pub mod particles;
pub mod store;
pub mod sync;

pub use board::{BoardController, BoardDialog, BoardError, BoardNotice, DropOutcome};
pub use identity::{IdentityError, IdentityProvider, StaticIdentity, UserId};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{Task, TaskDraft, TaskId, TaskStatus, TaskValidationError};
pub use particles::{CelebrationDriver, Particle, ParticleShape, ParticleSimulator, Viewport};
pub use store::{
    CollectionPath, InMemoryTaskStore, SnapshotObserver, StoreError, StoreResult, Subscription,
    TaskStore,
};
pub use sync::engine::{EngineState, SharedSyncEngine, SyncEngine};

/// Minimal health-check API for early host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
