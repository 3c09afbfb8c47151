//! Snapshot reconciliation and derived column views.
//!
//! # Responsibility
//! - Own the canonical in-memory task list.
//! - Recompute per-column views from each authoritative snapshot.
//!
//! # Invariants
//! - No optimistic mutation: visible change comes only from the next
//!   snapshot, never from local intent.
//! - The canonical list is written by this module only.

pub mod engine;

pub use engine::{EngineState, SharedSyncEngine, SyncEngine};
