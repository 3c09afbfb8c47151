//! Board gesture orchestration and transient UI state.
//!
//! # Responsibility
//! - Translate drag/drop and CRUD gestures into store calls.
//! - Track UI-only state: dialogs, drag payload, notices, the celebration
//!   window.
//!
//! # Invariants
//! - No gesture mutates the canonical task list directly; every visible
//!   change arrives through the next store snapshot.
//! - Dropping a task onto its current column issues zero store calls.

pub mod controller;
pub mod notice;

pub use controller::{BoardController, BoardDialog, BoardError, DropOutcome, DropPermission};
pub use notice::BoardNotice;
