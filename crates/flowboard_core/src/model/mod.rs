//! Canonical task model shared by sync, store and board layers.
//!
//! # Responsibility
//! - Define the wire-shaped task record and its status enum.
//! - Validate user input before any store call is attempted.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - `status` is always one of exactly three workflow columns.

pub mod task;
