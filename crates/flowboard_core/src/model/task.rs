//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record delivered by store snapshots.
//! - Provide the pre-creation draft shape with title validation.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - Wire names for `status` are exactly `todo`, `inprogress`, `done`.
//! - `created_at` is server-assigned and never mutated locally.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier assigned by the store on creation.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = Uuid;

/// Workflow column for a task.
///
/// The three values are fixed; the board renders exactly one column per
/// variant and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Created but not started.
    Todo,
    /// Work is in progress.
    InProgress,
    /// Terminal column; landing here triggers the celebration burst.
    Done,
}

impl TaskStatus {
    /// All columns in board display order.
    pub const COLUMNS: [TaskStatus; 3] = [Self::Todo, Self::InProgress, Self::Done];

    /// Returns the wire name used by the external store.
    pub fn as_wire(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "inprogress",
            Self::Done => "done",
        }
    }

    /// Parses a wire name back into a status.
    pub fn parse_wire(value: &str) -> Option<TaskStatus> {
        match value {
            "todo" => Some(Self::Todo),
            "inprogress" => Some(Self::InProgress),
            "done" => Some(Self::Done),
            _ => None,
        }
    }

    /// Whether this is the terminal workflow column.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done)
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// Canonical task record as delivered by store snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable store-assigned identifier.
    pub id: TaskId,
    /// Non-empty display title.
    pub title: String,
    /// Optional free-form body; absent on the wire when `None`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Current workflow column.
    pub status: TaskStatus,
    /// Server-assigned creation time in epoch milliseconds.
    #[serde(rename = "createdAt")]
    pub created_at: i64,
}

/// Validation errors raised before any store call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    EmptyTitle,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title must not be empty"),
        }
    }
}

impl Error for TaskValidationError {}

/// Pre-creation task shape entered by the user.
///
/// The store assigns `id`, `created_at` and the initial `todo` status; the
/// draft only carries user-entered fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
}

impl TaskDraft {
    /// Builds a draft, normalizing a blank description to `None`.
    pub fn new(title: impl Into<String>, description: Option<String>) -> Self {
        let description = description.filter(|text| !text.trim().is_empty());
        Self {
            title: title.into(),
            description,
        }
    }

    /// Rejects drafts that must never reach the store.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        Ok(())
    }
}
