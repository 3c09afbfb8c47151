//! Gesture-to-store orchestration.
//!
//! # Responsibility
//! - Drive create/move/delete flows against the task store.
//! - Keep dialog, drag and notice state consistent with each outcome.
//! - Run the 4-second celebration window on terminal transitions.
//!
//! # Invariants
//! - Validation failures never reach the store.
//! - A failed mutation leaves the attempted UI change uncommitted (the
//!   dialog stays open) and raises a transient notice.
//! - Re-triggering the celebration while a burst is active restarts both
//!   the burst and its window.

use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

use crate::board::notice::BoardNotice;
use crate::identity::{IdentityError, IdentityProvider};
use crate::model::task::{TaskDraft, TaskId, TaskStatus, TaskValidationError};
use crate::particles::CelebrationDriver;
use crate::store::client::{SnapshotObserver, TaskStore};
use crate::store::{StoreError, Subscription};
use crate::sync::engine::SharedSyncEngine;

/// Celebration burst window after a transition to `done`.
pub const CELEBRATION_WINDOW_MS: u64 = 4_000;

pub type BoardResult<T> = Result<T, BoardError>;

/// Failures surfaced by board operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    Identity(IdentityError),
    Store(StoreError),
    Validation(TaskValidationError),
    /// `confirm_delete` was called without a pending confirmation dialog.
    NoPendingDelete,
}

impl Display for BoardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Identity(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::NoPendingDelete => write!(f, "no delete confirmation is pending"),
        }
    }
}

impl Error for BoardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Identity(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::NoPendingDelete => None,
        }
    }
}

impl From<IdentityError> for BoardError {
    fn from(value: IdentityError) -> Self {
        Self::Identity(value)
    }
}

impl From<StoreError> for BoardError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<TaskValidationError> for BoardError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Modal dialog currently presented by the host shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardDialog {
    CreateTask,
    ConfirmDelete(TaskId),
}

/// Marker returned by `drag_over`.
///
/// The host must report the hovered column as a valid drop target,
/// suppressing the platform's default rejection behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum DropPermission {
    Accept,
}

/// Result of a completed drop gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// A status mutation was issued.
    Moved,
    /// The task already sat in the target column; zero store calls.
    AlreadyInColumn,
    /// No drag payload was recorded (stray drop).
    NoPayload,
    /// The dragged id is absent from the canonical list.
    UnknownTask,
}

/// Orchestrates one board against one store and one sync engine.
pub struct BoardController<S: TaskStore> {
    store: Arc<S>,
    engine: SharedSyncEngine,
    subscription: Option<Subscription>,
    dialog: Option<BoardDialog>,
    drag: Option<TaskId>,
    notice: Option<BoardNotice>,
    celebration: Box<dyn CelebrationDriver>,
    celebration_until_ms: Option<u64>,
}

impl<S: TaskStore> BoardController<S> {
    pub fn new(
        store: Arc<S>,
        engine: SharedSyncEngine,
        celebration: Box<dyn CelebrationDriver>,
    ) -> Self {
        Self {
            store,
            engine,
            subscription: None,
            dialog: None,
            drag: None,
            notice: None,
            celebration,
            celebration_until_ms: None,
        }
    }

    /// Bootstraps the board: identity readiness first, then the live feed.
    ///
    /// Identity failure is fatal and raises a blocking notice; a feed setup
    /// failure degrades the engine while keeping the board alive.
    pub fn connect(&mut self, identity: &dyn IdentityProvider) -> BoardResult<()> {
        let user = match identity.current_user() {
            Ok(user) => user,
            Err(err) => {
                warn!("event=board_connect module=board status=fatal error={err}");
                self.notice = Some(BoardNotice::Blocking(
                    "Sign-in is unavailable. The board cannot load.".to_string(),
                ));
                return Err(err.into());
            }
        };

        self.engine.mark_subscribing();
        let observer: Arc<dyn SnapshotObserver> = Arc::new(self.engine.clone());
        match self.store.subscribe(observer) {
            Ok(subscription) => {
                info!("event=board_connect module=board status=ok user={user}");
                self.subscription = Some(subscription);
                Ok(())
            }
            Err(err) => {
                warn!("event=board_connect module=board status=degraded error={err}");
                self.engine.on_subscription_error(&err);
                Err(err.into())
            }
        }
    }

    /// Tears the board down: the feed stops immediately and the engine
    /// reaches its terminal state.
    pub fn disconnect(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.release();
        }
        self.engine.close();
        self.celebration.deactivate();
        self.celebration_until_ms = None;
        info!("event=board_disconnect module=board status=ok");
    }

    pub fn open_create_dialog(&mut self) {
        self.dialog = Some(BoardDialog::CreateTask);
    }

    pub fn cancel_dialog(&mut self) {
        self.dialog = None;
    }

    /// Submits the create dialog.
    ///
    /// An empty title is rejected locally: the dialog stays open and no
    /// store call happens. On store failure the dialog also stays open and
    /// a transient notice is raised; on success it closes.
    pub fn submit_create(
        &mut self,
        title: impl Into<String>,
        description: Option<String>,
    ) -> BoardResult<TaskId> {
        let draft = TaskDraft::new(title, description);
        draft.validate()?;

        match self.store.create(&draft) {
            Ok(id) => {
                info!("event=task_create module=board status=ok task={id}");
                self.dialog = None;
                Ok(id)
            }
            Err(err) => {
                warn!("event=task_create module=board status=error error={err}");
                self.notice = Some(BoardNotice::Transient(format!(
                    "Could not create task: {err}"
                )));
                Err(err.into())
            }
        }
    }

    /// Opens the delete confirmation dialog for one task.
    pub fn request_delete(&mut self, id: TaskId) {
        self.dialog = Some(BoardDialog::ConfirmDelete(id));
    }

    /// Confirms the pending deletion; issues exactly one `remove` call.
    pub fn confirm_delete(&mut self) -> BoardResult<()> {
        let Some(BoardDialog::ConfirmDelete(id)) = self.dialog else {
            return Err(BoardError::NoPendingDelete);
        };
        match self.store.remove(id) {
            Ok(()) => {
                info!("event=task_delete module=board status=ok task={id}");
                self.dialog = None;
                Ok(())
            }
            Err(err) => {
                warn!("event=task_delete module=board status=error task={id} error={err}");
                self.notice = Some(BoardNotice::Transient(format!(
                    "Could not delete task: {err}"
                )));
                Err(err.into())
            }
        }
    }

    /// Records the dragged identifier in the transfer payload.
    pub fn drag_start(&mut self, id: TaskId) {
        self.drag = Some(id);
    }

    /// Hover handler; intentionally does nothing beyond accepting the drop.
    pub fn drag_over(&self) -> DropPermission {
        DropPermission::Accept
    }

    /// Completes the drag gesture onto a target column.
    ///
    /// Issues `update_status` only when the task's current status differs
    /// from the target; a successful move into `done` starts (or restarts)
    /// the celebration window.
    pub fn drop_on(&mut self, target: TaskStatus, now_ms: u64) -> BoardResult<DropOutcome> {
        let Some(id) = self.drag.take() else {
            return Ok(DropOutcome::NoPayload);
        };
        let Some(task) = self.engine.task(id) else {
            return Ok(DropOutcome::UnknownTask);
        };
        if task.status == target {
            return Ok(DropOutcome::AlreadyInColumn);
        }

        match self.store.update_status(id, target) {
            Ok(()) => {
                info!(
                    "event=task_move module=board status=ok task={id} from={} to={target}",
                    task.status
                );
                if target.is_terminal() {
                    self.start_celebration(now_ms);
                }
                Ok(DropOutcome::Moved)
            }
            Err(err) => {
                warn!("event=task_move module=board status=error task={id} error={err}");
                self.notice = Some(BoardNotice::Transient(format!("Could not move task: {err}")));
                Err(err.into())
            }
        }
    }

    /// Advances the celebration clock; deactivates the burst once the
    /// window has elapsed, regardless of remaining particles.
    pub fn tick(&mut self, now_ms: u64) {
        if let Some(deadline) = self.celebration_until_ms {
            if now_ms >= deadline {
                self.celebration.deactivate();
                self.celebration_until_ms = None;
            }
        }
    }

    /// Whether the celebration window is currently open.
    pub fn celebration_active(&self) -> bool {
        self.celebration_until_ms.is_some()
    }

    /// Clears the current notice if the user may dismiss it.
    pub fn dismiss_notice(&mut self) {
        if matches!(self.notice, Some(ref notice) if notice.is_dismissible()) {
            self.notice = None;
        }
    }

    pub fn notice(&self) -> Option<&BoardNotice> {
        self.notice.as_ref()
    }

    /// Degradation banner derived from the engine's feed state; clears
    /// itself when the next successful snapshot arrives.
    pub fn connection_banner(&self) -> Option<BoardNotice> {
        self.engine.last_error().map(|err| {
            BoardNotice::Banner(format!("Connection lost, data may be stale: {err}"))
        })
    }

    pub fn dialog(&self) -> Option<BoardDialog> {
        self.dialog
    }

    pub fn dragged_task(&self) -> Option<TaskId> {
        self.drag
    }

    pub fn engine(&self) -> &SharedSyncEngine {
        &self.engine
    }

    fn start_celebration(&mut self, now_ms: u64) {
        // Restart semantics: a new terminal transition displaces the burst
        // and resets the window.
        self.celebration.activate();
        self.celebration_until_ms = Some(now_ms + CELEBRATION_WINDOW_MS);
    }
}
