use flowboard_core::{
    BoardController, BoardDialog, CollectionPath, DropOutcome, InMemoryTaskStore, SharedSyncEngine,
    SnapshotObserver, StaticIdentity, StoreResult, Subscription, Task, TaskDraft, TaskId,
    TaskStatus, TaskStore, UserId,
};
use flowboard_core::particles::CelebrationDriver;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Store wrapper counting mutation traffic.
struct CountingStore {
    inner: InMemoryTaskStore,
    creates: AtomicUsize,
    updates: AtomicUsize,
    removes: AtomicUsize,
}

impl CountingStore {
    fn new() -> Self {
        let user = UserId::try_new("user-1").unwrap();
        Self {
            inner: InMemoryTaskStore::new(CollectionPath::new("test", user)),
            creates: AtomicUsize::new(0),
            updates: AtomicUsize::new(0),
            removes: AtomicUsize::new(0),
        }
    }
}

impl TaskStore for CountingStore {
    fn subscribe(&self, observer: Arc<dyn SnapshotObserver>) -> StoreResult<Subscription> {
        self.inner.subscribe(observer)
    }

    fn create(&self, draft: &TaskDraft) -> StoreResult<TaskId> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        self.inner.create(draft)
    }

    fn update_status(&self, id: TaskId, status: TaskStatus) -> StoreResult<()> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.inner.update_status(id, status)
    }

    fn remove(&self, id: TaskId) -> StoreResult<()> {
        self.removes.fetch_add(1, Ordering::SeqCst);
        self.inner.remove(id)
    }
}

/// Celebration driver exposing its switch state to the test.
#[derive(Clone, Default)]
struct ProbeDriver {
    active: Arc<AtomicBool>,
    activations: Arc<AtomicUsize>,
}

impl CelebrationDriver for ProbeDriver {
    fn activate(&mut self) {
        self.active.store(true, Ordering::SeqCst);
        self.activations.fetch_add(1, Ordering::SeqCst);
    }

    fn deactivate(&mut self) {
        self.active.store(false, Ordering::SeqCst);
    }
}

struct Fixture {
    store: Arc<CountingStore>,
    board: BoardController<CountingStore>,
    burst: ProbeDriver,
}

fn connected_board() -> Fixture {
    let store = Arc::new(CountingStore::new());
    let burst = ProbeDriver::default();
    let mut board = BoardController::new(
        store.clone(),
        SharedSyncEngine::new(),
        Box::new(burst.clone()),
    );
    let identity = StaticIdentity::new(UserId::try_new("user-1").unwrap());
    board.connect(&identity).unwrap();
    Fixture {
        store,
        board,
        burst,
    }
}

fn column_titles(board: &BoardController<CountingStore>, status: TaskStatus) -> Vec<String> {
    board
        .engine()
        .column_view(status)
        .into_iter()
        .map(|task| task.title)
        .collect()
}

#[test]
fn created_task_arrives_in_the_todo_column_only() {
    let mut fixture = connected_board();
    fixture.board.open_create_dialog();
    fixture
        .board
        .submit_create("Write spec", None)
        .unwrap();

    assert_eq!(fixture.board.dialog(), None, "dialog closes on success");
    assert_eq!(
        column_titles(&fixture.board, TaskStatus::Todo),
        vec!["Write spec".to_string()]
    );
    assert!(column_titles(&fixture.board, TaskStatus::InProgress).is_empty());
    assert!(column_titles(&fixture.board, TaskStatus::Done).is_empty());
}

#[test]
fn drag_to_inprogress_issues_one_mutation_and_views_follow_the_snapshot() {
    let mut fixture = connected_board();
    let id = fixture.board.submit_create("Write spec", None).unwrap();

    fixture.board.drag_start(id);
    let _ = fixture.board.drag_over();
    let outcome = fixture.board.drop_on(TaskStatus::InProgress, 0).unwrap();

    assert_eq!(outcome, DropOutcome::Moved);
    assert_eq!(fixture.store.updates.load(Ordering::SeqCst), 1);
    assert!(column_titles(&fixture.board, TaskStatus::Todo).is_empty());
    assert_eq!(
        column_titles(&fixture.board, TaskStatus::InProgress),
        vec!["Write spec".to_string()]
    );
}

#[test]
fn dropping_onto_the_current_column_issues_zero_mutations() {
    let mut fixture = connected_board();
    let id = fixture.board.submit_create("stay put", None).unwrap();

    fixture.board.drag_start(id);
    let outcome = fixture.board.drop_on(TaskStatus::Todo, 0).unwrap();

    assert_eq!(outcome, DropOutcome::AlreadyInColumn);
    assert_eq!(fixture.store.updates.load(Ordering::SeqCst), 0);
}

#[test]
fn move_to_done_opens_a_burst_window_that_closes_after_4000_ms() {
    let mut fixture = connected_board();
    let id = fixture.board.submit_create("finish me", None).unwrap();

    fixture.board.drag_start(id);
    fixture.board.drop_on(TaskStatus::Done, 10_000).unwrap();
    assert!(fixture.burst.active.load(Ordering::SeqCst));
    assert!(fixture.board.celebration_active());

    fixture.board.tick(13_999);
    assert!(fixture.board.celebration_active(), "window still open");

    fixture.board.tick(14_000);
    assert!(!fixture.board.celebration_active());
    assert!(
        !fixture.burst.active.load(Ordering::SeqCst),
        "burst is force-deactivated when the window elapses"
    );
    assert_eq!(fixture.burst.activations.load(Ordering::SeqCst), 1);
}

#[test]
fn confirmed_delete_issues_one_remove_and_clears_all_views() {
    let mut fixture = connected_board();
    let id = fixture.board.submit_create("doomed", None).unwrap();

    fixture.board.request_delete(id);
    assert_eq!(
        fixture.board.dialog(),
        Some(BoardDialog::ConfirmDelete(id))
    );
    fixture.board.confirm_delete().unwrap();

    assert_eq!(fixture.store.removes.load(Ordering::SeqCst), 1);
    assert_eq!(fixture.board.dialog(), None);
    for status in TaskStatus::COLUMNS {
        assert!(column_titles(&fixture.board, status).is_empty());
    }
}

#[test]
fn cancelled_delete_issues_no_store_calls() {
    let mut fixture = connected_board();
    let id = fixture.board.submit_create("survivor", None).unwrap();

    fixture.board.request_delete(id);
    fixture.board.cancel_dialog();

    assert_eq!(fixture.store.removes.load(Ordering::SeqCst), 0);
    assert_eq!(fixture.board.engine().task_count(), 1);
}

#[test]
fn failed_mutation_raises_a_transient_notice_and_keeps_the_dialog() {
    let mut fixture = connected_board();
    let id = fixture.board.submit_create("fragile", None).unwrap();

    fixture.store.inner.set_available(false);
    fixture.board.request_delete(id);
    fixture.board.confirm_delete().unwrap_err();

    let notice = fixture.board.notice().unwrap();
    assert!(notice.is_dismissible());
    assert_eq!(
        fixture.board.dialog(),
        Some(BoardDialog::ConfirmDelete(id)),
        "attempted UI change is not committed"
    );
    fixture.board.dismiss_notice();
    assert!(fixture.board.notice().is_none());
}

#[test]
fn subscription_outage_shows_a_banner_and_recovery_clears_it() {
    let mut fixture = connected_board();
    fixture.board.submit_create("keep me visible", None).unwrap();

    fixture.store.inner.set_available(false);
    let banner = fixture.board.connection_banner().unwrap();
    assert!(!banner.is_dismissible());
    assert_eq!(
        fixture.board.engine().task_count(),
        1,
        "stale data stays visible during the outage"
    );

    fixture.store.inner.set_available(true);
    assert!(fixture.board.connection_banner().is_none());
}

#[test]
fn disconnect_stops_the_feed_and_later_changes_are_invisible() {
    let mut fixture = connected_board();
    fixture.board.submit_create("before teardown", None).unwrap();
    fixture.board.disconnect();

    fixture
        .store
        .create(&TaskDraft::new("after teardown", None))
        .unwrap();
    assert_eq!(fixture.board.engine().task_count(), 1);
}

#[test]
fn snapshot_is_the_source_of_truth_for_ordering() {
    let fixture = {
        let mut fixture = connected_board();
        fixture.board.submit_create("first", None).unwrap();
        fixture.board.submit_create("second", None).unwrap();
        fixture.board.submit_create("third", None).unwrap();
        fixture
    };

    let todo: Vec<Task> = fixture.board.engine().column_view(TaskStatus::Todo);
    assert_eq!(todo.len(), 3);
    assert!(todo.windows(2).all(|w| w[0].created_at <= w[1].created_at));
    assert_eq!(todo[0].title, "first");
    assert_eq!(todo[2].title, "third");
}
