use flowboard_core::{
    CollectionPath, InMemoryTaskStore, SnapshotObserver, StoreError, Task, TaskDraft, TaskStatus,
    TaskStore, UserId,
};
use std::sync::{Arc, Mutex};

/// Observer recording every delivery for later assertions.
#[derive(Default)]
struct RecordingObserver {
    snapshots: Mutex<Vec<Vec<Task>>>,
    errors: Mutex<Vec<StoreError>>,
}

impl RecordingObserver {
    fn snapshot_count(&self) -> usize {
        self.snapshots.lock().unwrap().len()
    }

    fn last_snapshot(&self) -> Vec<Task> {
        self.snapshots.lock().unwrap().last().cloned().unwrap()
    }
}

impl SnapshotObserver for RecordingObserver {
    fn on_snapshot(&self, snapshot: &[Task]) {
        self.snapshots.lock().unwrap().push(snapshot.to_vec());
    }

    fn on_subscription_error(&self, error: &StoreError) {
        self.errors.lock().unwrap().push(error.clone());
    }
}

fn open_store() -> InMemoryTaskStore {
    let user = UserId::try_new("user-1").unwrap();
    InMemoryTaskStore::new(CollectionPath::new("test", user))
}

#[test]
fn subscribe_delivers_the_current_state_immediately() {
    let store = open_store();
    store.create(&TaskDraft::new("pre-existing", None)).unwrap();

    let observer = Arc::new(RecordingObserver::default());
    let _subscription = store.subscribe(observer.clone()).unwrap();

    assert_eq!(observer.snapshot_count(), 1);
    assert_eq!(observer.last_snapshot().len(), 1);
    assert_eq!(observer.last_snapshot()[0].title, "pre-existing");
}

#[test]
fn every_change_delivers_a_full_snapshot() {
    let store = open_store();
    let observer = Arc::new(RecordingObserver::default());
    let _subscription = store.subscribe(observer.clone()).unwrap();

    let first = store.create(&TaskDraft::new("one", None)).unwrap();
    store.create(&TaskDraft::new("two", None)).unwrap();
    store.update_status(first, TaskStatus::Done).unwrap();

    // Initial delivery plus one per mutation, each carrying the whole set.
    assert_eq!(observer.snapshot_count(), 4);
    let last = observer.last_snapshot();
    assert_eq!(last.len(), 2);
    let moved = last.iter().find(|task| task.id == first).unwrap();
    assert_eq!(moved.status, TaskStatus::Done);
}

#[test]
fn new_tasks_start_in_todo_with_server_fields() {
    let store = open_store();
    let observer = Arc::new(RecordingObserver::default());
    let _subscription = store.subscribe(observer.clone()).unwrap();

    let id = store
        .create(&TaskDraft::new("fresh", Some("body".to_string())))
        .unwrap();

    let task = observer
        .last_snapshot()
        .into_iter()
        .find(|task| task.id == id)
        .unwrap();
    assert_eq!(task.status, TaskStatus::Todo);
    assert_eq!(task.description.as_deref(), Some("body"));
    assert!(task.created_at > 0);
}

#[test]
fn released_subscription_observes_no_further_callbacks() {
    let store = open_store();
    let observer = Arc::new(RecordingObserver::default());
    let subscription = store.subscribe(observer.clone()).unwrap();
    let delivered_before = observer.snapshot_count();

    subscription.release();
    store.create(&TaskDraft::new("unseen", None)).unwrap();
    store.set_available(false);

    assert_eq!(observer.snapshot_count(), delivered_before);
    assert!(observer.errors.lock().unwrap().is_empty());
}

#[test]
fn dropping_the_subscription_handle_also_stops_the_feed() {
    let store = open_store();
    let observer = Arc::new(RecordingObserver::default());
    {
        let _subscription = store.subscribe(observer.clone()).unwrap();
    }
    store.create(&TaskDraft::new("unseen", None)).unwrap();
    assert_eq!(observer.snapshot_count(), 1, "only the initial delivery");
}

#[test]
fn outage_reports_an_error_and_recovery_redelivers_state() {
    let store = open_store();
    store.create(&TaskDraft::new("survivor", None)).unwrap();
    let observer = Arc::new(RecordingObserver::default());
    let _subscription = store.subscribe(observer.clone()).unwrap();

    store.set_available(false);
    assert_eq!(
        *observer.errors.lock().unwrap(),
        vec![StoreError::Unavailable]
    );

    store.set_available(true);
    assert_eq!(observer.snapshot_count(), 2);
    assert_eq!(observer.last_snapshot().len(), 1);
}

#[test]
fn subscribing_while_offline_fails_with_unavailable() {
    let store = open_store();
    store.set_available(false);
    let observer = Arc::new(RecordingObserver::default());
    let err = store.subscribe(observer).unwrap_err();
    assert_eq!(err, StoreError::Unavailable);
}

#[test]
fn creation_timestamps_never_decrease() {
    let store = open_store();
    let observer = Arc::new(RecordingObserver::default());
    let _subscription = store.subscribe(observer.clone()).unwrap();

    for index in 0..10 {
        store
            .create(&TaskDraft::new(format!("task {index}"), None))
            .unwrap();
    }

    let snapshot = observer.last_snapshot();
    assert!(snapshot
        .windows(2)
        .all(|pair| pair[0].created_at <= pair[1].created_at));
}
