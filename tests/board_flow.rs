//! Integration tests driving the board engine end to end against the
//! in-memory backend.

use std::sync::Arc;

use chrono::Utc;
use taskdeck::adapters::memory::MemoryBackend;
use taskdeck::adapters::notify::RecordingNotifier;
use taskdeck::board::{Board, SubmitError};
use taskdeck::columns::project;
use taskdeck::drag::{DropOutcome, DropTarget, StatusChangeCommand};
use taskdeck::form::TaskForm;
use taskdeck::ports::{ApiError, Severity};
use taskdeck::task::{Priority, Status, Task};

fn sample_task(id: &str, title: &str, status: Status) -> Task {
    Task {
        id: id.into(),
        title: title.into(),
        description: None,
        status,
        priority: Priority::Medium,
        phase: None,
        due_date: None,
        assigned_to: None,
        dependencies: Vec::new(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn board_over(tasks: Vec<Task>) -> (Board, Arc<MemoryBackend>, Arc<RecordingNotifier>) {
    let backend = Arc::new(MemoryBackend::with_tasks(tasks));
    let notifier = Arc::new(RecordingNotifier::new());
    let board = Board::new(backend.clone(), notifier.clone());
    (board, backend, notifier)
}

#[tokio::test]
async fn created_task_lands_in_its_column() {
    let (board, _backend, notifier) = board_over(Vec::new());
    board.refresh().await.unwrap();

    let mut form = TaskForm::create(Status::Todo);
    form.title = "Design Review".into();
    board.submit(&mut form).await.unwrap();

    let tasks = board.snapshot();
    let columns = project(&tasks);
    let todo = columns.get(Status::Todo);
    assert_eq!(todo.tasks.len(), 1);
    assert_eq!(todo.tasks[0].title, "Design Review");
    assert!(notifier.notices().is_empty());
}

#[tokio::test]
async fn empty_title_never_reaches_the_network() {
    let (board, backend, _notifier) = board_over(Vec::new());
    board.refresh().await.unwrap();
    let requests_after_refresh = backend.request_count();

    let mut form = TaskForm::create(Status::Todo);
    form.title = "   ".into();
    let result = board.submit(&mut form).await;

    assert!(matches!(result, Err(SubmitError::Invalid(_))));
    assert_eq!(backend.request_count(), requests_after_refresh);
    assert!(board.snapshot().is_empty());
}

#[tokio::test]
async fn cross_column_drag_commits_the_new_status() {
    let (board, backend, _notifier) =
        board_over(vec![sample_task("t1", "Design Review", Status::Todo)]);
    board.refresh().await.unwrap();

    let drag = board.begin_drag("t1").unwrap();
    let outcome = drag.drop_on(Some(DropTarget { status: Status::Done, index: 0 }));
    assert_eq!(
        outcome,
        DropOutcome::Moved(StatusChangeCommand { task_id: "t1".into(), new_status: Status::Done })
    );

    board.settle_drop(outcome).await.unwrap();
    assert_eq!(board.task("t1").unwrap().status, Status::Done);
    assert_eq!(backend.tasks()[0].status, Status::Done);
}

#[tokio::test]
async fn failed_drag_reverts_and_notifies() {
    let (board, backend, notifier) =
        board_over(vec![sample_task("t1", "Design Review", Status::Todo)]);
    board.refresh().await.unwrap();
    backend.fail_task("t1", ApiError::Transport("connection reset".into()));

    let drag = board.begin_drag("t1").unwrap();
    let outcome = drag.drop_on(Some(DropTarget { status: Status::Done, index: 0 }));
    let result = board.settle_drop(outcome).await;

    assert!(result.is_err());
    assert_eq!(board.task("t1").unwrap().status, Status::Todo);
    let notices = notifier.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].severity, Severity::Error);
}

#[tokio::test]
async fn dropping_where_the_drag_started_changes_nothing() {
    let (board, backend, _notifier) =
        board_over(vec![sample_task("t1", "Design Review", Status::Todo)]);
    board.refresh().await.unwrap();
    let requests_after_refresh = backend.request_count();
    let before = board.snapshot();

    let drag = board.begin_drag("t1").unwrap();
    let outcome = drag.drop_on(Some(DropTarget { status: Status::Todo, index: 0 }));
    assert_eq!(outcome, DropOutcome::Cancelled);
    board.settle_drop(outcome).await.unwrap();

    assert_eq!(board.snapshot(), before);
    assert_eq!(backend.request_count(), requests_after_refresh);
}

#[tokio::test]
async fn same_column_reorder_sends_nothing() {
    let (board, backend, _notifier) = board_over(vec![
        sample_task("t1", "First", Status::Todo),
        sample_task("t2", "Second", Status::Todo),
    ]);
    board.refresh().await.unwrap();
    let requests_after_refresh = backend.request_count();

    let drag = board.begin_drag("t1").unwrap();
    let outcome = drag.drop_on(Some(DropTarget { status: Status::Todo, index: 1 }));
    assert!(matches!(outcome, DropOutcome::Reordered { .. }));
    board.settle_drop(outcome).await.unwrap();

    assert_eq!(backend.request_count(), requests_after_refresh);
}

#[tokio::test]
async fn cancelled_delete_keeps_the_task() {
    let (board, _backend, _notifier) =
        board_over(vec![sample_task("t1", "Design Review", Status::Todo)]);
    board.refresh().await.unwrap();

    let confirmation = board.request_delete("t1").unwrap();
    confirmation.cancel();

    assert!(board.task("t1").is_some());
}

#[tokio::test]
async fn confirmed_delete_removes_the_task_from_every_column() {
    let (board, backend, _notifier) =
        board_over(vec![sample_task("t1", "Design Review", Status::Todo)]);
    board.refresh().await.unwrap();

    let confirmation = board.request_delete("t1").unwrap();
    board.confirm_delete(confirmation).await.unwrap();

    let tasks = board.snapshot();
    let columns = project(&tasks);
    assert_eq!(columns.total(), 0);
    assert!(backend.tasks().is_empty());
}

#[tokio::test]
async fn edit_form_failure_keeps_the_modal_open_with_an_inline_error() {
    let (board, backend, _notifier) =
        board_over(vec![sample_task("t1", "Design Review", Status::Todo)]);
    board.refresh().await.unwrap();
    backend.fail_task("t1", ApiError::Rejected { status: 500, message: "boom".into() });

    let task = board.task("t1").unwrap();
    let mut form = TaskForm::edit(&task);
    form.priority = Priority::Critical;

    let result = board.submit(&mut form).await;
    assert!(matches!(result, Err(SubmitError::Mutation(_))));
    // The draft survives for a retry, with the failure surfaced inline.
    assert_eq!(form.priority, Priority::Critical);
    assert!(form.error().is_some());
    // And the optimistic write was rolled back.
    assert_eq!(board.task("t1").unwrap().priority, Priority::Medium);
}

#[tokio::test]
async fn projection_partitions_whatever_the_store_holds() {
    let (board, _backend, _notifier) = board_over(vec![
        sample_task("a", "A", Status::Todo),
        sample_task("b", "B", Status::InProgress),
        sample_task("c", "C", Status::Done),
        sample_task("d", "D", Status::Hold),
        sample_task("e", "E", Status::Todo),
    ]);
    board.refresh().await.unwrap();

    let tasks = board.snapshot();
    let columns = project(&tasks);
    let mut seen: Vec<&str> = columns
        .all()
        .iter()
        .flat_map(|c| c.tasks.iter().map(|t| t.id.as_str()))
        .collect();
    seen.sort_unstable();
    assert_eq!(seen, vec!["a", "b", "c", "d", "e"]);
}
