use chrono::{NaiveDate, NaiveTime};
use nudge_core::{FileTaskRepository, StoreError, TaskStore, TaskValidationError};
use std::path::PathBuf;
use tempfile::TempDir;

fn task_file(dir: &TempDir) -> PathBuf {
    dir.path().join("tasks.txt")
}

fn open_store(dir: &TempDir) -> TaskStore<FileTaskRepository> {
    TaskStore::open(FileTaskRepository::new(task_file(dir)))
}

#[test]
fn add_keeps_collection_sorted_chronologically() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);

    store.add("second-day", "02/01/2025", "09:00").unwrap();
    store.add("first-day-late", "01/01/2025", "23:00").unwrap();
    store.add("first-day-early", "01/01/2025", "08:00").unwrap();

    let titles: Vec<String> = store.list().into_iter().map(|task| task.title).collect();
    assert_eq!(titles, ["first-day-early", "first-day-late", "second-day"]);
}

#[test]
fn add_returns_the_created_task() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);

    let task = store.add("dentist", "05/03/2025", "10:15").unwrap();

    assert_eq!(task.title, "dentist");
    assert_eq!(store.list(), vec![task]);
}

#[test]
fn add_rejects_invalid_input_without_touching_state() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);

    let err = store.add("dentist", "05/03/2025", "24:00").unwrap_err();
    assert_eq!(
        err,
        StoreError::Validation(TaskValidationError::InvalidTimeFormat("24:00".to_string()))
    );
    assert!(matches!(
        store.add("", "05/03/2025", "10:15"),
        Err(StoreError::Validation(TaskValidationError::EmptyTitle))
    ));
    assert!(store.list().is_empty());
}

#[test]
fn add_writes_through_to_the_task_file() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);

    store.add("persisted", "02/01/2025", "09:00").unwrap();

    // A fresh store over the same file sees the confirmed mutation.
    let reopened = open_store(&dir);
    assert_eq!(reopened.list()[0].title, "persisted");
}

#[test]
fn delete_out_of_range_positions_fail_and_change_nothing() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);
    store.add("a", "01/01/2025", "08:00").unwrap();
    store.add("b", "02/01/2025", "09:00").unwrap();

    assert_eq!(
        store.delete(0).unwrap_err(),
        StoreError::OutOfRange {
            position: 0,
            len: 2
        }
    );
    assert_eq!(
        store.delete(3).unwrap_err(),
        StoreError::OutOfRange {
            position: 3,
            len: 2
        }
    );
    assert_eq!(store.list().len(), 2);
}

#[test]
fn delete_first_position_removes_the_earliest_task() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);
    store.add("later", "02/01/2025", "09:00").unwrap();
    store.add("earliest", "01/01/2025", "08:00").unwrap();

    store.delete(1).unwrap();

    let remaining = store.list();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].title, "later");

    let reopened = open_store(&dir);
    assert_eq!(reopened.list().len(), 1);
}

#[test]
fn open_sorts_whatever_order_the_file_is_in() {
    let dir = TempDir::new().unwrap();
    let path = task_file(&dir);
    std::fs::write(
        &path,
        "second,02/01/2025,09:00\nfirst,01/01/2025,08:00\n",
    )
    .unwrap();

    let store = TaskStore::open(FileTaskRepository::new(&path));

    let titles: Vec<String> = store.list().into_iter().map(|task| task.title).collect();
    assert_eq!(titles, ["first", "second"]);
}

#[test]
fn open_survives_unreadable_prior_state() {
    let dir = TempDir::new().unwrap();
    // Point the repository at a directory: reads fail with a non-missing
    // I/O error, which must degrade to an empty collection, not a panic.
    let store = TaskStore::open(FileTaskRepository::new(dir.path()));

    assert!(store.list().is_empty());
}

#[test]
fn due_tasks_match_only_the_exact_minute() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);
    store.add("on time", "05/03/2025", "10:15").unwrap();
    store.add("minute early", "05/03/2025", "10:14").unwrap();
    store.add("minute late", "05/03/2025", "10:16").unwrap();
    store.add("wrong day", "06/03/2025", "10:15").unwrap();

    let due = store.due_tasks(
        NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
        NaiveTime::from_hms_opt(10, 15, 0).unwrap(),
    );

    assert_eq!(due.len(), 1);
    assert_eq!(due[0].title, "on time");
}
