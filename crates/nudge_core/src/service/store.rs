//! Task store: the single owner of the in-memory task collection.
//!
//! # Responsibility
//! - Serve add/delete/list/due-task queries over one sorted collection.
//! - Write every confirmed mutation through to the repository.
//! - Serialize access between the interactive path and the reminder worker.
//!
//! # Invariants
//! - The collection is always sorted by `(date, time)` ascending; the sort
//!   is stable, so equal-key tasks keep insertion order.
//! - The lock is held for the full duration of every operation, scan and
//!   sort included; readers never observe a half-mutated collection.
//! - A failed write-through save is a warning, not an operation failure;
//!   the in-memory state stays authoritative for the rest of the process.

use crate::model::task::{Task, TaskValidationError};
use crate::repo::task_file::{RepoResult, TaskRepository};
use chrono::{NaiveDate, NaiveTime};
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Mutex, MutexGuard};

/// Store-level error for task mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Rejected user input; the collection is unchanged.
    Validation(TaskValidationError),
    /// Delete position outside `1..=len`; the collection is unchanged.
    OutOfRange { position: usize, len: usize },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::OutOfRange { position, len } => {
                write!(f, "task position {position} is out of range (1..={len})")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::OutOfRange { .. } => None,
        }
    }
}

impl From<TaskValidationError> for StoreError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Mutex-guarded task collection with write-through persistence.
pub struct TaskStore<R: TaskRepository> {
    repo: R,
    tasks: Mutex<Vec<Task>>,
}

impl<R: TaskRepository> TaskStore<R> {
    /// Opens the store, loading the persisted collection.
    ///
    /// A load failure is reported as a warning and yields an empty
    /// collection; startup never aborts on unreadable prior state.
    pub fn open(repo: R) -> Self {
        let mut tasks = repo.load().unwrap_or_else(|err| {
            warn!("event=store_open module=store status=load_failed error={err}; starting with no tasks");
            Vec::new()
        });
        tasks.sort_by_key(Task::schedule_key);
        Self {
            repo,
            tasks: Mutex::new(tasks),
        }
    }

    /// Validates and adds a task, keeping the collection sorted.
    ///
    /// Returns the created task. The save runs before the call returns
    /// (write-through); a save failure is logged and swallowed.
    pub fn add(&self, title: &str, date: &str, time: &str) -> Result<Task, StoreError> {
        let task = Task::new(title, date, time)?;
        let mut tasks = self.lock();
        tasks.push(task.clone());
        tasks.sort_by_key(Task::schedule_key);
        self.save_locked(&tasks);
        Ok(task)
    }

    /// Deletes the task at a 1-based position in sorted order.
    pub fn delete(&self, position: usize) -> Result<(), StoreError> {
        let mut tasks = self.lock();
        if position == 0 || position > tasks.len() {
            return Err(StoreError::OutOfRange {
                position,
                len: tasks.len(),
            });
        }
        tasks.remove(position - 1);
        self.save_locked(&tasks);
        Ok(())
    }

    /// Returns a snapshot of the sorted collection. Read-only.
    pub fn list(&self) -> Vec<Task> {
        self.lock().clone()
    }

    /// Returns every task scheduled for exactly the given minute.
    ///
    /// A task added while a reminder scan is in flight may only be observed
    /// on the following poll cycle; one cycle of latency is accepted.
    pub fn due_tasks(&self, date: NaiveDate, time: NaiveTime) -> Vec<Task> {
        self.lock()
            .iter()
            .filter(|task| task.is_due_at(date, time))
            .cloned()
            .collect()
    }

    /// Saves the current collection, surfacing the I/O error to the caller.
    ///
    /// Mutating operations already write through; this exists for the final
    /// save at shutdown, where the caller wants to see the failure.
    pub fn persist(&self) -> RepoResult<()> {
        let tasks = self.lock();
        self.repo.save(&tasks)
    }

    fn save_locked(&self, tasks: &[Task]) {
        if let Err(err) = self.repo.save(tasks) {
            warn!("event=tasks_save module=store status=error error={err}; in-memory state remains authoritative");
        }
    }

    // A poisoned lock is recovered: the collection is plain data and the
    // panic that poisoned it was already reported on the panicking thread.
    // The reminder worker must be able to keep scanning.
    fn lock(&self) -> MutexGuard<'_, Vec<Task>> {
        match self.tasks.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
