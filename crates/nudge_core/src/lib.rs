//! Core domain logic for the nudge task scheduler.
//! This crate is the single source of truth for business invariants.

pub mod clock;
pub mod logging;
pub mod model;
pub mod notify;
pub mod repo;
pub mod service;

pub use clock::{Clock, SystemClock};
pub use logging::{default_log_level, init_logging};
pub use model::task::{
    is_valid_time, parse_date, parse_time, Task, TaskId, TaskValidationError, DATE_FORMAT,
    FIELD_DELIMITER, TIME_FORMAT,
};
pub use notify::{Notifier, NotifyError};
pub use repo::task_file::{FileTaskRepository, RepoError, RepoResult, TaskRepository};
pub use service::reminder::{ReminderConfig, ReminderLoop, ReminderTick, DUE_MESSAGE};
pub use service::store::{StoreError, TaskStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
