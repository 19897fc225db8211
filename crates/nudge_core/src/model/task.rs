//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical scheduled-task record.
//! - Validate user-entered title, date and time text at the model boundary.
//! - Provide the chronological ordering key used by the store.
//!
//! # Invariants
//! - `id` is stable for the process lifetime and never reused; it is not
//!   persisted, so a reloaded file yields fresh ids.
//! - `time` carries no seconds component; due-matching is exact equality at
//!   minute precision.
//! - `title` is non-empty and free of the persisted field delimiter.

use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Field separator of the persisted line format.
///
/// Titles must not contain it: the load path splits on the first two
/// occurrences and cannot tell a title comma from a field boundary.
pub const FIELD_DELIMITER: char = ',';

/// Display format for task dates, day first.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Display format for task times, 24-hour clock.
pub const TIME_FORMAT: &str = "%H:%M";

// Hour takes one or two digits with no leading-zero requirement; minute
// takes exactly two.
static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01]?[0-9]|2[0-3]):([0-5][0-9])$").expect("valid time regex"));

/// Stable in-process identifier for a scheduled task.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = Uuid;

/// Validation error for user-entered task fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Title is empty or whitespace-only.
    EmptyTitle,
    /// Title contains the persisted field delimiter.
    TitleContainsDelimiter(String),
    /// Date text does not name a real `DD/MM/YYYY` calendar day.
    InvalidDateFormat(String),
    /// Time text does not match 24-hour `HH:MM`.
    InvalidTimeFormat(String),
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title cannot be empty"),
            Self::TitleContainsDelimiter(title) => {
                write!(
                    f,
                    "task title `{title}` cannot contain `{FIELD_DELIMITER}`"
                )
            }
            Self::InvalidDateFormat(text) => {
                write!(f, "invalid date `{text}`; expected DD/MM/YYYY")
            }
            Self::InvalidTimeFormat(text) => {
                write!(f, "invalid time `{text}`; expected HH:MM (24-hour)")
            }
        }
    }
}

impl Error for TaskValidationError {}

/// Canonical record for one scheduled task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable in-process ID used for reminder bookkeeping.
    pub id: TaskId,
    /// Free-text task description.
    pub title: String,
    /// Calendar day the task is scheduled for.
    pub date: NaiveDate,
    /// Minute-precise moment within `date`.
    pub time: NaiveTime,
}

impl Task {
    /// Creates a task from user-entered text, validating every field.
    ///
    /// # Errors
    /// - `EmptyTitle` / `TitleContainsDelimiter` for unusable titles.
    /// - `InvalidDateFormat` when `date` is not a real DD/MM/YYYY day.
    /// - `InvalidTimeFormat` when `time` is not 24-hour HH:MM.
    pub fn new(
        title: impl Into<String>,
        date: &str,
        time: &str,
    ) -> Result<Self, TaskValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        if title.contains(FIELD_DELIMITER) {
            return Err(TaskValidationError::TitleContainsDelimiter(title));
        }
        let date = parse_date(date)?;
        let time = parse_time(time)?;
        Ok(Self::from_parts(title, date, time))
    }

    /// Creates a task from already-structured fields with a fresh ID.
    ///
    /// Used by load paths where the fields were parsed out of persisted
    /// state; this constructor does not re-validate the title.
    pub fn from_parts(title: impl Into<String>, date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            date,
            time,
        }
    }

    /// Chronological ordering key: date first, then time-of-day.
    pub fn schedule_key(&self) -> (NaiveDate, NaiveTime) {
        (self.date, self.time)
    }

    /// Returns whether this task is due at the given minute.
    pub fn is_due_at(&self, date: NaiveDate, time: NaiveTime) -> bool {
        self.date == date && self.time == time
    }
}

/// Returns whether `text` is a valid 24-hour `HH:MM` time.
///
/// Hour takes 1 or 2 digits in `[0, 23]`; minute takes exactly 2 digits in
/// `[00, 59]`. Pure and stateless, so interactive callers can re-invoke it
/// in a prompt-until-valid loop.
pub fn is_valid_time(text: &str) -> bool {
    TIME_RE.is_match(text)
}

/// Parses 24-hour `HH:MM` text into a minute-precise time.
pub fn parse_time(text: &str) -> Result<NaiveTime, TaskValidationError> {
    TIME_RE
        .captures(text)
        .and_then(|captures| {
            let hour: u32 = captures[1].parse().ok()?;
            let minute: u32 = captures[2].parse().ok()?;
            NaiveTime::from_hms_opt(hour, minute, 0)
        })
        .ok_or_else(|| TaskValidationError::InvalidTimeFormat(text.to_string()))
}

/// Parses `DD/MM/YYYY` text into a calendar date, rejecting impossible days.
pub fn parse_date(text: &str) -> Result<NaiveDate, TaskValidationError> {
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map_err(|_| TaskValidationError::InvalidDateFormat(text.to_string()))
}
