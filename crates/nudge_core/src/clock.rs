//! Wall-clock time source.
//!
//! # Responsibility
//! - Read the host's current local date and time for due-task matching.
//!
//! # Invariants
//! - Returned times are truncated to the minute; due-matching is exact
//!   equality against minute-precise task times.

use chrono::{Local, NaiveDate, NaiveTime, Timelike};

/// Time-source contract for the reminder worker.
///
/// Kept as a trait so tests can drive the worker with a settable clock.
pub trait Clock {
    /// Current local calendar day and minute-precise time-of-day.
    fn now(&self) -> (NaiveDate, NaiveTime);
}

/// Host local clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> (NaiveDate, NaiveTime) {
        let now = Local::now().naive_local();
        let time = now.time();
        // hour/minute come from a valid time, so the fallback never runs.
        let truncated = NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time);
        (now.date(), truncated)
    }
}
