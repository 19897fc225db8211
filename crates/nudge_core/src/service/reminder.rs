//! Background reminder worker.
//!
//! # Responsibility
//! - Poll the wall clock and notify the user when tasks come due.
//! - Suppress duplicate notifications within a matching minute.
//! - Stop cleanly when the owner asks, so shutdown's final save runs with
//!   no scan in flight.
//!
//! # Invariants
//! - The worker holds the store lock only inside `due_tasks`; its only
//!   suspension point is the interruptible poll sleep.
//! - No error terminates the worker: notifier failures are logged and
//!   swallowed inside the cycle.
//! - A task notified once in a given minute stays silent for the rest of
//!   that minute and stays in the list; it is eligible again at any later
//!   matching minute.

use crate::clock::Clock;
use crate::model::task::{TaskId, DATE_FORMAT, TIME_FORMAT};
use crate::notify::Notifier;
use crate::repo::task_file::TaskRepository;
use crate::service::store::TaskStore;
use chrono::{NaiveDate, NaiveTime};
use log::{info, warn};
use std::collections::HashSet;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

/// Message passed to the notifier for every due task.
pub const DUE_MESSAGE: &str = "Scheduled for now!";

// Half a minute: short enough to hit every minute-precise match, long
// enough to avoid busy polling.
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Tuning knobs for the reminder worker.
#[derive(Debug, Clone)]
pub struct ReminderConfig {
    /// Pause between poll cycles.
    pub poll_interval: Duration,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// One sleep-then-scan step of the reminder worker, with the suppression
/// state it carries between cycles.
///
/// Split out from the thread loop so the cycle logic is testable with a
/// settable clock and a recording notifier.
pub struct ReminderTick<C: Clock, N: Notifier> {
    clock: C,
    notifier: N,
    notified: HashSet<TaskId>,
    notified_minute: Option<(NaiveDate, NaiveTime)>,
}

impl<C: Clock, N: Notifier> ReminderTick<C, N> {
    pub fn new(clock: C, notifier: N) -> Self {
        Self {
            clock,
            notifier,
            notified: HashSet::new(),
            notified_minute: None,
        }
    }

    /// Scans the store for due tasks and notifies each at most once per
    /// minute. The poll interval is shorter than a minute, so without the
    /// suppression set a task would fire on consecutive cycles.
    pub fn run_cycle<R: TaskRepository>(&mut self, store: &TaskStore<R>) {
        let (date, time) = self.clock.now();
        if self.notified_minute != Some((date, time)) {
            self.notified.clear();
            self.notified_minute = Some((date, time));
        }

        for task in store.due_tasks(date, time) {
            if !self.notified.insert(task.id) {
                continue;
            }
            match self.notifier.notify(&task.title, DUE_MESSAGE) {
                Ok(()) => info!(
                    "event=reminder_fire module=reminder status=ok title={} date={} time={}",
                    task.title,
                    task.date.format(DATE_FORMAT),
                    task.time.format(TIME_FORMAT)
                ),
                Err(err) => warn!(
                    "event=reminder_fire module=reminder status=error title={} error={err}",
                    task.title
                ),
            }
        }
    }
}

/// Handle owning the background reminder thread.
///
/// Started once at process startup; there is no restart. Dropping the
/// handle without `stop()` still ends the worker on its next wakeup (the
/// stop channel disconnects), but does not wait for it.
pub struct ReminderLoop {
    stop_tx: Sender<()>,
    handle: JoinHandle<()>,
}

impl ReminderLoop {
    /// Spawns the worker thread and enters the poll loop.
    pub fn start<R, C, N>(
        store: Arc<TaskStore<R>>,
        clock: C,
        notifier: N,
        config: ReminderConfig,
    ) -> std::io::Result<Self>
    where
        R: TaskRepository + Send + Sync + 'static,
        C: Clock + Send + 'static,
        N: Notifier + Send + 'static,
    {
        let (stop_tx, stop_rx) = mpsc::channel();
        let poll_interval = config.poll_interval;
        let handle = std::thread::Builder::new()
            .name("reminder".to_string())
            .spawn(move || {
                info!(
                    "event=reminder_start module=reminder status=ok poll_interval_ms={}",
                    poll_interval.as_millis()
                );
                let mut tick = ReminderTick::new(clock, notifier);
                loop {
                    match stop_rx.recv_timeout(poll_interval) {
                        Err(RecvTimeoutError::Timeout) => tick.run_cycle(store.as_ref()),
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                info!("event=reminder_stop module=reminder status=ok");
            })?;
        Ok(Self { stop_tx, handle })
    }

    /// Signals the worker to stop and waits for it to finish its cycle.
    pub fn stop(self) {
        let _ = self.stop_tx.send(());
        if self.handle.join().is_err() {
            warn!("event=reminder_stop module=reminder status=panicked");
        }
    }
}
