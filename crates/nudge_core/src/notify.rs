//! Notification capability contract.
//!
//! # Responsibility
//! - Define the delivery interface the reminder worker calls when a task
//!   comes due. Platform backends implement it outside core.
//!
//! # Invariants
//! - Delivery is best-effort: callers log failures and carry on; a failed
//!   notification never propagates as fatal.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Delivery failure reported by a notification backend.
#[derive(Debug)]
pub struct NotifyError {
    message: String,
}

impl NotifyError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for NotifyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "notification delivery failed: {}", self.message)
    }
}

impl Error for NotifyError {}

/// Notification sink invoked for each due task.
pub trait Notifier {
    fn notify(&self, title: &str, message: &str) -> Result<(), NotifyError>;
}
