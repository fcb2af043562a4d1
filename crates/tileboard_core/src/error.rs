//! # Scheduler Error Types
//!
//! Failures raised by delayed tasks. They never escape a frame: the
//! scheduler logs and counts them, then keeps firing.

use std::any::Any;

use thiserror::Error;

use crate::handle::ItemId;

/// A delayed task failed while firing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// The task's own work failed.
    #[error("task failed: {0}")]
    Failed(String),

    /// The task panicked while firing.
    #[error("task panicked: {0}")]
    Panicked(String),

    /// The task targeted an item that no longer exists.
    #[error("stale item handle: {0:?}")]
    StaleHandle(ItemId),
}

impl TaskError {
    /// Wraps the payload of a panicking task.
    pub(crate) fn panicked(payload: &(dyn Any + Send)) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|text| (*text).to_owned())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_owned());
        Self::Panicked(message)
    }
}

/// Result type returned by delayed-task callbacks.
pub type TaskResult = Result<(), TaskError>;
