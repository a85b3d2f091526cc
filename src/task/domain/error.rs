//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task identifier is empty after trimming.
    #[error("task identifier must not be empty")]
    EmptyTaskId,

    /// The weekday index is outside `0..=6`.
    #[error("invalid weekday index {0}, expected 0 (Sunday) through 6 (Saturday)")]
    InvalidWeekday(u8),
}

/// Error returned while parsing a task priority from its textual form.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParsePriorityError(pub String);

/// Error returned while parsing a recurrence frequency from its textual form.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown recurrence frequency: {0}")]
pub struct ParseFrequencyError(pub String);
