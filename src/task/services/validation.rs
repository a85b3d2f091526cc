//! Pure validation of create and update payloads.
//!
//! Every rule runs and all violations are reported together, so a form
//! layer can annotate each field in one pass. Nothing here touches the
//! network.

use crate::task::domain::{NewTask, TaskChanges};
use thiserror::Error;

/// Field limits applied to task payloads.
///
/// # Examples
///
/// ```
/// use taskdeck::task::services::TaskLimits;
///
/// let limits = TaskLimits::default();
/// assert_eq!(limits.max_title_chars, 100);
/// assert_eq!(limits.max_description_chars, 500);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskLimits {
    /// Maximum title length in characters.
    pub max_title_chars: usize,
    /// Maximum description length in characters.
    pub max_description_chars: usize,
}

impl Default for TaskLimits {
    fn default() -> Self {
        Self {
            max_title_chars: 100,
            max_description_chars: 500,
        }
    }
}

/// Validation failures for task payloads.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskValidationError {
    /// The title is empty after trimming.
    #[error("title must not be empty")]
    EmptyTitle,

    /// The title exceeds the configured length.
    #[error("title is {actual} characters, maximum is {max}")]
    TitleTooLong {
        /// Configured maximum.
        max: usize,
        /// Submitted length.
        actual: usize,
    },

    /// The description exceeds the configured length.
    #[error("description is {actual} characters, maximum is {max}")]
    DescriptionTooLong {
        /// Configured maximum.
        max: usize,
        /// Submitted length.
        actual: usize,
    },

    /// Several rules failed.
    #[error("multiple validation errors: {}", format_errors(.0))]
    Multiple(Vec<Self>),
}

fn format_errors(errors: &[TaskValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl TaskValidationError {
    /// Folds collected violations into a result.
    ///
    /// No violation yields `Ok(())`, one is returned as-is, and several are
    /// wrapped in [`TaskValidationError::Multiple`].
    ///
    /// # Errors
    ///
    /// Returns the folded error when `errors` is non-empty.
    pub fn collect(mut errors: Vec<Self>) -> Result<(), Self> {
        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.remove(0)),
            _ => Err(Self::Multiple(errors)),
        }
    }

    /// Returns the individual violations.
    #[must_use]
    pub fn violations(&self) -> Vec<&Self> {
        match self {
            Self::Multiple(errors) => errors.iter().collect(),
            single => vec![single],
        }
    }
}

/// Validates a create payload.
///
/// # Errors
///
/// Returns [`TaskValidationError`] listing every violated rule.
pub fn validate_new_task(input: &NewTask, limits: &TaskLimits) -> Result<(), TaskValidationError> {
    let mut errors = Vec::new();
    check_title(input.title(), limits, &mut errors);
    if let Some(description) = input.description() {
        check_description(description, limits, &mut errors);
    }
    TaskValidationError::collect(errors)
}

/// Validates the fields present in an update payload.
///
/// # Errors
///
/// Returns [`TaskValidationError`] listing every violated rule.
pub fn validate_changes(
    changes: &TaskChanges,
    limits: &TaskLimits,
) -> Result<(), TaskValidationError> {
    let mut errors = Vec::new();
    if let Some(title) = changes.title() {
        check_title(title, limits, &mut errors);
    }
    if let Some(Some(description)) = changes.description() {
        check_description(description, limits, &mut errors);
    }
    TaskValidationError::collect(errors)
}

fn check_title(title: &str, limits: &TaskLimits, errors: &mut Vec<TaskValidationError>) {
    if title.trim().is_empty() {
        errors.push(TaskValidationError::EmptyTitle);
        return;
    }
    let actual = title.chars().count();
    if actual > limits.max_title_chars {
        errors.push(TaskValidationError::TitleTooLong {
            max: limits.max_title_chars,
            actual,
        });
    }
}

fn check_description(description: &str, limits: &TaskLimits, errors: &mut Vec<TaskValidationError>) {
    let actual = description.chars().count();
    if actual > limits.max_description_chars {
        errors.push(TaskValidationError::DescriptionTooLong {
            max: limits.max_description_chars,
            actual,
        });
    }
}
