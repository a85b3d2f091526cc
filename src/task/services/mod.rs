//! Application services for the task manager.
//!
//! - [`TaskStateManager`] owns the task collection and mediates every
//!   mutation through the gateway.
//! - [`derive_view`] computes filtered, ordered views.
//! - [`validate_new_task`] and [`validate_changes`] check payloads before
//!   they leave the client.
//! - [`format_due_date`] and [`recurring_text`] render task metadata.

mod presentation;
mod state;
mod validation;
mod view;

pub use presentation::{format_due_date, format_due_date_at, recurring_text};
pub use state::{TaskSnapshot, TaskStateError, TaskStateManager, TaskStateResult};
pub use validation::{TaskLimits, TaskValidationError, validate_changes, validate_new_task};
pub use view::derive_view;
