//! Domain model for the task manager.
//!
//! Tasks are plain records confirmed by the remote store. The domain holds
//! no behaviour beyond construction and invariant enforcement: recurrence
//! weekdays only survive a weekly cadence, and the create payload has no
//! completion flag.

mod error;
mod filters;
mod ids;
mod input;
mod recurrence;
mod task;

pub use error::{ParseFrequencyError, ParsePriorityError, TaskDomainError};
pub use filters::{FilterUpdate, SortKey, StatusFilter, TodoFilters};
pub use ids::TaskId;
pub use input::{NewTask, TaskChanges};
pub use recurrence::{DaysOfWeek, Frequency, Recurrence};
pub use task::{Priority, StoredTaskData, Task};
