//! Create and update payloads submitted to the remote store.

use super::{Priority, Recurrence, Task};
use chrono::{DateTime, Utc};

/// Payload for creating a task.
///
/// There is deliberately no completion flag: new tasks always start open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    title: String,
    description: Option<String>,
    priority: Priority,
    due_date: Option<DateTime<Utc>>,
    recurrence: Recurrence,
    image_url: Option<String>,
}

impl NewTask {
    /// Creates a payload with the given title and default fields.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            priority: Priority::default(),
            due_date: None,
            recurrence: Recurrence::none(),
            image_url: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the due timestamp.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the recurrence metadata.
    #[must_use]
    pub const fn with_recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = recurrence;
        self
    }

    /// Sets the image URL returned by the upload collaborator.
    #[must_use]
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Returns the title as submitted.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the due timestamp, if one was chosen.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the recurrence metadata.
    #[must_use]
    pub const fn recurrence(&self) -> &Recurrence {
        &self.recurrence
    }

    /// Returns the image URL, if any.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }
}

/// Partial update of a task's mutable fields.
///
/// `None` leaves a field untouched. Description and image URL use a nested
/// option so they can be explicitly cleared. The identifier and creation
/// timestamp are not representable here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    title: Option<String>,
    description: Option<Option<String>>,
    completed: Option<bool>,
    due_date: Option<DateTime<Utc>>,
    priority: Option<Priority>,
    recurrence: Option<Recurrence>,
    image_url: Option<Option<String>>,
}

impl TaskChanges {
    /// Creates an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a full-record replacement carrying every field of `task`.
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: Some(task.title().to_owned()),
            description: Some(task.description().map(str::to_owned)),
            completed: Some(task.is_completed()),
            due_date: Some(task.due_date()),
            priority: Some(task.priority()),
            recurrence: Some(*task.recurrence()),
            image_url: Some(task.image_url().map(str::to_owned)),
        }
    }

    /// Fills every untouched field from `task`, producing a full record.
    #[must_use]
    pub fn merged_onto(self, task: &Task) -> Self {
        let base = Self::from_task(task);
        Self {
            title: self.title.or(base.title),
            description: self.description.or(base.description),
            completed: self.completed.or(base.completed),
            due_date: self.due_date.or(base.due_date),
            priority: self.priority.or(base.priority),
            recurrence: self.recurrence.or(base.recurrence),
            image_url: self.image_url.or(base.image_url),
        }
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    /// Removes the description.
    #[must_use]
    pub fn clear_description(mut self) -> Self {
        self.description = Some(None);
        self
    }

    /// Sets the completion flag.
    #[must_use]
    pub const fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    /// Sets the due timestamp.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the recurrence metadata.
    #[must_use]
    pub const fn with_recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = Some(recurrence);
        self
    }

    /// Sets the image URL.
    #[must_use]
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(Some(image_url.into()));
        self
    }

    /// Removes the image reference.
    #[must_use]
    pub fn clear_image_url(mut self) -> Self {
        self.image_url = Some(None);
        self
    }

    /// Returns the new title, if changed.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the description change, if any.
    ///
    /// `Some(None)` means the description is cleared.
    #[must_use]
    pub fn description(&self) -> Option<Option<&str>> {
        self.description.as_ref().map(Option::as_deref)
    }

    /// Returns the new completion flag, if changed.
    #[must_use]
    pub const fn completed(&self) -> Option<bool> {
        self.completed
    }

    /// Returns the new due timestamp, if changed.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the new priority, if changed.
    #[must_use]
    pub const fn priority(&self) -> Option<Priority> {
        self.priority
    }

    /// Returns the new recurrence metadata, if changed.
    #[must_use]
    pub const fn recurrence(&self) -> Option<&Recurrence> {
        self.recurrence.as_ref()
    }

    /// Returns the image URL change, if any.
    ///
    /// `Some(None)` means the image reference is removed.
    #[must_use]
    pub fn image_url(&self) -> Option<Option<&str>> {
        self.image_url.as_ref().map(Option::as_deref)
    }

    /// Returns `true` when no field is changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
