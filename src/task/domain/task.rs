//! Task record and priority types.

use super::{ParsePriorityError, Recurrence, TaskId};
use chrono::{DateTime, Utc};

/// Task priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Priority {
    /// Low urgency.
    Low,
    /// Normal urgency.
    #[default]
    Medium,
    /// High urgency.
    High,
}

impl Priority {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Returns the ordering rank, higher meaning more urgent.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}

/// A task as confirmed by the remote store.
///
/// Tasks are only ever built from store responses, so every instance carries
/// a store-assigned identifier and creation timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    title: String,
    description: Option<String>,
    completed: bool,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    due_date: DateTime<Utc>,
    priority: Priority,
    recurrence: Recurrence,
    image_url: Option<String>,
}

/// Parameter object for reconstructing a task returned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredTaskData {
    /// Store-assigned identifier.
    pub id: TaskId,
    /// Task title.
    pub title: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Completion flag.
    pub completed: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest modification timestamp reported by the store, if any.
    pub updated_at: Option<DateTime<Utc>>,
    /// Due timestamp.
    pub due_date: DateTime<Utc>,
    /// Priority.
    pub priority: Priority,
    /// Recurrence metadata.
    pub recurrence: Recurrence,
    /// Reference to an externally hosted image.
    pub image_url: Option<String>,
}

impl Task {
    /// Reconstructs a task from store data.
    ///
    /// A blank description is normalized to `None`.
    #[must_use]
    pub fn from_stored(data: StoredTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description.filter(|text| !text.is_empty()),
            completed: data.completed,
            created_at: data.created_at,
            updated_at: data.updated_at,
            due_date: data.due_date,
            priority: data.priority,
            recurrence: data.recurrence,
            image_url: data.image_url,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns whether the task is completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp reported by the store.
    #[must_use]
    pub const fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Returns the due timestamp.
    #[must_use]
    pub const fn due_date(&self) -> DateTime<Utc> {
        self.due_date
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the recurrence metadata.
    #[must_use]
    pub const fn recurrence(&self) -> &Recurrence {
        &self.recurrence
    }

    /// Returns the attached image URL, if any.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    /// Returns a copy of this task's data for rebuilding a modified record.
    #[must_use]
    pub fn to_stored(&self) -> StoredTaskData {
        StoredTaskData {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            completed: self.completed,
            created_at: self.created_at,
            updated_at: self.updated_at,
            due_date: self.due_date,
            priority: self.priority,
            recurrence: self.recurrence,
            image_url: self.image_url.clone(),
        }
    }
}
