//! View parameters for filtering and ordering the task collection.

/// Which tasks a view keeps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StatusFilter {
    /// Every task.
    #[default]
    All,
    /// Tasks not yet completed.
    Active,
    /// Completed tasks.
    Completed,
}

/// Ordering applied to a view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Creation time, newest first.
    #[default]
    Date,
    /// Due time, soonest first.
    DueDate,
    /// Priority, most urgent first.
    Priority,
    /// Title, ascending.
    Alphabetical,
}

/// Session-scoped view parameters held by the state manager.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TodoFilters {
    /// Status filter.
    pub status: StatusFilter,
    /// Sort key.
    pub sort_by: SortKey,
}

impl TodoFilters {
    /// Returns these filters with `update` applied.
    #[must_use]
    pub fn merge(self, update: FilterUpdate) -> Self {
        Self {
            status: update.status.unwrap_or(self.status),
            sort_by: update.sort_by.unwrap_or(self.sort_by),
        }
    }
}

/// Partial filter change; `None` keeps the current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FilterUpdate {
    /// New status filter.
    pub status: Option<StatusFilter>,
    /// New sort key.
    pub sort_by: Option<SortKey>,
}

impl FilterUpdate {
    /// Changes only the status filter.
    #[must_use]
    pub const fn status(status: StatusFilter) -> Self {
        Self {
            status: Some(status),
            sort_by: None,
        }
    }

    /// Changes only the sort key.
    #[must_use]
    pub const fn sort_by(sort_by: SortKey) -> Self {
        Self {
            status: None,
            sort_by: Some(sort_by),
        }
    }
}
