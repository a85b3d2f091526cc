//! Recurrence metadata attached to tasks.
//!
//! Recurrence is descriptive only. Nothing in this crate expands a recurring
//! task into concrete future occurrences.

use super::{ParseFrequencyError, TaskDomainError};
use chrono::Weekday;

/// Number of days in a week, indexed `0` (Sunday) through `6` (Saturday).
const DAYS_PER_WEEK: u8 = 7;

/// Weekdays in index order.
const WEEKDAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Repeat cadence of a recurring task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    /// Repeats every day.
    Daily,
    /// Repeats on selected weekdays.
    Weekly,
}

impl Frequency {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
        }
    }
}

impl TryFrom<&str> for Frequency {
    type Error = ParseFrequencyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            _ => Err(ParseFrequencyError(value.to_owned())),
        }
    }
}

/// Set of weekdays, always iterated Sunday through Saturday.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DaysOfWeek(u8);

impl DaysOfWeek {
    /// Returns an empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Builds a set from weekday indices where `0` is Sunday.
    ///
    /// Duplicates collapse; order of the input is irrelevant.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidWeekday`] for any index above `6`.
    pub fn from_indices(indices: impl IntoIterator<Item = u8>) -> Result<Self, TaskDomainError> {
        indices.into_iter().try_fold(Self::empty(), |set, index| {
            if index >= DAYS_PER_WEEK {
                return Err(TaskDomainError::InvalidWeekday(index));
            }
            Ok(Self(set.0 | (1 << index)))
        })
    }

    /// Builds a set from `chrono` weekdays.
    #[must_use]
    pub fn from_weekdays(days: impl IntoIterator<Item = Weekday>) -> Self {
        days.into_iter().fold(Self::empty(), |set, day| {
            Self(set.0 | (1 << day.num_days_from_sunday()))
        })
    }

    /// Returns `true` when no weekday is selected.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` when the weekday is selected.
    #[must_use]
    pub fn contains(self, day: Weekday) -> bool {
        self.0 & (1 << day.num_days_from_sunday()) != 0
    }

    /// Returns the selected indices in Sunday-first order.
    #[must_use]
    pub fn indices(self) -> Vec<u8> {
        (0..DAYS_PER_WEEK)
            .filter(|index| self.0 & (1 << index) != 0)
            .collect()
    }

    /// Returns the selected weekdays in Sunday-first order.
    #[must_use]
    pub fn weekdays(self) -> Vec<Weekday> {
        self.indices()
            .into_iter()
            .filter_map(|index| WEEKDAYS.get(usize::from(index)).copied())
            .collect()
    }
}

/// Recurrence metadata of a task.
///
/// Days of the week are kept only while the frequency is weekly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Recurrence {
    is_recurring: bool,
    frequency: Option<Frequency>,
    days_of_week: DaysOfWeek,
}

impl Recurrence {
    /// A task that does not repeat.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            is_recurring: false,
            frequency: None,
            days_of_week: DaysOfWeek::empty(),
        }
    }

    /// A task that repeats every day.
    #[must_use]
    pub const fn daily() -> Self {
        Self {
            is_recurring: true,
            frequency: Some(Frequency::Daily),
            days_of_week: DaysOfWeek::empty(),
        }
    }

    /// A task that repeats on the given weekdays.
    #[must_use]
    pub const fn weekly(days_of_week: DaysOfWeek) -> Self {
        Self {
            is_recurring: true,
            frequency: Some(Frequency::Weekly),
            days_of_week,
        }
    }

    /// Builds recurrence metadata from its raw parts.
    ///
    /// The weekday set is dropped unless `frequency` is weekly.
    #[must_use]
    pub fn from_parts(
        is_recurring: bool,
        frequency: Option<Frequency>,
        days_of_week: DaysOfWeek,
    ) -> Self {
        let kept_days = if frequency == Some(Frequency::Weekly) {
            days_of_week
        } else {
            DaysOfWeek::empty()
        };
        Self {
            is_recurring,
            frequency,
            days_of_week: kept_days,
        }
    }

    /// Returns whether the task repeats.
    #[must_use]
    pub const fn is_recurring(&self) -> bool {
        self.is_recurring
    }

    /// Returns the repeat cadence, if any.
    #[must_use]
    pub const fn frequency(&self) -> Option<Frequency> {
        self.frequency
    }

    /// Returns the selected weekdays; empty unless the cadence is weekly.
    #[must_use]
    pub const fn days_of_week(&self) -> DaysOfWeek {
        self.days_of_week
    }
}
