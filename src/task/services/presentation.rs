//! Display helpers for due dates and recurrence.

use crate::task::domain::{Frequency, Task};
use chrono::{DateTime, TimeZone, Utc};
use mockable::Clock;
use std::fmt::Display;

/// Weekday abbreviations indexed from Sunday.
const WEEKDAY_ABBREVIATIONS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const TIME_FORMAT: &str = "%-I:%M %p";
const DATE_TIME_FORMAT: &str = "%b %-d, %Y %-I:%M %p";

/// Renders a due date relative to `now`, in `now`'s time zone.
///
/// Same calendar day renders `Today at <time>`, the following day renders
/// `Tomorrow at <time>`, anything else renders the full date and time. The
/// day offset is computed once, so at most one relative branch applies.
#[must_use]
pub fn format_due_date_at<Tz>(due: DateTime<Utc>, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let local_due = due.with_timezone(&now.timezone());
    let day_offset = local_due
        .date_naive()
        .signed_duration_since(now.date_naive())
        .num_days();

    match day_offset {
        0 => format!("Today at {}", local_due.format(TIME_FORMAT)),
        1 => format!("Tomorrow at {}", local_due.format(TIME_FORMAT)),
        _ => local_due.format(DATE_TIME_FORMAT).to_string(),
    }
}

/// Renders a due date relative to the clock's local time.
///
/// The clock is read once per call.
#[must_use]
pub fn format_due_date(due: DateTime<Utc>, clock: &impl Clock) -> String {
    format_due_date_at(due, &clock.local())
}

/// Describes a task's recurrence for display.
///
/// Weekly days are listed in fixed Sunday-to-Saturday order.
#[must_use]
pub fn recurring_text(task: &Task) -> String {
    let recurrence = task.recurrence();
    if !recurrence.is_recurring() {
        return String::new();
    }

    match recurrence.frequency() {
        Some(Frequency::Daily) => "Repeats daily".to_owned(),
        Some(Frequency::Weekly) => {
            let days: Vec<&str> = recurrence
                .days_of_week()
                .indices()
                .into_iter()
                .filter_map(|index| WEEKDAY_ABBREVIATIONS.get(usize::from(index)).copied())
                .collect();
            if days.is_empty() {
                "Repeats weekly".to_owned()
            } else {
                format!("Repeats weekly on {}", days.join(", "))
            }
        }
        None => String::new(),
    }
}
