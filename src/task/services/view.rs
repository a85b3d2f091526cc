//! Derived, filtered and ordered views of the task collection.

use crate::task::domain::{SortKey, StatusFilter, Task, TodoFilters};
use icu_collator::{Collator, CollatorBorrowed, CollatorPreferences, options::CollatorOptions};
use std::cmp::Ordering;
use tracing::warn;

/// Computes the view of `tasks` selected by `filters`.
///
/// The input is never modified. Sorting is stable, so tasks that compare
/// equal under the chosen key keep their relative input order. Titles are
/// ordered by Unicode collation (root locale), which ignores accents and
/// case at the first level and puts lowercase before uppercase on ties.
#[must_use]
pub fn derive_view(tasks: &[Task], filters: &TodoFilters) -> Vec<Task> {
    let mut view: Vec<Task> = tasks
        .iter()
        .filter(|task| matches_status(task, filters.status))
        .cloned()
        .collect();
    match filters.sort_by {
        SortKey::Alphabetical => sort_by_title(&mut view),
        sort_by => view.sort_by(|a, b| compare(a, b, sort_by)),
    }
    view
}

const fn matches_status(task: &Task, status: StatusFilter) -> bool {
    match status {
        StatusFilter::All => true,
        StatusFilter::Active => !task.is_completed(),
        StatusFilter::Completed => task.is_completed(),
    }
}

fn compare(a: &Task, b: &Task, sort_by: SortKey) -> Ordering {
    match sort_by {
        SortKey::Alphabetical => fold_case_titles(a.title(), b.title()),
        SortKey::Date => b.created_at().cmp(&a.created_at()),
        SortKey::DueDate => a.due_date().cmp(&b.due_date()),
        SortKey::Priority => b.priority().rank().cmp(&a.priority().rank()),
    }
}

fn sort_by_title(view: &mut [Task]) {
    match title_collator() {
        Some(collator) => view.sort_by(|a, b| collator.compare(a.title(), b.title())),
        None => view.sort_by(|a, b| compare(a, b, SortKey::Alphabetical)),
    }
}

fn title_collator() -> Option<CollatorBorrowed<'static>> {
    Collator::try_new(CollatorPreferences::default(), CollatorOptions::default())
        .inspect_err(|err| warn!(error = %err, "title collation unavailable, folding case"))
        .ok()
}

/// Case-folded comparison; lowercase wins a tie, as under root collation.
fn fold_case_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}
