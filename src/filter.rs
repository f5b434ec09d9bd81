use crate::models::Task;
use chrono::{Datelike, Duration, NaiveDate};

/// The built-in filter buckets. They are computed, never stored, and carry
/// no edit/delete affordances.
pub const INBOX: &str = "Inbox";
pub const TODAY: &str = "Today";
pub const TOMORROW: &str = "Tomorrow";
pub const THIS_WEEK: &str = "This Week";
pub const COMPLETED: &str = "Completed";

pub const BUILTIN_CATEGORIES: [&str; 5] = [INBOX, TODAY, TOMORROW, THIS_WEEK, COMPLETED];

/// Returns true for one of the built-in pseudo-categories.
pub fn is_builtin(category: &str) -> bool {
    BUILTIN_CATEGORIES.contains(&category)
}

/// Week bounds around `today`: the most recent Sunday through the following
/// Saturday, inclusive at day granularity.
pub fn week_bounds(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = today - Duration::days(today.weekday().num_days_from_sunday() as i64);
    (start, start + Duration::days(6))
}

/// Derives the displayed task list for a selected category.
///
/// Pure and order-preserving. Built-in buckets partition on due date or
/// completion; any other value matches `task.category` exactly
/// (case-sensitive, no trimming). Tasks with an unparseable due date never
/// match a date bucket.
pub fn filter_tasks(tasks: &[Task], category: &str, today: NaiveDate) -> Vec<Task> {
    match category {
        INBOX => tasks.to_vec(),
        COMPLETED => tasks.iter().filter(|t| t.completed).cloned().collect(),
        TODAY => due_on(tasks, today),
        TOMORROW => due_on(tasks, today + Duration::days(1)),
        THIS_WEEK => {
            let (start, end) = week_bounds(today);
            tasks
                .iter()
                .filter(|t| t.due_day().map(|d| d >= start && d <= end).unwrap_or(false))
                .cloned()
                .collect()
        }
        name => tasks.iter().filter(|t| t.category == name).cloned().collect(),
    }
}

fn due_on(tasks: &[Task], day: NaiveDate) -> Vec<Task> {
    tasks
        .iter()
        .filter(|t| t.due_day() == Some(day))
        .cloned()
        .collect()
}
