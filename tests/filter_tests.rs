use chrono::NaiveDate;
use focusdo::filter::{filter_tasks, week_bounds, COMPLETED, INBOX, THIS_WEEK, TODAY, TOMORROW};
use focusdo::models::Task;

fn task(id: u64, due: &str, category: &str, completed: bool) -> Task {
    Task {
        id,
        user_id: "u1".into(),
        title: format!("Task {}", id),
        description: String::new(),
        category: category.into(),
        due_date: due.into(),
        focus_sessions: 1,
        completed_focus_sessions: 0,
        completed,
        completed_on: completed.then(|| "2026-08-20T10:00:00+00:00".into()),
        created_at: "2026-08-01T09:00:00+00:00".into(),
    }
}

// 2026-08-26 is a Wednesday; its week runs Sunday 2026-08-23 through
// Saturday 2026-08-29.
fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 26).unwrap()
}

#[test]
fn buckets_partition_one_task_each() {
    let tasks = vec![
        task(1, "2026-08-26", "", false), // today
        task(2, "2026-08-27", "", false), // tomorrow
        task(3, "2026-08-28", "", false), // mid-week
        task(4, "2026-09-10", "", false), // out of week
        task(5, "2026-08-10", "", true),  // completed
    ];

    let today_view = filter_tasks(&tasks, TODAY, today());
    assert_eq!(today_view.len(), 1);
    assert_eq!(today_view[0].id, 1);

    let tomorrow_view = filter_tasks(&tasks, TOMORROW, today());
    assert_eq!(tomorrow_view.len(), 1);
    assert_eq!(tomorrow_view[0].id, 2);

    let completed_view = filter_tasks(&tasks, COMPLETED, today());
    assert_eq!(completed_view.len(), 1);
    assert_eq!(completed_view[0].id, 5);
}

#[test]
fn inbox_returns_all_tasks_in_order() {
    let tasks = vec![
        task(3, "2026-08-26", "", false),
        task(1, "2026-09-10", "", true),
        task(2, "bogus", "", false),
    ];
    let view = filter_tasks(&tasks, INBOX, today());
    assert_eq!(view.len(), 3);
    let ids: Vec<u64> = view.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![3, 1, 2]);
}

#[test]
fn this_week_includes_sunday_and_saturday_boundaries() {
    let tasks = vec![
        task(1, "2026-08-23", "", false), // Sunday, start of week
        task(2, "2026-08-29", "", false), // Saturday, end of week
        task(3, "2026-08-30", "", false), // following Sunday
    ];
    let view = filter_tasks(&tasks, THIS_WEEK, today());
    let ids: Vec<u64> = view.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn this_week_spans_year_boundary() {
    // Wednesday 2026-12-30; week is Sun 2026-12-27 .. Sat 2027-01-02
    let today = NaiveDate::from_ymd_opt(2026, 12, 30).unwrap();
    let tasks = vec![
        task(1, "2027-01-01", "", false),
        task(2, "2026-12-26", "", false), // Saturday of the previous week
    ];
    let view = filter_tasks(&tasks, THIS_WEEK, today);
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].id, 1);
}

#[test]
fn week_starts_on_the_most_recent_sunday() {
    let sunday = NaiveDate::from_ymd_opt(2026, 8, 23).unwrap();
    let (start, end) = week_bounds(sunday);
    assert_eq!(start, sunday);
    assert_eq!(end, NaiveDate::from_ymd_opt(2026, 8, 29).unwrap());

    let (start, end) = week_bounds(today());
    assert_eq!(start, sunday);
    assert_eq!(end, NaiveDate::from_ymd_opt(2026, 8, 29).unwrap());
}

#[test]
fn user_category_matches_exactly() {
    let tasks = vec![
        task(1, "2026-08-26", "Work", false),
        task(2, "2026-08-26", "work", false),
        task(3, "2026-08-26", "Work ", false),
        task(4, "2026-08-26", "", false),
    ];
    let view = filter_tasks(&tasks, "Work", today());
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].id, 1);
}

#[test]
fn unparseable_due_date_never_matches_a_date_bucket() {
    let tasks = vec![task(1, "not-a-date", "", false)];
    assert!(filter_tasks(&tasks, TODAY, today()).is_empty());
    assert!(filter_tasks(&tasks, TOMORROW, today()).is_empty());
    assert!(filter_tasks(&tasks, THIS_WEEK, today()).is_empty());
    // but it still shows up unfiltered
    assert_eq!(filter_tasks(&tasks, INBOX, today()).len(), 1);
}
