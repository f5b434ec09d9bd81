use focusdo::auth;
use focusdo::commands::*;
use focusdo::models::Settings;
use focusdo::session::{FocusSession, SessionState, Tick};
use focusdo::store;
use std::env;
use std::sync::Mutex;

// Tests share the FOCUSDO_DB environment variable, so they run serially.
static TEST_MUTEX: Mutex<()> = Mutex::new(());

fn with_test_db<F>(f: F)
where
    F: FnOnce(),
{
    let _guard = TEST_MUTEX.lock().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("tasks.json");
    env::set_var("FOCUSDO_DB", db_path.to_str().unwrap());
    f();
    env::remove_var("FOCUSDO_DB");
}

fn signup() -> String {
    auth::sign_up("tester@example.com", "secret", "Tester").unwrap()
}

#[test]
fn signup_creates_account_user_doc_and_session() {
    with_test_db(|| {
        let user_id = signup();
        assert_eq!(auth::current_user_id(), Some(user_id.clone()));

        let user = store::get_user(&user_id).unwrap();
        assert_eq!(user.name, "Tester");
        assert!(user.categories.is_empty());
        assert_eq!(user.settings.focus_duration, 25);
        assert_eq!(user.settings.theme, "light");
    });
}

#[test]
fn duplicate_email_and_bad_password_are_rejected() {
    with_test_db(|| {
        signup();
        assert!(matches!(
            auth::sign_up("tester@example.com", "other", "Other"),
            Err(auth::AuthError::EmailTaken)
        ));
        assert!(matches!(
            auth::sign_in("tester@example.com", "wrong"),
            Err(auth::AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            auth::sign_in("nobody@example.com", "secret"),
            Err(auth::AuthError::InvalidCredentials)
        ));
    });
}

#[test]
fn sign_out_clears_the_session() {
    with_test_db(|| {
        signup();
        auth::sign_out().unwrap();
        assert_eq!(auth::current_user_id(), None);
        assert!(matches!(auth::require_user(), Err(auth::AuthError::NotSignedIn)));

        auth::sign_in("tester@example.com", "secret").unwrap();
        assert!(auth::current_user_id().is_some());
    });
}

#[test]
fn add_and_list_tasks() {
    with_test_db(|| {
        let user_id = signup();
        cmd_add(
            "Write report".into(),
            Some("Quarterly numbers".into()),
            Some("Work".into()),
            "2026-09-01".into(),
            3,
            true,
        );

        let tasks = store::list_tasks(&user_id);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Write report");
        assert_eq!(tasks[0].category, "Work");
        assert_eq!(tasks[0].focus_sessions, 3);
        assert_eq!(tasks[0].completed_focus_sessions, 0);
        assert!(!tasks[0].completed);
    });
}

#[test]
fn tasks_are_scoped_to_their_owner() {
    with_test_db(|| {
        let first = signup();
        cmd_add("Mine".into(), None, None, "2026-09-01".into(), 1, true);

        let second = auth::sign_up("other@example.com", "pw", "Other").unwrap();
        cmd_add("Theirs".into(), None, None, "2026-09-02".into(), 1, true);

        assert_eq!(store::list_tasks(&first).len(), 1);
        assert_eq!(store::list_tasks(&first)[0].title, "Mine");
        assert_eq!(store::list_tasks(&second).len(), 1);
        assert_eq!(store::list_tasks(&second)[0].title, "Theirs");
    });
}

#[test]
fn invalid_due_date_is_rejected_at_the_cli_boundary() {
    with_test_db(|| {
        let user_id = signup();
        cmd_add("Bad".into(), None, None, "tomorrow".into(), 1, true);
        assert!(store::list_tasks(&user_id).is_empty());

        cmd_add("Good".into(), None, None, "2026-09-01".into(), 1, true);
        let id = store::list_tasks(&user_id)[0].id;
        cmd_edit(id, None, None, None, Some("not-a-date".into()), None, true);
        assert_eq!(store::list_tasks(&user_id)[0].due_date, "2026-09-01");
    });
}

#[test]
fn task_info_renders_the_description() {
    with_test_db(|| {
        let user_id = signup();
        cmd_add(
            "Write report".into(),
            Some("Quarterly numbers".into()),
            None,
            "2026-09-01".into(),
            2,
            true,
        );
        let id = store::list_tasks(&user_id)[0].id;

        let t = store::load_task(id).unwrap();
        let lines = task_info_lines(&t);
        assert!(lines.contains(&"Description: Quarterly numbers".to_string()));
        assert!(lines.contains(&"Category: (none)".to_string()));
        assert!(lines.contains(&"Focus Sessions: 0/2".to_string()));
        assert!(lines.contains(&"Status: Pending".to_string()));
        assert!(!lines.iter().any(|l| l.starts_with("Completed on:")));

        cmd_complete(id, true);
        let t = store::load_task(id).unwrap();
        let lines = task_info_lines(&t);
        assert!(lines.contains(&"Status: Done".to_string()));
        assert!(lines.iter().any(|l| l.starts_with("Completed on:")));
    });
}

#[test]
fn completion_toggle_sets_and_clears_timestamp() {
    with_test_db(|| {
        let user_id = signup();
        cmd_add("Toggle me".into(), None, None, "2026-09-01".into(), 1, true);
        let id = store::list_tasks(&user_id)[0].id;

        cmd_complete(id, true);
        let t = store::load_task(id).unwrap();
        assert!(t.completed);
        assert!(t.completed_on.is_some());

        cmd_reopen(id, true);
        let t = store::load_task(id).unwrap();
        assert!(!t.completed);
        assert!(t.completed_on.is_none());
    });
}

#[test]
fn finished_countdown_records_exactly_one_session() {
    with_test_db(|| {
        let user_id = signup();
        cmd_add("Focus".into(), None, None, "2026-09-01".into(), 2, true);
        let snapshot = store::list_tasks(&user_id).remove(0);

        let mut session = FocusSession::start(snapshot.id, 1);
        let mut finishes = 0;
        for _ in 0..90 {
            if session.tick() == Tick::Finished {
                finishes += 1;
                store::record_session_completion(snapshot.id, snapshot.completed_focus_sessions)
                    .unwrap();
            }
        }
        assert_eq!(finishes, 1);
        assert_eq!(session.state(), SessionState::Completed);
        assert_eq!(session.time_left(), 0);

        let t = store::load_task(snapshot.id).unwrap();
        assert_eq!(t.completed_focus_sessions, 1);
    });
}

#[test]
fn session_write_uses_the_last_known_count() {
    with_test_db(|| {
        let user_id = signup();
        cmd_add("Focus".into(), None, None, "2026-09-01".into(), 2, true);
        let snapshot = store::list_tasks(&user_id).remove(0);

        // another writer bumps the counter while the session runs
        store::record_session_completion(snapshot.id, 4).unwrap();
        assert_eq!(store::load_task(snapshot.id).unwrap().completed_focus_sessions, 5);

        // the session still writes snapshot + 1: last write wins
        store::record_session_completion(snapshot.id, snapshot.completed_focus_sessions).unwrap();
        assert_eq!(store::load_task(snapshot.id).unwrap().completed_focus_sessions, 1);
    });
}

#[test]
fn category_set_semantics() {
    with_test_db(|| {
        let user_id = signup();
        cmd_category_add("Work".into(), true);
        cmd_category_add("Work".into(), true);
        cmd_category_add("Home".into(), true);

        let user = store::get_user(&user_id).unwrap();
        assert_eq!(user.categories, vec!["Work".to_string(), "Home".to_string()]);

        cmd_category_remove("Work".into(), true);
        let user = store::get_user(&user_id).unwrap();
        assert_eq!(user.categories, vec!["Home".to_string()]);
    });
}

#[test]
fn builtin_buckets_cannot_be_stored_or_removed() {
    with_test_db(|| {
        let user_id = signup();
        cmd_category_add("Today".into(), true);
        cmd_category_remove("Inbox".into(), true);
        let user = store::get_user(&user_id).unwrap();
        assert!(user.categories.is_empty());
    });
}

#[test]
fn rename_is_add_then_remove() {
    with_test_db(|| {
        let user_id = signup();
        cmd_category_add("A".into(), true);

        // the first half of a rename alone leaves both names in the list;
        // the rename is two sequential writes, not an atomic operation
        store::add_category(&user_id, "B").unwrap();
        let user = store::get_user(&user_id).unwrap();
        assert_eq!(user.categories, vec!["A".to_string(), "B".to_string()]);
        store::remove_category(&user_id, "A").unwrap();

        let user = store::get_user(&user_id).unwrap();
        assert_eq!(user.categories, vec!["B".to_string()]);

        cmd_category_rename("B".into(), "C".into(), true);
        let user = store::get_user(&user_id).unwrap();
        assert_eq!(user.categories, vec!["C".to_string()]);
    });
}

#[test]
fn settings_update_goes_through_the_single_writer() {
    with_test_db(|| {
        let user_id = signup();
        store::update_settings(
            &user_id,
            Settings {
                focus_duration: 30,
                theme: "dark".into(),
            },
        )
        .unwrap();

        let user = store::get_user(&user_id).unwrap();
        assert_eq!(user.settings.focus_duration, 30);
        assert_eq!(user.settings.theme, "dark");
    });
}

#[test]
fn remove_unknown_task_reports_not_found() {
    with_test_db(|| {
        signup();
        assert!(!store::delete_task(999).unwrap());
        assert!(!store::set_completed(999, true).unwrap());
        assert!(!store::record_session_completion(999, 0).unwrap());
    });
}
