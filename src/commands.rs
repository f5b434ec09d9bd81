use crate::auth;
use crate::filter::{self, filter_tasks};
use crate::models::{Settings, Task};
use crate::store;
use chrono::{Local, NaiveDate};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use std::io::{self, Write};

/// Creates an account and signs in.
pub fn cmd_signup(email: String, password: String, name: String) {
    match auth::sign_up(&email, &password, &name) {
        Ok(_) => println!("Welcome, {}! You are now signed in.", name),
        // auth errors are the one failure class shown verbatim
        Err(e) => eprintln!("{}", e),
    }
}

/// Signs in with an existing account.
pub fn cmd_login(email: String, password: String) {
    match auth::sign_in(&email, &password) {
        Ok(user_id) => {
            let name = store::get_user(&user_id).map(|u| u.name).unwrap_or(email);
            println!("Signed in as {}.", name);
        }
        Err(e) => eprintln!("{}", e),
    }
}

/// Signs out the current user.
pub fn cmd_logout() {
    match auth::sign_out() {
        Ok(()) => println!("Signed out."),
        Err(e) => eprintln!("{}", e),
    }
}

/// Prints the signed-in user's profile.
pub fn cmd_whoami() {
    match auth::require_user().map(|id| store::get_user(&id)) {
        Ok(Some(u)) => println!("{} <{}>", u.name, u.email),
        Ok(None) => eprintln!("Signed in, but the user document is missing."),
        Err(e) => eprintln!("{}", e),
    }
}

/// Adds a new task for the signed-in user.
pub fn cmd_add(
    title: String,
    description: Option<String>,
    category: Option<String>,
    due: String,
    sessions: u32,
    silent: bool,
) {
    let user_id = match auth::require_user() {
        Ok(id) => id,
        Err(e) => {
            if !silent { eprintln!("{}", e); }
            return;
        }
    };
    // Validate at the CLI boundary; the store itself stays permissive.
    if NaiveDate::parse_from_str(&due, "%Y-%m-%d").is_err() {
        if !silent { eprintln!("Invalid due date '{}'. Use YYYY-MM-DD.", due); }
        return;
    }
    let t = Task {
        id: 0, // assigned by the store
        user_id,
        title,
        description: description.unwrap_or_default(),
        category: category.unwrap_or_default(),
        due_date: due,
        focus_sessions: sessions.max(1),
        completed_focus_sessions: 0,
        completed: false,
        completed_on: None,
        created_at: Local::now().to_rfc3339(),
    };
    match store::create_task(t) {
        Ok(id) => {
            if !silent { println!("Task added (id = {})", id); }
        }
        Err(e) => {
            log::warn!("failed to save task: {}", e);
            if !silent { eprintln!("Failed to save task: {}", e); }
        }
    }
}

/// Marks a task as complete.
pub fn cmd_complete(id: u64, silent: bool) {
    set_completed(id, true, silent);
}

/// Reopens a completed task, clearing its completion timestamp.
pub fn cmd_reopen(id: u64, silent: bool) {
    set_completed(id, false, silent);
}

fn set_completed(id: u64, done: bool, silent: bool) {
    match store::set_completed(id, done) {
        Ok(true) => {
            if !silent {
                println!("Task {} {}.", id, if done { "completed" } else { "reopened" });
            }
        }
        Ok(false) => {
            if !silent { eprintln!("Task {} not found.", id); }
        }
        Err(e) => {
            log::warn!("failed to update task {}: {}", id, e);
            if !silent { eprintln!("Failed to update task: {}", e); }
        }
    }
}

/// Removes a task by ID.
pub fn cmd_remove(id: u64, silent: bool) {
    match store::delete_task(id) {
        Ok(true) => {
            if !silent { println!("Task {} removed.", id); }
        }
        Ok(false) => {
            if !silent { eprintln!("Task {} not found.", id); }
        }
        Err(e) => {
            log::warn!("failed to delete task {}: {}", id, e);
            if !silent { eprintln!("Failed to remove task: {}", e); }
        }
    }
}

/// Edits an existing task's details.
pub fn cmd_edit(
    id: u64,
    title: Option<String>,
    description: Option<String>,
    category: Option<String>,
    due: Option<String>,
    sessions: Option<u32>,
    silent: bool,
) {
    if let Some(d) = &due {
        if NaiveDate::parse_from_str(d, "%Y-%m-%d").is_err() {
            if !silent { eprintln!("Invalid due date '{}'. Use YYYY-MM-DD.", d); }
            return;
        }
    }
    let res = store::update_task(id, |t| {
        if let Some(v) = title { t.title = v; }
        if let Some(v) = description { t.description = v; }
        if let Some(v) = category { t.category = v; }
        if let Some(v) = due { t.due_date = v; }
        if let Some(v) = sessions { t.focus_sessions = v.max(1); }
    });
    match res {
        Ok(true) => {
            if !silent { println!("Task {} updated.", id); }
        }
        Ok(false) => {
            if !silent { eprintln!("Task {} not found.", id); }
        }
        Err(e) => {
            log::warn!("failed to update task {}: {}", id, e);
            if !silent { eprintln!("Failed to update task: {}", e); }
        }
    }
}

/// Full detail lines for one task, shared by `cmd_show` and the TUI info
/// popup. This is the only surface that renders the description.
pub fn task_info_lines(t: &Task) -> Vec<String> {
    let category = if t.category.is_empty() {
        "(none)"
    } else {
        t.category.as_str()
    };
    let mut lines = vec![
        format!("Title: {}", t.title),
        format!("Description: {}", t.description),
        format!("Category: {}", category),
        format!("Due: {}", t.due_date),
        format!(
            "Focus Sessions: {}/{}",
            t.completed_focus_sessions, t.focus_sessions
        ),
        format!("Status: {}", if t.completed { "Done" } else { "Pending" }),
    ];
    if let Some(on) = &t.completed_on {
        lines.push(format!("Completed on: {}", on));
    }
    lines
}

/// Prints the full details of a task, including its description.
pub fn cmd_show(id: u64) {
    match store::load_task(id) {
        Some(t) => {
            for line in task_info_lines(&t) {
                println!("{}", line);
            }
        }
        None => eprintln!("Task {} not found.", id),
    }
}

/// Lists the signed-in user's tasks in a formatted table.
///
/// With a category (built-in bucket or user category name) the list is the
/// filtered view; without one it is the Inbox.
pub fn cmd_list(category: Option<String>) {
    let user_id = match auth::require_user() {
        Ok(id) => id,
        Err(e) => {
            eprintln!("{}", e);
            return;
        }
    };
    let tasks = store::list_tasks(&user_id);
    let selected = category.unwrap_or_else(|| filter::INBOX.to_string());
    let today = Local::now().date_naive();
    let visible = filter_tasks(&tasks, &selected, today);
    if visible.is_empty() {
        println!("No tasks in {}.", selected);
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("ID").add_attribute(Attribute::Bold),
            Cell::new("Title").add_attribute(Attribute::Bold),
            Cell::new("Category").add_attribute(Attribute::Bold),
            Cell::new("Due").add_attribute(Attribute::Bold),
            Cell::new("Sessions").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
        ]);

    for t in visible {
        let overdue = t.due_day().map(|d| d < today).unwrap_or(false) && !t.completed;
        let status = if t.completed { "Done" } else { "Pending" };
        let status_color = if t.completed { Color::Green } else { Color::Yellow };
        table.add_row(vec![
            Cell::new(t.id),
            Cell::new(&t.title),
            Cell::new(&t.category),
            Cell::new(&t.due_date).fg(if overdue { Color::Red } else { Color::Reset }),
            Cell::new(format!("{}/{}", t.completed_focus_sessions, t.focus_sessions)),
            Cell::new(status).fg(status_color),
        ]);
    }

    println!("{table}");
}

/// Adds a user-defined category.
pub fn cmd_category_add(name: String, silent: bool) {
    if filter::is_builtin(&name) {
        if !silent { eprintln!("'{}' is a built-in category.", name); }
        return;
    }
    let user_id = match auth::require_user() {
        Ok(id) => id,
        Err(e) => {
            if !silent { eprintln!("{}", e); }
            return;
        }
    };
    match store::add_category(&user_id, &name) {
        Ok(true) => {
            if !silent { println!("Category '{}' added.", name); }
        }
        Ok(false) => {
            if !silent { eprintln!("User document not found."); }
        }
        Err(e) => {
            log::warn!("failed to add category: {}", e);
            if !silent { eprintln!("Failed to add category: {}", e); }
        }
    }
}

/// Removes a user-defined category. Built-in buckets cannot be removed.
pub fn cmd_category_remove(name: String, silent: bool) {
    if filter::is_builtin(&name) {
        if !silent { eprintln!("'{}' is a built-in category.", name); }
        return;
    }
    let user_id = match auth::require_user() {
        Ok(id) => id,
        Err(e) => {
            if !silent { eprintln!("{}", e); }
            return;
        }
    };
    match store::remove_category(&user_id, &name) {
        Ok(true) => {
            if !silent { println!("Category '{}' removed.", name); }
        }
        Ok(false) => {
            if !silent { eprintln!("User document not found."); }
        }
        Err(e) => {
            log::warn!("failed to remove category: {}", e);
            if !silent { eprintln!("Failed to remove category: {}", e); }
        }
    }
}

/// Renames a category: add the new name, then remove the old one.
///
/// Two sequential writes, not atomic. If the second fails the list holds
/// both names; tasks keep the old category string either way.
pub fn cmd_category_rename(old: String, new: String, silent: bool) {
    if filter::is_builtin(&old) || filter::is_builtin(&new) {
        if !silent { eprintln!("Built-in categories cannot be renamed."); }
        return;
    }
    cmd_category_add(new, silent);
    cmd_category_remove(old, silent);
}

/// Lists the built-in buckets and the user's categories.
pub fn cmd_category_list() {
    let user_id = match auth::require_user() {
        Ok(id) => id,
        Err(e) => {
            eprintln!("{}", e);
            return;
        }
    };
    for c in filter::BUILTIN_CATEGORIES {
        println!("{} (built-in)", c);
    }
    if let Some(user) = store::get_user(&user_id) {
        for c in user.categories {
            println!("{}", c);
        }
    }
}

/// Shows or updates the user's settings.
///
/// All writes funnel through `store::update_settings`.
pub fn cmd_settings(focus_duration: Option<u32>, theme: Option<String>) {
    let user_id = match auth::require_user() {
        Ok(id) => id,
        Err(e) => {
            eprintln!("{}", e);
            return;
        }
    };
    let Some(user) = store::get_user(&user_id) else {
        eprintln!("User document not found.");
        return;
    };
    if focus_duration.is_none() && theme.is_none() {
        println!("focus-duration: {} minutes", user.settings.focus_duration);
        println!("theme: {}", user.settings.theme);
        return;
    }
    if let Some(minutes) = focus_duration {
        if minutes == 0 {
            eprintln!("Focus duration must be at least 1 minute.");
            return;
        }
    }
    if let Some(t) = &theme {
        if t != "light" && t != "dark" {
            eprintln!("Theme must be 'light' or 'dark'.");
            return;
        }
    }
    let settings = Settings {
        focus_duration: focus_duration.unwrap_or(user.settings.focus_duration),
        theme: theme.unwrap_or(user.settings.theme),
    };
    match store::update_settings(&user_id, settings) {
        Ok(_) => println!("Settings updated."),
        Err(e) => {
            log::warn!("failed to update settings: {}", e);
            eprintln!("Failed to update settings: {}", e);
        }
    }
}

/// Resets the database by deleting all tasks and user documents.
pub fn cmd_reset(force: bool) {
    if !force {
        print!("Are you sure you want to delete all tasks and users? This cannot be undone. [y/N] ");
        let _ = io::stdout().flush();
        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            return;
        }
        if input.trim().to_lowercase() != "y" {
            println!("Aborted.");
            return;
        }
    }

    if let Err(e) = store::delete_database() {
        eprintln!("Failed to reset database: {}", e);
    } else {
        println!("Database reset successfully.");
    }
}
