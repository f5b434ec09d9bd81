use crate::models::{Settings, Task, User};
use chrono::Local;
use std::fs::{self, OpenOptions};
use std::io::{Read, Write};
use std::path::PathBuf;

/// Returns the path to the tasks database file (`tasks.json`).
///
/// The path is determined in the following order:
/// 1. `FOCUSDO_DB` environment variable.
/// 2. `~/.local/share/focusdo/tasks.json` (on Linux).
/// 3. `./tasks.json` (fallback).
pub fn db_path() -> PathBuf {
    std::env::var("FOCUSDO_DB").map(PathBuf::from).unwrap_or_else(|_| {
        let mut p = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        p.push("focusdo");
        if !p.exists() {
            let _ = fs::create_dir_all(&p);
        }
        p.push("tasks.json");
        p
    })
}

/// Returns the path to the user documents file (`users.json`).
///
/// Located in the same directory as the tasks database.
fn users_path() -> PathBuf {
    let mut p = db_path();
    p.pop();
    p.push("users.json");
    p
}

fn read_json_or_default<T: Default + serde::de::DeserializeOwned>(path: &PathBuf) -> T {
    if !path.exists() {
        return T::default();
    }
    let mut f = match OpenOptions::new().read(true).open(path) {
        Ok(f) => f,
        Err(e) => {
            log::warn!("failed to open {}: {}", path.display(), e);
            return T::default();
        }
    };
    let mut s = String::new();
    if let Err(e) = f.read_to_string(&mut s) {
        log::warn!("failed to read {}: {}", path.display(), e);
        return T::default();
    }
    serde_json::from_str(&s).unwrap_or_else(|e| {
        log::warn!("failed to parse {}: {}", path.display(), e);
        T::default()
    })
}

fn write_json<T: serde::Serialize>(path: &PathBuf, value: &T) -> std::io::Result<()> {
    let s = serde_json::to_string_pretty(value).map_err(std::io::Error::other)?;
    let mut f = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Loads all tasks from the storage file, regardless of owner.
///
/// Returns an empty vector if the file does not exist or cannot be read.
pub fn load_tasks() -> Vec<Task> {
    read_json_or_default(&db_path())
}

/// Loads the tasks owned by the given user.
pub fn list_tasks(user_id: &str) -> Vec<Task> {
    let mut tasks = load_tasks();
    tasks.retain(|t| t.user_id == user_id);
    tasks
}

/// Loads a single task by its ID.
///
/// Returns `None` if the task is not found.
pub fn load_task(id: u64) -> Option<Task> {
    load_tasks().into_iter().find(|t| t.id == id)
}

/// Saves the given list of tasks to the storage file.
///
/// Overwrites the existing file.
pub fn save_tasks(tasks: &Vec<Task>) -> std::io::Result<()> {
    write_json(&db_path(), tasks)
}

/// Creates a new task, assigning the next free ID. Returns the assigned ID.
pub fn create_task(mut task: Task) -> std::io::Result<u64> {
    let mut tasks = load_tasks();
    let next_id = tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
    task.id = next_id;
    tasks.push(task);
    save_tasks(&tasks)?;
    Ok(next_id)
}

/// Applies `f` to the task with the given ID and writes the result back.
///
/// Returns `Ok(false)` if no such task exists.
pub fn update_task<F: FnOnce(&mut Task)>(id: u64, f: F) -> std::io::Result<bool> {
    let mut tasks = load_tasks();
    match tasks.iter_mut().find(|t| t.id == id) {
        Some(t) => f(t),
        None => return Ok(false),
    }
    save_tasks(&tasks)?;
    Ok(true)
}

/// Deletes a task by ID. Returns `Ok(false)` if it did not exist.
pub fn delete_task(id: u64) -> std::io::Result<bool> {
    let mut tasks = load_tasks();
    let len_before = tasks.len();
    tasks.retain(|t| t.id != id);
    if tasks.len() == len_before {
        return Ok(false);
    }
    save_tasks(&tasks)?;
    Ok(true)
}

/// Sets or clears a task's completion flag.
///
/// This is the write site that owns the invariant: `completed_on` is present
/// exactly when `completed` is true.
pub fn set_completed(id: u64, done: bool) -> std::io::Result<bool> {
    update_task(id, |t| {
        t.completed = done;
        t.completed_on = if done {
            Some(Local::now().to_rfc3339())
        } else {
            None
        };
    })
}

/// Records one finished focus session against a task.
///
/// `last_known` is the count the session screen fetched when it started; the
/// write is `last_known + 1`, deliberately not a re-fetch-and-increment.
pub fn record_session_completion(id: u64, last_known: u32) -> std::io::Result<bool> {
    update_task(id, |t| {
        t.completed_focus_sessions = last_known + 1;
    })
}

/// Loads all user documents.
pub fn load_users() -> Vec<User> {
    read_json_or_default(&users_path())
}

/// Saves the given list of user documents.
pub fn save_users(users: &Vec<User>) -> std::io::Result<()> {
    write_json(&users_path(), users)
}

/// Loads a single user document by ID.
pub fn get_user(user_id: &str) -> Option<User> {
    load_users().into_iter().find(|u| u.user_id == user_id)
}

/// Inserts or replaces a user document.
pub fn save_user(user: &User) -> std::io::Result<()> {
    let mut users = load_users();
    if let Some(u) = users.iter_mut().find(|u| u.user_id == user.user_id) {
        *u = user.clone();
    } else {
        users.push(user.clone());
    }
    save_users(&users)
}

/// Applies `f` to the user document and writes it back.
///
/// Returns `Ok(false)` if no such user exists.
pub fn update_user<F: FnOnce(&mut User)>(user_id: &str, f: F) -> std::io::Result<bool> {
    let mut users = load_users();
    match users.iter_mut().find(|u| u.user_id == user_id) {
        Some(u) => f(u),
        None => return Ok(false),
    }
    save_users(&users)?;
    Ok(true)
}

/// The single writer path for settings.
pub fn update_settings(user_id: &str, settings: Settings) -> std::io::Result<bool> {
    update_user(user_id, |u| u.settings = settings)
}

/// Adds a category name to the user's set (union: no duplicates).
pub fn add_category(user_id: &str, name: &str) -> std::io::Result<bool> {
    update_user(user_id, |u| {
        if !u.categories.iter().any(|c| c == name) {
            u.categories.push(name.to_string());
        }
    })
}

/// Removes a category name from the user's set.
///
/// Tasks keep whatever category string they carry; a removed category simply
/// stops being offered as a filter, matching the original behavior.
pub fn remove_category(user_id: &str, name: &str) -> std::io::Result<bool> {
    update_user(user_id, |u| u.categories.retain(|c| c != name))
}

/// Deletes the tasks and users database files.
pub fn delete_database() -> std::io::Result<()> {
    let t_path = db_path();
    if t_path.exists() {
        fs::remove_file(t_path)?;
    }
    let u_path = users_path();
    if u_path.exists() {
        fs::remove_file(u_path)?;
    }
    Ok(())
}
