use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Represents a single task in the task manager.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Task {
    /// Unique identifier for the task.
    pub id: u64,
    /// Identifier of the user who owns this task.
    pub user_id: String,
    /// Short title of the task.
    pub title: String,
    /// Longer free-form description.
    #[serde(default)]
    pub description: String,
    /// Name of a user-defined category, or empty when unassigned.
    #[serde(default)]
    pub category: String,
    /// Due date as entered, expected in YYYY-MM-DD form. Kept as a raw
    /// string so a malformed value degrades to "never matches a date
    /// bucket" instead of failing the whole document load.
    pub due_date: String,
    /// Target number of focus sessions for this task (>= 1).
    pub focus_sessions: u32,
    /// Number of focus sessions completed so far. May exceed the target.
    #[serde(default)]
    pub completed_focus_sessions: u32,
    /// Whether the task has been completed.
    #[serde(default)]
    pub completed: bool,
    /// Timestamp of completion (RFC 3339). Present iff `completed` is true;
    /// the invariant is enforced at the write site.
    #[serde(default)]
    pub completed_on: Option<String>,
    /// Timestamp when the task was created (RFC 3339).
    pub created_at: String,
}

impl Task {
    /// Parses the due date at day granularity, or `None` if malformed.
    pub fn due_day(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.due_date, "%Y-%m-%d").ok()
    }
}

/// Per-user preferences. Threaded explicitly through the screens that need
/// them; the single writer path is `store::update_settings`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Settings {
    /// Focus session length in minutes.
    #[serde(default = "default_focus_duration")]
    pub focus_duration: u32,
    /// Either "light" or "dark".
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_focus_duration() -> u32 {
    25
}

fn default_theme() -> String {
    "light".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            focus_duration: default_focus_duration(),
            theme: default_theme(),
        }
    }
}

/// A user document: profile, category set and settings.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct User {
    /// Opaque unique identifier, also the key of the document.
    pub user_id: String,
    /// Display name.
    pub name: String,
    /// Email address used to sign in.
    pub email: String,
    /// User-defined category names with set semantics (union/remove).
    #[serde(default)]
    pub categories: Vec<String>,
    /// Per-user settings.
    #[serde(default)]
    pub settings: Settings,
}

/// A credential record held by the auth collaborator.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Account {
    pub user_id: String,
    pub email: String,
    pub name: String,
    /// Hex-encoded SHA-256 of "email:password".
    pub password_hash: String,
}
