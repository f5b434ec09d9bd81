//! # focusdo
//!
//! A terminal task manager with built-in focus sessions. focusdo combines a scriptable CLI with a rich TUI dashboard for organizing tasks into categories and running pomodoro-style countdowns against them.
//!
//! ## Features
//!
//! *   **Category Filtering**: Built-in date buckets (Inbox, Today, Tomorrow, This Week, Completed) plus user-defined categories.
//! *   **Focus Sessions**: A one-second countdown per task with pause, resume, reset, cancel and completion tracking.
//! *   **Dual Interface**:
//!     *   **CLI**: Scriptable and quick for single commands.
//!     *   **TUI**: Interactive dashboard with a category sidebar and a full-screen timer.
//! *   **Accounts**: Local sign-up/sign-in; every task and category belongs to the signed-in user.
//! *   **Data Persistence**: JSON documents in standard XDG data directories.
//!
//! ## Installation
//!
//! ```bash
//! cargo install --path .
//! ```
//!
//! ## Usage
//!
//! ### Accounts
//!
//! ```bash
//! focusdo signup --email me@example.com --password secret --name "Me"
//! focusdo login --email me@example.com --password secret
//! focusdo whoami
//! focusdo logout
//! ```
//!
//! ### Interactive Mode (TUI)
//!
//! Run the command without arguments to launch the interactive UI:
//!
//! ```bash
//! focusdo
//! # or explicitly
//! focusdo ui
//! # or jump straight into a focus session
//! focusdo session 3
//! ```
//!
//! #### TUI Key Bindings
//!
//! **Task View**
//! *   `q`: Quit
//! *   `Tab`/`BackTab`: Cycle the selected category
//! *   `a`: Add new task (wizard)
//! *   `Enter`/`s`: Start a focus session on the selected task
//! *   `i`: Show full task details (including the description)
//! *   `Space`: Toggle Done on the selected task
//! *   `d`: Delete selected task
//! *   `n`/`e`/`g`/`t`/`o`: Edit title / description / category / due date / session target
//! *   `c`: New category, `r`: Rename category, `x`: Delete category
//! *   `f`: Edit focus duration, `T`: Toggle theme
//!
//! **Session View**
//! *   `Space`/`p`: Pause or resume
//! *   `r`: Reset (re-reads the configured duration, stays paused)
//! *   `Esc`/`c`: Cancel (no session is recorded)
//! *   `Enter`: Complete the session now
//!
//! ### Command Line Interface (CLI)
//!
//! ```bash
//! # Add a task
//! focusdo add "Write report" --category Work --due 2026-09-01 --sessions 3
//!
//! # List tasks, optionally filtered
//! focusdo list
//! focusdo list --category Today
//! focusdo list --category Work
//!
//! # Full details of one task
//! focusdo show 3
//!
//! # Complete / reopen / remove
//! focusdo complete 3
//! focusdo reopen 3
//! focusdo remove 3
//!
//! # Categories
//! focusdo category add Work
//! focusdo category rename Work Office
//! focusdo category remove Office
//!
//! # Settings
//! focusdo settings
//! focusdo settings --focus-duration 30 --theme dark
//! ```
//!
//! ## Data Storage
//!
//! Documents are saved in your local data directory:
//! *   Linux: `~/.local/share/focusdo/tasks.json`
//! *   macOS: `~/Library/Application Support/focusdo/tasks.json`
//! *   Windows: `%APPDATA%\focusdo\tasks.json`
//!
//! User documents, accounts and the session file live beside it. You can
//! override the directory by setting the `FOCUSDO_DB` environment variable
//! to the tasks file path.
//!
//! ## Focus Sessions
//!
//! A session counts down from the configured focus duration (default 25
//! minutes). When it reaches zero, or when you complete it explicitly, the
//! task's completed-session counter increases by one. Cancelled sessions
//! record nothing.

pub mod auth;
pub mod commands;
pub mod filter;
pub mod models;
pub mod session;
pub mod store;
pub mod tui;
