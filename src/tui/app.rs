use crate::commands::{cmd_add, cmd_category_add, cmd_category_remove, cmd_category_rename, cmd_complete, cmd_edit, cmd_reopen};
use crate::filter::{self, filter_tasks};
use crate::models::{Settings, Task, User};
use crate::session::{FocusSession, Tick};
use crate::store;
use chrono::Local;
use ratatui::widgets::TableState;

#[derive(PartialEq)]
pub enum InputMode {
    Normal,
    Editing,
    Adding,
}

#[derive(PartialEq)]
pub enum ViewMode {
    Tasks,
    Session,
}

pub enum InputField {
    None,
    Title,
    Description,
    Category,
    Due,
    Sessions,
    NewCategory,
    RenameCategory,
    FocusDuration,
}

pub struct App {
    pub user: User,
    /// The full task set for the user, refreshed after every store write.
    pub tasks: Vec<Task>,
    /// The filtered view derived from `tasks` and the selected category.
    pub visible: Vec<Task>,
    /// Built-in buckets followed by the user's categories.
    pub categories: Vec<String>,
    pub selected_category: usize,
    pub state: TableState,
    pub view_mode: ViewMode,
    pub input_mode: InputMode,
    pub input_field: InputField,
    pub input_buffer: String,
    pub target_id: Option<u64>,
    pub rename_target: Option<String>,
    pub add_state: AddState,
    /// Whether the task-info popup is open over the task list.
    pub show_info: bool,
    /// The active countdown; exists only while the session screen is shown.
    pub session: Option<FocusSession>,
    /// Snapshot of the task the session runs against; the completion write
    /// uses its last-known counter, not a re-fetch.
    pub session_task: Option<Task>,
}

/// State for the multi-step "Add Task" wizard.
#[derive(Default)]
pub struct AddState {
    pub title: String,
    pub description: String,
    pub category: String,
    pub due: String,
    pub step: usize, // 0: Title, 1: Description, 2: Category, 3: Due, 4: Sessions
}

impl App {
    /// Creates a new App for the signed-in user and loads initial data.
    pub fn new(user_id: &str) -> std::io::Result<App> {
        let user = store::get_user(user_id).ok_or_else(|| {
            std::io::Error::other("user document not found; sign up first")
        })?;
        let mut app = App {
            user,
            tasks: Vec::new(),
            visible: Vec::new(),
            categories: Vec::new(),
            selected_category: 0,
            state: TableState::default(),
            view_mode: ViewMode::Tasks,
            input_mode: InputMode::Normal,
            input_field: InputField::None,
            input_buffer: String::new(),
            target_id: None,
            rename_target: None,
            add_state: AddState::default(),
            show_info: false,
            session: None,
            session_task: None,
        };
        app.reload();
        Ok(app)
    }

    /// Name of the currently selected category.
    pub fn category_name(&self) -> &str {
        self.categories
            .get(self.selected_category)
            .map(String::as_str)
            .unwrap_or(filter::INBOX)
    }

    /// Reloads the user document and tasks, then recomputes the filtered
    /// view. Called after every store round-trip and category change.
    pub fn reload(&mut self) {
        if let Some(user) = store::get_user(&self.user.user_id) {
            self.user = user;
        }
        self.categories = filter::BUILTIN_CATEGORIES
            .iter()
            .map(|s| s.to_string())
            .chain(self.user.categories.iter().cloned())
            .collect();
        if self.selected_category >= self.categories.len() {
            self.selected_category = 0;
        }

        self.tasks = store::list_tasks(&self.user.user_id);
        let today = Local::now().date_naive();
        self.visible = filter_tasks(&self.tasks, self.category_name(), today);

        if self.visible.is_empty() {
            self.state.select(None);
        } else if let Some(i) = self.state.selected() {
            if i >= self.visible.len() {
                self.state.select(Some(self.visible.len() - 1));
            }
        } else {
            self.state.select(Some(0));
        }
    }

    /// Selects the next task in the list.
    pub fn next(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i >= self.visible.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    /// Selects the previous task in the list.
    pub fn previous(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    self.visible.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    /// Cycles the category sidebar forward.
    pub fn next_category(&mut self) {
        if self.categories.is_empty() {
            return;
        }
        self.selected_category = (self.selected_category + 1) % self.categories.len();
        self.state.select(None);
        self.reload();
    }

    /// Cycles the category sidebar backward.
    pub fn previous_category(&mut self) {
        if self.categories.is_empty() {
            return;
        }
        self.selected_category = if self.selected_category == 0 {
            self.categories.len() - 1
        } else {
            self.selected_category - 1
        };
        self.state.select(None);
        self.reload();
    }

    /// The task under the cursor in the filtered view, if any.
    pub fn selected_task(&self) -> Option<&Task> {
        self.state.selected().and_then(|i| self.visible.get(i))
    }

    /// Toggles the detail popup for the selected task.
    pub fn toggle_info(&mut self) {
        if self.show_info {
            self.show_info = false;
        } else if self.selected_task().is_some() {
            self.show_info = true;
        }
    }

    /// Toggles the completion flag of the selected task.
    pub fn complete_selected(&mut self) {
        if let Some(t) = self.selected_task() {
            let (id, done) = (t.id, t.completed);
            if done {
                cmd_reopen(id, true);
            } else {
                cmd_complete(id, true);
            }
            self.reload();
        }
    }

    /// Deletes the currently selected task.
    pub fn delete_selected(&mut self) {
        if let Some(t) = self.selected_task() {
            let id = t.id;
            if let Err(e) = store::delete_task(id) {
                log::warn!("failed to delete task {}: {}", id, e);
            }
            self.reload();
        }
    }

    /// Initiates the "Add Task" wizard.
    pub fn start_add(&mut self) {
        self.input_mode = InputMode::Adding;
        self.add_state = AddState::default();
        self.input_buffer.clear();
    }

    /// Initiates editing of a specific field for the selected task.
    pub fn start_edit(&mut self, field: InputField) {
        if let Some(t) = self.selected_task() {
            let id = t.id;
            // Pre-fill buffer for editing
            let buffer = match field {
                InputField::Title => t.title.clone(),
                InputField::Description => t.description.clone(),
                InputField::Category => t.category.clone(),
                InputField::Due => t.due_date.clone(),
                InputField::Sessions => t.focus_sessions.to_string(),
                _ => String::new(),
            };
            self.target_id = Some(id);
            self.input_buffer = buffer;
            self.input_mode = InputMode::Editing;
            self.input_field = field;
        }
    }

    /// Opens the "new category" prompt.
    pub fn start_new_category(&mut self) {
        self.input_mode = InputMode::Editing;
        self.input_field = InputField::NewCategory;
        self.input_buffer.clear();
    }

    /// Opens the rename prompt for the selected sidebar category.
    ///
    /// Built-in buckets carry no rename affordance.
    pub fn start_rename_category(&mut self) {
        let name = self.category_name().to_string();
        if filter::is_builtin(&name) {
            return;
        }
        self.rename_target = Some(name.clone());
        self.input_mode = InputMode::Editing;
        self.input_field = InputField::RenameCategory;
        self.input_buffer = name;
    }

    /// Deletes the selected sidebar category (user categories only).
    pub fn delete_selected_category(&mut self) {
        let name = self.category_name().to_string();
        if filter::is_builtin(&name) {
            return;
        }
        cmd_category_remove(name, true);
        self.selected_category = 0;
        self.reload();
    }

    /// Opens the focus-duration prompt.
    pub fn start_focus_edit(&mut self) {
        self.input_mode = InputMode::Editing;
        self.input_field = InputField::FocusDuration;
        self.input_buffer = self.user.settings.focus_duration.to_string();
    }

    /// Flips the theme between light and dark through the settings writer.
    pub fn toggle_theme(&mut self) {
        let theme = if self.user.settings.theme == "dark" {
            "light"
        } else {
            "dark"
        };
        let settings = Settings {
            focus_duration: self.user.settings.focus_duration,
            theme: theme.to_string(),
        };
        if let Err(e) = store::update_settings(&self.user.user_id, settings) {
            log::warn!("failed to update settings: {}", e);
        }
        self.reload();
    }

    /// Handles a submitted input line based on the current mode.
    pub fn handle_input(&mut self) {
        match self.input_mode {
            InputMode::Adding => self.handle_adding_input(),
            InputMode::Editing => self.handle_editing_input(),
            _ => {}
        }
    }

    fn handle_adding_input(&mut self) {
        match self.add_state.step {
            0 => {
                // Title
                if !self.input_buffer.is_empty() {
                    self.add_state.title = self.input_buffer.clone();
                    self.add_state.step += 1;
                    self.input_buffer.clear();
                }
            }
            1 => {
                // Description (optional)
                self.add_state.description = self.input_buffer.clone();
                self.add_state.step += 1;
                self.input_buffer.clear();
            }
            2 => {
                // Category (optional)
                self.add_state.category = self.input_buffer.clone();
                self.add_state.step += 1;
                self.input_buffer.clear();
            }
            3 => {
                // Due date; stay on this step until it parses
                if chrono::NaiveDate::parse_from_str(&self.input_buffer, "%Y-%m-%d").is_ok() {
                    self.add_state.due = self.input_buffer.clone();
                    self.add_state.step += 1;
                    self.input_buffer.clear();
                }
            }
            4 => {
                // Session target; empty or unparseable falls back to 1
                let sessions = self.input_buffer.parse::<u32>().unwrap_or(1);
                cmd_add(
                    self.add_state.title.clone(),
                    Some(self.add_state.description.clone()),
                    Some(self.add_state.category.clone()),
                    self.add_state.due.clone(),
                    sessions,
                    true,
                );
                self.input_mode = InputMode::Normal;
                self.reload();
            }
            _ => {}
        }
    }

    fn handle_editing_input(&mut self) {
        match self.input_field {
            InputField::Title => {
                if let Some(id) = self.target_id {
                    cmd_edit(id, Some(self.input_buffer.clone()), None, None, None, None, true);
                }
            }
            InputField::Description => {
                if let Some(id) = self.target_id {
                    cmd_edit(id, None, Some(self.input_buffer.clone()), None, None, None, true);
                }
            }
            InputField::Category => {
                if let Some(id) = self.target_id {
                    cmd_edit(id, None, None, Some(self.input_buffer.clone()), None, None, true);
                }
            }
            InputField::Due => {
                if let Some(id) = self.target_id {
                    cmd_edit(id, None, None, None, Some(self.input_buffer.clone()), None, true);
                }
            }
            InputField::Sessions => {
                if let (Some(id), Ok(n)) = (self.target_id, self.input_buffer.parse::<u32>()) {
                    cmd_edit(id, None, None, None, None, Some(n), true);
                }
            }
            InputField::NewCategory => {
                if !self.input_buffer.is_empty() {
                    cmd_category_add(self.input_buffer.clone(), true);
                }
            }
            InputField::RenameCategory => {
                if let Some(old) = self.rename_target.take() {
                    if !self.input_buffer.is_empty() && self.input_buffer != old {
                        cmd_category_rename(old, self.input_buffer.clone(), true);
                    }
                }
            }
            InputField::FocusDuration => {
                if let Ok(minutes) = self.input_buffer.parse::<u32>() {
                    if minutes >= 1 {
                        let settings = Settings {
                            focus_duration: minutes,
                            theme: self.user.settings.theme.clone(),
                        };
                        if let Err(e) = store::update_settings(&self.user.user_id, settings) {
                            log::warn!("failed to update settings: {}", e);
                        }
                    }
                }
            }
            _ => {}
        }
        self.input_mode = InputMode::Normal;
        self.input_field = InputField::None;
        self.input_buffer.clear();
        self.reload();
    }

    /// Enters the session screen for the selected task.
    pub fn start_selected_session(&mut self) {
        if let Some(t) = self.selected_task() {
            let id = t.id;
            self.start_session(id);
        }
    }

    /// Fetches the task snapshot and focus duration, then starts the
    /// countdown in `Running`.
    pub fn start_session(&mut self, task_id: u64) {
        let Some(task) = store::load_task(task_id) else {
            return;
        };
        let minutes = self.current_focus_duration();
        self.session = Some(FocusSession::start(task_id, minutes));
        self.session_task = Some(task);
        self.view_mode = ViewMode::Session;
    }

    /// Re-reads the focus duration setting from the store.
    fn current_focus_duration(&self) -> u32 {
        store::get_user(&self.user.user_id)
            .map(|u| u.settings.focus_duration)
            .unwrap_or(self.user.settings.focus_duration)
    }

    pub fn session_running(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.is_running())
    }

    /// One-second tick from the event loop; performs the completion
    /// write-back when the countdown reaches zero.
    pub fn tick_session(&mut self) {
        if let Some(s) = &mut self.session {
            if s.tick() == Tick::Finished {
                self.finish_session();
            }
        }
    }

    /// Pause/resume toggle on the session screen.
    pub fn toggle_session_pause(&mut self) {
        if let Some(s) = &mut self.session {
            if s.is_running() {
                s.pause();
            } else if s.is_paused() {
                s.resume();
            }
        }
    }

    /// Resets the countdown to the current focus duration and pauses.
    pub fn reset_session(&mut self) {
        let minutes = self.current_focus_duration();
        if let Some(s) = &mut self.session {
            s.reset(minutes);
        }
    }

    /// Abandons the session and returns to the task list. No write-back.
    pub fn cancel_session(&mut self) {
        if let Some(s) = &mut self.session {
            s.cancel();
        }
        self.leave_session();
    }

    /// Explicit "complete session" action.
    pub fn complete_session(&mut self) {
        if let Some(s) = &mut self.session {
            if !s.is_terminal() {
                s.complete();
                self.finish_session();
            }
        }
    }

    /// Single write increasing the task's completed counter by exactly one,
    /// based on the snapshot taken when the session started.
    fn finish_session(&mut self) {
        if let Some(task) = &self.session_task {
            // failed write-backs are logged and swallowed; no retry
            if let Err(e) = store::record_session_completion(task.id, task.completed_focus_sessions)
            {
                log::warn!("failed to record session for task {}: {}", task.id, e);
            }
        }
        self.leave_session();
    }

    /// Tears down all session state; nothing can tick after this.
    fn leave_session(&mut self) {
        self.session = None;
        self.session_task = None;
        self.view_mode = ViewMode::Tasks;
        self.reload();
    }
}
