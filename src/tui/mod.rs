pub mod app;
pub mod ui;

use crate::auth;
use app::{App, InputField, InputMode, ViewMode};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::time::{Duration, Instant};
use std::{error::Error, io};
use ui::ui;

/// One countdown decrement per second while a session runs.
const TICK_RATE: Duration = Duration::from_secs(1);

/// Opens the interactive dashboard on the task list.
pub fn run_tui() -> Result<(), Box<dyn Error>> {
    run(None)
}

/// Opens the dashboard directly on the focus-session screen for a task.
pub fn run_session(task_id: u64) -> Result<(), Box<dyn Error>> {
    run(Some(task_id))
}

fn run(session_task: Option<u64>) -> Result<(), Box<dyn Error>> {
    let user_id = auth::require_user()?;

    // Create app state before touching the terminal: a failure here must
    // not leave the caller's terminal in raw mode on the alternate screen.
    let mut app = App::new(&user_id)?;
    if let Some(id) = session_task {
        app.start_session(id);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{:?}", err)
    }

    Ok(())
}

/// The main event loop doubles as the tick source: while a session is
/// running it polls with a one-second deadline and decrements the countdown
/// on each elapsed interval. Returning from this function drops the app and
/// any session with it, so no tick can outlive the screen.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|f| ui(f, app))?;

        let timeout = TICK_RATE.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                let was_running = app.session_running();
                if handle_key(app, key.code) {
                    return Ok(());
                }
                // entering Running restarts the interval from now
                if !was_running && app.session_running() {
                    last_tick = Instant::now();
                }
            }
        }
        if last_tick.elapsed() >= TICK_RATE {
            if app.session_running() {
                app.tick_session();
            }
            last_tick = Instant::now();
        }
    }
}

/// Returns true when the app should quit.
fn handle_key(app: &mut App, code: KeyCode) -> bool {
    match app.view_mode {
        ViewMode::Session => match code {
            KeyCode::Char('q') => {
                // quitting mid-session is a cancel: no write-back
                app.cancel_session();
                return true;
            }
            KeyCode::Char(' ') | KeyCode::Char('p') => app.toggle_session_pause(),
            KeyCode::Char('r') => app.reset_session(),
            KeyCode::Esc | KeyCode::Char('c') => app.cancel_session(),
            KeyCode::Enter => app.complete_session(),
            _ => {}
        },
        ViewMode::Tasks => match app.input_mode {
            InputMode::Normal => match code {
                KeyCode::Char('q') => return true,
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => app.next_category(),
                KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => app.previous_category(),
                KeyCode::Char(' ') => app.complete_selected(),
                KeyCode::Char('i') => app.toggle_info(),
                KeyCode::Esc => app.show_info = false,
                KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(),
                KeyCode::Char('a') => app.start_add(),
                KeyCode::Char('n') => app.start_edit(InputField::Title),
                KeyCode::Char('e') => app.start_edit(InputField::Description),
                KeyCode::Char('g') => app.start_edit(InputField::Category),
                KeyCode::Char('t') => app.start_edit(InputField::Due),
                KeyCode::Char('o') => app.start_edit(InputField::Sessions),
                KeyCode::Char('c') => app.start_new_category(),
                KeyCode::Char('r') => app.start_rename_category(),
                KeyCode::Char('x') => app.delete_selected_category(),
                KeyCode::Char('f') => app.start_focus_edit(),
                KeyCode::Char('T') => app.toggle_theme(),
                KeyCode::Char('s') | KeyCode::Enter => app.start_selected_session(),
                _ => {}
            },
            InputMode::Editing | InputMode::Adding => match code {
                KeyCode::Enter => app.handle_input(),
                KeyCode::Esc => {
                    app.input_mode = InputMode::Normal;
                    app.input_buffer.clear();
                }
                KeyCode::Char(c) => {
                    app.input_buffer.push(c);
                }
                KeyCode::Backspace => {
                    app.input_buffer.pop();
                }
                _ => {}
            },
        },
    }
    false
}
