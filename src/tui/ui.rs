use super::app::{App, InputField, InputMode, ViewMode};
use crate::commands::task_info_lines;
use crate::filter;
use crate::session::format_time;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Clear, List, ListItem, Paragraph, Row, Table},
    Frame,
};

pub fn ui(f: &mut Frame, app: &mut App) {
    match app.view_mode {
        ViewMode::Tasks => tasks_view(f, app),
        ViewMode::Session => session_view(f, app),
    }
}

fn accent(app: &App) -> Color {
    if app.user.settings.theme == "dark" {
        Color::Cyan
    } else {
        Color::Blue
    }
}

fn tasks_view(f: &mut Frame, app: &mut App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(22), // Category sidebar
            Constraint::Min(0),     // Task table
        ])
        .split(f.area());

    let accent = accent(app);

    let items: Vec<ListItem> = app
        .categories
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let mut style = Style::default();
            if i == app.selected_category {
                style = style.fg(accent).add_modifier(Modifier::BOLD);
            } else if filter::is_builtin(c) {
                style = style.fg(Color::Gray);
            }
            ListItem::new(Line::from(c.clone())).style(style)
        })
        .collect();

    let sidebar = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Categories"));
    f.render_widget(sidebar, columns[0]);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Table
            Constraint::Length(3), // Help
        ])
        .split(columns[1]);

    let rows: Vec<Row> = app
        .visible
        .iter()
        .map(|t| {
            let style = if t.completed {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(t.id.to_string()),
                Cell::from(t.title.clone()),
                Cell::from(t.category.clone()),
                Cell::from(t.due_date.clone()),
                Cell::from(format!("{}/{}", t.completed_focus_sessions, t.focus_sessions)),
                Cell::from(if t.completed { "Done" } else { "Pending" }),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Min(20),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(8),
        Constraint::Length(8),
    ];

    let title = format!("focusdo - {} - {}", app.user.name, app.category_name());
    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["ID", "Title", "Category", "Due", "Sessions", "Status"])
                .style(Style::default().fg(accent).add_modifier(Modifier::BOLD))
                .bottom_margin(1),
        )
        .block(Block::default().borders(Borders::ALL).title(title))
        .row_highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray))
        .highlight_symbol(">> ");

    f.render_stateful_widget(table, chunks[0], &mut app.state);

    let help_text = match app.input_mode {
        InputMode::Normal => {
            "q: Quit | Tab: Category | a: Add | Enter/s: Focus | i: Info | Space: Done | d: Del | n/e/g/t/o: Edit | c: New Cat | r: Rename Cat | x: Del Cat | f: Duration | T: Theme"
        }
        InputMode::Editing => "Enter: Save | Esc: Cancel",
        InputMode::Adding => "Enter: Next Step | Esc: Cancel",
    };

    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[1]);

    // Render Input Box if needed
    if app.input_mode == InputMode::Editing || app.input_mode == InputMode::Adding {
        let area = centered_rect(60, 3, f.area());
        f.render_widget(Clear, area);

        let title = match app.input_mode {
            InputMode::Adding => match app.add_state.step {
                0 => "Add Task: Enter Title",
                1 => "Add Task: Enter Description (Optional)",
                2 => "Add Task: Enter Category (Optional)",
                3 => "Add Task: Enter Due Date (YYYY-MM-DD)",
                4 => "Add Task: Enter Focus Session Target",
                _ => "Add Task",
            },
            InputMode::Editing => match app.input_field {
                InputField::Title => "Edit Title",
                InputField::Description => "Edit Description",
                InputField::Category => "Edit Category",
                InputField::Due => "Edit Due Date (YYYY-MM-DD)",
                InputField::Sessions => "Edit Focus Session Target",
                InputField::NewCategory => "New Category Name",
                InputField::RenameCategory => "Rename Category",
                InputField::FocusDuration => "Focus Duration (minutes)",
                _ => "Edit",
            },
            _ => "",
        };

        let input = Paragraph::new(app.input_buffer.as_str())
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().borders(Borders::ALL).title(title));

        f.render_widget(input, area);
    }

    // Render the task-info popup over the table
    if app.show_info && app.input_mode == InputMode::Normal {
        if let Some(t) = app.selected_task() {
            let lines: Vec<Line> = task_info_lines(t).into_iter().map(Line::from).collect();
            let area = centered_rect(60, lines.len() as u16 + 2, f.area());
            f.render_widget(Clear, area);
            let info = Paragraph::new(lines)
                .block(Block::default().borders(Borders::ALL).title("Task Info"));
            f.render_widget(info, area);
        }
    }
}

fn session_view(f: &mut Frame, app: &mut App) {
    let accent = accent(app);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Task title
            Constraint::Min(5),    // Countdown
            Constraint::Length(3), // Progress
            Constraint::Length(3), // Help
        ])
        .split(f.area());

    let (title, progress) = match &app.session_task {
        Some(t) => (
            t.title.clone(),
            format!(
                "Focus Sessions: {}/{}",
                t.completed_focus_sessions, t.focus_sessions
            ),
        ),
        None => (String::new(), String::new()),
    };

    let header = Paragraph::new(title)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Focus Session"));
    f.render_widget(header, chunks[0]);

    let (time, paused) = match &app.session {
        Some(s) => (format_time(s.time_left()), s.is_paused()),
        None => (format_time(0), false),
    };
    let clock_style = if paused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(accent).add_modifier(Modifier::BOLD)
    };
    let state_line = if paused { "Paused" } else { "Running" };
    let clock = Paragraph::new(vec![
        Line::from(""),
        Line::styled(time, clock_style),
        Line::from(state_line),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(clock, chunks[1]);

    let progress = Paragraph::new(progress)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(progress, chunks[2]);

    let help = Paragraph::new("Space/p: Pause-Resume | r: Reset | Esc/c: Cancel | Enter: Complete Session | q: Quit (discards session)")
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[3]);
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((r.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((r.height.saturating_sub(height)) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
