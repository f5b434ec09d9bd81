use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use focusdo::commands::*;
use focusdo::store;
use focusdo::tui::{run_session, run_tui};
use std::io;

#[derive(Parser)]
#[command(name = "focusdo")]
#[command(about = "Terminal task manager with focus sessions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and sign in
    Signup {
        /// Email address
        #[arg(short, long)]
        email: String,
        /// Password
        #[arg(short, long)]
        password: String,
        /// Display name
        #[arg(short, long)]
        name: String,
    },
    /// Sign in with an existing account
    Login {
        /// Email address
        #[arg(short, long)]
        email: String,
        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Add a new task
    Add {
        /// Task title (quoted if it has spaces)
        title: String,
        /// Longer description
        #[arg(short, long)]
        description: Option<String>,
        /// Category name
        #[arg(short, long)]
        category: Option<String>,
        /// Due date in YYYY-MM-DD
        #[arg(long)]
        due: String,
        /// Target number of focus sessions
        #[arg(short, long, default_value_t = 1)]
        sessions: u32,
    },
    /// List tasks, optionally filtered by category
    List {
        /// Built-in bucket (Inbox, Today, Tomorrow, "This Week", Completed)
        /// or a user category name
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Show the full details of a task
    Show { id: u64 },
    /// Mark a task as complete
    Complete { id: u64 },
    /// Reopen a completed task
    Reopen { id: u64 },
    /// Remove a task
    Remove { id: u64 },
    /// Edit a task
    Edit {
        id: u64,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New due date
        #[arg(long)]
        due: Option<String>,
        /// New focus session target
        #[arg(short, long)]
        sessions: Option<u32>,
    },
    /// Run a focus session against a task
    Session { id: u64 },
    /// Manage categories
    Category {
        #[command(subcommand)]
        command: CategoryCommands,
    },
    /// Show or update settings
    Settings {
        /// Focus duration in minutes
        #[arg(short, long)]
        focus_duration: Option<u32>,
        /// Theme ("light" or "dark")
        #[arg(short, long)]
        theme: Option<String>,
    },
    /// Reset the database (delete all tasks and users)
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        shell: String,
    },
    /// Open interactive TUI
    Ui,
}

#[derive(Subcommand)]
enum CategoryCommands {
    /// Add a new category
    Add {
        /// Category name
        name: String,
    },
    /// Rename a category (add new, then remove old; two writes)
    Rename {
        /// Current name
        old: String,
        /// New name
        new: String,
    },
    /// Remove a category
    Remove {
        /// Category name
        name: String,
    },
    /// List built-in buckets and your categories
    List,
}

/// Logging is best-effort and goes to a file: the TUI owns the terminal.
/// The returned handle must stay alive for the duration of the program.
fn init_logging() -> Option<flexi_logger::LoggerHandle> {
    let mut dir = store::db_path();
    dir.pop();
    flexi_logger::Logger::try_with_env_or_str("warn")
        .ok()?
        .log_to_file(
            flexi_logger::FileSpec::default()
                .directory(dir)
                .basename("focusdo"),
        )
        .start()
        .ok()
}

fn main() {
    let _logger = init_logging();
    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Signup { email, password, name }) => cmd_signup(email, password, name),
        Some(Commands::Login { email, password }) => cmd_login(email, password),
        Some(Commands::Logout) => cmd_logout(),
        Some(Commands::Whoami) => cmd_whoami(),
        Some(Commands::Add { title, description, category, due, sessions }) => {
            cmd_add(title, description, category, due, sessions, false)
        }
        Some(Commands::List { category }) => cmd_list(category),
        Some(Commands::Show { id }) => cmd_show(id),
        Some(Commands::Complete { id }) => cmd_complete(id, false),
        Some(Commands::Reopen { id }) => cmd_reopen(id, false),
        Some(Commands::Remove { id }) => cmd_remove(id, false),
        Some(Commands::Edit { id, title, description, category, due, sessions }) => {
            cmd_edit(id, title, description, category, due, sessions, false)
        }
        Some(Commands::Session { id }) => {
            if let Err(e) = run_session(id) {
                eprintln!("Error running session: {}", e);
            }
        }
        Some(Commands::Category { command }) => match command {
            CategoryCommands::Add { name } => cmd_category_add(name, false),
            CategoryCommands::Rename { old, new } => cmd_category_rename(old, new, false),
            CategoryCommands::Remove { name } => cmd_category_remove(name, false),
            CategoryCommands::List => cmd_category_list(),
        },
        Some(Commands::Settings { focus_duration, theme }) => cmd_settings(focus_duration, theme),
        Some(Commands::Reset { force }) => cmd_reset(force),
        Some(Commands::Completions { shell }) => {
            let shell_enum = match shell.as_str() {
                "bash" => Shell::Bash,
                "zsh" => Shell::Zsh,
                "fish" => Shell::Fish,
                "powershell" => Shell::PowerShell,
                "elvish" => Shell::Elvish,
                _ => {
                    eprintln!("Unsupported shell: {}", shell);
                    return;
                }
            };
            let mut cmd = Cli::command();
            generate(shell_enum, &mut cmd, "focusdo", &mut io::stdout());
        }
        Some(Commands::Ui) | None => {
            if let Err(e) = run_tui() {
                eprintln!("Error running TUI: {}", e);
            }
        }
    }
}
