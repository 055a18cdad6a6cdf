use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use litelens::ast::Dialect;
use litelens::config::AppConfig;
use litelens::db::SqliteDatabase;
use litelens::ui::{self, App};

/// A terminal browser for SQLite databases
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// SQLite file to open (defaults to the configured database)
    database: Option<PathBuf>,

    /// Table to show on startup
    #[arg(long)]
    table: Option<String>,

    /// SQL dialect used to render generated queries
    #[arg(long, value_enum)]
    dialect: Option<Dialect>,

    /// Config file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Parse CLI args (before entering raw mode so --help / errors print normally)
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    if let Some(database) = cli.database {
        config.database = database;
    }
    if let Some(dialect) = cli.dialect {
        config.dialect = dialect;
    }

    init_logging(&config)?;

    if !config.database.is_file() {
        bail!("database file not found: {}", config.database.display());
    }
    tracing::info!(
        path = %config.database.display(),
        dialect = ?config.dialect,
        "opening database"
    );
    let database = SqliteDatabase::with_resolver(&config.database, config.dialect.resolver());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&database, config.database.display().to_string(), &config);
    if let Some(table) = &cli.table {
        app.open_table(table);
    }

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

/// Logs go to a file, never the terminal the UI draws on.
fn init_logging(config: &AppConfig) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_max_level(config.log_level()?)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (ignore release/repeat)
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                // Global quit: Ctrl+Q or Ctrl+D
                if (key.code == KeyCode::Char('q') || key.code == KeyCode::Char('d'))
                    && key.modifiers.contains(KeyModifiers::CONTROL)
                {
                    return Ok(());
                }

                app.handle_input(key)?;
            }
        }
    }
}
