mod app;
mod domain;
mod error;
mod input;
mod notifications;
mod persistence;
mod report;
mod session;
mod ticker;
mod ui;

use anyhow::{Context, Result};
use app::AppState;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use notifications::DesktopNotifier;
use persistence::{ensure_data_dir, init_local_data_dir, load_history, log_file, save_history, FileStore};
use ratatui::{backend::CrosstermBackend, Terminal};
use report::StatsHistory;
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use ticker::SystemClock;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "nudge")]
#[command(about = "A pushy terminal Pomodoro timer with task planning, scoring and idea capture", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .nudge directory in the current directory
    Init,
    /// Export or import the daily stats history
    Stats {
        #[command(subcommand)]
        action: StatsAction,
    },
    /// Generate a markdown report of recent days
    Report {
        /// Number of most recent days to include
        #[arg(short, long, default_value_t = 7)]
        days: usize,
        /// Output file path. Defaults to <data dir>/report-YYYY-MM-DD.md
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum StatsAction {
    /// Write the history as JSON (stdout unless -o is given)
    Export {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Replace the stored history with a previously exported file
    Import { file: PathBuf },
}

/// Log to a file in the data directory; the terminal belongs to the UI
fn init_logging(data_dir: &Path) -> Result<()> {
    let path = log_file(data_dir);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_env("NUDGE_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            let data_dir = init_local_data_dir()?;
            println!("Initialized nudge directory: {}", data_dir.display());
            println!();
            println!("Nudge will now keep its data in this local directory.");
            println!("Run 'nudge' to start the timer.");
            Ok(())
        }
        Some(Commands::Stats { action }) => {
            let data_dir = ensure_data_dir()?;
            init_logging(&data_dir)?;
            run_stats(action, FileStore::new(data_dir))
        }
        Some(Commands::Report { days, output }) => {
            let data_dir = ensure_data_dir()?;
            init_logging(&data_dir)?;
            let history = load_history(&FileStore::new(data_dir.clone()));
            let today = chrono::Local::now().date_naive();

            println!("Generating report for the last {} days...", days);
            let report_path = report::generate_report(&history, days, today, &data_dir, output)?;
            println!("Report generated: {}", report_path.display());
            Ok(())
        }
        None => run_tui(),
    }
}

fn run_stats(action: StatsAction, mut store: FileStore) -> Result<()> {
    match action {
        StatsAction::Export { output } => {
            let json = load_history(&store).export_json()?;
            match output {
                Some(path) => {
                    persistence::atomic_write(&path, &json)?;
                    eprintln!("Exported stats to {}", path.display());
                }
                None => println!("{}", json),
            }
            Ok(())
        }
        StatsAction::Import { file } => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let imported = StatsHistory::import_json(&content)?;

            let mut history = load_history(&store);
            history.replace(imported);
            save_history(&mut store, &history)?;
            info!(days = history.len(), file = %file.display(), "Stats history imported");
            println!("Imported {} days from {}", history.len(), file.display());
            Ok(())
        }
    }
}

fn run_tui() -> Result<()> {
    let data_dir = ensure_data_dir()?;
    init_logging(&data_dir)?;
    eprintln!("Using nudge directory: {}", data_dir.display());
    info!(dir = %data_dir.display(), "Starting nudge");

    let mut app = AppState::new(
        Box::new(FileStore::new(data_dir)),
        Box::new(DesktopNotifier),
        Box::new(SystemClock),
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Save on exit
    if let Err(e) = app.try_save() {
        warn!(error = %format!("{:#}", e), "Final save failed");
        eprintln!("Error saving state: {:#}", e);
    }

    if let Err(err) = result {
        eprintln!("Error: {}", err);
    }

    info!("Exiting nudge");
    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let tick_rate = ticker::tick_duration();

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout for ticking
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key) {
                    return Ok(());
                }
            }
        }

        // Countdown, rollover, quote rotation
        app.on_frame();

        // Autosave if needed
        app.save();
    }
}
