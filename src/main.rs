mod app;
mod domain;
mod format;
mod input;
mod persistence;
mod report;
mod store;
mod ui;

use anyhow::{anyhow, Context, Result};
use app::{now_millis, App};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::{filter_tasks, FilterParams, StateFilter};
use persistence::{decode_tasks_strict, encode_tasks, ensure_stint_dir, init_local_stint, FileStorage};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::time::Duration;
use store::TaskStore;
use tracing_subscriber::EnvFilter;

/// Poll timeout for the event loop, so running clocks keep moving
const TICK_MS: u64 = 250;

#[derive(Parser)]
#[command(name = "stint")]
#[command(about = "A small terminal time tracker for tasks and work sessions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .stint directory in the current directory
    Init,
    /// Print a summary of tracked tasks
    Tasks {
        /// Task state to list: all, active, finished or dropped
        #[arg(short, long, default_value = "all")]
        state: StateFilter,
    },
    /// Export the task snapshot as JSON
    Export {
        /// Output file path. Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Replace all tasks with a previously exported snapshot
    Import {
        /// Snapshot file to import
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    init_tracing()?;
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            let stint_dir = init_local_stint()?;
            println!("Initialized stint directory: {}", stint_dir.display());
            println!();
            println!("Stint will now use this local directory for task storage.");
            println!("Run 'stint' to start tracking.");
            Ok(())
        }
        Some(Commands::Tasks { state }) => run_tasks(state),
        Some(Commands::Export { output }) => run_export(output),
        Some(Commands::Import { file }) => run_import(file),
        None => run_tui(),
    }
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .map_err(|e| anyhow!("invalid RUST_LOG filter: {e}"))?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .try_init();

    Ok(())
}

fn open_store() -> Result<TaskStore> {
    let storage = FileStorage::open_default()?;
    TaskStore::open(Box::new(storage))
}

fn run_tasks(state: StateFilter) -> Result<()> {
    let store = open_store()?;
    let params = FilterParams {
        state,
        ..Default::default()
    };
    let tasks = filter_tasks(store.tasks(), &params);
    print!("{}", report::render_summary(&tasks, now_millis()));
    Ok(())
}

fn run_export(output: Option<PathBuf>) -> Result<()> {
    let store = open_store()?;
    let payload = encode_tasks(store.tasks())?;

    match output {
        Some(path) => {
            std::fs::write(&path, &payload)
                .with_context(|| format!("Failed to write snapshot to {}", path.display()))?;
            println!("Exported {} tasks to {}", store.tasks().len(), path.display());
        }
        None => println!("{}", payload),
    }
    Ok(())
}

fn run_import(file: PathBuf) -> Result<()> {
    let payload = std::fs::read_to_string(&file)
        .with_context(|| format!("Failed to read snapshot from {}", file.display()))?;
    let tasks = decode_tasks_strict(&payload)?;

    let mut store = open_store()?;
    let count = tasks.len();
    store.load_tasks(tasks)?;
    println!("Imported {} tasks", count);
    Ok(())
}

fn run_tui() -> Result<()> {
    // Show which directory we're using before the alternate screen hides it
    let stint_dir = ensure_stint_dir()?;
    eprintln!("Using stint directory: {}", stint_dir.display());

    let store = TaskStore::open(Box::new(FileStorage::new(stint_dir)))?;
    let mut app = App::new(store);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal before surfacing any error from the loop
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    let tick_rate = Duration::from_millis(TICK_MS);

    loop {
        // Render
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout for ticking
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press {
                    let should_quit = input::handle_key(app, key)?;
                    if should_quit {
                        return Ok(());
                    }
                }
            }
        }
    }
}
