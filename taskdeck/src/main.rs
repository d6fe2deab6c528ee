//! `taskdeck` binary: opens the task list in the terminal.
//!
//! ```bash
//! taskdeck                               # tasks under the platform data dir
//! taskdeck --data-dir ./tasks --sort desc
//! TASKDECK_LOG=debug taskdeck --log-file ./taskdeck.log
//! ```

use std::io::{self, Stdout};
use std::path::{Path, PathBuf};

use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use taskdeck::app::App;
use taskdeck::config::{AppConfig, CliArgs};
use taskdeck::store::{FileStore, InMemoryStore, KeyValueStore};
use taskdeck::tasks::TaskListController;
use taskdeck::ui;

type Tui = Terminal<CrosstermBackend<Stdout>>;

fn main() -> io::Result<()> {
    let cli = CliArgs::parse();
    // Defaults would drop the flags that did parse, `--data-dir` included.
    let config = match AppConfig::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("taskdeck: {e}");
            std::process::exit(2);
        }
    };

    // Held until exit so buffered lines reach the file.
    let _flush = start_file_log(&cli.log_level, cli.log_file.clone());
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "taskdeck starting");

    let mut terminal = enter_tui()?;
    let outcome = match config.data_dir.clone() {
        Some(dir) => {
            tracing::info!(dir = %dir.display(), "tasks stored on disk");
            event_loop(&mut terminal, FileStore::new(dir), &config)
        }
        None => {
            tracing::warn!("no data directory, tasks kept in memory for this run");
            event_loop(&mut terminal, InMemoryStore::new(), &config)
        }
    };
    leave_tui(&mut terminal)?;

    if let Err(e) = &outcome {
        tracing::error!(error = %e, "terminal I/O failed");
    }
    tracing::info!("taskdeck stopped");
    outcome
}

/// Routes `tracing` output to a file; the terminal belongs to the TUI.
///
/// Returns `None` (and logs nowhere) if the path has no file name.
fn start_file_log(filter: &str, path: Option<PathBuf>) -> Option<WorkerGuard> {
    let path = path.unwrap_or_else(|| std::env::temp_dir().join("taskdeck.log"));
    let dir = path.parent().map_or_else(|| Path::new("."), |p| p);
    let name = path.file_name()?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .init();
    Some(guard)
}

fn enter_tui() -> io::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn leave_tui(terminal: &mut Tui) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

/// Draws, waits up to the poll timeout for a key, applies it.
///
/// Key handling (and the store write it may trigger) finishes before the
/// next frame is drawn.
fn event_loop<S: KeyValueStore>(terminal: &mut Tui, store: S, config: &AppConfig) -> io::Result<()> {
    let mut controller = TaskListController::load(store);
    controller.set_sort_direction(config.default_sort);
    let mut app = App::new(controller).with_timestamp_format(&config.timestamp_format);

    while !app.should_quit {
        terminal.draw(|frame| ui::draw(frame, &app))?;
        if !event::poll(config.poll_timeout)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key_event(key),
            _ => {}
        }
    }
    Ok(())
}
