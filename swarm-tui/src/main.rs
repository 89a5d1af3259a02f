//! Neural Swarm TUI: the pitch page as a scrollable terminal document.
//!
//! Every content block fades in as it scrolls into view, with the same
//! thresholds and stagger delays as the web page. Projection figures are
//! computed from the page config at startup.

mod app;
mod input;
mod page;
mod theme;
mod ui;

use std::fs::File;
use std::io::{self, stdout};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use swarm_core::reveal::ObservationSupport;
use swarm_core::PageConfig;

use crate::app::AppState;
use crate::ui::CHROME_ROWS;

/// Frame tick when nothing is scheduled (~20 FPS).
const IDLE_TICK: Duration = Duration::from_millis(50);

#[derive(Parser)]
#[command(name = "swarm-tui", about = "Neural Swarm pitch page in the terminal")]
struct Args {
    /// Path to a TOML page config. Defaults to the page's figures.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Show every block immediately instead of revealing on scroll.
    #[arg(long, default_value_t = false)]
    no_reveal: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let app_dir = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("neural-swarm");
    init_logging(&app_dir);

    let config =
        PageConfig::load_or_default(args.config.as_deref()).context("load page config")?;
    let support = if args.no_reveal {
        ObservationSupport::Unavailable
    } else {
        ObservationSupport::Available
    };

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let (width, height) = crossterm::terminal::size()?;
    let mut app = AppState::new(&config, width, height.saturating_sub(CHROME_ROWS), support)?;
    info!(blocks = app.blocks.len(), width, height, "page ready");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    let started = Instant::now();
    let clock = || started.elapsed().as_millis() as u64;

    loop {
        // 1. Fire due reveal timers, then render
        app.tick(clock());
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Sleep until input or the next scheduled change
        let timeout = app
            .next_wakeup_ms()
            .map(|at| Duration::from_millis(at.saturating_sub(clock())))
            .map_or(IDLE_TICK, |d| d.min(IDLE_TICK));

        if event::poll(timeout)? {
            app.tick(clock());
            match event::read()? {
                Event::Key(key) => input::handle_key(app, key),
                Event::Resize(width, height) => {
                    app.resize(width, height.saturating_sub(CHROME_ROWS))?
                }
                _ => {}
            }
        }

        // 3. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}

/// Log to a file under the app's config dir; the terminal belongs to the UI.
/// Logging is skipped if the file cannot be created.
fn init_logging(dir: &Path) {
    let path = dir.join("swarm-tui.log");
    let file = match std::fs::create_dir_all(dir).and_then(|_| File::create(&path)) {
        Ok(file) => file,
        Err(_) => return,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    info!(path = %path.display(), "logging started");
}
