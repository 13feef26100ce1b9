//! Terminal gallery for the accessible widgets.
//!
//! Every controller is mounted on one page and driven by real key and
//! mouse input; announcements show up in a side pane.

mod app;
mod showcase;
mod ui;

use app::App;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        KeyModifiers, MouseButton, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

/// Set to a file path to write debug logs there.
const LOG_ENV: &str = "A11Y_GALLERY_LOG";

type Term = Terminal<CrosstermBackend<io::Stdout>>;

fn main() -> anyhow::Result<()> {
    init_logging()?;

    let mut terminal = enter_terminal()?;
    let outcome = run_app(&mut terminal);
    let teardown = leave_terminal(&mut terminal);

    if let Err(err) = combine(outcome, teardown) {
        tracing::error!(error = %err, "widget gallery failed");
        eprintln!("widget-gallery: {err:#}");
        std::process::exit(1);
    }
    Ok(())
}

/// Keep the run error when the terminal could not be restored either.
fn combine(outcome: anyhow::Result<()>, teardown: anyhow::Result<()>) -> anyhow::Result<()> {
    match (outcome, teardown) {
        (Ok(()), teardown) => teardown,
        (Err(err), Ok(())) => Err(err),
        (Err(err), Err(restore)) => Err(anyhow::anyhow!(
            "{err:#} (restoring the terminal also failed: {restore:#})"
        )),
    }
}

fn enter_terminal() -> anyhow::Result<Term> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn leave_terminal(terminal: &mut Term) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

/// The terminal is ours, so logs only go to a file and only on request.
fn init_logging() -> anyhow::Result<()> {
    let Some(path) = std::env::var_os(LOG_ENV) else {
        return Ok(());
    };
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run_app(terminal: &mut Term) -> anyhow::Result<()> {
    let mut app = App::new()?;
    tracing::info!("widget gallery started");

    loop {
        terminal.draw(|f| ui::draw(f, &mut app))?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
                {
                    break;
                }
                app.handle_key(key);
            }
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                app.click_at(mouse.column, mouse.row);
            }
            _ => {}
        }
    }

    Ok(())
}
