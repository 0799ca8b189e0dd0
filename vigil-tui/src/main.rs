//! Vigil TUI entry point.

use crossterm::{
    event::{self, Event as CrosstermEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use vigil_tui::config::TuiConfig;
use vigil_tui::error::TuiError;
use vigil_tui::events::TuiEvent;
use vigil_tui::logging;
use vigil_tui::persistence;
use vigil_tui::source::{self, DataSource, FixtureSource, RestSource};
use vigil_tui::state::App;
use vigil_tui::views::render_view;

/// How often the loop wakes to expire notifications and check the poller.
const TICK: Duration = Duration::from_millis(250);

#[tokio::main]
async fn main() -> Result<(), TuiError> {
    let config = TuiConfig::load()?;
    logging::init(&config.log_path)?;

    let source: Arc<dyn DataSource> = match &config.fixture_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "using fixture data");
            Arc::new(FixtureSource::load(path, config.namespace.clone())?)
        }
        None => Arc::new(RestSource::new(&config)?),
    };

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<TuiEvent>();
    let persistence_path = config.persistence_path.clone();
    let mut app = App::new(config, event_tx.clone());
    match persistence::load(&persistence_path) {
        Ok(Some(state)) => app.restore(&state),
        Ok(None) => {}
        Err(err) => tracing::warn!(error = %err, "ignoring unreadable saved state"),
    }

    let mut terminal = setup_terminal()?;
    let _guard = TerminalGuard;

    spawn_input_reader(event_tx.clone());
    let size = terminal.size()?;
    app.resize(size.width, size.height);
    app.request_all();
    app.sync();

    let mut ticker = tokio::time::interval(TICK);

    loop {
        let mut quit = false;
        while let Ok(event) = event_rx.try_recv() {
            if app.handle_event(event) {
                quit = true;
                break;
            }
        }
        if quit {
            break;
        }

        for request in app.take_requests() {
            tokio::spawn(source::execute(source.clone(), request, event_tx.clone()));
        }

        terminal.draw(|f| render_view(f, &app))?;

        tokio::select! {
            _ = ticker.tick() => {
                app.handle_event(TuiEvent::Tick);
            }
            Some(event) = event_rx.recv() => {
                if app.handle_event(event) {
                    break;
                }
            }
        }
    }

    if let Err(err) = persistence::save(&persistence_path, &app.persisted_state()) {
        tracing::warn!(error = %err, "failed to save state");
    }
    tracing::info!("shutting down");

    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, TuiError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
    }
}

fn spawn_input_reader(sender: mpsc::UnboundedSender<TuiEvent>) {
    std::thread::spawn(move || loop {
        if let Ok(true) = event::poll(Duration::from_millis(200)) {
            let sent = match event::read() {
                Ok(CrosstermEvent::Key(key)) => sender.send(TuiEvent::Input(key)),
                Ok(CrosstermEvent::Resize(width, height)) => {
                    sender.send(TuiEvent::Resize { width, height })
                }
                _ => Ok(()),
            };
            if sent.is_err() {
                break;
            }
        }
    });
}
