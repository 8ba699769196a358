//! Async event handler for the interactive search form.

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use tokio::sync::mpsc;

use crate::config::Config;
use crate::external::pexels::PexelsClient;
use crate::llm::LlmClient;
use crate::prompt::QueryMode;
use crate::search::SearchController;
use super::{app::App, events::TuiEvent, ui::render_ui};

type Controller = SearchController<LlmClient, PexelsClient>;

/// Run the interactive search form.
pub async fn run_tui(mode: QueryMode, model: &str, temperature: f32) -> Result<()> {
    if !io::IsTerminal::is_terminal(&io::stdout()) {
        return Err(anyhow::anyhow!("interactive mode requires a terminal"));
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let cfg = Config::load();
    let controller = SearchController {
        completion: LlmClient::from_config(&cfg, model, temperature)?,
        images: PexelsClient::from_config(&cfg)?,
    };
    let mut app = App::new(mode, model.to_string());

    let (event_tx, event_rx) = mpsc::unbounded_channel::<TuiEvent>();

    let result = run_app(&mut terminal, &mut app, controller, event_tx, event_rx).await;

    // Restore terminal
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Main application loop
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    controller: Controller,
    event_tx: mpsc::UnboundedSender<TuiEvent>,
    mut event_rx: mpsc::UnboundedReceiver<TuiEvent>,
) -> Result<()> {
    // Spawn input handler
    let input_tx = event_tx.clone();
    tokio::task::spawn_blocking(move || {
        loop {
            // Poll for keyboard events
            if event::poll(Duration::from_millis(100)).unwrap_or(false) {
                if let Ok(Event::Key(key)) = event::read() {
                    if input_tx.send(TuiEvent::Key(key)).is_err() {
                        break; // Channel closed
                    }
                }
            }
        }
    });

    loop {
        terminal.draw(|frame| render_ui(frame, app))?;

        if let Ok(tui_event) = event_rx.try_recv() {
            match tui_event {
                TuiEvent::Key(key) => {
                    if handle_key_event(app, key, &controller, &event_tx) {
                        break; // Quit requested
                    }
                }
                TuiEvent::SearchFinished(outcome) => {
                    app.finish_search(outcome);
                }
            }
        }

        // Small delay to prevent busy waiting
        tokio::time::sleep(Duration::from_millis(16)).await;
    }

    Ok(())
}

/// Handle keyboard events; returns true when the app should quit.
fn handle_key_event(
    app: &mut App,
    key: crossterm::event::KeyEvent,
    controller: &Controller,
    event_tx: &mpsc::UnboundedSender<TuiEvent>,
) -> bool {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return true;
        }
        KeyCode::Esc => {
            return true;
        }
        KeyCode::Tab => {
            app.toggle_mode();
        }
        KeyCode::Enter => {
            // No-op while loading or for blank input
            if let Some((mode, query)) = app.begin_search() {
                let controller = controller.clone();
                let tx = event_tx.clone();
                tokio::spawn(async move {
                    if let Some(outcome) = controller.search(mode, &query).await {
                        let _ = tx.send(TuiEvent::SearchFinished(outcome));
                    }
                });
            }
        }
        KeyCode::Up => {
            app.scroll_up();
        }
        KeyCode::Down => {
            app.scroll_down();
        }
        KeyCode::Left => {
            app.move_cursor_left();
        }
        KeyCode::Right => {
            app.move_cursor_right();
        }
        KeyCode::Home => {
            app.move_cursor_home();
        }
        KeyCode::End => {
            app.move_cursor_end();
        }
        KeyCode::Backspace => {
            app.backspace();
        }
        KeyCode::Delete => {
            app.delete();
        }
        KeyCode::Char(c) => {
            app.insert_char(c);
        }
        _ => {}
    }

    false
}
