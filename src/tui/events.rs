//! Custom event types for the TUI application.

use crossterm::event::KeyEvent;

use crate::search::SearchOutcome;

/// Events that can occur in the TUI application
#[derive(Debug)]
pub enum TuiEvent {
    /// User keyboard input
    Key(KeyEvent),
    /// A search task finished (success or degraded fallback)
    SearchFinished(SearchOutcome),
}
