//! TUI application state management.

use crate::prompt::QueryMode;
use crate::search::SearchOutcome;

/// Application state for the interactive search form.
#[derive(Debug)]
pub struct App {
    /// Current query mode (plant or disease)
    pub mode: QueryMode,
    /// Input buffer
    pub input: String,
    /// Cursor position in input (byte index)
    pub input_cursor: usize,
    /// Rendered result text, empty until a search completes
    pub output: String,
    /// Stock photo URL, empty when none was found
    pub image_url: String,
    /// Whether a search is in flight
    pub loading: bool,
    /// Scroll offset for the results pane
    pub scroll_offset: usize,
    /// Model name being used
    pub model: String,
}

impl App {
    pub fn new(mode: QueryMode, model: String) -> Self {
        Self {
            mode,
            input: String::new(),
            input_cursor: 0,
            output: String::new(),
            image_url: String::new(),
            loading: false,
            scroll_offset: 0,
            model,
        }
    }

    /// Begin a search if one can start: refuses while loading and for
    /// empty or whitespace-only input. Clears the previous result and
    /// sets the loading flag; returns the (mode, query) pair to run.
    pub fn begin_search(&mut self) -> Option<(QueryMode, String)> {
        if self.loading || self.input.trim().is_empty() {
            return None;
        }
        self.loading = true;
        self.output.clear();
        self.image_url.clear();
        self.scroll_offset = 0;
        Some((self.mode, self.input.trim().to_string()))
    }

    /// Store a finished search and clear the loading flag.
    pub fn finish_search(&mut self, outcome: SearchOutcome) {
        self.output = outcome.output;
        self.image_url = outcome.image_url;
        self.loading = false;
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
    }

    /// Submit control label, mirroring the loading state.
    pub fn submit_label(&self) -> &'static str {
        if self.loading {
            "Searching..."
        } else {
            "Search"
        }
    }

    // ----- Input editing helpers -----
    pub fn insert_char(&mut self, c: char) {
        self.input.insert(self.input_cursor, c);
        self.input_cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if self.input_cursor > 0 {
            let prev = prev_boundary(&self.input, self.input_cursor);
            self.input.remove(prev);
            self.input_cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if self.input_cursor < self.input.len() {
            self.input.remove(self.input_cursor);
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.input_cursor > 0 {
            self.input_cursor = prev_boundary(&self.input, self.input_cursor);
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.input_cursor < self.input.len() {
            self.input_cursor = next_boundary(&self.input, self.input_cursor);
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.input_cursor = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.input_cursor = self.input.len();
    }

    pub fn scroll_up(&mut self) {
        if self.scroll_offset > 0 {
            self.scroll_offset -= 1;
        }
    }

    pub fn scroll_down(&mut self) {
        self.scroll_offset += 1;
    }
}

/// Byte index of the char boundary before `i`.
fn prev_boundary(s: &str, i: usize) -> usize {
    s[..i].char_indices().next_back().map(|(j, _)| j).unwrap_or(0)
}

/// Byte index of the char boundary after `i`.
fn next_boundary(s: &str, i: usize) -> usize {
    s[i..].chars().next().map(|c| i + c.len_utf8()).unwrap_or(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(QueryMode::Plant, "llama-3.3-70b-versatile".into())
    }

    #[test]
    fn empty_or_whitespace_submit_is_a_noop() {
        let mut app = app();
        assert_eq!(app.begin_search(), None);

        app.input = "   ".into();
        app.output = "previous".into();
        app.image_url = "https://example.com/old.jpg".into();
        assert_eq!(app.begin_search(), None);

        // Nothing changed
        assert_eq!(app.output, "previous");
        assert_eq!(app.image_url, "https://example.com/old.jpg");
        assert!(!app.loading);
    }

    #[test]
    fn begin_clears_previous_result_and_gates_resubmit() {
        let mut app = app();
        app.input = " Tulsi ".into();
        app.output = "previous".into();
        app.image_url = "https://example.com/old.jpg".into();

        let (mode, query) = app.begin_search().unwrap();
        assert_eq!(mode, QueryMode::Plant);
        assert_eq!(query, "Tulsi");
        assert!(app.loading);
        assert_eq!(app.submit_label(), "Searching...");
        assert!(app.output.is_empty());
        assert!(app.image_url.is_empty());

        // Submit is disabled while a search is in flight
        assert_eq!(app.begin_search(), None);
    }

    #[test]
    fn finish_stores_outcome_and_clears_loading() {
        let mut app = app();
        app.input = "Tulsi".into();
        app.begin_search().unwrap();

        app.finish_search(SearchOutcome {
            output: "**Tulsi**".into(),
            image_url: "https://images.pexels.com/1/medium.jpg".into(),
        });
        assert!(!app.loading);
        assert_eq!(app.submit_label(), "Search");
        assert_eq!(app.output, "**Tulsi**");
        assert_eq!(app.image_url, "https://images.pexels.com/1/medium.jpg");
    }

    #[test]
    fn input_editing_is_char_boundary_safe() {
        let mut app = app();
        for c in "नीम".chars() {
            app.insert_char(c);
        }
        app.move_cursor_left();
        app.backspace();
        assert_eq!(app.input, "नम");
        app.move_cursor_end();
        app.backspace();
        assert_eq!(app.input, "न");
    }
}
