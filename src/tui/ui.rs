//! UI layout and rendering logic for the TUI.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::app::App;
use crate::printer::html_to_markdown;
use crate::prompt::{self, QueryMode};

/// Render the main UI
pub fn render_ui(frame: &mut Frame, app: &App) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Mode selector
            Constraint::Length(3), // Query input
            Constraint::Length(1), // Status bar
            Constraint::Min(3),    // Results
        ])
        .split(frame.area());

    render_mode_selector(frame, app, main_layout[0]);
    render_input_area(frame, app, main_layout[1]);
    render_status_bar(frame, app, main_layout[2]);
    render_results(frame, app, main_layout[3]);
}

fn render_mode_selector(frame: &mut Frame, app: &App, area: Rect) {
    let selected = Style::default()
        .fg(Color::Black)
        .bg(Color::Green)
        .add_modifier(Modifier::BOLD);
    let unselected = Style::default().fg(Color::DarkGray);

    let style_for = |mode: QueryMode| {
        if app.mode == mode {
            selected
        } else {
            unselected
        }
    };

    let line = Line::from(vec![
        Span::styled(format!(" {} ", QueryMode::Plant.label()), style_for(QueryMode::Plant)),
        Span::raw("  "),
        Span::styled(
            format!(" {} ", QueryMode::Disease.label()),
            style_for(QueryMode::Disease),
        ),
    ]);

    let paragraph = Paragraph::new(line)
        .block(Block::default().borders(Borders::ALL).title("Mode (Tab to switch)"));
    frame.render_widget(paragraph, area);
}

fn render_input_area(frame: &mut Frame, app: &App, area: Rect) {
    let (text, style) = if app.input.is_empty() {
        (
            prompt::placeholder(app.mode).to_string(),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        (app.input.clone(), Style::default())
    };

    let paragraph = Paragraph::new(Span::styled(text, style))
        .block(Block::default().borders(Borders::ALL).title("Query"));
    frame.render_widget(paragraph, area);

    // Cursor inside the bordered box, accounting for wide characters
    let cursor_x = area.x + 1 + app.input[..app.input_cursor].width() as u16;
    frame.set_cursor_position((cursor_x.min(area.x + area.width.saturating_sub(2)), area.y + 1));
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let status = if app.loading {
        Span::styled(
            format!(" {} ", app.submit_label()),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::raw(format!(
            " {} (Enter) | Model: {} | Esc quit ",
            app.submit_label(),
            app.model
        ))
    };

    let paragraph =
        Paragraph::new(Line::from(status)).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(paragraph, area);
}

fn render_results(frame: &mut Frame, app: &App, area: Rect) {
    if app.output.is_empty() {
        return;
    }

    // Two columns like the original page: text takes the majority,
    // the image box only appears when a photo was found
    let (text_area, image_area) = if app.image_url.is_empty() {
        (area, None)
    } else {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(67), Constraint::Percentage(33)])
            .split(area);
        (columns[0], Some(columns[1]))
    };

    let text = html_to_markdown(&app.output);
    let total_lines = text.lines().count();
    let available_height = text_area.height.saturating_sub(2) as usize;
    let max_scroll = total_lines.saturating_sub(available_height);
    let scroll_y = app.scroll_offset.min(max_scroll) as u16;

    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Results (Up/Down to scroll)"))
        .wrap(Wrap { trim: false })
        .scroll((scroll_y, 0));
    frame.render_widget(paragraph, text_area);

    if let Some(image_area) = image_area {
        let image = Paragraph::new(Span::styled(
            app.image_url.clone(),
            Style::default().fg(Color::Cyan),
        ))
        .block(Block::default().borders(Borders::ALL).title("Image"))
        .wrap(Wrap { trim: true });
        frame.render_widget(image, image_area);
    }
}
