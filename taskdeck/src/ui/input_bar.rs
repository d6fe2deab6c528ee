//! Add-task input and search box rendering.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::theme;
use crate::app::{App, PanelFocus};
use crate::input::LineInput;
use crate::store::KeyValueStore;

/// Render the add-task input with the pending priority picker.
pub fn render_input<S: KeyValueStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let is_focused = app.focus == PanelFocus::Input;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(13)])
        .split(area);

    let text = text_line(&app.input, is_focused, "Add a task...");
    let block = Block::default()
        .title("New task")
        .borders(Borders::ALL)
        .border_style(theme::border(is_focused));
    frame.render_widget(Paragraph::new(text).block(block), chunks[0]);

    let priority = app.controller.pending_priority();
    let picker = Paragraph::new(Line::from(Span::styled(
        priority.as_str(),
        theme::badge(priority),
    )))
    .block(
        Block::default()
            .title("\u{2191}\u{2193}")
            .borders(Borders::ALL)
            .border_style(theme::border(is_focused)),
    );
    frame.render_widget(picker, chunks[1]);
}

/// Render the search box with the sort-direction toggle.
pub fn render_search<S: KeyValueStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let is_focused = app.focus == PanelFocus::Search;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(13)])
        .split(area);

    let mut text = text_line(&app.search, is_focused, "Search tasks...");
    if !app.search.is_empty() {
        text.spans.push(Span::styled("  (Ctrl-U clear)", theme::dimmed()));
    }
    let block = Block::default()
        .title("Search")
        .borders(Borders::ALL)
        .border_style(theme::border(is_focused));
    frame.render_widget(Paragraph::new(text).block(block), chunks[0]);

    let sort = app.controller.criteria().sort;
    let toggle = Paragraph::new(Line::from(vec![
        Span::styled("Priority ", theme::dimmed()),
        Span::styled(sort.arrow(), theme::bold()),
    ]))
    .block(
        Block::default()
            .title("Sort")
            .borders(Borders::ALL)
            .border_style(theme::border(false)),
    );
    frame.render_widget(toggle, chunks[1]);
}

/// Build a line for a text buffer, drawing a block cursor when focused and
/// a placeholder when empty and unfocused.
pub fn text_line<'a>(input: &LineInput, is_focused: bool, placeholder: &'a str) -> Line<'a> {
    if input.is_empty() && !is_focused {
        return Line::from(Span::styled(placeholder, theme::dimmed()));
    }

    let mut display: String = input.as_str().to_string();
    if is_focused {
        let at = display
            .char_indices()
            .nth(input.cursor())
            .map_or(display.len(), |(i, _)| i);
        display.insert(at, '\u{2588}');
    }
    Line::from(Span::styled(display, theme::normal()))
}
