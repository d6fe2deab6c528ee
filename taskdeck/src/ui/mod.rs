//! Terminal UI rendering.

pub mod filter_bar;
pub mod header;
pub mod input_bar;
pub mod status_bar;
pub mod task_panel;
pub mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::app::App;
use crate::store::KeyValueStore;

/// Main draw function for the entire UI.
pub fn draw<S: KeyValueStore>(frame: &mut Frame, app: &App<S>) {
    let bulk_height = u16::from(app.controller.selection_count() > 0);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),           // Progress header
            Constraint::Length(3),           // Add-task input
            Constraint::Length(3),           // Search + sort
            Constraint::Length(1),           // Filter buttons
            Constraint::Length(bulk_height), // Bulk actions
            Constraint::Min(3),              // Task list
            Constraint::Length(1),           // Status bar
        ])
        .split(frame.area());

    header::render(frame, chunks[0], app);
    input_bar::render_input(frame, chunks[1], app);
    input_bar::render_search(frame, chunks[2], app);
    filter_bar::render_filters(frame, chunks[3], app);
    if bulk_height > 0 {
        filter_bar::render_bulk_bar(frame, chunks[4], app);
    }
    task_panel::render(frame, chunks[5], app);
    status_bar::render(frame, chunks[6], app);
}
