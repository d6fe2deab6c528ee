//! Header rendering: title and progress gauge.

use ratatui::{
    Frame,
    layout::Rect,
    widgets::{Block, Borders, Gauge},
};

use super::theme;
use crate::app::App;
use crate::store::KeyValueStore;

/// Render the progress gauge with its `"{percent}% complete ({done}/{total})"` label.
pub fn render<S: KeyValueStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let stats = app.controller.stats();

    let block = Block::default()
        .title("Taskdeck")
        .title_style(theme::bold())
        .borders(Borders::ALL)
        .border_style(theme::normal());

    let gauge = Gauge::default()
        .block(block)
        .gauge_style(theme::normal().fg(theme::PROGRESS))
        .percent(stats.progress())
        .label(stats.readout());

    frame.render_widget(gauge, area);
}
