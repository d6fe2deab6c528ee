//! Filter buttons and the bulk action bar.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Tabs},
};
use taskdeck_proto::task::PriorityFilter;

use super::theme;
use crate::app::App;
use crate::store::KeyValueStore;

/// Render the four filter buttons, each with its live canonical count.
pub fn render_filters<S: KeyValueStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let stats = app.controller.stats();
    let active = app.controller.criteria().filter;

    let titles: Vec<Line> = PriorityFilter::ALL
        .iter()
        .enumerate()
        .map(|(key, filter)| {
            let style = match filter {
                PriorityFilter::All => theme::normal(),
                PriorityFilter::Only(p) => theme::badge(*p),
            };
            Line::from(vec![
                Span::styled(format!("{key}:"), theme::dimmed()),
                Span::styled(
                    format!("{} ({})", filter.label(), stats.count(*filter)),
                    style,
                ),
            ])
        })
        .collect();

    let selected = PriorityFilter::ALL
        .iter()
        .position(|f| *f == active)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .highlight_style(theme::selected())
        .divider(" ");

    frame.render_widget(tabs, area);
}

/// Render the bulk action bar. Callers only give it space when the
/// selection is non-empty.
pub fn render_bulk_bar<S: KeyValueStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let count = app.controller.selection_count();
    let line = Line::from(vec![
        Span::raw(format!(" {count} selected ")),
        Span::raw("| c: complete all selected | x: delete all selected"),
    ]);
    frame.render_widget(Paragraph::new(line).style(theme::bulk_bar()), area);
}
