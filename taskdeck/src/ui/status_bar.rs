//! Bottom line: save state on the left, key hints on the right.

use ratatui::{
    Frame,
    layout::Rect,
    style::Color,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme;
use crate::app::{App, PanelFocus};
use crate::store::KeyValueStore;

/// Draws the one-line status bar: app version, save state (or the current
/// storage warning), and key hints for the focused panel.
pub fn render<S: KeyValueStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let (dot, state) = save_state(app);
    let line = Line::from(vec![
        Span::styled(concat!(" taskdeck ", env!("CARGO_PKG_VERSION")), theme::bold()),
        Span::raw("  "),
        Span::styled("\u{25cf} ", theme::normal().fg(dot)),
        Span::raw(state),
        Span::raw("  "),
        Span::styled(key_hints(app), theme::dimmed()),
    ]);
    frame.render_widget(Paragraph::new(line).style(theme::status_bar_bg()), area);
}

/// A storage warning takes precedence over the last save time.
fn save_state<S: KeyValueStore>(app: &App<S>) -> (Color, String) {
    if let Some(warning) = app.controller.warning() {
        return (theme::FAULT, warning.to_string());
    }
    app.controller.last_saved_at().map_or_else(
        || (theme::MUTED, "No changes".to_string()),
        |at| {
            (
                theme::SAVED,
                format!("Saved {}", at.format(&app.timestamp_format)),
            )
        },
    )
}

fn key_hints<S: KeyValueStore>(app: &App<S>) -> &'static str {
    if app.is_editing() {
        return "Enter save, Esc cancel, Tab save and leave";
    }
    match app.focus {
        PanelFocus::Input => "Enter add, \u{2191}\u{2193} priority, Tab next panel, Esc quit",
        PanelFocus::Search => "type to filter, Ctrl-U/Esc clear, Tab next panel",
        PanelFocus::List => {
            "Space check, e edit, d delete, 0-3 filter, s sort, c/x bulk, Esc quit"
        }
    }
}
