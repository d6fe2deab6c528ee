//! Colors and text styles shared by the widgets.

use ratatui::style::{Color, Modifier, Style};
use taskdeck_proto::task::Priority;

/// Body text.
pub const TEXT: Color = Color::White;
/// Hints, placeholders, inactive labels.
pub const MUTED: Color = Color::Gray;
/// Focused borders and the list cursor.
pub const ACCENT: Color = Color::Cyan;
/// Gauge fill.
pub const PROGRESS: Color = Color::LightBlue;

pub const URGENT: Color = Color::Red;
pub const MEDIUM: Color = Color::Yellow;
pub const LOW: Color = Color::Green;

/// Status dot after a successful save.
pub const SAVED: Color = Color::Green;
/// Status dot while a storage warning is shown.
pub const FAULT: Color = Color::Red;

/// Bulk bar foreground (amber).
const BULK_FG: Color = Color::Rgb(255, 191, 0);
const BULK_BG: Color = Color::Rgb(50, 35, 10);
const STATUS_BG: Color = Color::Rgb(30, 30, 50);

/// Badge color for a priority.
#[must_use]
pub const fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::Urgente => URGENT,
        Priority::Moyenne => MEDIUM,
        Priority::Basse => LOW,
    }
}

#[must_use]
pub fn normal() -> Style {
    Style::default().fg(TEXT)
}

#[must_use]
pub fn dimmed() -> Style {
    Style::default().fg(MUTED)
}

#[must_use]
pub fn bold() -> Style {
    normal().add_modifier(Modifier::BOLD)
}

/// Cursor row when the list is not focused.
#[must_use]
pub fn highlighted() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

#[must_use]
pub fn border(focused: bool) -> Style {
    if focused { highlighted() } else { normal() }
}

/// Cursor row in the focused list and the active filter tab.
#[must_use]
pub fn selected() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(ACCENT)
        .add_modifier(Modifier::BOLD)
}

/// Text of a finished task.
#[must_use]
pub fn completed() -> Style {
    Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::CROSSED_OUT)
}

#[must_use]
pub fn badge(priority: Priority) -> Style {
    Style::default()
        .fg(priority_color(priority))
        .add_modifier(Modifier::BOLD)
}

#[must_use]
pub fn status_bar_bg() -> Style {
    Style::default().fg(TEXT).bg(STATUS_BG)
}

#[must_use]
pub fn bulk_bar() -> Style {
    Style::default()
        .fg(BULK_FG)
        .bg(BULK_BG)
        .add_modifier(Modifier::BOLD)
}
