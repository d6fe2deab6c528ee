//! Task list rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use taskdeck_proto::task::Task;

use super::input_bar::text_line;
use super::theme;
use crate::app::{App, PanelFocus};
use crate::store::KeyValueStore;
use crate::tasks::row::{TaskRow, is_checked};

/// Render the visible projection, or an empty-state hint.
pub fn render<S: KeyValueStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let is_focused = app.focus == PanelFocus::List;
    let visible = app.controller.visible();

    let block = Block::default()
        .title(format!("Tasks ({}/{})", visible.len(), app.controller.tasks().len()))
        .borders(Borders::ALL)
        .border_style(theme::border(is_focused));

    if visible.is_empty() {
        let hint = Paragraph::new(Line::from(Span::styled(
            "No tasks for this filter... create one!",
            theme::dimmed(),
        )))
        .wrap(Wrap { trim: true })
        .block(block);
        frame.render_widget(hint, area);
        return;
    }

    let items: Vec<ListItem> = visible
        .iter()
        .map(|task| {
            let editing = app
                .edit_row
                .as_ref()
                .filter(|row| row.id() == task.id && row.is_editing());
            ListItem::new(row_line(task, app.controller.is_selected(task.id), editing))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(if is_focused {
            theme::selected()
        } else {
            theme::highlighted()
        })
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(app.cursor));
    frame.render_stateful_widget(list, area, &mut state);
}

/// One row: checkbox, text (or edit buffer), priority badge.
fn row_line<'a>(task: &'a Task, selected: bool, editing: Option<&TaskRow>) -> Line<'a> {
    let checkbox = if is_checked(task, selected) {
        "[x]"
    } else {
        "[ ]"
    };

    let mut spans = vec![Span::styled(checkbox, theme::normal()), Span::raw(" ")];

    if let Some(row) = editing {
        spans.extend(text_line(row.buffer(), true, "").spans);
    } else if task.completed {
        spans.push(Span::styled(task.text.as_str(), theme::completed()));
    } else {
        spans.push(Span::styled(task.text.as_str(), theme::normal()));
    }

    spans.push(Span::raw(" "));
    spans.push(Span::styled(
        format!("[{}]", task.priority),
        theme::badge(task.priority),
    ));

    Line::from(spans)
}
