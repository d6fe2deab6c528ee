//! Integration tests for keyboard-driven flows.
//!
//! Feeds key events into [`App`] the way the event loop does and checks
//! the resulting controller state, then renders a frame with ratatui's
//! `TestBackend` to confirm the state reaches the screen.
//!
//! Run with: `cargo test --test tui_keys`

#![allow(clippy::expect_used, clippy::unwrap_used)]

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::TestBackend;

use taskdeck::app::{App, PanelFocus};
use taskdeck::store::{InMemoryStore, KeyValueStore, STORAGE_KEY};
use taskdeck::tasks::{IdSource, TaskListController};
use taskdeck::ui;
use taskdeck_proto::task::{Priority, PriorityFilter, SortDirection};

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

fn frozen() -> u64 {
    1_000
}

fn make_app(store: InMemoryStore) -> App<InMemoryStore> {
    App::new(TaskListController::load_with_ids(
        store,
        IdSource::with_clock(frozen),
    ))
}

fn press(app: &mut App<InMemoryStore>, code: KeyCode) {
    app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
}

fn ctrl_key(app: &mut App<InMemoryStore>, c: char) {
    app.handle_key_event(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
}

fn type_str(app: &mut App<InMemoryStore>, s: &str) {
    for c in s.chars() {
        press(app, KeyCode::Char(c));
    }
}

/// Adds tasks through the input bar, then focuses the list.
fn app_with(tasks: &[(&str, Priority)]) -> App<InMemoryStore> {
    let mut app = make_app(InMemoryStore::new());
    for (text, priority) in tasks {
        type_str(&mut app, text);
        app.controller.set_pending_priority(*priority);
        press(&mut app, KeyCode::Enter);
    }
    app.focus = PanelFocus::List;
    app
}

fn render(app: &App<InMemoryStore>) -> String {
    let mut terminal = Terminal::new(TestBackend::new(90, 30)).unwrap();
    terminal.draw(|frame| ui::draw(frame, app)).unwrap();
    let buf = terminal.backend().buffer().clone();
    buf.content
        .chunks(buf.area.width as usize)
        .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

// ---------------------------------------------------------------------------
// Checkbox
// ---------------------------------------------------------------------------

#[test]
fn space_on_open_task_selects_it() {
    let mut app = app_with(&[("write report", Priority::Moyenne)]);
    let id = app.highlighted_id().unwrap();

    press(&mut app, KeyCode::Char(' '));
    assert!(app.controller.is_selected(id));
    assert!(!app.controller.get(id).unwrap().completed);

    press(&mut app, KeyCode::Char(' '));
    assert!(!app.controller.is_selected(id));
}

#[test]
fn space_on_completed_task_uncompletes_it() {
    let mut app = app_with(&[("write report", Priority::Moyenne)]);
    let id = app.highlighted_id().unwrap();
    app.controller.toggle_complete(id);

    press(&mut app, KeyCode::Char(' '));
    assert!(!app.controller.get(id).unwrap().completed);
    assert!(!app.controller.is_selected(id));
}

#[test]
fn bulk_keys_act_on_selection() {
    let mut app = app_with(&[
        ("a", Priority::Moyenne),
        ("b", Priority::Moyenne),
        ("c", Priority::Moyenne),
    ]);
    // Visible order: c, b, a.
    press(&mut app, KeyCode::Char(' '));
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Char(' '));
    assert_eq!(app.controller.selection_count(), 2);

    press(&mut app, KeyCode::Char('c'));
    assert_eq!(app.controller.selection_count(), 0);
    assert_eq!(app.controller.stats().completed, 2);

    // Select the one open task left and delete it.
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Char(' '));
    press(&mut app, KeyCode::Char('x'));
    assert_eq!(app.controller.tasks().len(), 2);
    assert!(app.controller.tasks().iter().all(|t| t.completed));
}

// ---------------------------------------------------------------------------
// Inline edit
// ---------------------------------------------------------------------------

#[test]
fn enter_commits_inline_edit() {
    let store = InMemoryStore::new();
    let mut app = make_app(store.clone());
    type_str(&mut app, "Buy milk");
    press(&mut app, KeyCode::Enter);
    app.focus = PanelFocus::List;

    press(&mut app, KeyCode::Char('e'));
    assert!(app.is_editing());
    press(&mut app, KeyCode::End);
    type_str(&mut app, " and eggs");
    press(&mut app, KeyCode::Enter);

    assert!(!app.is_editing());
    assert_eq!(app.controller.tasks()[0].text, "Buy milk and eggs");
    let raw = store.get(STORAGE_KEY).unwrap().unwrap();
    assert!(raw.contains("Buy milk and eggs"));
}

#[test]
fn letters_typed_while_editing_do_not_trigger_list_keys() {
    let mut app = app_with(&[("x", Priority::Moyenne)]);
    press(&mut app, KeyCode::Enter);
    // 'd', 'c', 's' would delete, bulk-complete, and sort in list mode.
    type_str(&mut app, "dcs");
    assert_eq!(app.controller.tasks().len(), 1);
    assert_eq!(app.controller.criteria().sort, SortDirection::Ascending);
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.controller.tasks()[0].text, "xdcs");
}

#[test]
fn esc_cancels_inline_edit_without_quitting() {
    let mut app = app_with(&[("keep me", Priority::Moyenne)]);
    press(&mut app, KeyCode::Enter);
    type_str(&mut app, "!!!");
    press(&mut app, KeyCode::Esc);

    assert!(!app.is_editing());
    assert!(!app.should_quit);
    assert_eq!(app.controller.tasks()[0].text, "keep me");
}

#[test]
fn blank_edit_stays_open_on_commit() {
    let mut app = app_with(&[("ab", Priority::Moyenne)]);
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Backspace);
    press(&mut app, KeyCode::Backspace);
    press(&mut app, KeyCode::Enter);
    assert!(app.is_editing());

    // Tab does not escape a blank edit either.
    press(&mut app, KeyCode::Tab);
    assert!(app.is_editing());
    assert_eq!(app.focus, PanelFocus::List);
    assert_eq!(app.controller.tasks()[0].text, "ab");
}

#[test]
fn tab_commits_edit_and_moves_focus() {
    let mut app = app_with(&[("old", Priority::Moyenne)]);
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Home);
    type_str(&mut app, "very ");
    press(&mut app, KeyCode::Tab);

    assert!(!app.is_editing());
    assert_eq!(app.focus, PanelFocus::Input);
    assert_eq!(app.controller.tasks()[0].text, "very old");
}

// ---------------------------------------------------------------------------
// Filter, sort, search
// ---------------------------------------------------------------------------

#[test]
fn number_keys_set_filter_and_clamp_cursor() {
    let mut app = app_with(&[
        ("u", Priority::Urgente),
        ("m", Priority::Moyenne),
        ("b", Priority::Basse),
    ]);
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Down);
    assert_eq!(app.cursor, 2);

    press(&mut app, KeyCode::Char('1'));
    assert_eq!(
        app.controller.criteria().filter,
        PriorityFilter::Only(Priority::Urgente)
    );
    assert_eq!(app.cursor, 0);
    assert_eq!(app.controller.visible().len(), 1);

    press(&mut app, KeyCode::Char('0'));
    assert_eq!(app.controller.visible().len(), 3);
}

#[test]
fn s_toggles_sort_direction() {
    let mut app = app_with(&[("u", Priority::Urgente), ("b", Priority::Basse)]);
    assert_eq!(app.controller.visible()[0].text, "b");
    press(&mut app, KeyCode::Char('s'));
    assert_eq!(app.controller.criteria().sort, SortDirection::Descending);
    assert_eq!(app.controller.visible()[0].text, "u");
}

#[test]
fn ctrl_u_clears_search() {
    let mut app = app_with(&[("alpha", Priority::Moyenne), ("beta", Priority::Moyenne)]);
    app.focus = PanelFocus::Search;
    type_str(&mut app, "alp");
    assert_eq!(app.controller.visible().len(), 1);

    ctrl_key(&mut app, 'u');
    assert!(app.search.is_empty());
    assert_eq!(app.controller.visible().len(), 2);
    assert!(!app.should_quit);
}

#[test]
fn down_key_in_input_cycles_priority() {
    let mut app = make_app(InMemoryStore::new());
    assert_eq!(app.controller.pending_priority(), Priority::Moyenne);
    press(&mut app, KeyCode::Down);
    assert_eq!(app.controller.pending_priority(), Priority::Basse);
    press(&mut app, KeyCode::Down);
    assert_eq!(app.controller.pending_priority(), Priority::Urgente);
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

#[test]
fn rendered_frame_reflects_state() {
    let mut app = app_with(&[("Buy milk", Priority::Urgente), ("Read book", Priority::Basse)]);
    let milk = app
        .controller
        .tasks()
        .iter()
        .find(|t| t.text == "Buy milk")
        .map(|t| t.id)
        .unwrap();
    app.controller.toggle_complete(milk);

    let screen = render(&app);
    assert!(screen.contains("50% complete (1/2)"));
    assert!(screen.contains("[x] Buy milk"));
    assert!(screen.contains("[ ] Read book"));

    // Select the open task: the bulk bar appears.
    press(&mut app, KeyCode::Char(' '));
    assert!(render(&app).contains("1 selected"));
}

#[test]
fn empty_projection_shows_placeholder() {
    let mut app = app_with(&[("only urgent", Priority::Urgente)]);
    press(&mut app, KeyCode::Char('3'));
    assert!(render(&app).contains("No tasks for this filter"));
}
