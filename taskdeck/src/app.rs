//! Application state and event handling.
//!
//! [`App`] maps terminal key events onto [`TaskListController`] operations.
//! It owns only view-local state: focus, the text buffers being typed
//! into, the list cursor, and the one row that may be in inline-edit mode.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use taskdeck_proto::task::{Priority, PriorityFilter, TaskId};

use crate::input::LineInput;
use crate::store::KeyValueStore;
use crate::tasks::{TaskListController, TaskRow};

/// Which panel is currently focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    /// Add-task input is focused (default).
    Input,
    /// Search box is focused.
    Search,
    /// Task list is focused.
    List,
}

/// Main application state.
pub struct App<S: KeyValueStore> {
    /// The task list and its operations.
    pub controller: TaskListController<S>,
    /// Add-task text being typed.
    pub input: LineInput,
    /// Search text being typed.
    pub search: LineInput,
    /// Which panel is focused.
    pub focus: PanelFocus,
    /// Index of the highlighted row in the visible list.
    pub cursor: usize,
    /// Row currently open for inline editing.
    pub edit_row: Option<TaskRow>,
    /// chrono format for the last-saved time.
    pub timestamp_format: String,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl<S: KeyValueStore> App<S> {
    /// Create an application around a loaded controller.
    #[must_use]
    pub fn new(controller: TaskListController<S>) -> Self {
        let mut input = LineInput::new();
        input.set(controller.pending_text());
        let mut search = LineInput::new();
        search.set(&controller.criteria().search);
        Self {
            controller,
            input,
            search,
            focus: PanelFocus::Input,
            cursor: 0,
            edit_row: None,
            timestamp_format: "%H:%M:%S".to_string(),
            should_quit: false,
        }
    }

    /// Set the format used for the last-saved time.
    #[must_use]
    pub fn with_timestamp_format(mut self, format: &str) -> Self {
        format.clone_into(&mut self.timestamp_format);
        self
    }

    /// Id of the task under the list cursor.
    #[must_use]
    pub fn highlighted_id(&self) -> Option<TaskId> {
        self.controller.visible().get(self.cursor).map(|t| t.id)
    }

    /// Returns true while a row is in inline-edit mode.
    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.edit_row.as_ref().is_some_and(TaskRow::is_editing)
    }

    /// Handle a key event.
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.is_editing() {
            self.handle_edit_key(key);
            return;
        }

        match key.code {
            KeyCode::Esc => {
                if self.focus == PanelFocus::Search && !self.search.is_empty() {
                    self.clear_search();
                } else {
                    self.should_quit = true;
                }
                return;
            }
            KeyCode::BackTab => {
                self.cycle_focus_backward();
                return;
            }
            KeyCode::Tab => {
                self.cycle_focus_forward();
                return;
            }
            _ => {}
        }

        match self.focus {
            PanelFocus::Input => self.handle_input_key(key),
            PanelFocus::Search => self.handle_search_key(key),
            PanelFocus::List => self.handle_list_key(key),
        }
    }

    /// Handle key event when the add-task input is focused.
    fn handle_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                if self.controller.submit().is_some() {
                    self.input.set(self.controller.pending_text());
                    self.clamp_cursor();
                }
                return;
            }
            KeyCode::Up => {
                let p = self.controller.pending_priority().prev();
                self.controller.set_pending_priority(p);
                return;
            }
            KeyCode::Down => {
                let p = self.controller.pending_priority().next();
                self.controller.set_pending_priority(p);
                return;
            }
            _ => {}
        }
        if edit_line(&mut self.input, key) {
            self.controller.set_pending_text(self.input.as_str());
        }
    }

    /// Handle key event when the search box is focused.
    fn handle_search_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('u') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.clear_search();
            return;
        }
        if edit_line(&mut self.search, key) {
            self.controller.set_search(self.search.as_str());
            self.clamp_cursor();
        }
    }

    /// Handle key event when the task list is focused.
    fn handle_list_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                if self.cursor + 1 < self.controller.visible().len() {
                    self.cursor += 1;
                }
            }
            KeyCode::Char(' ') => self.click_checkbox(),
            KeyCode::Enter | KeyCode::Char('e') => self.begin_edit(),
            KeyCode::Delete | KeyCode::Char('d') => {
                if let Some(id) = self.highlighted_id() {
                    let intent = TaskRow::new(id).request_delete();
                    self.controller.apply(intent);
                }
            }
            KeyCode::Char('0') => self.controller.set_filter(PriorityFilter::All),
            KeyCode::Char('1') => self
                .controller
                .set_filter(PriorityFilter::Only(Priority::Urgente)),
            KeyCode::Char('2') => self
                .controller
                .set_filter(PriorityFilter::Only(Priority::Moyenne)),
            KeyCode::Char('3') => self
                .controller
                .set_filter(PriorityFilter::Only(Priority::Basse)),
            KeyCode::Char('s') => self.controller.toggle_sort_direction(),
            KeyCode::Char('c') => self.controller.bulk_complete(),
            KeyCode::Char('x') => self.controller.bulk_delete(),
            _ => return,
        }
        self.clamp_cursor();
    }

    /// Handle key event while a row is being edited.
    fn handle_edit_key(&mut self, key: KeyEvent) {
        let Some(row) = self.edit_row.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Enter => {
                if let Some(intent) = row.commit_edit() {
                    self.edit_row = None;
                    self.controller.apply(intent);
                }
            }
            // Focus loss commits too; a blank buffer keeps the edit open.
            KeyCode::Tab | KeyCode::BackTab => {
                if let Some(intent) = row.commit_edit() {
                    self.edit_row = None;
                    self.controller.apply(intent);
                    if key.code == KeyCode::Tab {
                        self.cycle_focus_forward();
                    } else {
                        self.cycle_focus_backward();
                    }
                }
            }
            KeyCode::Esc => self.edit_row = None,
            _ => {
                edit_line(row.buffer_mut(), key);
            }
        }
    }

    /// Click the checkbox of the highlighted row.
    fn click_checkbox(&mut self) {
        let Some(task) = self
            .controller
            .visible()
            .get(self.cursor)
            .map(|t| (*t).clone())
        else {
            return;
        };
        self.controller.apply(TaskRow::click_checkbox(&task));
    }

    /// Open an inline edit on the highlighted row.
    fn begin_edit(&mut self) {
        let Some(task) = self
            .controller
            .visible()
            .get(self.cursor)
            .map(|t| (*t).clone())
        else {
            return;
        };
        let mut row = TaskRow::new(task.id);
        if row.begin_edit(&task) {
            self.edit_row = Some(row);
        }
    }

    /// Reset the search box.
    fn clear_search(&mut self) {
        self.search.clear();
        self.controller.clear_search();
        self.clamp_cursor();
    }

    /// Keep the cursor inside the visible list.
    fn clamp_cursor(&mut self) {
        let len = self.controller.visible().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    /// Cycle focus forward: Input -> Search -> List -> Input.
    const fn cycle_focus_forward(&mut self) {
        self.focus = match self.focus {
            PanelFocus::Input => PanelFocus::Search,
            PanelFocus::Search => PanelFocus::List,
            PanelFocus::List => PanelFocus::Input,
        };
    }

    /// Cycle focus backward: Input -> List -> Search -> Input.
    const fn cycle_focus_backward(&mut self) {
        self.focus = match self.focus {
            PanelFocus::Input => PanelFocus::List,
            PanelFocus::List => PanelFocus::Search,
            PanelFocus::Search => PanelFocus::Input,
        };
    }
}

/// Apply a text-editing key to `line`. Returns true if the text changed.
fn edit_line(line: &mut LineInput, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            line.insert(c);
            true
        }
        KeyCode::Backspace => {
            let before = line.cursor();
            line.backspace();
            before != line.cursor()
        }
        KeyCode::Delete => {
            let before = line.as_str().len();
            line.delete();
            before != line.as_str().len()
        }
        KeyCode::Left => {
            line.move_left();
            false
        }
        KeyCode::Right => {
            line.move_right();
            false
        }
        KeyCode::Home => {
            line.home();
            false
        }
        KeyCode::End => {
            line.end();
            false
        }
        _ => false,
    }
}
