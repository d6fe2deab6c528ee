//! Per-row interaction state.
//!
//! A [`TaskRow`] never owns canonical data. It holds the inline-edit buffer
//! for one task and turns user gestures into [`RowIntent`]s that the
//! controller applies.

use taskdeck_proto::task::{Task, TaskId};

use crate::input::LineInput;

/// What a checkbox click means for a given task.
///
/// The checkbox doubles as a selection toggle for open tasks and a
/// completion toggle for finished ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckboxIntent {
    /// Open task: add or remove it from the bulk selection.
    ToggleSelect(TaskId),
    /// Completed task: mark it incomplete again.
    ToggleComplete(TaskId),
}

impl CheckboxIntent {
    /// Decides the click action from the task's completion state.
    #[must_use]
    pub const fn for_task(task: &Task) -> Self {
        if task.completed {
            Self::ToggleComplete(task.id)
        } else {
            Self::ToggleSelect(task.id)
        }
    }
}

/// An intent emitted by a row for the controller to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowIntent {
    /// The checkbox was clicked.
    Checkbox(CheckboxIntent),
    /// The delete action was triggered.
    Delete(TaskId),
    /// An inline edit was committed with non-blank text.
    CommitEdit {
        /// Task being edited.
        id: TaskId,
        /// New text, already trimmed.
        text: String,
    },
}

/// Returns whether a row's checkbox renders as checked.
#[must_use]
pub const fn is_checked(task: &Task, selected: bool) -> bool {
    task.completed || selected
}

/// Local state of one rendered row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    id: TaskId,
    editing: bool,
    buffer: LineInput,
}

impl TaskRow {
    /// Creates an idle row for `id`.
    #[must_use]
    pub fn new(id: TaskId) -> Self {
        Self {
            id,
            editing: false,
            buffer: LineInput::new(),
        }
    }

    /// Task this row renders.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns true while an inline edit is open.
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        self.editing
    }

    /// The edit buffer.
    #[must_use]
    pub const fn buffer(&self) -> &LineInput {
        &self.buffer
    }

    /// Mutable access to the edit buffer.
    pub const fn buffer_mut(&mut self) -> &mut LineInput {
        &mut self.buffer
    }

    /// Opens an edit session seeded with the task's current text.
    ///
    /// Does nothing if an edit is already open. Returns true if a session
    /// was started.
    pub fn begin_edit(&mut self, task: &Task) -> bool {
        if self.editing {
            return false;
        }
        self.buffer.set(&task.text);
        self.editing = true;
        true
    }

    /// Commits the edit (confirmation key or focus loss).
    ///
    /// Accepted only if the trimmed buffer is non-empty; otherwise the row
    /// stays in edit mode and `None` is returned.
    pub fn commit_edit(&mut self) -> Option<RowIntent> {
        if !self.editing {
            return None;
        }
        let text = self.buffer.as_str().trim();
        if text.is_empty() {
            return None;
        }
        let intent = RowIntent::CommitEdit {
            id: self.id,
            text: text.to_string(),
        };
        self.editing = false;
        Some(intent)
    }

    /// Closes the edit session without emitting anything.
    pub fn cancel_edit(&mut self) {
        self.editing = false;
        self.buffer.clear();
    }

    /// Handles a checkbox click.
    #[must_use]
    pub const fn click_checkbox(task: &Task) -> RowIntent {
        RowIntent::Checkbox(CheckboxIntent::for_task(task))
    }

    /// Handles the delete action.
    #[must_use]
    pub const fn request_delete(&self) -> RowIntent {
        RowIntent::Delete(self.id)
    }
}
