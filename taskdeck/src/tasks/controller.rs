//! Task list controller.
//!
//! [`TaskListController`] owns the canonical list, the pending add-task
//! input, and the view criteria. Each mutation of the canonical list is
//! followed by a synchronous write of the full list to the injected
//! [`KeyValueStore`] under [`STORAGE_KEY`].
//!
//! Storage failures never lose in-memory state:
//! 1. An unreadable or malformed stored list starts the session empty. The
//!    raw value is moved or copied to [`CORRUPT_BACKUP_KEY`] first. If that
//!    fails too, writes are disabled for the session so the stored value
//!    is never overwritten.
//! 2. A failed write is logged and kept as a [`StorageWarning`] for the
//!    UI to display. The next successful write clears it.

use std::collections::BTreeSet;

use chrono::{DateTime, Local};
use taskdeck_proto::codec::{self, CodecError};
use taskdeck_proto::task::{Priority, PriorityFilter, SortDirection, Task, TaskId};

use super::list::{IdSource, TaskList};
use super::row::{CheckboxIntent, RowIntent};
use super::view::{self, TaskStats, ViewCriteria};
use crate::store::{CORRUPT_BACKUP_KEY, KeyValueStore, STORAGE_KEY, StoreError};

/// Errors that can occur while reading the stored list.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The store could not be read.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// The stored value is not a valid task list.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),
}

/// Non-blocking storage problem surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageWarning {
    /// The stored list could not be loaded; the session started empty.
    LoadFailed {
        /// Description of the error.
        reason: String,
        /// The stored value could not be backed up, so nothing is written.
        saving_disabled: bool,
    },
    /// The latest change could not be written.
    SaveFailed {
        /// Description of the error.
        reason: String,
    },
}

impl std::fmt::Display for StorageWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LoadFailed {
                reason,
                saving_disabled: false,
            } => write!(f, "Saved tasks could not be loaded, started empty ({reason})"),
            Self::LoadFailed {
                reason,
                saving_disabled: true,
            } => write!(
                f,
                "Saved tasks could not be loaded or backed up, saving is off ({reason})"
            ),
            Self::SaveFailed { reason } => write!(f, "Changes not saved ({reason})"),
        }
    }
}

/// Owns the canonical task list and all operations on it.
pub struct TaskListController<S: KeyValueStore> {
    store: S,
    list: TaskList,
    pending_text: String,
    pending_priority: Priority,
    criteria: ViewCriteria,
    warning: Option<StorageWarning>,
    last_saved_at: Option<DateTime<Local>>,
    /// Set when an unusable stored value has no backup.
    persist_blocked: bool,
}

impl<S: KeyValueStore> TaskListController<S> {
    /// Hydrates a controller from `store`, using the system clock for ids.
    #[must_use]
    pub fn load(store: S) -> Self {
        Self::load_with_ids(store, IdSource::system())
    }

    /// Hydrates a controller from `store` with a custom id source.
    ///
    /// An absent value yields an empty list. A read or decode failure also
    /// yields an empty list and records [`StorageWarning::LoadFailed`]. When
    /// the unusable value cannot be backed up, the controller never writes.
    #[must_use]
    pub fn load_with_ids(store: S, ids: IdSource) -> Self {
        let (tasks, warning, persist_blocked) = match read_stored(&store) {
            Ok(tasks) => (tasks, None, false),
            Err(failure) => {
                let saving_disabled = !failure.backed_up;
                tracing::warn!(
                    error = %failure.error,
                    saving_disabled,
                    "stored task list unusable, starting empty"
                );
                (
                    Vec::new(),
                    Some(StorageWarning::LoadFailed {
                        reason: failure.error.to_string(),
                        saving_disabled,
                    }),
                    saving_disabled,
                )
            }
        };

        let (list, rekeyed) = TaskList::hydrate(tasks, ids);
        tracing::info!(tasks = list.len(), rekeyed, "task list loaded");

        Self {
            store,
            list,
            pending_text: String::new(),
            pending_priority: Priority::default(),
            criteria: ViewCriteria::default(),
            warning,
            last_saved_at: None,
            persist_blocked,
        }
    }

    /// The injected store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    // -- Reads ------------------------------------------------------------

    /// Canonical list, newest first.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        self.list.tasks()
    }

    /// Looks up a task by id.
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.list.get(id)
    }

    /// The visible projection under the current criteria.
    #[must_use]
    pub fn visible(&self) -> Vec<&Task> {
        view::derive(self.list.tasks(), &self.criteria)
    }

    /// Statistics over the canonical list.
    #[must_use]
    pub fn stats(&self) -> TaskStats {
        TaskStats::from_tasks(self.list.tasks())
    }

    /// Ids selected for a bulk action.
    #[must_use]
    pub const fn selection(&self) -> &BTreeSet<TaskId> {
        self.list.selection()
    }

    /// Number of selected ids.
    #[must_use]
    pub fn selection_count(&self) -> usize {
        self.list.selection().len()
    }

    /// Returns true if `id` is selected.
    #[must_use]
    pub fn is_selected(&self, id: TaskId) -> bool {
        self.list.is_selected(id)
    }

    /// Current view criteria.
    #[must_use]
    pub const fn criteria(&self) -> &ViewCriteria {
        &self.criteria
    }

    /// Text waiting in the add-task input.
    #[must_use]
    pub fn pending_text(&self) -> &str {
        &self.pending_text
    }

    /// Priority chosen for the next task.
    #[must_use]
    pub const fn pending_priority(&self) -> Priority {
        self.pending_priority
    }

    /// Current storage warning, if any.
    #[must_use]
    pub const fn warning(&self) -> Option<&StorageWarning> {
        self.warning.as_ref()
    }

    /// Time of the last successful write in this session.
    #[must_use]
    pub fn last_saved_at(&self) -> Option<DateTime<Local>> {
        self.last_saved_at
    }

    // -- Pending input ----------------------------------------------------

    /// Replaces the add-task input text.
    pub fn set_pending_text(&mut self, text: &str) {
        text.clone_into(&mut self.pending_text);
    }

    /// Sets the priority for the next task.
    pub const fn set_pending_priority(&mut self, priority: Priority) {
        self.pending_priority = priority;
    }

    /// Adds a task from the pending input.
    pub fn submit(&mut self) -> Option<TaskId> {
        let text = std::mem::take(&mut self.pending_text);
        let id = self.add(&text, self.pending_priority);
        if id.is_none() {
            self.pending_text = text;
        }
        id
    }

    // -- Mutations ----------------------------------------------------------

    /// Adds a task to the front of the list.
    ///
    /// Blank text (after trimming) is ignored. On success the pending input
    /// is cleared and its priority reset to the default.
    pub fn add(&mut self, text: &str, priority: Priority) -> Option<TaskId> {
        let Some(id) = self.list.add(text, priority) else {
            tracing::debug!("ignored blank task text");
            return None;
        };
        tracing::debug!(task_id = %id, %priority, "task added");
        self.pending_text.clear();
        self.pending_priority = Priority::default();
        self.persist();
        Some(id)
    }

    /// Deletes a task. Unknown ids are ignored.
    pub fn delete(&mut self, id: TaskId) {
        if self.list.delete(id) {
            tracing::debug!(task_id = %id, "task deleted");
            self.persist();
        } else {
            tracing::debug!(task_id = %id, "delete ignored, no such task");
        }
    }

    /// Flips completion of a task and removes it from the selection.
    pub fn toggle_complete(&mut self, id: TaskId) {
        if self.list.toggle_complete(id) {
            tracing::debug!(task_id = %id, "completion toggled");
            self.persist();
        } else {
            tracing::debug!(task_id = %id, "toggle ignored, no such task");
        }
    }

    /// Adds or removes a task from the bulk selection.
    ///
    /// Unknown ids are ignored and never enter the selection, the same as
    /// for [`delete`](Self::delete) and [`toggle_complete`](Self::toggle_complete).
    pub fn toggle_select(&mut self, id: TaskId) {
        let selected = self.list.toggle_select(id);
        tracing::debug!(task_id = %id, selected, "selection toggled");
    }

    /// Completes every selected task and clears the selection.
    pub fn bulk_complete(&mut self) {
        let affected = self.list.bulk_complete();
        tracing::debug!(affected, "bulk complete");
        if affected > 0 {
            self.persist();
        }
    }

    /// Deletes every selected task and clears the selection.
    pub fn bulk_delete(&mut self) {
        let affected = self.list.bulk_delete();
        tracing::debug!(affected, "bulk delete");
        if affected > 0 {
            self.persist();
        }
    }

    /// Stores edited text for a task. Blank text and unknown ids are ignored.
    pub fn commit_edit(&mut self, id: TaskId, text: &str) {
        if self.list.commit_edit(id, text) {
            tracing::debug!(task_id = %id, "task text edited");
            self.persist();
        }
    }

    /// Applies an intent emitted by a row.
    pub fn apply(&mut self, intent: RowIntent) {
        match intent {
            RowIntent::Checkbox(CheckboxIntent::ToggleSelect(id)) => self.toggle_select(id),
            RowIntent::Checkbox(CheckboxIntent::ToggleComplete(id)) => self.toggle_complete(id),
            RowIntent::Delete(id) => self.delete(id),
            RowIntent::CommitEdit { id, text } => self.commit_edit(id, &text),
        }
    }

    // -- Criteria -----------------------------------------------------------

    /// Sets the priority filter.
    pub const fn set_filter(&mut self, filter: PriorityFilter) {
        self.criteria.filter = filter;
    }

    /// Sets the search term.
    pub fn set_search(&mut self, term: &str) {
        term.clone_into(&mut self.criteria.search);
    }

    /// Resets the search term to empty.
    pub fn clear_search(&mut self) {
        self.criteria.search.clear();
    }

    /// Sets the sort direction.
    pub const fn set_sort_direction(&mut self, sort: SortDirection) {
        self.criteria.sort = sort;
    }

    /// Flips the sort direction.
    pub const fn toggle_sort_direction(&mut self) {
        self.criteria.sort = self.criteria.sort.toggled();
    }

    // -- Persistence --------------------------------------------------------

    /// Writes the full canonical list to the store.
    fn persist(&mut self) {
        if self.persist_blocked {
            tracing::warn!("save skipped, stored task list has no backup");
            return;
        }
        let result = codec::encode_tasks(self.list.tasks())
            .map_err(|e| e.to_string())
            .and_then(|json| {
                self.store
                    .set(STORAGE_KEY, &json)
                    .map_err(|e| e.to_string())
            });

        match result {
            Ok(()) => {
                self.last_saved_at = Some(Local::now());
                if matches!(self.warning, Some(StorageWarning::SaveFailed { .. })) {
                    tracing::info!("task list saved after earlier failure");
                    self.warning = None;
                }
            }
            Err(reason) => {
                tracing::warn!(error = %reason, "task list save failed, keeping in-memory state");
                self.warning = Some(StorageWarning::SaveFailed { reason });
            }
        }
    }
}

/// A stored list that could not be used.
struct ReadFailure {
    error: LoadError,
    /// The raw value now also lives under [`CORRUPT_BACKUP_KEY`].
    backed_up: bool,
}

/// Reads and decodes the stored list.
///
/// An unusable value is preserved under [`CORRUPT_BACKUP_KEY`] before the
/// error is returned. Text that fails to decode is copied; a value the
/// store cannot even read is moved aside as-is.
fn read_stored<S: KeyValueStore>(store: &S) -> Result<Vec<Task>, ReadFailure> {
    let raw = match store.get(STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Ok(Vec::new()),
        Err(err) => {
            let backed_up = match store.set_aside(STORAGE_KEY, CORRUPT_BACKUP_KEY) {
                Ok(moved) => moved,
                Err(move_err) => {
                    tracing::warn!(error = %move_err, "could not set aside unreadable task list");
                    false
                }
            };
            return Err(ReadFailure {
                error: err.into(),
                backed_up,
            });
        }
    };
    codec::decode_tasks(&raw).map_err(|err| {
        let backed_up = match store.set(CORRUPT_BACKUP_KEY, &raw) {
            Ok(()) => {
                tracing::info!(key = CORRUPT_BACKUP_KEY, "unreadable task list backed up");
                true
            }
            Err(backup_err) => {
                tracing::warn!(error = %backup_err, "could not back up unreadable task list");
                false
            }
        };
        ReadFailure {
            error: err.into(),
            backed_up,
        }
    })
}
