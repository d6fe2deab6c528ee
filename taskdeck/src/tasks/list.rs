//! Canonical task list and selection set.
//!
//! [`TaskList`] owns the authoritative ordered sequence of tasks (newest
//! first) plus the set of ids marked for a bulk action. It performs no I/O;
//! the controller persists it after each change.

use std::collections::{BTreeSet, HashSet};
use std::time::{SystemTime, UNIX_EPOCH};

use taskdeck_proto::task::{Priority, Task, TaskId};

/// Returns the current timestamp in milliseconds since epoch.
fn now_ms() -> u64 {
    u64::try_from(
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis(),
    )
    .unwrap_or(u64::MAX)
}

/// Issues task ids from a millisecond clock, bumped past the last issued
/// value so ids stay strictly increasing even within one clock tick.
///
/// Ids never exceed [`IdSource::MAX_ID`] by more than the number issued
/// in one session, so incrementing cannot run out of room.
#[derive(Debug, Clone, Copy)]
pub struct IdSource {
    last: u64,
    clock: fn() -> u64,
}

impl IdSource {
    /// Largest id accepted from storage: `2^53 - 1`, the largest integer
    /// every JSON reader holds exactly.
    pub const MAX_ID: u64 = (1 << 53) - 1;

    /// Id source backed by the system clock.
    #[must_use]
    pub fn system() -> Self {
        Self::with_clock(now_ms)
    }

    /// Id source backed by a custom clock (tests use a frozen one).
    #[must_use]
    pub const fn with_clock(clock: fn() -> u64) -> Self {
        Self { last: 0, clock }
    }

    /// Returns a fresh id greater than every id issued or observed so far.
    pub fn next_id(&mut self) -> TaskId {
        let id = (self.clock)()
            .min(Self::MAX_ID)
            .max(self.last.saturating_add(1));
        self.last = id;
        TaskId::new(id)
    }

    /// Records an existing id so later ids are issued above it.
    ///
    /// Ids above [`Self::MAX_ID`] are ignored.
    pub fn observe(&mut self, id: TaskId) {
        if Self::accepts(id) {
            self.last = self.last.max(id.get());
        }
    }

    /// Returns true if `id` is within the range this source issues.
    #[must_use]
    pub const fn accepts(id: TaskId) -> bool {
        id.get() <= Self::MAX_ID
    }
}

impl Default for IdSource {
    fn default() -> Self {
        Self::system()
    }
}

/// The canonical task list with its bulk-action selection set.
#[derive(Debug, Clone, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
    selected: BTreeSet<TaskId>,
    ids: IdSource,
}

impl TaskList {
    /// Creates an empty list using the system clock for ids.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty list with a custom id source.
    #[must_use]
    pub fn with_id_source(ids: IdSource) -> Self {
        Self {
            tasks: Vec::new(),
            selected: BTreeSet::new(),
            ids,
        }
    }

    /// Builds a list from stored tasks, preserving their order.
    ///
    /// Tasks whose id repeats an earlier one, or lies above
    /// [`IdSource::MAX_ID`], are given a fresh id so that ids are unique
    /// after load and later ids cannot collide. Returns the list and the number of tasks
    /// that were re-keyed.
    #[must_use]
    pub fn hydrate(mut tasks: Vec<Task>, mut ids: IdSource) -> (Self, usize) {
        for task in &tasks {
            ids.observe(task.id);
        }

        let mut seen = HashSet::with_capacity(tasks.len());
        let mut rekeyed = 0;
        for task in &mut tasks {
            if !IdSource::accepts(task.id) || !seen.insert(task.id) {
                let old = task.id;
                task.id = ids.next_id();
                seen.insert(task.id);
                rekeyed += 1;
                tracing::warn!(old_id = %old, new_id = %task.id, "stored task id re-keyed");
            }
        }

        let list = Self {
            tasks,
            selected: BTreeSet::new(),
            ids,
        };
        (list, rekeyed)
    }

    /// All tasks in canonical (insertion, newest first) order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Number of tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns true if the list holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Looks up a task by id.
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Ids currently marked for a bulk action.
    #[must_use]
    pub const fn selection(&self) -> &BTreeSet<TaskId> {
        &self.selected
    }

    /// Returns true if `id` is in the selection set.
    #[must_use]
    pub fn is_selected(&self, id: TaskId) -> bool {
        self.selected.contains(&id)
    }

    /// Adds a task to the front of the list.
    ///
    /// The text is trimmed; blank text is rejected and `None` returned.
    pub fn add(&mut self, text: &str, priority: Priority) -> Option<TaskId> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let id = self.ids.next_id();
        self.tasks
            .insert(0, Task::new(id, text.to_string(), priority));
        Some(id)
    }

    /// Removes the task with `id` and drops it from the selection.
    ///
    /// Returns false (and changes nothing) if no such task exists.
    pub fn delete(&mut self, id: TaskId) -> bool {
        self.selected.remove(&id);
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// Flips completion on `id` and always removes `id` from the selection.
    ///
    /// Returns false if no such task exists.
    pub fn toggle_complete(&mut self, id: TaskId) -> bool {
        self.selected.remove(&id);
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.completed = !task.completed;
                true
            }
            None => false,
        }
    }

    /// Adds `id` to the selection if absent, otherwise removes it.
    ///
    /// Returns the new membership. Completion state is not checked; unknown
    /// ids are never selected.
    pub fn toggle_select(&mut self, id: TaskId) -> bool {
        if self.selected.remove(&id) || self.get(id).is_none() {
            false
        } else {
            self.selected.insert(id);
            true
        }
    }

    /// Marks every selected task complete and clears the selection.
    ///
    /// Returns the number of tasks affected.
    pub fn bulk_complete(&mut self) -> usize {
        let mut affected = 0;
        for task in &mut self.tasks {
            if self.selected.contains(&task.id) {
                task.completed = true;
                affected += 1;
            }
        }
        self.selected.clear();
        affected
    }

    /// Removes every selected task and clears the selection.
    ///
    /// Returns the number of tasks removed.
    pub fn bulk_delete(&mut self) -> usize {
        let before = self.tasks.len();
        let selected = std::mem::take(&mut self.selected);
        self.tasks.retain(|t| !selected.contains(&t.id));
        before - self.tasks.len()
    }

    /// Replaces the text of `id` with the trimmed `text`.
    ///
    /// Blank text and unknown ids are ignored. Returns true if the stored
    /// text changed.
    pub fn commit_edit(&mut self, id: TaskId, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) if task.text != text => {
                task.text = text.to_string();
                true
            }
            _ => false,
        }
    }
}
