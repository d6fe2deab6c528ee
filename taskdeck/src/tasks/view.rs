//! Derived views over the canonical list.
//!
//! The visible projection and the statistics are recomputed from the
//! canonical list on every read and never stored.

use std::cmp::Reverse;

use taskdeck_proto::task::{Priority, PriorityFilter, SortDirection, Task};

/// Filter, search, and sort criteria for the visible projection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewCriteria {
    /// Priority filter.
    pub filter: PriorityFilter,
    /// Case-insensitive substring; empty matches everything.
    pub search: String,
    /// Direction of the priority sort.
    pub sort: SortDirection,
}

impl ViewCriteria {
    /// Returns true if `task` passes the filter and search stages.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.filter.matches(task.priority) && contains_ignore_case(&task.text, &self.search)
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Computes the visible projection: filter, then search, then a stable
/// sort by priority rank.
///
/// Tasks of equal priority keep their canonical relative order in both
/// directions.
#[must_use]
pub fn derive<'a>(tasks: &'a [Task], criteria: &ViewCriteria) -> Vec<&'a Task> {
    let mut visible: Vec<&Task> = tasks.iter().filter(|t| criteria.matches(t)).collect();
    match criteria.sort {
        SortDirection::Ascending => visible.sort_by_key(|t| t.priority.rank()),
        SortDirection::Descending => visible.sort_by_key(|t| Reverse(t.priority.rank())),
    }
    visible
}

/// Counts over the canonical (unfiltered) list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    /// Tasks with priority `Urgente`.
    pub urgente: usize,
    /// Tasks with priority `Moyenne`.
    pub moyenne: usize,
    /// Tasks with priority `Basse`.
    pub basse: usize,
    /// All tasks.
    pub total: usize,
    /// Completed tasks.
    pub completed: usize,
}

impl TaskStats {
    /// Tallies `tasks`.
    #[must_use]
    pub fn from_tasks(tasks: &[Task]) -> Self {
        tasks.iter().fold(Self::default(), |mut stats, task| {
            match task.priority {
                Priority::Urgente => stats.urgente += 1,
                Priority::Moyenne => stats.moyenne += 1,
                Priority::Basse => stats.basse += 1,
            }
            stats.total += 1;
            if task.completed {
                stats.completed += 1;
            }
            stats
        })
    }

    /// Count shown on a filter button.
    #[must_use]
    pub const fn count(&self, filter: PriorityFilter) -> usize {
        match filter {
            PriorityFilter::All => self.total,
            PriorityFilter::Only(Priority::Urgente) => self.urgente,
            PriorityFilter::Only(Priority::Moyenne) => self.moyenne,
            PriorityFilter::Only(Priority::Basse) => self.basse,
        }
    }

    /// Completion percentage, rounded half up; 0 for an empty list.
    #[must_use]
    pub fn progress(&self) -> u16 {
        if self.total == 0 {
            return 0;
        }
        let percent = (200 * self.completed + self.total) / (2 * self.total);
        u16::try_from(percent).unwrap_or(100)
    }

    /// Progress readout, e.g. `"50% complete (1/2)"`.
    #[must_use]
    pub fn readout(&self) -> String {
        format!(
            "{}% complete ({}/{})",
            self.progress(),
            self.completed,
            self.total
        )
    }
}
