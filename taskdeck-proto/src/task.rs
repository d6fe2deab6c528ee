//! Task model for Taskdeck.
//!
//! Defines the canonical [`Task`] entity, its [`Priority`] levels, and the
//! view criteria types ([`PriorityFilter`], [`SortDirection`]) shared by the
//! controller and the renderer. Only `id`, `text`, `priority`, and
//! `completed` are ever persisted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Unique identifier for a task.
///
/// Serialized as a bare JSON number so stored lists stay compatible with
/// millisecond-timestamp ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    /// Wraps a raw numeric id.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Priority level of a task, ordered `Urgente > Moyenne > Basse`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Priority {
    /// Highest priority (rank 3).
    Urgente,
    /// Medium priority (rank 2). New tasks default to this level.
    #[default]
    Moyenne,
    /// Lowest priority (rank 1).
    Basse,
}

impl Priority {
    /// All levels, highest first.
    pub const ALL: [Self; 3] = [Self::Urgente, Self::Moyenne, Self::Basse];

    /// Numeric rank used for sorting.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Urgente => 3,
            Self::Moyenne => 2,
            Self::Basse => 1,
        }
    }

    /// Next level in the picker cycle: Urgente -> Moyenne -> Basse -> Urgente.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Urgente => Self::Moyenne,
            Self::Moyenne => Self::Basse,
            Self::Basse => Self::Urgente,
        }
    }

    /// Previous level in the picker cycle.
    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::Urgente => Self::Basse,
            Self::Moyenne => Self::Urgente,
            Self::Basse => Self::Moyenne,
        }
    }

    /// The literal name, as persisted.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Urgente => "Urgente",
            Self::Moyenne => "Moyenne",
            Self::Basse => "Basse",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a priority level.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown priority: {0}")]
pub struct ParsePriorityError(String);

impl FromStr for Priority {
    type Err = ParsePriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParsePriorityError(s.to_string()))
    }
}

/// A single todo item.
///
/// Unknown fields in stored data (such as a legacy `editing` flag) are
/// ignored on load and never written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier within the list.
    pub id: TaskId,
    /// Trimmed, non-empty task text.
    pub text: String,
    /// Priority bucket.
    pub priority: Priority,
    /// Whether the task has been completed.
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Creates an incomplete task.
    #[must_use]
    pub const fn new(id: TaskId, text: String, priority: Priority) -> Self {
        Self {
            id,
            text,
            priority,
            completed: false,
        }
    }
}

/// Active priority filter for the derived view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PriorityFilter {
    /// Keep every task.
    #[default]
    All,
    /// Keep only tasks of one priority.
    Only(Priority),
}

impl PriorityFilter {
    /// Filter buttons in display order.
    pub const ALL: [Self; 4] = [
        Self::All,
        Self::Only(Priority::Urgente),
        Self::Only(Priority::Moyenne),
        Self::Only(Priority::Basse),
    ];

    /// Returns true if a task with `priority` passes this filter.
    #[must_use]
    pub fn matches(self, priority: Priority) -> bool {
        match self {
            Self::All => true,
            Self::Only(p) => p == priority,
        }
    }

    /// Button label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Only(p) => p.as_str(),
        }
    }
}

/// Sort direction for priority ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    /// Lowest rank first.
    #[default]
    Ascending,
    /// Highest rank first.
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Arrow glyph shown on the sort toggle.
    #[must_use]
    pub const fn arrow(self) -> &'static str {
        match self {
            Self::Ascending => "\u{2191}",
            Self::Descending => "\u{2193}",
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            other => Err(format!("unknown sort direction: {other}")),
        }
    }
}
