//! Task list state and its derived views.
//!
//! The canonical list lives in [`TaskList`]; [`TaskListController`] wraps it
//! with view criteria and persistence. [`TaskRow`] holds the per-row edit
//! state and turns gestures into [`RowIntent`]s.

pub mod controller;
pub mod list;
pub mod row;
pub mod view;

pub use controller::{LoadError, StorageWarning, TaskListController};
pub use list::{IdSource, TaskList};
pub use row::{CheckboxIntent, RowIntent, TaskRow};
pub use view::{TaskStats, ViewCriteria, derive};
