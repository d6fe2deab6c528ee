//! Library half of `taskdeck`, a terminal todo list.
//!
//! The canonical task list and its operations live in [`tasks`]; storage is
//! injected through [`store::KeyValueStore`]. [`app`] and [`ui`] form the
//! terminal front end.

pub mod app;
pub mod config;
pub mod input;
pub mod store;
pub mod tasks;
pub mod ui;
