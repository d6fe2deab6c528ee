//! Shared task model and persisted format for Taskdeck.

pub mod codec;
pub mod task;
