//! Serialization for the persisted task list.
//!
//! The canonical list is stored as a JSON array of
//! `{ "id", "text", "priority", "completed" }` objects under a single
//! key-value entry.

use crate::task::Task;

/// Error type for codec encode/decode operations.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Encodes a task list as a JSON array.
///
/// # Errors
///
/// Returns `CodecError::Serialization` if the list cannot be serialized.
pub fn encode_tasks(tasks: &[Task]) -> Result<String, CodecError> {
    serde_json::to_string(tasks).map_err(|e| CodecError::Serialization(e.to_string()))
}

/// Decodes a task list from a JSON array.
///
/// # Errors
///
/// Returns `CodecError::Serialization` if `raw` is not a valid task array.
pub fn decode_tasks(raw: &str) -> Result<Vec<Task>, CodecError> {
    serde_json::from_str(raw).map_err(|e| CodecError::Serialization(e.to_string()))
}
