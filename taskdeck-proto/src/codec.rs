//! JSON encoding and decoding of task API bodies.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::task::{ErrorBody, Stats, Task};

/// Error type for codec encode/decode operations.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Encodes a request body as JSON bytes.
///
/// # Errors
///
/// Returns `CodecError::Serialization` if the value cannot be serialized.
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, CodecError> {
    serde_json::to_vec(value).map_err(|e| CodecError::Serialization(e.to_string()))
}

/// Decodes a JSON response body.
///
/// # Errors
///
/// Returns `CodecError::Serialization` if the bytes are not valid JSON for `T`.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CodecError> {
    serde_json::from_slice(bytes).map_err(|e| CodecError::Serialization(e.to_string()))
}

/// Decodes the body of `GET /tasks`.
///
/// # Errors
///
/// Returns `CodecError::Serialization` if the body is not an array of tasks.
pub fn decode_tasks(bytes: &[u8]) -> Result<Vec<Task>, CodecError> {
    decode(bytes)
}

/// Decodes the body of `GET /stats`.
///
/// # Errors
///
/// Returns `CodecError::Serialization` if the body is not a stats object.
pub fn decode_stats(bytes: &[u8]) -> Result<Stats, CodecError> {
    decode(bytes)
}

/// Decodes a single task (create and update responses).
///
/// # Errors
///
/// Returns `CodecError::Serialization` if the body is not a task.
pub fn decode_task(bytes: &[u8]) -> Result<Task, CodecError> {
    decode(bytes)
}

/// Extracts the server's error message from a failed response body.
///
/// Returns `None` for empty, non-JSON or message-less bodies, and for blank
/// messages.
#[must_use]
pub fn error_message(bytes: &[u8]) -> Option<String> {
    decode::<ErrorBody>(bytes)
        .ok()
        .and_then(|body| body.error)
        .filter(|msg| !msg.trim().is_empty())
}
