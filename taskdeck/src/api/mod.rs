//! Data access layer for the remote task service.
//!
//! Defines the [`TaskApi`] trait that every backend must satisfy.
//! Concrete implementations:
//! - [`http::HttpTaskApi`]: REST client over `reqwest`
//! - [`memory::MemoryTaskApi`]: in-process store for tests

pub mod http;
pub mod memory;

use taskdeck_proto::query::ListQuery;
use taskdeck_proto::task::{Stats, Task, TaskDraft, TaskId, TaskUpdate};

/// Errors surfaced by a [`TaskApi`] call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Input was rejected (400/422).
    #[error("validation failed: {}", .message.as_deref().unwrap_or("invalid input"))]
    Validation {
        /// Server-provided message, if any.
        message: Option<String>,
    },

    /// The referenced task does not exist (404).
    #[error("task not found: {}", .message.as_deref().unwrap_or("unknown id"))]
    NotFound {
        /// Server-provided message, if any.
        message: Option<String>,
    },

    /// Any other non-2xx response.
    #[error("server error ({status}): {}", .message.as_deref().unwrap_or("no details"))]
    Server {
        /// HTTP status code.
        status: u16,
        /// Server-provided message, if any.
        message: Option<String>,
    },

    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// A 2xx response whose body could not be decoded.
    #[error("invalid response body: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// The message the server attached to this failure, if any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Validation { message }
            | Self::NotFound { message }
            | Self::Server { message, .. } => message.as_deref(),
            Self::Network(_) | Self::InvalidResponse(_) => None,
        }
    }
}

/// Async access to the task service.
///
/// Each call is a single request/response exchange: no retries, no
/// caching. Callers decide what a failure means for the view.
pub trait TaskApi: Send + Sync {
    /// Lists tasks matching the filter, in the requested order.
    fn list_tasks(
        &self,
        query: &ListQuery,
    ) -> impl std::future::Future<Output = Result<Vec<Task>, ApiError>> + Send;

    /// Fetches aggregate counts over all tasks.
    fn stats(&self) -> impl std::future::Future<Output = Result<Stats, ApiError>> + Send;

    /// Creates a task from a draft. The server assigns id, timestamps and
    /// `completed = false`.
    fn create_task(
        &self,
        draft: &TaskDraft,
    ) -> impl std::future::Future<Output = Result<Task, ApiError>> + Send;

    /// Replaces fields of an existing task.
    fn update_task(
        &self,
        id: &TaskId,
        update: &TaskUpdate,
    ) -> impl std::future::Future<Output = Result<Task, ApiError>> + Send;

    /// Deletes a task.
    fn delete_task(
        &self,
        id: &TaskId,
    ) -> impl std::future::Future<Output = Result<(), ApiError>> + Send;
}
