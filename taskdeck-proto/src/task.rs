//! Task model as exchanged with the task API.
//!
//! Field names follow the server's JSON shape (`_id`, `createdAt`,
//! `updatedAt`). Identifiers and timestamps are server-assigned; the client
//! only ever holds a cached copy from the last fetch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque, server-assigned task identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Wraps a server-provided identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as sent by the server.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Low priority.
    Low,
    /// Medium priority (the form default).
    #[default]
    Medium,
    /// High priority.
    High,
}

impl Priority {
    /// All priorities in ascending order.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// Wire value (`low`, `medium`, `high`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Form label (e.g. "High Priority").
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low Priority",
            Self::Medium => "Medium Priority",
            Self::High => "High Priority",
        }
    }

    /// Next priority, wrapping from high back to low.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Low => Self::Medium,
            Self::Medium => Self::High,
            Self::High => Self::Low,
        }
    }

    /// Previous priority, wrapping from low back to high.
    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::Low => Self::High,
            Self::Medium => Self::Low,
            Self::High => Self::Medium,
        }
    }

    /// Ordering weight used by priority sort (higher sorts first).
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A task owned by the remote task service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Server-assigned identifier.
    #[serde(rename = "_id", alias = "id")]
    pub id: TaskId,
    /// Non-empty title.
    pub title: String,
    /// Optional free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Priority level.
    #[serde(default)]
    pub priority: Priority,
    /// Whether the task is done.
    #[serde(default)]
    pub completed: bool,
    /// Creation time, immutable.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Description, treating an empty string the same as a missing one.
    #[must_use]
    pub fn description_text(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }

    /// Whether the task has been modified since creation.
    #[must_use]
    pub fn was_updated(&self) -> bool {
        self.updated_at != self.created_at
    }
}

/// Mutable staging copy of a task's editable fields.
///
/// Sent as the body of create requests and of field edits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    /// Title; must not be blank when submitted.
    pub title: String,
    /// Description; empty means none.
    #[serde(default)]
    pub description: String,
    /// Priority; defaults to medium.
    #[serde(default)]
    pub priority: Priority,
}

impl TaskDraft {
    /// Copies the editable fields out of an existing task.
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            priority: task.priority,
        }
    }

    /// True when the title is empty or whitespace only.
    #[must_use]
    pub fn has_blank_title(&self) -> bool {
        self.title.trim().is_empty()
    }
}

/// Body of a `PUT /tasks/{id}` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TaskUpdate {
    /// Replace the editable fields from a form draft.
    Fields(TaskDraft),
    /// Send back a whole task, typically with one field changed.
    Replace(Task),
}

impl TaskUpdate {
    /// Builds the update that flips a task's completion flag while echoing
    /// every other field unchanged.
    #[must_use]
    pub fn toggled(task: &Task) -> Self {
        let mut task = task.clone();
        task.completed = !task.completed;
        Self::Replace(task)
    }
}

/// Aggregate counts computed by the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    /// Number of tasks.
    pub total: u64,
    /// Number of completed tasks.
    pub completed: u64,
    /// Number of pending tasks.
    pub pending: u64,
}

/// Error body returned by the server on failed requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable message, if the server provided one.
    #[serde(default)]
    pub error: Option<String>,
}
