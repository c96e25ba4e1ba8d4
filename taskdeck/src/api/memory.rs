//! In-process [`TaskApi`] backed by a mutex-guarded task list.
//!
//! Behaves like the REST service for every call the client makes: it assigns
//! ids and timestamps, validates titles, filters, sorts and counts. Individual
//! operations can be made to fail so callers can exercise error paths without
//! a network.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use uuid::Uuid;

use taskdeck_proto::query::{ListQuery, SortKey};
use taskdeck_proto::task::{Stats, Task, TaskDraft, TaskId, TaskUpdate};

use super::{ApiError, TaskApi};

/// Operations that can be switched into failure mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `list_tasks`
    List,
    /// `stats`
    Stats,
    /// `create_task`
    Create,
    /// `update_task`
    Update,
    /// `delete_task`
    Delete,
}

#[derive(Debug, Default)]
struct Inner {
    tasks: Vec<Task>,
    failing: HashSet<Operation>,
    calls: Vec<Operation>,
    last_update: Option<(TaskId, TaskUpdate)>,
    clock: Option<DateTime<Utc>>,
}

impl Inner {
    /// Returns the next timestamp, strictly later than the previous one when
    /// a fixed clock is in use.
    fn now(&mut self) -> DateTime<Utc> {
        match self.clock {
            Some(t) => {
                let next = t + Duration::seconds(1);
                self.clock = Some(next);
                next
            }
            None => Utc::now(),
        }
    }

    fn record(&mut self, op: Operation) -> Result<(), ApiError> {
        self.calls.push(op);
        if self.failing.contains(&op) {
            return Err(ApiError::Server {
                status: 500,
                message: None,
            });
        }
        Ok(())
    }

    fn position(&self, id: &TaskId) -> Result<usize, ApiError> {
        self.tasks
            .iter()
            .position(|t| &t.id == id)
            .ok_or_else(|| ApiError::NotFound {
                message: Some("Task not found".to_string()),
            })
    }
}

/// Task service held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryTaskApi {
    inner: Mutex<Inner>,
}

fn title_required() -> ApiError {
    ApiError::Validation {
        message: Some("Title is required".to_string()),
    }
}

fn non_empty(description: &str) -> Option<String> {
    (!description.is_empty()).then(|| description.to_string())
}

impl MemoryTaskApi {
    /// Creates an empty store using the wall clock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store whose timestamps advance one second per
    /// mutation from `start`.
    #[must_use]
    pub fn with_clock(start: DateTime<Utc>) -> Self {
        let api = Self::default();
        api.inner.lock().clock = Some(start);
        api
    }

    /// Makes every later call of `op` fail with a 500, or succeed again.
    pub fn set_failing(&self, op: Operation, failing: bool) {
        let mut inner = self.inner.lock();
        if failing {
            inner.failing.insert(op);
        } else {
            inner.failing.remove(&op);
        }
    }

    /// Inserts a task as-is, bypassing validation.
    pub fn insert(&self, task: Task) {
        self.inner.lock().tasks.push(task);
    }

    /// Snapshot of every stored task in insertion order.
    #[must_use]
    pub fn tasks(&self) -> Vec<Task> {
        self.inner.lock().tasks.clone()
    }

    /// Operations invoked so far, in call order.
    #[must_use]
    pub fn calls(&self) -> Vec<Operation> {
        self.inner.lock().calls.clone()
    }

    /// Number of times `op` has been invoked.
    #[must_use]
    pub fn call_count(&self, op: Operation) -> usize {
        self.inner.lock().calls.iter().filter(|c| **c == op).count()
    }

    /// The body of the most recent update request.
    #[must_use]
    pub fn last_update(&self) -> Option<(TaskId, TaskUpdate)> {
        self.inner.lock().last_update.clone()
    }
}

/// Orders tasks the way the service does for each sort key.
fn sort_tasks(tasks: &mut [Task], sort: SortKey) {
    match sort {
        SortKey::Date => tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::Title => tasks.sort_by(|a, b| {
            a.title
                .to_lowercase()
                .cmp(&b.title.to_lowercase())
                .then_with(|| b.created_at.cmp(&a.created_at))
        }),
        SortKey::Priority => tasks.sort_by(|a, b| {
            b.priority
                .rank()
                .cmp(&a.priority.rank())
                .then_with(|| b.created_at.cmp(&a.created_at))
        }),
    }
}

impl TaskApi for MemoryTaskApi {
    async fn list_tasks(&self, query: &ListQuery) -> Result<Vec<Task>, ApiError> {
        let mut inner = self.inner.lock();
        inner.record(Operation::List)?;
        let mut tasks: Vec<Task> = inner
            .tasks
            .iter()
            .filter(|t| query.filter.matches(t.completed))
            .cloned()
            .collect();
        drop(inner);
        sort_tasks(&mut tasks, query.sort);
        Ok(tasks)
    }

    async fn stats(&self) -> Result<Stats, ApiError> {
        let mut inner = self.inner.lock();
        inner.record(Operation::Stats)?;
        let count = |n: usize| u64::try_from(n).unwrap_or(u64::MAX);
        let total = count(inner.tasks.len());
        let completed = count(inner.tasks.iter().filter(|t| t.completed).count());
        Ok(Stats {
            total,
            completed,
            pending: total - completed,
        })
    }

    async fn create_task(&self, draft: &TaskDraft) -> Result<Task, ApiError> {
        let mut inner = self.inner.lock();
        inner.record(Operation::Create)?;
        if draft.has_blank_title() {
            return Err(title_required());
        }
        let now = inner.now();
        let task = Task {
            id: TaskId::new(Uuid::now_v7().simple().to_string()),
            title: draft.title.trim().to_string(),
            description: non_empty(draft.description.trim()),
            priority: draft.priority,
            completed: false,
            created_at: now,
            updated_at: now,
        };
        inner.tasks.push(task.clone());
        Ok(task)
    }

    async fn update_task(&self, id: &TaskId, update: &TaskUpdate) -> Result<Task, ApiError> {
        let mut inner = self.inner.lock();
        inner.record(Operation::Update)?;
        inner.last_update = Some((id.clone(), update.clone()));
        let idx = inner.position(id)?;

        let (title, description, priority, completed) = match update {
            TaskUpdate::Fields(draft) => (
                draft.title.clone(),
                non_empty(&draft.description),
                draft.priority,
                inner.tasks[idx].completed,
            ),
            TaskUpdate::Replace(task) => (
                task.title.clone(),
                task.description.clone(),
                task.priority,
                task.completed,
            ),
        };
        if title.trim().is_empty() {
            return Err(title_required());
        }

        let now = inner.now();
        let task = &mut inner.tasks[idx];
        task.title = title.trim().to_string();
        task.description = description;
        task.priority = priority;
        task.completed = completed;
        task.updated_at = now;
        Ok(task.clone())
    }

    async fn delete_task(&self, id: &TaskId) -> Result<(), ApiError> {
        let mut inner = self.inner.lock();
        inner.record(Operation::Delete)?;
        let idx = inner.position(id)?;
        inner.tasks.remove(idx);
        Ok(())
    }
}
