//! View state and the synchronization controller.
//!
//! The controller owns the [`ViewState`] and is the only code that mutates
//! it. User intent arrives as [`Command`]s; each dispatch updates state
//! synchronously and returns the [`Request`]s that must run against the task
//! API. When a request completes, its [`Outcome`] is folded back in with
//! [`Controller::apply`], which may ask for follow-up requests (a refresh after
//! every successful mutation).
//!
//! ```text
//! Command ──dispatch──▶ ViewState + Vec<Request> ──TaskApi──▶ Outcome
//!    ▲                                                          │
//!    └──────────────── apply ◀─────── follow-up Vec<Request> ◀──┘
//! ```
//!
//! List and stats requests carry sequence numbers. Only the outcome of the
//! most recently issued request of each kind is applied, so a slow stale
//! response can never overwrite a fresher one.

use taskdeck_proto::query::{Filter, ListQuery, SortKey};
use taskdeck_proto::task::{Priority, Stats, Task, TaskDraft, TaskId, TaskUpdate};

use crate::api::ApiError;

/// Shown when a list fetch fails.
pub const FETCH_FAILED: &str = "Failed to fetch tasks";
/// Shown when a submit is attempted with a blank title.
pub const TITLE_REQUIRED: &str = "Task title is required";
/// Shown when a create/update fails without a server message.
pub const SAVE_FAILED: &str = "Failed to save task";
/// Shown when a delete fails.
pub const DELETE_FAILED: &str = "Failed to delete task";
/// Shown when toggling completion fails.
pub const TOGGLE_FAILED: &str = "Failed to update task";

/// Everything the presentation layer renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Tasks from the last successful fetch under the current selection.
    pub tasks: Vec<Task>,
    /// A list fetch is in flight.
    pub loading: bool,
    /// User-visible error; empty means none.
    pub error: String,
    /// Aggregate counts from the last successful stats fetch.
    pub stats: Stats,
    /// Selected completion filter.
    pub filter: Filter,
    /// Selected sort key.
    pub sort: SortKey,
    /// Form contents.
    pub draft: TaskDraft,
    /// Task being edited; `None` means the form creates a new task.
    pub editing: Option<TaskId>,
    /// Task awaiting delete confirmation.
    pub pending_delete: Option<TaskId>,
}

impl ViewState {
    /// Whether the form is editing an existing task.
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Looks up a task in the current list.
    #[must_use]
    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    /// The list query for the current selection.
    #[must_use]
    pub const fn query(&self) -> ListQuery {
        ListQuery::new(self.filter, self.sort)
    }
}

/// A change to one field of the form draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftEdit {
    /// Replace the title text.
    Title(String),
    /// Replace the description text.
    Description(String),
    /// Pick a priority.
    Priority(Priority),
}

/// User intent handled by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Re-fetch list and stats (also used on mount).
    Refresh,
    /// Change a form field.
    EditDraft(DraftEdit),
    /// Submit the form (create or update).
    Submit,
    /// Load a task into the form for editing.
    StartEdit(TaskId),
    /// Leave edit mode and clear the form.
    CancelEdit,
    /// Ask for confirmation before deleting a task.
    RequestDelete(TaskId),
    /// Delete the task awaiting confirmation.
    ConfirmDelete,
    /// Abandon the pending delete.
    DismissDelete,
    /// Flip a task's completion flag.
    Toggle(TaskId),
    /// Select a different filter.
    ChangeFilter(Filter),
    /// Select a different sort key.
    ChangeSort(SortKey),
}

/// One call against the task API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// `GET /tasks`
    ListTasks {
        /// Sequence number of this fetch.
        seq: u64,
        /// Filter and sort to apply.
        query: ListQuery,
    },
    /// `GET /stats`
    Stats {
        /// Sequence number of this fetch.
        seq: u64,
    },
    /// `POST /tasks` when `id` is `None`, otherwise `PUT /tasks/{id}`.
    Save {
        /// Edit target.
        id: Option<TaskId>,
        /// Submitted form contents.
        draft: TaskDraft,
    },
    /// `PUT /tasks/{id}` flipping `completed`.
    Toggle {
        /// Task to update.
        id: TaskId,
        /// Full task body with the flag inverted.
        update: TaskUpdate,
    },
    /// `DELETE /tasks/{id}`
    Delete {
        /// Task to delete.
        id: TaskId,
    },
}

/// The completed result of a [`Request`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Result of [`Request::ListTasks`].
    Tasks {
        /// Sequence number of the originating request.
        seq: u64,
        /// Fetched tasks or the failure.
        result: Result<Vec<Task>, ApiError>,
    },
    /// Result of [`Request::Stats`].
    Stats {
        /// Sequence number of the originating request.
        seq: u64,
        /// Fetched counts or the failure.
        result: Result<Stats, ApiError>,
    },
    /// Result of [`Request::Save`].
    Saved(Result<Task, ApiError>),
    /// Result of [`Request::Toggle`].
    Toggled(Result<Task, ApiError>),
    /// Result of [`Request::Delete`].
    Deleted(Result<(), ApiError>),
}

impl Outcome {
    /// The outcome of `request` failing with `error` before it produced a
    /// response.
    #[must_use]
    pub fn failed(request: Request, error: ApiError) -> Self {
        match request {
            Request::ListTasks { seq, .. } => Self::Tasks {
                seq,
                result: Err(error),
            },
            Request::Stats { seq } => Self::Stats {
                seq,
                result: Err(error),
            },
            Request::Save { .. } => Self::Saved(Err(error)),
            Request::Toggle { .. } => Self::Toggled(Err(error)),
            Request::Delete { .. } => Self::Deleted(Err(error)),
        }
    }
}

/// Keeps [`ViewState`] consistent with the server.
#[derive(Debug, Default)]
pub struct Controller {
    state: ViewState,
    next_seq: u64,
    latest_list: u64,
    latest_stats: u64,
}

impl Controller {
    /// Creates a controller with default view state. Nothing is fetched
    /// until [`Command::Refresh`] is dispatched.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current view state.
    #[must_use]
    pub const fn state(&self) -> &ViewState {
        &self.state
    }

    /// Handles a command and returns the requests it triggers.
    pub fn dispatch(&mut self, command: Command) -> Vec<Request> {
        match command {
            Command::Refresh => self.refresh(),
            Command::EditDraft(edit) => {
                match edit {
                    DraftEdit::Title(title) => self.state.draft.title = title,
                    DraftEdit::Description(text) => self.state.draft.description = text,
                    DraftEdit::Priority(priority) => self.state.draft.priority = priority,
                }
                Vec::new()
            }
            Command::Submit => self.submit(),
            Command::StartEdit(id) => {
                if let Some(task) = self.state.task(&id) {
                    self.state.draft = TaskDraft::from_task(task);
                    self.state.editing = Some(id);
                } else {
                    tracing::warn!(task = %id, "edit requested for a task not in the list");
                }
                Vec::new()
            }
            Command::CancelEdit => {
                self.reset_form();
                Vec::new()
            }
            Command::RequestDelete(id) => {
                self.state.pending_delete = Some(id);
                Vec::new()
            }
            Command::ConfirmDelete => self
                .state
                .pending_delete
                .take()
                .map(|id| vec![Request::Delete { id }])
                .unwrap_or_default(),
            Command::DismissDelete => {
                self.state.pending_delete = None;
                Vec::new()
            }
            Command::Toggle(id) => {
                if let Some(task) = self.state.task(&id) {
                    let update = TaskUpdate::toggled(task);
                    vec![Request::Toggle { id, update }]
                } else {
                    tracing::warn!(task = %id, "toggle requested for a task not in the list");
                    Vec::new()
                }
            }
            Command::ChangeFilter(filter) => {
                if filter == self.state.filter {
                    return Vec::new();
                }
                self.state.filter = filter;
                self.refresh()
            }
            Command::ChangeSort(sort) => {
                if sort == self.state.sort {
                    return Vec::new();
                }
                self.state.sort = sort;
                self.refresh()
            }
        }
    }

    /// Folds a completed request into the view state and returns any
    /// follow-up requests.
    pub fn apply(&mut self, outcome: Outcome) -> Vec<Request> {
        match outcome {
            Outcome::Tasks { seq, result } => {
                if seq != self.latest_list {
                    tracing::debug!(seq, latest = self.latest_list, "discarding stale task list");
                    return Vec::new();
                }
                self.state.loading = false;
                match result {
                    Ok(tasks) => {
                        tracing::debug!(count = tasks.len(), "task list refreshed");
                        self.state.tasks = tasks;
                        self.state.error.clear();
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "failed to fetch tasks");
                        self.state.error = FETCH_FAILED.to_string();
                    }
                }
                Vec::new()
            }
            Outcome::Stats { seq, result } => {
                if seq != self.latest_stats {
                    tracing::debug!(seq, latest = self.latest_stats, "discarding stale stats");
                    return Vec::new();
                }
                match result {
                    Ok(stats) => self.state.stats = stats,
                    // Stats are informational; the error banner is left alone.
                    Err(e) => tracing::warn!(error = %e, "failed to fetch stats"),
                }
                Vec::new()
            }
            Outcome::Saved(result) => match result {
                Ok(task) => {
                    tracing::info!(task = %task.id, "task saved");
                    self.reset_form();
                    self.state.error.clear();
                    self.refresh()
                }
                Err(e) => {
                    tracing::warn!(error = %e, "failed to save task");
                    self.state.error = e.server_message().unwrap_or(SAVE_FAILED).to_string();
                    Vec::new()
                }
            },
            Outcome::Toggled(result) => match result {
                Ok(task) => {
                    tracing::info!(task = %task.id, completed = task.completed, "task toggled");
                    self.refresh()
                }
                Err(e) => {
                    tracing::warn!(error = %e, "failed to update task");
                    self.state.error = TOGGLE_FAILED.to_string();
                    Vec::new()
                }
            },
            Outcome::Deleted(result) => match result {
                Ok(()) => {
                    tracing::info!("task deleted");
                    self.refresh()
                }
                Err(e) => {
                    tracing::warn!(error = %e, "failed to delete task");
                    self.state.error = DELETE_FAILED.to_string();
                    Vec::new()
                }
            },
        }
    }

    /// Starts a list fetch and a stats fetch for the current selection.
    fn refresh(&mut self) -> Vec<Request> {
        self.state.loading = true;
        self.latest_list = self.issue_seq();
        self.latest_stats = self.issue_seq();
        vec![
            Request::ListTasks {
                seq: self.latest_list,
                query: self.state.query(),
            },
            Request::Stats {
                seq: self.latest_stats,
            },
        ]
    }

    fn submit(&mut self) -> Vec<Request> {
        if self.state.draft.has_blank_title() {
            self.state.error = TITLE_REQUIRED.to_string();
            return Vec::new();
        }
        vec![Request::Save {
            id: self.state.editing.clone(),
            draft: self.state.draft.clone(),
        }]
    }

    fn reset_form(&mut self) {
        self.state.draft = TaskDraft::default();
        self.state.editing = None;
    }

    const fn issue_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }
}
