//! Request execution for the synchronization controller.
//!
//! Bridges the synchronous TUI event loop (crossterm poll-based) with the
//! async [`TaskApi`]. [`spawn_sync`] starts a background dispatcher that runs
//! every [`Request`] as its own tokio task and streams [`Outcome`]s back.
//!
//! # Architecture
//!
//! ```text
//! TUI (main thread)  ←── Outcome ───  tokio background tasks ── TaskApi
//!                     ─── Request →
//! ```
//!
//! The main thread submits requests returned by [`Controller::dispatch`] and
//! drains outcomes on each tick, feeding them to [`Controller::apply`].
//! [`settle`] does the same inline for callers that can simply await.

use std::sync::Arc;

use futures_util::future::join_all;
use tokio::sync::mpsc;

use taskdeck_proto::task::TaskUpdate;

use crate::api::{ApiError, TaskApi};
use crate::controller::{Command, Controller, Outcome, Request};

/// Runs a single request against the API.
pub async fn execute<A: TaskApi>(api: &A, request: Request) -> Outcome {
    match request {
        Request::ListTasks { seq, query } => Outcome::Tasks {
            seq,
            result: api.list_tasks(&query).await,
        },
        Request::Stats { seq } => Outcome::Stats {
            seq,
            result: api.stats().await,
        },
        Request::Save { id: Some(id), draft } => {
            Outcome::Saved(api.update_task(&id, &TaskUpdate::Fields(draft)).await)
        }
        Request::Save { id: None, draft } => Outcome::Saved(api.create_task(&draft).await),
        Request::Toggle { id, update } => Outcome::Toggled(api.update_task(&id, &update).await),
        Request::Delete { id } => Outcome::Deleted(api.delete_task(&id).await),
    }
}

/// Dispatches a command and drives every request it triggers, including
/// follow-ups, to completion.
///
/// Requests produced by the same step run concurrently; their outcomes are
/// applied in the order the controller issued them.
pub async fn settle<A: TaskApi>(controller: &mut Controller, api: &A, command: Command) {
    let mut pending = controller.dispatch(command);
    while !pending.is_empty() {
        let outcomes = join_all(pending.into_iter().map(|r| execute(api, r))).await;
        pending = outcomes
            .into_iter()
            .flat_map(|outcome| controller.apply(outcome))
            .collect();
    }
}

/// Messages accepted by the background dispatcher.
#[derive(Debug)]
pub enum WorkerCommand {
    /// Run a request and report its outcome.
    Run(Request),
    /// Stop accepting requests. Requests already running still report.
    Shutdown,
}

/// Errors returned when handing requests to the dispatcher.
#[derive(Debug, Clone, Copy, thiserror::Error, PartialEq, Eq)]
pub enum SyncError {
    /// The request channel is full.
    #[error("request queue is full")]
    Busy,
    /// The dispatcher has stopped.
    #[error("sync worker has stopped")]
    Closed,
}

/// Requests the dispatcher did not accept, with the reason.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("{reason}: {} request(s) not queued", requests.len())]
pub struct Rejected {
    /// Why queueing stopped.
    pub reason: SyncError,
    /// The first request that failed to queue and every one after it.
    pub requests: Vec<Request>,
}

/// Channel endpoints for talking to the background dispatcher.
#[derive(Debug)]
pub struct SyncHandle {
    commands: mpsc::Sender<WorkerCommand>,
    outcomes: mpsc::Receiver<Outcome>,
}

impl SyncHandle {
    /// Queues requests without blocking.
    ///
    /// # Errors
    ///
    /// Returns [`Rejected`] holding every request from the first one that
    /// could not be queued, because the queue is full ([`SyncError::Busy`])
    /// or the dispatcher has stopped ([`SyncError::Closed`]).
    pub fn submit(&self, requests: Vec<Request>) -> Result<(), Rejected> {
        let mut requests = requests.into_iter();
        while let Some(request) = requests.next() {
            if let Err(e) = self.commands.try_send(WorkerCommand::Run(request)) {
                let reason = match e {
                    mpsc::error::TrySendError::Full(_) => SyncError::Busy,
                    mpsc::error::TrySendError::Closed(_) => SyncError::Closed,
                };
                let mut rejected = Vec::new();
                if let WorkerCommand::Run(request) = e.into_inner() {
                    rejected.push(request);
                }
                rejected.extend(requests);
                return Err(Rejected {
                    reason,
                    requests: rejected,
                });
            }
        }
        Ok(())
    }

    /// Returns every outcome that has arrived so far, without waiting.
    pub fn drain(&mut self) -> Vec<Outcome> {
        let mut outcomes = Vec::new();
        while let Ok(outcome) = self.outcomes.try_recv() {
            outcomes.push(outcome);
        }
        outcomes
    }

    /// Waits for the next outcome. Returns `None` once the dispatcher and
    /// all its request tasks have finished.
    pub async fn recv(&mut self) -> Option<Outcome> {
        self.outcomes.recv().await
    }

    /// Asks the dispatcher to stop.
    pub fn shutdown(&self) {
        if self.commands.try_send(WorkerCommand::Shutdown).is_err() {
            tracing::debug!("sync worker already gone at shutdown");
        }
    }
}

/// Spawn the background dispatcher and return its handle.
///
/// Must be called from within a tokio runtime.
pub fn spawn_sync<A: TaskApi + 'static>(api: Arc<A>, capacity: usize) -> SyncHandle {
    let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>(capacity);
    let (out_tx, out_rx) = mpsc::channel::<Outcome>(capacity);

    tokio::spawn(async move {
        dispatcher(api, cmd_rx, out_tx).await;
    });

    SyncHandle {
        commands: cmd_tx,
        outcomes: out_rx,
    }
}

/// Queues requests on the dispatcher. Requests it does not accept are
/// applied to the controller as network failures, so the view reports them
/// instead of waiting on a response that will never come.
pub fn submit_or_fail(handle: &SyncHandle, controller: &mut Controller, requests: Vec<Request>) {
    let mut pending = requests;
    while !pending.is_empty() {
        let Err(rejected) = handle.submit(pending) else {
            return;
        };
        match rejected.reason {
            SyncError::Busy => tracing::warn!(%rejected, "request queue full"),
            SyncError::Closed => tracing::error!(%rejected, "sync worker stopped"),
        }
        let message = rejected.reason.to_string();
        pending = rejected
            .requests
            .into_iter()
            .flat_map(|request| {
                controller.apply(Outcome::failed(request, ApiError::Network(message.clone())))
            })
            .collect();
    }
}

/// Background task: run each incoming request on its own task.
async fn dispatcher<A: TaskApi + 'static>(
    api: Arc<A>,
    mut cmd_rx: mpsc::Receiver<WorkerCommand>,
    out_tx: mpsc::Sender<Outcome>,
) {
    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            WorkerCommand::Run(request) => {
                tracing::debug!(?request, "running request");
                let api = Arc::clone(&api);
                let out_tx = out_tx.clone();
                tokio::spawn(async move {
                    let outcome = execute(api.as_ref(), request).await;
                    if out_tx.send(outcome).await.is_err() {
                        // UI dropped; nothing left to report to.
                        tracing::debug!("outcome receiver closed");
                    }
                });
            }
            WorkerCommand::Shutdown => {
                tracing::info!("sync worker shutting down");
                break;
            }
        }
    }
}
