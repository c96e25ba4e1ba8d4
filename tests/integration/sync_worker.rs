//! Integration tests for the background sync worker.
//!
//! Tests that `spawn_sync` runs requests off the UI thread and streams their
//! outcomes back through `SyncHandle`, the way the terminal loop uses it.
//!
//! These tests validate:
//! - Submitted requests produce outcomes the controller can apply
//! - Follow-up requests from `apply` round-trip through the same handle
//! - `drain` never blocks
//! - Shutdown closes the outcome stream and rejects further requests
//! - Requests a full or closed queue refuses become view errors

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use taskdeck::api::memory::{MemoryTaskApi, Operation};
use taskdeck::controller::{
    Command, Controller, DraftEdit, FETCH_FAILED, Outcome, Request, SAVE_FAILED,
};
use taskdeck::sync::{SyncError, SyncHandle, spawn_sync, submit_or_fail};

const TIMEOUT: Duration = Duration::from_secs(5);

async fn next_outcome(handle: &mut SyncHandle) -> Outcome {
    tokio::time::timeout(TIMEOUT, handle.recv())
        .await
        .expect("timeout waiting for outcome")
        .expect("outcome channel closed unexpectedly")
}

/// Runs requests through the worker until nothing is left in flight.
async fn pump(controller: &mut Controller, handle: &mut SyncHandle, command: Command) {
    let requests = controller.dispatch(command);
    let mut outstanding = requests.len();
    handle.submit(requests).unwrap();
    while outstanding > 0 {
        let outcome = next_outcome(handle).await;
        outstanding -= 1;
        let follow_ups = controller.apply(outcome);
        outstanding += follow_ups.len();
        handle.submit(follow_ups).unwrap();
    }
}

// =============================================================================
// Request / outcome flow
// =============================================================================

#[tokio::test]
async fn refresh_round_trips_through_worker() {
    let api = Arc::new(MemoryTaskApi::new());
    let mut handle = spawn_sync(Arc::clone(&api), 16);
    let mut controller = Controller::new();

    pump(&mut controller, &mut handle, Command::Refresh).await;

    assert!(!controller.state().loading);
    assert!(controller.state().error.is_empty());
    assert_eq!(api.call_count(Operation::List), 1);
    assert_eq!(api.call_count(Operation::Stats), 1);
}

#[tokio::test]
async fn create_follow_up_refresh_runs_on_worker() {
    let api = Arc::new(MemoryTaskApi::new());
    let mut handle = spawn_sync(Arc::clone(&api), 16);
    let mut controller = Controller::new();

    pump(&mut controller, &mut handle, Command::Refresh).await;
    controller.dispatch(Command::EditDraft(DraftEdit::Title("Buy milk".to_string())));
    pump(&mut controller, &mut handle, Command::Submit).await;

    assert_eq!(controller.state().tasks.len(), 1);
    assert_eq!(controller.state().tasks[0].title, "Buy milk");
    assert_eq!(controller.state().stats.pending, 1);
    assert_eq!(api.call_count(Operation::List), 2);
}

#[tokio::test]
async fn drain_is_empty_without_requests() {
    let api = Arc::new(MemoryTaskApi::new());
    let mut handle = spawn_sync(api, 4);
    assert!(handle.drain().is_empty());
}

#[tokio::test]
async fn drain_collects_finished_outcomes() {
    let api = Arc::new(MemoryTaskApi::new());
    let mut handle = spawn_sync(Arc::clone(&api), 16);
    let mut controller = Controller::new();

    handle
        .submit(controller.dispatch(Command::Refresh))
        .unwrap();

    let mut outcomes = Vec::new();
    let deadline = tokio::time::Instant::now() + TIMEOUT;
    while outcomes.len() < 2 && tokio::time::Instant::now() < deadline {
        outcomes.extend(handle.drain());
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(outcomes.len(), 2);

    for outcome in outcomes {
        assert!(controller.apply(outcome).is_empty());
    }
    assert!(!controller.state().loading);
}

// =============================================================================
// Shutdown
// =============================================================================

#[tokio::test]
async fn shutdown_closes_worker() {
    let api = Arc::new(MemoryTaskApi::new());
    let mut handle = spawn_sync(api, 4);

    handle.shutdown();

    let closed = tokio::time::timeout(TIMEOUT, handle.recv())
        .await
        .expect("timeout waiting for worker to stop");
    assert!(closed.is_none());

    let mut controller = Controller::new();
    let requests = controller.dispatch(Command::Refresh);
    let rejected = handle.submit(requests.clone()).unwrap_err();
    assert_eq!(rejected.reason, SyncError::Closed);
    assert_eq!(rejected.requests, requests);

    // Rejected requests surface as failures instead of a stuck spinner.
    let requests = controller.dispatch(Command::Refresh);
    submit_or_fail(&handle, &mut controller, requests);
    assert!(!controller.state().loading);
    assert_eq!(controller.state().error, FETCH_FAILED);
}

// =============================================================================
// Full queue
// =============================================================================

#[tokio::test]
async fn full_queue_returns_every_unqueued_request() {
    let api = Arc::new(MemoryTaskApi::new());
    let handle = spawn_sync(api, 1);
    let mut controller = Controller::new();

    // The current-thread test runtime does not run the dispatcher until this
    // task yields, so the single slot stays taken.
    let requests = controller.dispatch(Command::Refresh);
    let rejected = handle.submit(requests.clone()).unwrap_err();
    assert_eq!(rejected.reason, SyncError::Busy);
    assert_eq!(rejected.requests, requests[1..].to_vec());
}

#[tokio::test]
async fn full_queue_fails_list_fetch_and_clears_loading() {
    let api = Arc::new(MemoryTaskApi::new());
    let mut handle = spawn_sync(Arc::clone(&api), 1);
    let mut controller = Controller::new();

    // Take the only slot with a request the controller will treat as stale.
    handle.submit(vec![Request::Stats { seq: 0 }]).unwrap();

    let requests = controller.dispatch(Command::Refresh);
    submit_or_fail(&handle, &mut controller, requests);

    assert!(!controller.state().loading);
    assert_eq!(controller.state().error, FETCH_FAILED);

    // The stale stats outcome still arrives and changes nothing.
    let outcome = next_outcome(&mut handle).await;
    assert!(controller.apply(outcome).is_empty());
    assert_eq!(controller.state().error, FETCH_FAILED);
    assert_eq!(api.call_count(Operation::List), 0);
}

#[tokio::test]
async fn full_queue_fails_save_and_keeps_draft() {
    let api = Arc::new(MemoryTaskApi::new());
    let handle = spawn_sync(Arc::clone(&api), 1);
    let mut controller = Controller::new();

    handle.submit(vec![Request::Stats { seq: 0 }]).unwrap();

    controller.dispatch(Command::EditDraft(DraftEdit::Title("Buy milk".to_string())));
    let requests = controller.dispatch(Command::Submit);
    submit_or_fail(&handle, &mut controller, requests);

    assert_eq!(controller.state().error, SAVE_FAILED);
    assert_eq!(controller.state().draft.title, "Buy milk");
    assert_eq!(api.call_count(Operation::Create), 0);
}
