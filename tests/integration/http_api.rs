//! Integration tests for the REST task client.
//!
//! Runs `HttpTaskApi` against a wiremock server and checks the wire contract:
//! - `GET /tasks` carries `completed` / `sort` only when they narrow the query
//! - create and edit bodies carry the form fields
//! - a completion toggle echoes the whole task with the flag inverted
//! - non-2xx statuses map to `ApiError` variants, keeping the server message
//! - transport and decode failures surface as their own variants

#![allow(clippy::expect_used, clippy::unwrap_used)]

use serde_json::{Value, json};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use taskdeck::api::http::HttpTaskApi;
use taskdeck::api::{ApiError, TaskApi};
use taskdeck::config::ApiConfig;
use taskdeck_proto::query::{Filter, ListQuery, SortKey};
use taskdeck_proto::task::{Priority, TaskDraft, TaskId, TaskUpdate};

fn client(server: &MockServer) -> HttpTaskApi {
    let config = ApiConfig::parse(&format!("{}/api", server.uri()), 8).unwrap();
    HttpTaskApi::new(&config)
}

fn task_json(id: &str, title: &str, completed: bool) -> Value {
    json!({
        "_id": id,
        "title": title,
        "description": "",
        "priority": "high",
        "completed": completed,
        "createdAt": "2024-03-01T09:30:00Z",
        "updatedAt": "2024-03-01T09:30:00Z",
    })
}

// =============================================================================
// Listing and stats
// =============================================================================

#[tokio::test]
async fn list_sends_completed_and_sort_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .and(query_param("completed", "true"))
        .and(query_param("sort", "title"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([task_json("1", "Done", true)])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let tasks = client(&server)
        .list_tasks(&ListQuery::new(Filter::Completed, SortKey::Title))
        .await
        .unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, TaskId::new("1"));
    assert!(tasks[0].completed);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), Some("completed=true&sort=title"));
}

#[tokio::test]
async fn list_pending_sends_completed_false() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    client(&server)
        .list_tasks(&ListQuery::new(Filter::Pending, SortKey::Priority))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), Some("completed=false&sort=priority"));
}

#[tokio::test]
async fn default_list_sends_no_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let tasks = client(&server)
        .list_tasks(&ListQuery::default())
        .await
        .unwrap();
    assert!(tasks.is_empty());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test]
async fn stats_are_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/stats"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"total": 5, "completed": 2, "pending": 3})),
        )
        .mount(&server)
        .await;

    let stats = client(&server).stats().await.unwrap();
    assert_eq!(stats.total, 5);
    assert_eq!(stats.completed, 2);
    assert_eq!(stats.pending, 3);
}

// =============================================================================
// Mutations
// =============================================================================

#[tokio::test]
async fn create_posts_form_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tasks"))
        .and(body_json(json!({
            "title": "Buy milk",
            "description": "",
            "priority": "high",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(task_json("9", "Buy milk", false)))
        .expect(1)
        .mount(&server)
        .await;

    let draft = TaskDraft {
        title: "Buy milk".to_string(),
        description: String::new(),
        priority: Priority::High,
    };
    let task = client(&server).create_task(&draft).await.unwrap();
    assert_eq!(task.id, TaskId::new("9"));
    assert_eq!(task.priority, Priority::High);
}

#[tokio::test]
async fn edit_puts_form_fields_to_task_path() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/tasks/7"))
        .and(body_json(json!({
            "title": "Renamed",
            "description": "notes",
            "priority": "low",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(task_json("7", "Renamed", false)))
        .expect(1)
        .mount(&server)
        .await;

    let update = TaskUpdate::Fields(TaskDraft {
        title: "Renamed".to_string(),
        description: "notes".to_string(),
        priority: Priority::Low,
    });
    let task = client(&server)
        .update_task(&TaskId::new("7"), &update)
        .await
        .unwrap();
    assert_eq!(task.title, "Renamed");
}

#[tokio::test]
async fn toggle_echoes_full_task_with_flag_inverted() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/tasks/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(task_json("1", "Walk", true)))
        .mount(&server)
        .await;

    let original: taskdeck_proto::task::Task =
        serde_json::from_value(task_json("1", "Walk", false)).unwrap();
    client(&server)
        .update_task(&original.id, &TaskUpdate::toggled(&original))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["_id"], "1");
    assert_eq!(body["title"], "Walk");
    assert_eq!(body["priority"], "high");
    assert_eq!(body["completed"], true);
    assert_eq!(body["createdAt"], "2024-03-01T09:30:00Z");
}

#[tokio::test]
async fn delete_accepts_empty_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/tasks/3"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .delete_task(&TaskId::new("3"))
        .await
        .unwrap();
}

// =============================================================================
// Failure mapping
// =============================================================================

#[tokio::test]
async fn validation_error_keeps_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tasks"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "Title is required"})),
        )
        .mount(&server)
        .await;

    let err = client(&server)
        .create_task(&TaskDraft::default())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ApiError::Validation {
            message: Some("Title is required".to_string())
        }
    );
    assert_eq!(err.server_message(), Some("Title is required"));
}

#[tokio::test]
async fn missing_task_maps_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/tasks/404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "Task not found"})))
        .mount(&server)
        .await;

    let err = client(&server)
        .delete_task(&TaskId::new("404"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound { .. }));
}

#[tokio::test]
async fn server_error_without_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client(&server)
        .list_tasks(&ListQuery::default())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ApiError::Server {
            status: 500,
            message: None
        }
    );
}

#[tokio::test]
async fn malformed_success_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client(&server).stats().await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidResponse(_)));
}

#[tokio::test]
async fn unreachable_server_is_network_error() {
    // Bind then drop a listener so the port is known to be closed.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = ApiConfig::parse(&format!("http://{addr}/api"), 8).unwrap();
    let err = HttpTaskApi::new(&config).stats().await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
}
