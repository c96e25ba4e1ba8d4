//! REST implementation of [`TaskApi`] over `reqwest`.
//!
//! Endpoints are resolved relative to the configured base URL, so a base of
//! `http://localhost:5000/api` yields `http://localhost:5000/api/tasks`.

use reqwest::{Client, Response, StatusCode};
use url::Url;

use taskdeck_proto::codec;
use taskdeck_proto::query::ListQuery;
use taskdeck_proto::task::{Stats, Task, TaskDraft, TaskId, TaskUpdate};

use super::{ApiError, TaskApi};
use crate::config::ApiConfig;

/// Task API client speaking JSON over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    client: Client,
    base_url: Url,
}

impl HttpTaskApi {
    /// Creates a client for the configured base URL.
    #[must_use]
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.clone(),
        }
    }

    /// The base URL requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Base URLs are validated as hierarchical when the config is built.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Reads a response body, mapping non-2xx statuses to [`ApiError`].
    async fn body(response: Result<Response, reqwest::Error>) -> Result<Vec<u8>, ApiError> {
        let response = response.map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if status.is_success() {
            Ok(bytes.to_vec())
        } else {
            let err = status_error(status, &bytes);
            tracing::debug!(status = status.as_u16(), error = %err, "task api request failed");
            Err(err)
        }
    }
}

/// Maps a non-2xx status and its body to the matching [`ApiError`].
fn status_error(status: StatusCode, body: &[u8]) -> ApiError {
    let message = codec::error_message(body);
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            ApiError::Validation { message }
        }
        StatusCode::NOT_FOUND => ApiError::NotFound { message },
        other => ApiError::Server {
            status: other.as_u16(),
            message,
        },
    }
}

fn invalid(e: &codec::CodecError) -> ApiError {
    ApiError::InvalidResponse(e.to_string())
}

impl TaskApi for HttpTaskApi {
    async fn list_tasks(&self, query: &ListQuery) -> Result<Vec<Task>, ApiError> {
        let url = self.endpoint(&["tasks"]);
        tracing::debug!(%url, filter = %query.filter, sort = %query.sort, "GET tasks");
        let response = self.client.get(url).query(&query.pairs()).send().await;
        let bytes = Self::body(response).await?;
        codec::decode_tasks(&bytes).map_err(|e| invalid(&e))
    }

    async fn stats(&self) -> Result<Stats, ApiError> {
        let url = self.endpoint(&["stats"]);
        tracing::debug!(%url, "GET stats");
        let response = self.client.get(url).send().await;
        let bytes = Self::body(response).await?;
        codec::decode_stats(&bytes).map_err(|e| invalid(&e))
    }

    async fn create_task(&self, draft: &TaskDraft) -> Result<Task, ApiError> {
        let url = self.endpoint(&["tasks"]);
        tracing::debug!(%url, "POST task");
        let response = self.client.post(url).json(draft).send().await;
        let bytes = Self::body(response).await?;
        codec::decode_task(&bytes).map_err(|e| invalid(&e))
    }

    async fn update_task(&self, id: &TaskId, update: &TaskUpdate) -> Result<Task, ApiError> {
        let url = self.endpoint(&["tasks", id.as_str()]);
        tracing::debug!(%url, "PUT task");
        let response = self.client.put(url).json(update).send().await;
        let bytes = Self::body(response).await?;
        codec::decode_task(&bytes).map_err(|e| invalid(&e))
    }

    async fn delete_task(&self, id: &TaskId) -> Result<(), ApiError> {
        let url = self.endpoint(&["tasks", id.as_str()]);
        tracing::debug!(%url, "DELETE task");
        let response = self.client.delete(url).send().await;
        Self::body(response).await.map(|_| ())
    }
}
