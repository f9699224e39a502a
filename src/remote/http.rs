//! HTTP adapter for the agency backend's REST API.

use super::{ApiEnvelope, RemoteError, RemoteResult};
use crate::attachment::LocalFile;
use crate::comment::{Comment, CommentApi, NewComment};
use crate::config::BoardConfig;
use crate::task::{
    domain::{Executor, NewTask, Task, TaskId, TaskUpdate, UserId},
    ports::{ExecutorDirectory, TaskApi},
};
use async_trait::async_trait;
use reqwest::{
    Method, RequestBuilder, StatusCode,
    multipart::{Form, Part},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

/// Backend client implementing every remote port over HTTP/JSON.
///
/// Ordinary requests use the configured request timeout; comment
/// submissions use the longer upload timeout.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
    upload_timeout: Duration,
}

impl HttpBackend {
    /// Builds a client from the board configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Transport`] when the HTTP client cannot be
    /// initialised.
    pub fn new(config: &BoardConfig) -> RemoteResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(RemoteError::transport)?;
        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_owned(),
            token: config.api_token.clone(),
            upload_timeout: config.upload_timeout(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn envelope<T>(&self, request: RequestBuilder) -> RemoteResult<ApiEnvelope<T>>
    where
        T: DeserializeOwned,
    {
        let response = request.send().await.map_err(classify_transport)?;
        let status = response.status();
        let body = response.bytes().await.map_err(classify_transport)?;
        decode_envelope(status, &body)
    }

    async fn fetch<T>(&self, request: RequestBuilder) -> RemoteResult<T>
    where
        T: DeserializeOwned,
    {
        self.envelope::<T>(request).await?.into_result()
    }
}

/// Maps a client error, keeping timeouts distinct.
fn classify_transport(err: reqwest::Error) -> RemoteError {
    if err.is_timeout() {
        RemoteError::Timeout
    } else {
        RemoteError::transport(err)
    }
}

/// Decodes a response body into an envelope.
///
/// Error statuses whose body is not an envelope are reported as rejections
/// without a server message.
fn decode_envelope<T>(status: StatusCode, body: &[u8]) -> RemoteResult<ApiEnvelope<T>>
where
    T: DeserializeOwned,
{
    match serde_json::from_slice::<ApiEnvelope<T>>(body) {
        Ok(envelope) => Ok(envelope),
        Err(_) if !status.is_success() => {
            tracing::debug!(%status, "error status without an envelope");
            Err(RemoteError::Rejected { message: None })
        }
        Err(err) => Err(RemoteError::Decode(err.to_string())),
    }
}

fn tasks_path(assignee: Option<UserId>) -> String {
    assignee.map_or_else(
        || "tasks".to_owned(),
        |user| format!("tasks?assignee_id={user}"),
    )
}

fn file_part(file: &LocalFile) -> RemoteResult<Part> {
    Part::bytes(file.bytes().to_vec())
        .file_name(file.name().to_owned())
        .mime_str(file.mime())
        .map_err(RemoteError::transport)
}

fn comment_form(comment: &NewComment) -> RemoteResult<Form> {
    let internal = if comment.is_internal { "1" } else { "0" };
    comment.files.iter().try_fold(
        Form::new()
            .text("text", comment.body.clone())
            .text("is_internal", internal),
        |form, file| Ok(form.part("files[]", file_part(file)?)),
    )
}

#[async_trait]
impl TaskApi for HttpBackend {
    async fn list_tasks(&self, assignee: Option<UserId>) -> RemoteResult<Vec<Task>> {
        self.fetch(self.request(Method::GET, &tasks_path(assignee)))
            .await
    }

    async fn get_task(&self, id: TaskId) -> RemoteResult<Task> {
        self.fetch(self.request(Method::GET, &format!("tasks/{id}")))
            .await
    }

    async fn create_task(&self, task: &NewTask) -> RemoteResult<Task> {
        self.fetch(self.request(Method::POST, "tasks").json(task))
            .await
    }

    async fn update_task(&self, id: TaskId, update: &TaskUpdate) -> RemoteResult<Task> {
        self.fetch(
            self.request(Method::PATCH, &format!("tasks/{id}"))
                .json(update),
        )
        .await
    }

    async fn delete_task(&self, id: TaskId) -> RemoteResult<()> {
        self.envelope::<Value>(self.request(Method::DELETE, &format!("tasks/{id}")))
            .await?
            .into_unit()
    }
}

#[async_trait]
impl CommentApi for HttpBackend {
    async fn list_comments(&self, task_id: TaskId) -> RemoteResult<Vec<Comment>> {
        self.fetch(self.request(Method::GET, &format!("tasks/{task_id}/comments")))
            .await
    }

    async fn create_comment(
        &self,
        task_id: TaskId,
        comment: &NewComment,
    ) -> RemoteResult<Comment> {
        let form = comment_form(comment)?;
        self.fetch(
            self.request(Method::POST, &format!("tasks/{task_id}/comments"))
                .timeout(self.upload_timeout)
                .multipart(form),
        )
        .await
    }
}

#[async_trait]
impl ExecutorDirectory for HttpBackend {
    async fn list_executors(&self) -> RemoteResult<Vec<Executor>> {
        let executors: Vec<Executor> = self
            .fetch(self.request(Method::GET, "users/executors"))
            .await?;
        Ok(executors
            .into_iter()
            .filter(|executor| executor.is_active)
            .collect())
    }
}
