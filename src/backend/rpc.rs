//! JSON RPC client for the remote todo service.
//!
//! # Responsibilities
//! - Encode each operation as `POST {endpoint}/todo.TodoService/{Method}`
//! - Bound every call by the caller's deadline
//! - Translate transport and service failures into `BackendError`
//!
//! # Design Decisions
//! - The service's own error text is passed through untouched
//! - Connection pooling is left to reqwest

use std::time::Duration;

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::backend::service::{BackendError, BackendResult, TodoService};
use crate::resilience::timeouts::Deadline;
use crate::todo::models::{
    ByIdRequest, Empty, ListOverdueRequest, ListRequest, Todo, TodoCreateRequest, TodoList,
};

/// Service name used as the path prefix of every method.
pub const SERVICE_NAME: &str = "todo.TodoService";

/// Header carrying the remaining call budget in milliseconds.
pub const DEADLINE_HEADER: &str = "x-request-deadline-ms";

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Remote todo service client.
#[derive(Debug, Clone)]
pub struct RpcTodoClient {
    client: reqwest::Client,
    endpoint: String,
}

impl RpcTodoClient {
    /// Create a client for the service at `endpoint`.
    pub fn new(endpoint: &str, connect_timeout: Duration) -> BackendResult<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        Ok(Self::with_client(client, endpoint))
    }

    /// Create a client reusing an existing reqwest client.
    pub fn with_client(client: reqwest::Client, endpoint: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{}/{}", self.endpoint, SERVICE_NAME, method)
    }

    async fn call<Req, Resp>(
        &self,
        method: &'static str,
        request: &Req,
        deadline: Deadline,
    ) -> BackendResult<Resp>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let remaining = deadline.remaining();
        if remaining.is_zero() {
            return Err(BackendError::DeadlineExceeded(deadline.budget()));
        }

        tracing::debug!(
            method,
            remaining_ms = remaining.as_millis() as u64,
            "Calling todo service"
        );

        let response = self
            .client
            .post(self.method_url(method))
            .timeout(remaining)
            .header(DEADLINE_HEADER, remaining.as_millis().to_string())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    BackendError::DeadlineExceeded(deadline.budget())
                } else {
                    BackendError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                BackendError::DeadlineExceeded(deadline.budget())
            } else {
                BackendError::Transport(e.to_string())
            }
        })?;

        if !status.is_success() {
            let message = match serde_json::from_slice::<ErrorBody>(&body) {
                Ok(err) => err.error,
                Err(_) if body.is_empty() => format!("todo service returned {}", status),
                Err(_) => String::from_utf8_lossy(&body).into_owned(),
            };
            return Err(BackendError::Rpc(message));
        }

        serde_json::from_slice(&body).map_err(|e| BackendError::InvalidResponse(e.to_string()))
    }
}

impl TodoService for RpcTodoClient {
    fn create(
        &self,
        request: TodoCreateRequest,
        deadline: Deadline,
    ) -> BoxFuture<'_, BackendResult<Todo>> {
        async move { self.call("Create", &request, deadline).await }.boxed()
    }

    fn get(&self, request: ByIdRequest, deadline: Deadline) -> BoxFuture<'_, BackendResult<Todo>> {
        async move { self.call("Get", &request, deadline).await }.boxed()
    }

    fn list(
        &self,
        request: ListRequest,
        deadline: Deadline,
    ) -> BoxFuture<'_, BackendResult<TodoList>> {
        async move { self.call("List", &request, deadline).await }.boxed()
    }

    fn list_overdue(
        &self,
        request: ListOverdueRequest,
        deadline: Deadline,
    ) -> BoxFuture<'_, BackendResult<TodoList>> {
        async move { self.call("ListOverdue", &request, deadline).await }.boxed()
    }

    fn update(&self, todo: Todo, deadline: Deadline) -> BoxFuture<'_, BackendResult<Todo>> {
        async move { self.call("Update", &todo, deadline).await }.boxed()
    }

    fn delete(
        &self,
        request: ByIdRequest,
        deadline: Deadline,
    ) -> BoxFuture<'_, BackendResult<Empty>> {
        async move { self.call("Delete", &request, deadline).await }.boxed()
    }
}
