//! The todo service capability the gateway is written against.

use std::time::Duration;

use futures_util::future::BoxFuture;
use thiserror::Error;

use crate::resilience::timeouts::Deadline;
use crate::todo::models::{
    ByIdRequest, Empty, ListOverdueRequest, ListRequest, Todo, TodoCreateRequest, TodoList,
};

/// Errors surfaced by a backend call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The service answered with a failure. The message is its own text.
    #[error("{0}")]
    Rpc(String),

    /// The call did not finish before its deadline and was cancelled.
    #[error("context deadline exceeded after {0:?}")]
    DeadlineExceeded(Duration),

    /// The service could not be reached.
    #[error("transport error: {0}")]
    Transport(String),

    /// The service answered with something that is not the expected shape.
    #[error("invalid backend response: {0}")]
    InvalidResponse(String),
}

/// Result type for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;

/// The six todo operations, each bounded by the caller's deadline.
///
/// Implementations must be cheap to share (`Arc<dyn TodoService>`) and must
/// tolerate their futures being dropped part way through.
pub trait TodoService: Send + Sync {
    fn create(
        &self,
        request: TodoCreateRequest,
        deadline: Deadline,
    ) -> BoxFuture<'_, BackendResult<Todo>>;

    fn get(&self, request: ByIdRequest, deadline: Deadline) -> BoxFuture<'_, BackendResult<Todo>>;

    fn list(
        &self,
        request: ListRequest,
        deadline: Deadline,
    ) -> BoxFuture<'_, BackendResult<TodoList>>;

    fn list_overdue(
        &self,
        request: ListOverdueRequest,
        deadline: Deadline,
    ) -> BoxFuture<'_, BackendResult<TodoList>>;

    fn update(&self, todo: Todo, deadline: Deadline) -> BoxFuture<'_, BackendResult<Todo>>;

    fn delete(
        &self,
        request: ByIdRequest,
        deadline: Deadline,
    ) -> BoxFuture<'_, BackendResult<Empty>>;
}
