//! Process-local todo store for development and tests.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::DateTime;
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::backend::service::{BackendError, BackendResult, TodoService};
use crate::resilience::timeouts::Deadline;
use crate::todo::models::{
    ByIdRequest, Empty, ListOverdueRequest, ListRequest, Todo, TodoCreateRequest, TodoList,
};

const NOT_FOUND: &str = "todo not found";

/// In-memory `TodoService`. Clones share the same store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTodoService {
    todos: Arc<RwLock<BTreeMap<String, Todo>>>,
}

impl InMemoryTodoService {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn is_empty(&self) -> bool {
        self.todos.read().await.is_empty()
    }
}

fn page<'a>(matches: impl Iterator<Item = &'a Todo>, request: ListRequest) -> TodoList {
    let matches: Vec<&Todo> = matches.collect();
    let offset = request.page.saturating_sub(1).saturating_mul(request.limit);
    let todos = matches
        .iter()
        .skip(usize::try_from(offset).unwrap_or(usize::MAX))
        .take(usize::try_from(request.limit).unwrap_or(usize::MAX))
        .map(|todo| (*todo).clone())
        .collect();

    TodoList {
        todos,
        count: matches.len() as i64,
    }
}

/// Compare two timestamps, as RFC 3339 instants when both parse.
fn compare_timestamps(left: &str, right: &str) -> Ordering {
    match (DateTime::parse_from_rfc3339(left), DateTime::parse_from_rfc3339(right)) {
        (Ok(l), Ok(r)) => l.cmp(&r),
        _ => left.cmp(right),
    }
}

impl TodoService for InMemoryTodoService {
    fn create(
        &self,
        request: TodoCreateRequest,
        _deadline: Deadline,
    ) -> BoxFuture<'_, BackendResult<Todo>> {
        async move {
            let todo = Todo::from_request(Uuid::new_v4().to_string(), request);
            self.todos.write().await.insert(todo.id.clone(), todo.clone());
            Ok(todo)
        }
        .boxed()
    }

    fn get(&self, request: ByIdRequest, _deadline: Deadline) -> BoxFuture<'_, BackendResult<Todo>> {
        async move {
            self.todos
                .read()
                .await
                .get(&request.id)
                .cloned()
                .ok_or_else(|| BackendError::Rpc(NOT_FOUND.to_string()))
        }
        .boxed()
    }

    fn list(
        &self,
        request: ListRequest,
        _deadline: Deadline,
    ) -> BoxFuture<'_, BackendResult<TodoList>> {
        async move {
            let todos = self.todos.read().await;
            Ok(page(todos.values(), request))
        }
        .boxed()
    }

    fn list_overdue(
        &self,
        request: ListOverdueRequest,
        _deadline: Deadline,
    ) -> BoxFuture<'_, BackendResult<TodoList>> {
        async move {
            let todos = self.todos.read().await;
            let overdue = todos
                .values()
                .filter(|todo| {
                    compare_timestamps(&todo.deadline, &request.to_time) == Ordering::Less
                });
            Ok(page(overdue, request.list_page))
        }
        .boxed()
    }

    fn update(&self, todo: Todo, _deadline: Deadline) -> BoxFuture<'_, BackendResult<Todo>> {
        async move {
            let mut todos = self.todos.write().await;
            match todos.get_mut(&todo.id) {
                Some(existing) => {
                    *existing = todo.clone();
                    Ok(todo)
                }
                None => Err(BackendError::Rpc(NOT_FOUND.to_string())),
            }
        }
        .boxed()
    }

    fn delete(
        &self,
        request: ByIdRequest,
        _deadline: Deadline,
    ) -> BoxFuture<'_, BackendResult<Empty>> {
        async move {
            self.todos
                .write()
                .await
                .remove(&request.id)
                .map(|_| Empty {})
                .ok_or_else(|| BackendError::Rpc(NOT_FOUND.to_string()))
        }
        .boxed()
    }
}
