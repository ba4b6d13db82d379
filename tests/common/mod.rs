//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use axum::Router;
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use http_body_util::BodyExt;
use serde::Serialize;
use tokio::net::TcpListener;

use todo_gateway::backend::{BackendError, BackendResult, TodoService};
use todo_gateway::config::GatewayConfig;
use todo_gateway::http::server::AppState;
use todo_gateway::resilience::Deadline;
use todo_gateway::routing::{Operation, RouteTable};
use todo_gateway::todo::{
    ByIdRequest, Empty, ListOverdueRequest, ListRequest, Todo, TodoCreateRequest, TodoList,
};
use todo_gateway::HttpServer;

pub const CREATE_BODY: &str = r#"{"assignee":"alice","title":"t","summary":"s","deadline":"2024-01-01T00:00:00Z","status":"open"}"#;

/// How a `FakeService` answers every call.
#[derive(Debug, Clone)]
pub enum Behavior {
    /// Echo the request back, assigning id "1" on create.
    Echo,
    /// Fail every call with this backend message.
    Fail(String),
    /// Never answer. Sets `cancelled` when the pending call is dropped.
    Hang,
}

/// Programmable `TodoService` that records what it was asked.
pub struct FakeService {
    behavior: Behavior,
    calls: AtomicUsize,
    last_request: Mutex<Option<(&'static str, serde_json::Value)>>,
    cancelled: Arc<AtomicBool>,
}

struct DropFlag(Arc<AtomicBool>);

impl Drop for DropFlag {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

impl FakeService {
    pub fn new(behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
            cancelled: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Operation name and JSON form of the most recent request.
    pub fn last_request(&self) -> Option<(&'static str, serde_json::Value)> {
        self.last_request.lock().unwrap().clone()
    }

    pub fn was_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    fn answer<'a, T, Req>(
        &'a self,
        operation: &'static str,
        request: &Req,
        echo: T,
    ) -> BoxFuture<'a, BackendResult<T>>
    where
        T: Send + 'a,
        Req: Serialize,
    {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let payload = serde_json::to_value(request).unwrap();
        *self.last_request.lock().unwrap() = Some((operation, payload));

        match &self.behavior {
            Behavior::Echo => async move { Ok(echo) }.boxed(),
            Behavior::Fail(message) => {
                let message = message.clone();
                async move { Err(BackendError::Rpc(message)) }.boxed()
            }
            Behavior::Hang => {
                let flag = DropFlag(self.cancelled.clone());
                async move {
                    let _flag = flag;
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Ok(echo)
                }
                .boxed()
            }
        }
    }
}

pub fn sample_todo(id: &str) -> Todo {
    Todo {
        id: id.to_string(),
        assignee: "alice".into(),
        title: "t".into(),
        summary: "s".into(),
        deadline: "2024-01-01T00:00:00Z".into(),
        status: "open".into(),
    }
}

impl TodoService for FakeService {
    fn create(
        &self,
        request: TodoCreateRequest,
        _deadline: Deadline,
    ) -> BoxFuture<'_, BackendResult<Todo>> {
        let echo = Todo::from_request("1", request.clone());
        self.answer("create", &request, echo)
    }

    fn get(&self, request: ByIdRequest, _deadline: Deadline) -> BoxFuture<'_, BackendResult<Todo>> {
        let echo = sample_todo(&request.id);
        self.answer("get", &request, echo)
    }

    fn list(
        &self,
        request: ListRequest,
        _deadline: Deadline,
    ) -> BoxFuture<'_, BackendResult<TodoList>> {
        let echo = TodoList {
            todos: vec![sample_todo("1")],
            count: 42,
        };
        self.answer("list", &request, echo)
    }

    fn list_overdue(
        &self,
        request: ListOverdueRequest,
        _deadline: Deadline,
    ) -> BoxFuture<'_, BackendResult<TodoList>> {
        let echo = TodoList {
            todos: vec![sample_todo("1")],
            count: 1,
        };
        self.answer("list_overdue", &request, echo)
    }

    fn update(&self, todo: Todo, _deadline: Deadline) -> BoxFuture<'_, BackendResult<Todo>> {
        let echo = todo.clone();
        self.answer("update", &todo, echo)
    }

    fn delete(
        &self,
        request: ByIdRequest,
        _deadline: Deadline,
    ) -> BoxFuture<'_, BackendResult<Empty>> {
        self.answer("delete", &request, Empty {})
    }
}

/// Gateway router over `service` with the given operations enabled.
pub fn app(service: Arc<dyn TodoService>, enabled: &[Operation], call_timeout: Duration) -> Router {
    let config = GatewayConfig::default();
    HttpServer::build_router(
        &config,
        &RouteTable::new(enabled.iter().copied()),
        AppState::new(service, call_timeout),
    )
}

/// Gateway router with the default route table.
pub fn default_app(service: Arc<dyn TodoService>) -> Router {
    HttpServer::new(GatewayConfig::default(), service).router()
}

pub fn request(method: &str, uri: &str) -> Request<Body> {
    Request::builder().method(method).uri(uri).body(Body::empty()).unwrap()
}

pub fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_string(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

/// Serve `router` on an ephemeral local port.
pub async fn serve(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    addr
}
