//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router from the route table
//! - Wire up middleware (tracing, body limit, request ID)
//! - Answer unmatched paths and methods with JSON errors
//! - Bind server to listener
//! - Stop accepting on shutdown and drain in-flight requests

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::http::{Method, Request, StatusCode, Uri};
use axum::response::Response;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::backend::TodoService;
use crate::config::GatewayConfig;
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::http::response::error_response;
use crate::resilience::timeouts::Deadline;
use crate::routing::RouteTable;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<dyn TodoService>,
    pub call_timeout: Duration,
}

impl AppState {
    pub fn new(service: Arc<dyn TodoService>, call_timeout: Duration) -> Self {
        Self { service, call_timeout }
    }

    /// A fresh deadline for one backend call.
    pub fn deadline(&self) -> Deadline {
        Deadline::after(self.call_timeout)
    }
}

/// HTTP server for the todo gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and backend.
    pub fn new(config: GatewayConfig, service: Arc<dyn TodoService>) -> Self {
        let state = AppState::new(service, Duration::from_secs(config.timeouts.ctx_timeout_secs));
        let routes = RouteTable::new(config.routes.enabled.iter().copied());
        let router = Self::build_router(&config, &routes, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    pub fn build_router(config: &GatewayConfig, routes: &RouteTable, state: AppState) -> Router {
        routes
            .into_router()
            .fallback(not_found)
            .method_not_allowed_fallback(method_not_allowed)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(set_request_id_layer())
                    .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                        tracing::info_span!(
                            "request",
                            method = %request.method(),
                            path = %request.uri().path(),
                            request_id = %request_id(request),
                        )
                    }))
                    .layer(propagate_request_id_layer())
                    .layer(DefaultBodyLimit::max(config.listener.max_body_size)),
            )
    }

    /// The fully layered router, e.g. for driving with `tower::ServiceExt`.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until a shutdown signal arrives.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            enabled_routes = ?self.config.routes.enabled,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server draining");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn not_found(method: Method, uri: Uri) -> Response {
    tracing::warn!(method = %method, path = %uri.path(), "No route matched");
    error_response(StatusCode::NOT_FOUND, format!("no route for {} {}", method, uri.path()))
}

async fn method_not_allowed(method: Method, uri: Uri) -> Response {
    tracing::warn!(method = %method, path = %uri.path(), "Method not enabled for route");
    error_response(
        StatusCode::METHOD_NOT_ALLOWED,
        format!("method {} not allowed for {}", method, uri.path()),
    )
}
