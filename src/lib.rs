//! REST gateway for the todo RPC service.

pub mod backend;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod routing;
pub mod todo;

pub use backend::TodoService;
pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
