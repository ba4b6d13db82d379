//! Backend todo service subsystem.
//!
//! # Data Flow
//! ```text
//! Handler (translated request + Deadline)
//!     → service.rs (TodoService trait, the only thing handlers see)
//!     → rpc.rs (remote service over JSON RPC)      [backend.kind = "rpc"]
//!     → memory.rs (process-local store)            [backend.kind = "memory"]
//! ```
//!
//! # Design Decisions
//! - Handlers hold `Arc<dyn TodoService>` and never name a concrete backend
//! - Every operation takes the caller's deadline explicitly

pub mod memory;
pub mod rpc;
pub mod service;

use std::sync::Arc;
use std::time::Duration;

pub use memory::InMemoryTodoService;
pub use rpc::RpcTodoClient;
pub use service::{BackendError, BackendResult, TodoService};

use crate::config::{BackendConfig, BackendKind, TimeoutConfig};

/// Build the backend selected by configuration.
pub fn from_config(
    backend: &BackendConfig,
    timeouts: &TimeoutConfig,
) -> BackendResult<Arc<dyn TodoService>> {
    match backend.kind {
        BackendKind::Rpc => {
            let connect_timeout = Duration::from_secs(timeouts.connect_secs);
            let client = RpcTodoClient::new(&backend.endpoint, connect_timeout)?;
            tracing::info!(endpoint = %client.endpoint(), "Using remote todo service");
            Ok(Arc::new(client))
        }
        BackendKind::Memory => {
            tracing::warn!("Using in-memory todo service; data is lost on restart");
            Ok(Arc::new(InMemoryTodoService::new()))
        }
    }
}
