//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     RoutesConfig.enabled
//!     → table.rs (filter the static ROUTES list)
//!     → Axum Router with one MethodRouter per path
//!
//! Request:
//!     method + path → mounted handler, or 404/405 fallback
//! ```
//!
//! # Design Decisions
//! - Routes are fixed at startup, immutable at runtime
//! - The table is the only place that lists the operations
//! - Turning an operation on or off is a configuration change

pub mod table;

pub use table::{Operation, RouteSpec, RouteTable, ROUTES};
