//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to backend:
//!     → timeouts.rs (deadline per call, cancel on expiry)
//!     → failure surfaces to the caller immediately
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every backend call has a deadline
//! - No retries: a failed call is reported to the HTTP client as-is

pub mod timeouts;

pub use timeouts::{with_deadline, Deadline};
