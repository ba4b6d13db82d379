//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → routing::table (enabled operation → handler)
//!     → todo::handlers (translate, call backend)
//!     → response.rs (status + JSON body, failure logging)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::X_REQUEST_ID;
pub use response::{respond, GatewayError};
pub use server::{AppState, HttpServer};
