//! Todo translation subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP request (path, query, JSON body)
//!     → query.rs (page/limit parsing)
//!     → translate.rs (build backend request value)
//!     → handlers.rs (one backend call under a deadline)
//!     → http::response (status + JSON body)
//! ```

pub mod handlers;
pub mod models;
pub mod query;
pub mod translate;

pub use models::{
    ByIdRequest, Empty, ListOverdueRequest, ListRequest, Todo, TodoCreateRequest, TodoList,
};
pub use query::{parse_pagination, Pagination};
