//! Declarative route table.
//!
//! # Responsibilities
//! - Enumerate every operation with its method and path
//! - Record which operations are exposed
//! - Mount the exposed ones on an Axum router
//!
//! # Design Decisions
//! - The operation list is static; only the enabled set varies
//! - Disabled handlers stay compiled in and are turned on by configuration
//! - Unmounted routes fall through to the router's 404/405 handling

use std::fmt;

use axum::http::{Method, StatusCode};
use axum::routing::{on, MethodFilter, MethodRouter};
use axum::Router;
use serde::{Deserialize, Serialize};

use crate::http::server::AppState;
use crate::todo::handlers;

/// A gateway operation, one per backend call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Create,
    Get,
    List,
    ListOverdue,
    Update,
    Delete,
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Operation::Create,
        Operation::Get,
        Operation::List,
        Operation::ListOverdue,
        Operation::Update,
        Operation::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Get => "get",
            Operation::List => "list",
            Operation::ListOverdue => "list_overdue",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }

    /// Short phrase for log messages ("Failed to {describe}").
    pub fn describe(&self) -> &'static str {
        match self {
            Operation::Create => "create todo",
            Operation::Get => "get todo",
            Operation::List => "list todos",
            Operation::ListOverdue => "list overdue todos",
            Operation::Update => "update todo",
            Operation::Delete => "delete todo",
        }
    }

    pub fn success_status(&self) -> StatusCode {
        match self {
            Operation::Create => StatusCode::CREATED,
            _ => StatusCode::OK,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Binding of one operation to an HTTP method and path.
#[derive(Debug, Clone)]
pub struct RouteSpec {
    pub operation: Operation,
    pub method: Method,
    pub path: &'static str,
}

/// Every operation the gateway knows how to serve.
pub static ROUTES: [RouteSpec; 6] = [
    RouteSpec {
        operation: Operation::Create,
        method: Method::POST,
        path: "/v1/todo",
    },
    RouteSpec {
        operation: Operation::Get,
        method: Method::GET,
        path: "/v1/todo/{id}",
    },
    RouteSpec {
        operation: Operation::List,
        method: Method::GET,
        path: "/v1/todos",
    },
    RouteSpec {
        operation: Operation::ListOverdue,
        method: Method::GET,
        path: "/v1/todos/{time}",
    },
    RouteSpec {
        operation: Operation::Update,
        method: Method::PUT,
        path: "/v1/todo/{id}",
    },
    RouteSpec {
        operation: Operation::Delete,
        method: Method::DELETE,
        path: "/v1/todo/{id}",
    },
];

/// The set of exposed operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    enabled: Vec<Operation>,
}

impl RouteTable {
    pub fn new(enabled: impl IntoIterator<Item = Operation>) -> Self {
        let mut enabled: Vec<Operation> = enabled.into_iter().collect();
        enabled.sort();
        enabled.dedup();
        Self { enabled }
    }

    pub fn is_enabled(&self, operation: Operation) -> bool {
        self.enabled.contains(&operation)
    }

    /// Routes that will be mounted, in table order.
    pub fn active(&self) -> impl Iterator<Item = &'static RouteSpec> + '_ {
        ROUTES.iter().filter(|spec| self.is_enabled(spec.operation))
    }

    /// Routes that exist but are not mounted, in table order.
    pub fn disabled(&self) -> impl Iterator<Item = &'static RouteSpec> + '_ {
        ROUTES.iter().filter(|spec| !self.is_enabled(spec.operation))
    }

    /// Mount the enabled operations. Routes sharing a path are merged by method.
    pub fn into_router(&self) -> Router<AppState> {
        let mut router = Router::new();
        for spec in self.active() {
            match method_router(spec) {
                Some(handler) => {
                    tracing::debug!(
                        operation = %spec.operation,
                        method = %spec.method,
                        path = spec.path,
                        "Mounting route"
                    );
                    router = router.route(spec.path, handler);
                }
                None => tracing::error!(
                    operation = %spec.operation,
                    method = %spec.method,
                    "No method filter for route, not mounted"
                ),
            }
        }
        for spec in self.disabled() {
            tracing::debug!(
                operation = %spec.operation,
                method = %spec.method,
                path = spec.path,
                "Route disabled"
            );
        }
        router
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new([Operation::Create, Operation::Get])
    }
}

fn method_router(spec: &RouteSpec) -> Option<MethodRouter<AppState>> {
    let filter = MethodFilter::try_from(spec.method.clone()).ok()?;
    Some(match spec.operation {
        Operation::Create => on(filter, handlers::create_todo),
        Operation::Get => on(filter, handlers::get_todo),
        Operation::List => on(filter, handlers::list_todos),
        Operation::ListOverdue => on(filter, handlers::list_overdue_todos),
        Operation::Update => on(filter, handlers::update_todo),
        Operation::Delete => on(filter, handlers::delete_todo),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_operation_has_one_route() {
        for operation in Operation::ALL {
            assert_eq!(ROUTES.iter().filter(|r| r.operation == operation).count(), 1);
        }
    }

    #[test]
    fn test_every_route_method_has_a_filter() {
        for spec in &ROUTES {
            assert!(method_router(spec).is_some(), "{} {}", spec.method, spec.path);
        }
    }

    #[test]
    fn test_default_exposes_create_and_get_only() {
        let table = RouteTable::default();
        let active: Vec<_> = table.active().map(|r| (r.method.as_str(), r.path)).collect();
        assert_eq!(active, vec![("POST", "/v1/todo"), ("GET", "/v1/todo/{id}")]);

        let disabled: Vec<_> = table.disabled().map(|r| r.operation).collect();
        assert_eq!(
            disabled,
            vec![Operation::List, Operation::ListOverdue, Operation::Update, Operation::Delete]
        );
    }

    #[test]
    fn test_duplicates_collapse() {
        let table = RouteTable::new([Operation::Get, Operation::Get, Operation::Delete]);
        assert_eq!(table.active().count(), 2);
        assert!(table.is_enabled(Operation::Delete));
        assert!(!table.is_enabled(Operation::Create));
    }

    #[test]
    fn test_operation_names_match_serde() {
        for operation in Operation::ALL {
            let json = serde_json::to_string(&operation).unwrap();
            assert_eq!(json, format!("\"{}\"", operation));
        }
    }

    #[test]
    fn test_success_status() {
        assert_eq!(Operation::Create.success_status(), StatusCode::CREATED);
        assert_eq!(Operation::Delete.success_status(), StatusCode::OK);
    }
}
