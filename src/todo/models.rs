//! Wire shapes shared by the HTTP surface and the backend service.
//!
//! Field names are the backend's declared snake_case names and are
//! serialized as-is. Do not add `rename_all` here.

use serde::{Deserialize, Serialize};

/// Payload of a create call. Carries no identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoCreateRequest {
    pub assignee: String,
    pub title: String,
    pub summary: String,
    pub deadline: String,
    pub status: String,
}

/// A single todo as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    #[serde(default)]
    pub id: String,
    pub assignee: String,
    pub title: String,
    pub summary: String,
    pub deadline: String,
    pub status: String,
}

impl Todo {
    /// Attach a backend-assigned identifier to a create payload.
    pub fn from_request(id: impl Into<String>, request: TodoCreateRequest) -> Self {
        Self {
            id: id.into(),
            assignee: request.assignee,
            title: request.title,
            summary: request.summary,
            deadline: request.deadline,
            status: request.status,
        }
    }
}

/// One page of todos plus the total number of matches.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TodoList {
    pub todos: Vec<Todo>,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByIdRequest {
    pub id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRequest {
    pub page: u64,
    pub limit: u64,
}

/// Listing restricted to todos whose deadline precedes `to_time`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOverdueRequest {
    pub list_page: ListRequest,
    pub to_time: String,
}

/// Result of a delete. Serializes as `{}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Empty {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_todo_field_order_and_names() {
        let todo = Todo {
            id: "1".into(),
            assignee: "alice".into(),
            title: "t".into(),
            summary: "s".into(),
            deadline: "2024-01-01T00:00:00Z".into(),
            status: "open".into(),
        };
        assert_eq!(
            serde_json::to_string(&todo).unwrap(),
            r#"{"id":"1","assignee":"alice","title":"t","summary":"s","deadline":"2024-01-01T00:00:00Z","status":"open"}"#
        );
    }

    #[test]
    fn test_overdue_request_uses_snake_case() {
        let req = ListOverdueRequest {
            list_page: ListRequest { page: 2, limit: 5 },
            to_time: "2024-06-01T00:00:00Z".into(),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["list_page"]["page"], 2);
        assert_eq!(value["to_time"], "2024-06-01T00:00:00Z");
    }

    #[test]
    fn test_empty_serializes_as_object() {
        assert_eq!(serde_json::to_string(&Empty {}).unwrap(), "{}");
    }
}
