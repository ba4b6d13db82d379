//! Request translation: inbound HTTP pieces to backend request values.

use crate::http::response::GatewayError;
use crate::todo::models::{ByIdRequest, ListOverdueRequest, ListRequest, Todo, TodoCreateRequest};
use crate::todo::query::parse_pagination;

/// Decode a create body. All five fields are required.
pub fn create_request(body: &[u8]) -> Result<TodoCreateRequest, GatewayError> {
    serde_json::from_slice(body).map_err(|e| GatewayError::Decode(e.to_string()))
}

pub fn get_request(id: String) -> ByIdRequest {
    ByIdRequest { id }
}

pub fn list_request(raw_query: Option<&str>) -> Result<ListRequest, GatewayError> {
    let pagination = parse_pagination(raw_query).map_err(GatewayError::Validation)?;
    Ok(ListRequest {
        page: pagination.page,
        limit: pagination.limit,
    })
}

/// `to_time` is passed to the backend as received.
pub fn list_overdue_request(
    to_time: String,
    raw_query: Option<&str>,
) -> Result<ListOverdueRequest, GatewayError> {
    Ok(ListOverdueRequest {
        list_page: list_request(raw_query)?,
        to_time,
    })
}

/// Decode an update body and address it by the path id. Any `id` in the
/// body is discarded.
pub fn update_request(id: String, body: &[u8]) -> Result<Todo, GatewayError> {
    let mut todo: Todo =
        serde_json::from_slice(body).map_err(|e| GatewayError::Decode(e.to_string()))?;
    todo.id = id;
    Ok(todo)
}

pub fn delete_request(id: String) -> ByIdRequest {
    ByIdRequest { id }
}
