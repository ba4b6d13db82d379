//! Response translation.
//!
//! # Responsibilities
//! - Serialize backend results with their declared field names
//! - Map gateway and backend errors to HTTP status codes
//! - Log every failure with the operation that produced it
//!
//! # Design Decisions
//! - Client input problems are 400, anything from the backend is 500
//! - Error bodies are always `{"error": "<message>"}`
//! - Backend deadline expiry is reported like any other backend error

use std::time::Instant;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::backend::service::BackendError;
use crate::observability::metrics;
use crate::routing::Operation;

/// Everything that can go wrong while serving one request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The request body could not be decoded into the expected shape.
    #[error("{0}")]
    Decode(String),

    /// Query parameters were present but invalid. One entry per field.
    #[error("{}", .0.join("; "))]
    Validation(Vec<String>),

    /// The backend call failed or ran out of time.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Decode(_) | GatewayError::Validation(_) => StatusCode::BAD_REQUEST,
            GatewayError::Backend(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// JSON error response with the given status.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorBody { error: message.into() })).into_response()
}

/// Turn the outcome of `operation` into the HTTP response.
pub fn respond<T: Serialize>(
    operation: Operation,
    outcome: Result<T, GatewayError>,
    started: Instant,
) -> Response {
    let response = match outcome {
        Ok(value) => (operation.success_status(), Json(value)).into_response(),
        Err(err) => {
            let status = err.status_code();
            tracing::error!(
                operation = %operation,
                status = status.as_u16(),
                error = %err,
                "Failed to {}",
                operation.describe()
            );
            error_response(status, err.to_string())
        }
    };

    metrics::record_request(operation, response.status().as_u16(), started);
    response
}
