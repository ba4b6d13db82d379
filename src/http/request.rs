//! Request identification and path parameters.
//!
//! # Responsibilities
//! - Assign a unique request ID (UUID v4) when the client sent none
//! - Echo the ID back on the response
//! - Expose the ID to the trace span
//! - Extract the single path parameter without ever rejecting
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - A client-supplied `x-request-id` is kept, not replaced
//! - Path segments that are not UTF-8 once decoded are decoded lossily

use std::convert::Infallible;

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use axum::http::{HeaderName, Request};
use percent_encoding::percent_decode_str;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

/// Header carrying the request ID.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Layer that sets `x-request-id` on incoming requests.
pub fn set_request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid)
}

/// Layer that copies `x-request-id` onto the response.
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(X_REQUEST_ID)
}

/// Read the request ID, or `"unknown"` when missing or not valid text.
pub fn request_id<B>(request: &Request<B>) -> &str {
    request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// The trailing `{id}` or `{time}` segment of a route.
///
/// Todo ids and timestamps are opaque strings handed to the backend as-is,
/// so a segment axum refuses (invalid UTF-8 after percent decoding) is
/// decoded with replacement characters instead of failing the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathParam(pub String);

impl<S> FromRequestParts<S> for PathParam
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<String>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(rejection) => {
                let segment = parts.uri.path().rsplit('/').next().unwrap_or_default();
                let value = percent_decode_str(segment).decode_utf8_lossy().into_owned();
                tracing::debug!(
                    path = %parts.uri.path(),
                    %rejection,
                    "Decoded path parameter lossily"
                );
                Ok(Self(value))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_id_lookup() {
        let request = Request::builder()
            .header("x-request-id", "abc-123")
            .body(())
            .unwrap();
        assert_eq!(request_id(&request), "abc-123");

        let request = Request::builder().body(()).unwrap();
        assert_eq!(request_id(&request), "unknown");
    }

    #[tokio::test]
    async fn test_path_param_lossy_on_invalid_utf8() {
        let request = Request::builder().uri("/v1/todo/a%FFb").body(()).unwrap();
        let (mut parts, _) = request.into_parts();
        let PathParam(value) = PathParam::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(value, "a\u{FFFD}b");
    }
}
