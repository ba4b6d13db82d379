//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Detect duplicate route activations
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::{BackendKind, GatewayConfig};

/// Longest accepted backend call timeout, one hour.
pub const MAX_CTX_TIMEOUT_SECS: u64 = 3600;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Check a parsed configuration, reporting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = config.listener.bind_address.parse::<SocketAddr>() {
        errors.push(ValidationError::new("listener.bind_address", e.to_string()));
    }
    if config.listener.max_body_size == 0 {
        errors.push(ValidationError::new(
            "listener.max_body_size",
            "must be greater than zero",
        ));
    }

    if config.backend.kind == BackendKind::Rpc {
        match url::Url::parse(&config.backend.endpoint) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(url) => errors.push(ValidationError::new(
                "backend.endpoint",
                format!("unsupported scheme '{}'", url.scheme()),
            )),
            Err(e) => errors.push(ValidationError::new("backend.endpoint", e.to_string())),
        }
    }

    match config.timeouts.ctx_timeout_secs {
        0 => errors.push(ValidationError::new(
            "timeouts.ctx_timeout_secs",
            "must be greater than zero",
        )),
        secs if secs > MAX_CTX_TIMEOUT_SECS => errors.push(ValidationError::new(
            "timeouts.ctx_timeout_secs",
            format!("must be at most {}", MAX_CTX_TIMEOUT_SECS),
        )),
        _ => {}
    }

    let mut seen = HashSet::new();
    for operation in &config.routes.enabled {
        if !seen.insert(*operation) {
            errors.push(ValidationError::new(
                "routes.enabled",
                format!("'{}' listed more than once", operation),
            ));
        }
    }

    if config.observability.metrics_enabled {
        if let Err(e) = config.observability.metrics_address.parse::<SocketAddr>() {
            errors.push(ValidationError::new("observability.metrics_address", e.to_string()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
