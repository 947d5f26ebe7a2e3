//! services/api/src/error.rs
//!
//! Defines the primary error type for the API service and the mapping from
//! port errors to HTTP responses.

use crate::config::ConfigError;
use axum::http::StatusCode;
use handspeak_core::ports::PortError;
use tracing::error;

/// The primary error type for the `api` service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents a standard Input/Output error (e.g., binding to a network socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Converts a port error into the `(StatusCode, String)` pair handlers return.
///
/// `not_found` is the plain-text body used for missing items. Unexpected
/// errors are logged and hidden behind a generic message.
pub fn port_error_response(e: PortError, not_found: &str) -> (StatusCode, String) {
    match e {
        PortError::NotFound(_) => (StatusCode::NOT_FOUND, not_found.to_string()),
        PortError::Conflict(message) => (StatusCode::BAD_REQUEST, message),
        PortError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
        PortError::Unexpected(detail) => {
            error!("Unexpected storage error: {}", detail);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_port_errors_to_status_codes() {
        let (status, body) = port_error_response(PortError::NotFound("course 9".into()), "Course not found");
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "Course not found");

        let (status, body) = port_error_response(PortError::Conflict("taken".into()), "");
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "taken");

        let (status, _) = port_error_response(PortError::Unauthorized, "");
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) = port_error_response(PortError::Unexpected("lock poisoned".into()), "");
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.contains("poisoned"));
    }
}
