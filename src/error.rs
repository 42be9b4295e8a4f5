//! Error taxonomy for connector operations.
//!
//! Every variant maps to a single HTTP status so the routing layer can render
//! failures without inspecting them.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Failure of a connector operation. Aborts the whole request.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// Provider redirected back with an `error` parameter (reported verbatim)
    #[error("{0}")]
    Provider(String),

    /// Pending state missing, expired, malformed or different from the one supplied
    #[error("State does not match.")]
    StateMismatch,

    /// Credentials entry missing, empty or already consumed
    #[error("No credentials found.")]
    NoCredentials,

    #[error("{0}")]
    BadRequest(String),

    /// Provider API answered with a non-200 status
    #[error("Failed to fetch HubSpot contacts (status {status})")]
    Upstream { status: u16 },

    #[error("Failed to exchange authorization code: {0}")]
    TokenExchange(String),

    #[error("HubSpot request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Transient store unavailable
    #[error("Store error: {0:#}")]
    Store(#[from] anyhow::Error),
}

impl ConnectorError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ConnectorError::Provider(_)
            | ConnectorError::StateMismatch
            | ConnectorError::NoCredentials
            | ConnectorError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ConnectorError::Upstream { status } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ConnectorError::TokenExchange(_) | ConnectorError::Http(_) => StatusCode::BAD_GATEWAY,
            ConnectorError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ConnectorError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_are_bad_request() {
        assert_eq!(
            ConnectorError::Provider("access_denied".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ConnectorError::StateMismatch.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ConnectorError::NoCredentials.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_upstream_status_is_carried() {
        let err = ConnectorError::Upstream { status: 403 };
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
        assert!(err.to_string().contains("403"));
    }

    #[test]
    fn test_provider_error_is_verbatim() {
        let err = ConnectorError::Provider("access_denied".to_string());
        assert_eq!(err.to_string(), "access_denied");
    }

    #[test]
    fn test_store_error_is_internal() {
        let err = ConnectorError::from(anyhow::anyhow!("connection refused"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("connection refused"));
    }
}
