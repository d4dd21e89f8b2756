//! Domain-error to HTTP response mapping

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::warn;

use crate::domain::DomainError;

/// Wrapper making [`DomainError`] usable as an axum rejection
#[derive(Debug)]
pub struct ApiError(DomainError);

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            DomainError::Configuration { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            DomainError::Provider { .. } => StatusCode::BAD_GATEWAY,
            DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
        };

        warn!(status = %status, error = %self.0, "request failed");

        let body = Json(serde_json::json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_errors_map_to_bad_gateway() {
        let response = ApiError(DomainError::provider("experiment-data", "down")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn configuration_errors_map_to_internal_error() {
        let response = ApiError(DomainError::configuration("no domain")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn validation_errors_map_to_bad_request() {
        let response = ApiError(DomainError::validation("bad id")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
