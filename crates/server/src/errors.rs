use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

use service::errors::ServiceError;

/// JSON error body: `{"error": <title>, "detail": <message>}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub error: &'static str,
    pub detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: &'static str, detail: Option<String>) -> Self {
        Self { status, error, detail }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.error, "detail": self.detail });
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::InvalidArgument(_) => JsonApiError::new(StatusCode::BAD_REQUEST, "Invalid Argument", Some(e.to_string())),
            ServiceError::Validation(_) => JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some(e.to_string())),
            ServiceError::NotFound { .. } => JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(e.to_string())),
            ServiceError::Db(_) => {
                error!(err = %e, code = e.code(), "database failure");
                JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Error", None)
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_status_codes() {
        let cases = [
            (ServiceError::InvalidArgument("x".into()), StatusCode::BAD_REQUEST),
            (ServiceError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (ServiceError::not_found("post", 3), StatusCode::NOT_FOUND),
            (ServiceError::Db("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(JsonApiError::from(err).status, status);
        }
    }

    #[test]
    fn db_details_are_not_leaked() {
        let e = JsonApiError::from(ServiceError::Db("password=secret".into()));
        assert!(e.detail.is_none());
    }
}
