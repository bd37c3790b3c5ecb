use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::ServiceError;
use thiserror::Error;
use tracing::error;

/// JSON `{"error": ...}` failure, used by the favorites mutations.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub message: String,
}

impl JsonApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(msg) => Self::new(StatusCode::BAD_REQUEST, msg),
            ServiceError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, msg),
            ServiceError::Persistence(_) => {
                error!(error = %e, "favorites persistence failed");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Failed to update favorites")
            }
            ServiceError::Oracle(_) => {
                error!(error = %e, "file existence check failed");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Failed to verify file")
            }
        }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({"error": self.message}))).into_response()
    }
}

/// Plain-text failure for read endpoints. 5xx bodies never carry detail.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: &'static str,
}

impl ApiError {
    pub const INTERNAL: Self = Self { status: StatusCode::INTERNAL_SERVER_ERROR, message: "Internal Server Error" };

    pub fn new(status: StatusCode, message: &'static str) -> Self { Self { status, message } }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, "File not found"),
            ServiceError::Validation(_) => Self::new(StatusCode::BAD_REQUEST, "Bad Request"),
            ServiceError::Persistence(_) | ServiceError::Oracle(_) => {
                error!(error = %e, "request failed");
                Self::INTERNAL
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("runtime check failed: {0}")]
    Runtime(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_status_codes() {
        let cases = [
            (ServiceError::file_id_required(), StatusCode::BAD_REQUEST, "fileId is required"),
            (ServiceError::file_not_found(), StatusCode::NOT_FOUND, "File not found"),
            (ServiceError::Persistence("disk full".into()), StatusCode::INTERNAL_SERVER_ERROR, "Failed to update favorites"),
            (ServiceError::Oracle("EACCES".into()), StatusCode::INTERNAL_SERVER_ERROR, "Failed to verify file"),
        ];
        for (err, status, msg) in cases {
            let api = JsonApiError::from(err);
            assert_eq!(api.status, status);
            assert_eq!(api.message, msg);
        }
    }

    #[test]
    fn plain_errors_hide_internal_detail() {
        let api = ApiError::from(ServiceError::Persistence("/var/lib/secret path".into()));
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.message, "Internal Server Error");
    }
}
