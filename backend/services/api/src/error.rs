use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use breezo_common::error::BreezoError;

pub struct ApiError(pub BreezoError);

impl From<BreezoError> for ApiError {
    fn from(err: BreezoError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            BreezoError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            BreezoError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            BreezoError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            // Handlers log the cause and pass a caller-safe message.
            BreezoError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            other => {
                tracing::error!(error = %other, "unhandled internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        error_response(status, &message)
    }
}

pub fn error_response(status: StatusCode, message: &str) -> Response {
    let body = serde_json::json!({ "error": message });
    (status, Json(body)).into_response()
}

/// Method fallback for routes that only accept some verbs.
pub async fn method_not_allowed() -> Response {
    error_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}
