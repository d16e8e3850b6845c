use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::error::error_response;

/// `Json<T>` whose rejections are 400 with a JSON error body.
pub struct JsonBody<T>(pub T);

#[derive(Debug)]
pub struct JsonBodyRejection(String);

impl IntoResponse for JsonBodyRejection {
    fn into_response(self) -> Response {
        error_response(StatusCode::BAD_REQUEST, &self.0)
    }
}

impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = JsonBodyRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(JsonBodyRejection(format!(
                "invalid request body: {}",
                rejection.body_text()
            ))),
        }
    }
}
