pub mod handlers;
pub mod requests;

use axum::routing::post;
use axum::Router;

use crate::error::method_not_allowed;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/predict",
        post(handlers::predict).fallback(method_not_allowed),
    )
}
