pub mod handlers;
pub mod requests;
pub mod responses;

use axum::routing::{get, post};
use axum::Router;

use crate::error::method_not_allowed;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/user-data",
            get(handlers::get_user_data)
                .post(handlers::save_user_data)
                .fallback(method_not_allowed),
        )
        .route(
            "/user-data/{user_id}/reports",
            get(handlers::list_symptom_reports)
                .post(handlers::add_symptom_report)
                .fallback(method_not_allowed),
        )
}
