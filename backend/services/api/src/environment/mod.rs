pub mod handlers;

use axum::routing::get;
use axum::Router;

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/aqi", get(handlers::get_aqi))
        .route("/weather", get(handlers::get_weather))
}
