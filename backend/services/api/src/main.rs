mod environment;
mod error;
mod extractors;
mod predict;
mod users;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, HeaderValue, Method};
use axum::{routing::get, Json, Router};
use breezo_airquality::{AirQualityProvider, IqAirClient, IqAirClientConfig};
use breezo_common::types::{Readiness, ServiceInfo};
use breezo_config::{init_tracing, AppConfig};
use breezo_db::user::pg_repository::PgUserRepository;
use breezo_db::user::repositories::UserRepository;
use serde::Serialize;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

/// Collaborators arrive already initialised; handlers only check their readiness.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub air_quality: Arc<dyn AirQualityProvider>,
}

#[derive(Debug, Serialize)]
struct HealthComponents {
    user_store: Readiness,
    air_quality: Readiness,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    components: HealthComponents,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let components = HealthComponents {
        user_store: state.users.readiness(),
        air_quality: state.air_quality.readiness(),
    };
    let status = if components.user_store.is_ready() && components.air_quality.is_ready() {
        "ok"
    } else {
        "degraded"
    };
    Json(HealthResponse { status, components })
}

async fn info() -> Json<ServiceInfo> {
    Json(ServiceInfo::new("breezo-api"))
}

/// Explicit origins when configured, otherwise the request origin is echoed back.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::mirror_request()
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(%origin, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/info", get(info))
        .merge(predict::router())
        .merge(environment::router())
        .merge(users::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
    }
    tracing::info!("shutting down");
}

#[tokio::main]
async fn main() {
    init_tracing("info");

    let config = AppConfig::from_env().expect("failed to load config");
    tracing::info!(service = "breezo-api", "starting");

    let pool = breezo_db::create_pool(&config.database_url)
        .await
        .expect("failed to create database pool");

    let air_quality = IqAirClient::new(IqAirClientConfig {
        base_url: config.iqair.base_url.clone(),
        api_key: config.iqair.api_key.clone(),
        timeout_secs: config.iqair.timeout_secs,
    })
    .expect("failed to build IQAir client");

    if let Readiness::NotReady(reason) = air_quality.readiness() {
        tracing::warn!(%reason, "air quality endpoints will answer 503");
    }

    let state = AppState {
        users: Arc::new(PgUserRepository::new(pool)),
        air_quality: Arc::new(air_quality),
    };

    let app = build_router(state, cors_layer(&config.cors_allowed_origins));
    let addr: SocketAddr = config.bind_addr().parse().expect("invalid bind address");

    tracing::info!(%addr, "listening");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use breezo_db::user::memory_repository::InMemoryUserRepository;
    use serde_json::json;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn iqair(base_url: &str, api_key: &str) -> Arc<dyn AirQualityProvider> {
        Arc::new(
            IqAirClient::new(IqAirClientConfig {
                base_url: base_url.to_string(),
                api_key: api_key.to_string(),
                timeout_secs: 5,
            })
            .unwrap(),
        )
    }

    fn test_state(iqair_base: &str) -> AppState {
        AppState {
            users: Arc::new(InMemoryUserRepository::new()),
            air_quality: iqair(iqair_base, "test-key"),
        }
    }

    fn app(state: AppState) -> Router {
        build_router(state, cors_layer(&[]))
    }

    async fn read_body(resp: axum::http::Response<Body>) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn iqair_success() -> serde_json::Value {
        json!({
            "status": "success",
            "data": {
                "city": "Los Angeles",
                "location": { "type": "Point", "coordinates": [-118.2417, 34.0669] },
                "current": {
                    "pollution": { "ts": "2026-10-16T10:00:00.000Z", "aqius": 57, "mainus": "p2" },
                    "weather": { "ts": "2026-10-16T10:00:00.000Z", "tp": 21, "pr": 1013, "hu": 64, "ws": 2.1, "wd": 250 }
                }
            }
        })
    }

    // ── Health / Info ───────────────────────────────────────────────

    #[tokio::test]
    async fn health_reports_ready_components() {
        let resp = app(test_state("http://127.0.0.1:9"))
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = read_body(resp).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["components"]["user_store"]["state"], "ready");
    }

    #[tokio::test]
    async fn health_is_degraded_without_iqair_key() {
        let state = AppState {
            users: Arc::new(InMemoryUserRepository::new()),
            air_quality: iqair("http://127.0.0.1:9", ""),
        };
        let resp = app(state)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = read_body(resp).await;
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["components"]["air_quality"]["state"], "not_ready");
    }

    #[tokio::test]
    async fn info_returns_service_name() {
        let resp = app(test_state("http://127.0.0.1:9"))
            .oneshot(Request::get("/info").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = read_body(resp).await;
        assert_eq!(body["name"], "breezo-api");
    }

    #[tokio::test]
    async fn cors_mirrors_request_origin() {
        let resp = app(test_state("http://127.0.0.1:9"))
            .oneshot(
                Request::get("/info")
                    .header(header::ORIGIN, "https://breezo.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            resp.headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap()
                .to_str()
                .unwrap(),
            "https://breezo.example"
        );
    }

    // ── POST /predict ───────────────────────────────────────────────

    #[tokio::test]
    async fn predict_returns_three_ranked_guesses() {
        let resp = app(test_state("http://127.0.0.1:9"))
            .oneshot(post_json(
                "/predict",
                json!({ "symptoms": ["cough", "fever", "chest pain", "sneeze"], "age": 30, "sex": "female" }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = read_body(resp).await;
        assert_eq!(
            body,
            json!([
                { "disease": "Bronchitis", "probability": 0.75 },
                { "disease": "Influenza", "probability": 0.65 },
                { "disease": "Pneumonia", "probability": 0.60 }
            ])
        );
    }

    #[tokio::test]
    async fn predict_accepts_single_string() {
        let resp = app(test_state("http://127.0.0.1:9"))
            .oneshot(post_json(
                "/predict",
                json!({ "symptoms": "COUGH", "age": 52, "sex": "male" }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = read_body(resp).await;
        assert_eq!(
            body,
            json!([
                { "disease": "Bronchitis", "probability": 0.75 },
                { "disease": "Respiratory Infection", "probability": 0.45 },
                { "disease": "Common Cold", "probability": 0.40 }
            ])
        );
    }

    #[tokio::test]
    async fn predict_empty_list_returns_no_match_list() {
        let resp = app(test_state("http://127.0.0.1:9"))
            .oneshot(post_json(
                "/predict",
                json!({ "symptoms": [], "age": 30, "sex": "female" }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = read_body(resp).await;
        assert_eq!(body[0], json!({ "disease": "Respiratory Infection", "probability": 0.50 }));
        assert_eq!(body[2], json!({ "disease": "Upper Respiratory Tract Infection", "probability": 0.40 }));
    }

    #[tokio::test]
    async fn predict_missing_field_returns_400() {
        let resp = app(test_state("http://127.0.0.1:9"))
            .oneshot(post_json("/predict", json!({ "symptoms": ["cough"], "age": 30 })))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = read_body(resp).await;
        assert_eq!(body["error"], "Missing required fields");
    }

    #[tokio::test]
    async fn predict_malformed_json_returns_400() {
        let resp = app(test_state("http://127.0.0.1:9"))
            .oneshot(
                Request::post("/predict")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = read_body(resp).await;
        assert!(body["error"].as_str().unwrap().contains("invalid request body"));
    }

    #[tokio::test]
    async fn predict_rejects_get_with_405() {
        let resp = app(test_state("http://127.0.0.1:9"))
            .oneshot(Request::get("/predict").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        let body = read_body(resp).await;
        assert_eq!(body["error"], "Method not allowed");
    }

    // ── GET /aqi, GET /weather ──────────────────────────────────────

    #[tokio::test]
    async fn aqi_without_location_returns_400() {
        let resp = app(test_state("http://127.0.0.1:9"))
            .oneshot(Request::get("/aqi").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = read_body(resp).await;
        assert_eq!(body["error"], "Missing location parameters");
    }

    #[tokio::test]
    async fn aqi_for_city_is_reshaped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/city"))
            .and(query_param("city", "Los Angeles"))
            .respond_with(ResponseTemplate::new(200).set_body_json(iqair_success()))
            .expect(1)
            .mount(&server)
            .await;

        let resp = app(test_state(&server.uri()))
            .oneshot(
                Request::get("/aqi?city=Los%20Angeles")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = read_body(resp).await;
        assert_eq!(body["aqi"], 57);
        assert_eq!(body["city"], "Los Angeles");
        assert_eq!(body["lat"], 34.0669);
        assert_eq!(body["lon"], -118.2417);
        assert_eq!(body["temperature"], 21);
        assert_eq!(body["humidity"], 64);
        assert_eq!(body["pollutants"]["mainus"], "p2");
        assert_eq!(body["weather"]["wd"], 250);
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn aqi_provider_failure_returns_404() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/nearest_city"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "fail",
                "data": { "message": "no_nearest_station" }
            })))
            .mount(&server)
            .await;

        let resp = app(test_state(&server.uri()))
            .oneshot(
                Request::get("/aqi?lat=0&lon=0")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = read_body(resp).await;
        assert_eq!(body["error"], "AQI data not found or API error");
    }

    #[tokio::test]
    async fn aqi_garbage_response_returns_500() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/city"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let resp = app(test_state(&server.uri()))
            .oneshot(Request::get("/aqi?city=Paris").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = read_body(resp).await;
        assert_eq!(body["error"], "Failed to fetch AQI data");
    }

    #[tokio::test]
    async fn aqi_without_api_key_returns_503() {
        let state = AppState {
            users: Arc::new(InMemoryUserRepository::new()),
            air_quality: iqair("http://127.0.0.1:9", ""),
        };
        let resp = app(state)
            .oneshot(Request::get("/aqi?city=Paris").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn weather_without_location_returns_placeholder() {
        let resp = app(test_state("http://127.0.0.1:9"))
            .oneshot(Request::get("/weather").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = read_body(resp).await;
        assert_eq!(
            body,
            json!({ "temperature": 22, "humidity": 65, "description": "Partly cloudy", "icon": "02d" })
        );
    }

    #[tokio::test]
    async fn weather_for_coordinates_is_reshaped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/nearest_city"))
            .and(query_param("lat", "34.06"))
            .and(query_param("lon", "-118.24"))
            .respond_with(ResponseTemplate::new(200).set_body_json(iqair_success()))
            .expect(1)
            .mount(&server)
            .await;

        let resp = app(test_state(&server.uri()))
            .oneshot(
                Request::get("/weather?lat=34.06&lon=-118.24")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = read_body(resp).await;
        assert_eq!(body["temperature"], 21);
        assert_eq!(body["humidity"], 64);
        assert_eq!(body["windSpeed"], 2.1);
        assert_eq!(body["pressure"], 1013);
        assert_eq!(body["city"], "Los Angeles");
        assert_eq!(body["icon"], "01d");
    }

    #[tokio::test]
    async fn weather_provider_failure_returns_404() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/city"))
            .respond_with(ResponseTemplate::new(404).set_body_string("nope"))
            .mount(&server)
            .await;

        let resp = app(test_state(&server.uri()))
            .oneshot(Request::get("/weather?city=Nowhere").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = read_body(resp).await;
        assert_eq!(body["error"], "IQAir data not found or API error");
    }

    #[tokio::test]
    async fn aqi_with_lone_coordinate_is_missing_location() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(iqair_success()))
            .expect(0)
            .mount(&server)
            .await;

        let resp = app(test_state(&server.uri()))
            .oneshot(Request::get("/aqi?lon=-118.24").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = read_body(resp).await;
        assert_eq!(body["error"], "Missing location parameters");
    }

    #[tokio::test]
    async fn weather_with_lone_coordinate_serves_placeholder() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(iqair_success()))
            .expect(0)
            .mount(&server)
            .await;

        let resp = app(test_state(&server.uri()))
            .oneshot(Request::get("/weather?lat=34.0").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = read_body(resp).await;
        assert_eq!(body["description"], "Partly cloudy");
        assert_eq!(body["icon"], "02d");
    }

    #[tokio::test]
    async fn aqi_without_pollution_block_returns_500() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/city"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "data": { "city": "Paris", "current": { "weather": { "tp": 12 } } }
            })))
            .mount(&server)
            .await;

        let resp = app(test_state(&server.uri()))
            .oneshot(Request::get("/aqi?city=Paris").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = read_body(resp).await;
        assert_eq!(body["error"], "Failed to fetch AQI data");
    }

    // ── /user-data ──────────────────────────────────────────────────

    #[tokio::test]
    async fn user_data_round_trips_with_merge() {
        let app = app(test_state("http://127.0.0.1:9"));

        let resp = app
            .clone()
            .oneshot(post_json(
                "/user-data",
                json!({ "userId": "u-1", "data": { "fullName": "Ada", "age": 36 } }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(read_body(resp).await, json!({ "success": true }));

        let resp = app
            .clone()
            .oneshot(post_json(
                "/user-data",
                json!({ "userId": "u-1", "data": { "age": 37 } }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = app
            .oneshot(
                Request::get("/user-data?userId=u-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = read_body(resp).await;
        assert_eq!(body["fullName"], "Ada");
        assert_eq!(body["age"], 37);
        assert!(body["lastUpdated"].is_string());
    }

    #[tokio::test]
    async fn user_data_unknown_user_returns_404() {
        let resp = app(test_state("http://127.0.0.1:9"))
            .oneshot(
                Request::get("/user-data?userId=ghost")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = read_body(resp).await;
        assert_eq!(body["error"], "User data not found");
    }

    #[tokio::test]
    async fn user_data_missing_id_returns_400() {
        let resp = app(test_state("http://127.0.0.1:9"))
            .oneshot(Request::get("/user-data").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = read_body(resp).await;
        assert_eq!(body["error"], "Missing user ID");
    }

    #[tokio::test]
    async fn save_user_data_validates_body() {
        let app = app(test_state("http://127.0.0.1:9"));

        let resp = app
            .clone()
            .oneshot(post_json("/user-data", json!({ "data": { "a": 1 } })))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_body(resp).await["error"], "Missing required fields");

        let resp = app
            .oneshot(post_json("/user-data", json!({ "userId": "u-1", "data": [1, 2] })))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_body(resp).await["error"], "data must be a JSON object");
    }

    #[tokio::test]
    async fn user_data_rejects_delete_with_405() {
        let resp = app(test_state("http://127.0.0.1:9"))
            .oneshot(
                Request::delete("/user-data?userId=u-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn user_store_not_ready_returns_503() {
        let pool = sqlx_closed_pool().await;
        let state = AppState {
            users: Arc::new(PgUserRepository::new(pool)),
            air_quality: iqair("http://127.0.0.1:9", "test-key"),
        };
        let resp = app(state)
            .oneshot(
                Request::get("/user-data?userId=u-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = read_body(resp).await;
        assert_eq!(body["error"], "user store not ready");
    }

    async fn sqlx_closed_pool() -> breezo_db::PgPool {
        let pool = breezo_db::connect_lazy("postgres://breezo@127.0.0.1:1/breezo")
            .expect("lazy pool");
        pool.close().await;
        pool
    }

    // ── /user-data/{user_id}/reports ────────────────────────────────

    #[tokio::test]
    async fn symptom_reports_are_saved_and_listed() {
        let app = app(test_state("http://127.0.0.1:9"));

        let resp = app
            .clone()
            .oneshot(post_json(
                "/user-data/u-1/reports",
                json!({ "symptoms": ["cough"], "severity": "mild" }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created = read_body(resp).await;
        assert_eq!(created["success"], true);
        let report_id = created["reportId"].as_str().unwrap().to_string();

        let resp = app
            .oneshot(
                Request::get("/user-data/u-1/reports")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = read_body(resp).await;
        assert_eq!(body["count"], 1);
        assert_eq!(body["reports"][0]["id"], report_id.as_str());
        assert_eq!(body["reports"][0]["severity"], "mild");
        assert!(body["reports"][0]["createdAt"].is_string());
    }

    #[tokio::test]
    async fn symptom_report_must_be_object() {
        let resp = app(test_state("http://127.0.0.1:9"))
            .oneshot(post_json("/user-data/u-1/reports", json!("cough")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
