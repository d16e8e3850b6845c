use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use breezo_common::error::BreezoError;
use breezo_common::types::Readiness;
use breezo_db::user::repositories::UserRepository;
use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::extractors::JsonBody;
use crate::users::requests::{SaveUserDataRequest, UserIdQuery};
use crate::users::responses::{
    report_view, ListReportsResponse, ReportCreatedResponse, SuccessResponse,
};
use crate::AppState;

fn ensure_ready(repo: &dyn UserRepository) -> Result<(), ApiError> {
    match repo.readiness() {
        Readiness::Ready => Ok(()),
        Readiness::NotReady(reason) => {
            tracing::warn!(%reason, "user store not ready");
            Err(ApiError(BreezoError::Unavailable(
                "user store not ready".to_string(),
            )))
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn internal(err: BreezoError, message: &str) -> ApiError {
    tracing::error!(error = %err, "{message}");
    ApiError(BreezoError::Internal(message.to_string()))
}

// ── Handlers ────────────────────────────────────────────────────

pub async fn save_user_data(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<SaveUserDataRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let (Some(user_id), Some(data)) = (non_empty(body.user_id), body.data.filter(|d| !d.is_null()))
    else {
        return Err(ApiError(BreezoError::Validation(
            "Missing required fields".to_string(),
        )));
    };

    let Value::Object(mut fields) = data else {
        return Err(ApiError(BreezoError::Validation(
            "data must be a JSON object".to_string(),
        )));
    };

    ensure_ready(state.users.as_ref())?;

    fields.insert(
        "lastUpdated".to_string(),
        Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
    );

    state
        .users
        .merge_document(&user_id, fields)
        .await
        .map_err(|e| internal(e, "Failed to save user data"))?;

    tracing::info!(%user_id, "saved user data");
    Ok(Json(SuccessResponse { success: true }))
}

pub async fn get_user_data(
    State(state): State<AppState>,
    Query(query): Query<UserIdQuery>,
) -> Result<Json<Map<String, Value>>, ApiError> {
    let user_id = non_empty(query.user_id)
        .ok_or_else(|| BreezoError::Validation("Missing user ID".to_string()))?;

    ensure_ready(state.users.as_ref())?;

    let document = state
        .users
        .get_document(&user_id)
        .await
        .map_err(|e| internal(e, "Failed to get user data"))?
        .ok_or_else(|| BreezoError::NotFound("User data not found".to_string()))?;

    Ok(Json(document.data))
}

pub async fn add_symptom_report(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    JsonBody(body): JsonBody<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let Value::Object(report) = body else {
        return Err(ApiError(BreezoError::Validation(
            "report must be a JSON object".to_string(),
        )));
    };

    ensure_ready(state.users.as_ref())?;

    let saved = state
        .users
        .add_symptom_report(&user_id, report)
        .await
        .map_err(|e| internal(e, "Failed to save symptom report"))?;

    tracing::info!(%user_id, report_id = %saved.id, "saved symptom report");
    Ok((
        StatusCode::CREATED,
        Json(ReportCreatedResponse {
            success: true,
            report_id: saved.id,
        }),
    ))
}

pub async fn list_symptom_reports(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ListReportsResponse>, ApiError> {
    ensure_ready(state.users.as_ref())?;

    let reports: Vec<_> = state
        .users
        .list_symptom_reports(&user_id)
        .await
        .map_err(|e| internal(e, "Failed to get symptom reports"))?
        .into_iter()
        .map(report_view)
        .collect();

    let count = reports.len();
    Ok(Json(ListReportsResponse { reports, count }))
}
