use axum::extract::{Query, State};
use axum::Json;
use breezo_airquality::location::LocationQuery;
use breezo_airquality::{AqiReport, Location, ProviderError, WeatherReport};
use breezo_common::error::BreezoError;

use crate::error::ApiError;
use crate::AppState;

/// Caller-facing messages for one endpoint's provider failures.
struct FailureMessages {
    not_found: &'static str,
    internal: &'static str,
}

const AQI_FAILURES: FailureMessages = FailureMessages {
    not_found: "AQI data not found or API error",
    internal: "Failed to fetch AQI data",
};

const WEATHER_FAILURES: FailureMessages = FailureMessages {
    not_found: "IQAir data not found or API error",
    internal: "Failed to fetch weather data from IQAir",
};

fn provider_error(err: ProviderError, messages: &FailureMessages) -> ApiError {
    match err {
        ProviderError::NoData(reason) | ProviderError::Unreachable(reason) => {
            tracing::warn!(%reason, "air quality provider returned no data");
            ApiError(BreezoError::NotFound(messages.not_found.to_string()))
        }
        ProviderError::NotReady(reason) => {
            tracing::warn!(%reason, "air quality provider not ready");
            ApiError(BreezoError::Unavailable(
                "air quality provider not ready".to_string(),
            ))
        }
        ProviderError::Decode(reason) => {
            tracing::error!(%reason, "failed to read air quality provider response");
            ApiError(BreezoError::Internal(messages.internal.to_string()))
        }
    }
}

pub async fn get_aqi(
    State(state): State<AppState>,
    Query(query): Query<LocationQuery>,
) -> Result<Json<AqiReport>, ApiError> {
    let location = Location::from_query(&query)
        .ok_or_else(|| BreezoError::Validation("Missing location parameters".to_string()))?;

    let data = state
        .air_quality
        .current_conditions(&location)
        .await
        .map_err(|e| provider_error(e, &AQI_FAILURES))?;

    let report =
        AqiReport::from_provider(&location, &data).map_err(|e| provider_error(e, &AQI_FAILURES))?;
    tracing::info!(
        city = %report.city,
        aqi = %report.aqi,
        temperature = %report.temperature,
        humidity = %report.humidity,
        "served aqi report"
    );
    Ok(Json(report))
}

pub async fn get_weather(
    State(state): State<AppState>,
    Query(query): Query<LocationQuery>,
) -> Result<Json<WeatherReport>, ApiError> {
    let Some(location) = Location::from_query(&query) else {
        return Ok(Json(WeatherReport::placeholder()));
    };

    let data = state
        .air_quality
        .current_conditions(&location)
        .await
        .map_err(|e| provider_error(e, &WEATHER_FAILURES))?;

    Ok(Json(WeatherReport::from_provider(&location, &data)))
}
