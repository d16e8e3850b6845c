use axum::Json;
use breezo_common::error::BreezoError;
use breezo_scoring::RankedGuessList;

use crate::error::ApiError;
use crate::extractors::JsonBody;

use super::requests::PredictRequest;

pub async fn predict(
    JsonBody(body): JsonBody<PredictRequest>,
) -> Result<Json<RankedGuessList>, ApiError> {
    let symptoms = body
        .into_symptoms()
        .ok_or_else(|| BreezoError::Validation("Missing required fields".to_string()))?;

    tracing::debug!(?symptoms, "received prediction request");

    let trace = breezo_scoring::evaluate(symptoms.as_slice());

    tracing::info!(
        symptom_count = symptoms.len(),
        matched = ?trace.matched_rules,
        policy = ?trace.policy,
        top = %trace.guesses.first().condition,
        "scored symptoms"
    );

    Ok(Json(trace.guesses))
}
