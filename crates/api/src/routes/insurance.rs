//! Insurance Endpoint

use crate::{ApiError, AppState};
use axum::extract::State;
use axum::Json;
use prediction_service::InsurancePrediction;
use serde_json::{json, Map, Value};
use std::sync::Arc;

/// GET liveness message, matching the original endpoint's behavior
pub async fn running() -> Json<Value> {
    Json(json!({ "message": "Insurance cost prediction API is running" }))
}

/// POST a record for cost estimation
pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Map<String, Value>>,
) -> Result<Json<InsurancePrediction>, ApiError> {
    let prediction = state.context.insurance.predict(&payload)?;
    Ok(Json(prediction))
}
