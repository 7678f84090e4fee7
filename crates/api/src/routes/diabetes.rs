//! Diabetes Endpoint

use crate::{ApiError, AppState};
use axum::extract::State;
use axum::Json;
use prediction_service::DiabetesPrediction;
use serde_json::{json, Map, Value};
use std::sync::Arc;

/// GET liveness message, matching the original endpoint's behavior
pub async fn running() -> Json<Value> {
    Json(json!({ "message": "Diabetes prediction API is running" }))
}

/// POST a record for risk classification
pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Map<String, Value>>,
) -> Result<Json<DiabetesPrediction>, ApiError> {
    let prediction = state.context.diabetes.predict(&payload)?;
    Ok(Json(prediction))
}
