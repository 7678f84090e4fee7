//! Insurance Regression Path

use crate::coerce::{coerce_payload, FieldKind, FieldSpec};
use crate::context::InsuranceService;
use crate::PredictionError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// Fixed presentation currency; the model predicts in USD
const CURRENCY: &str = "USD";

/// Request field table. The model consumes age, bmi, children, and smoker;
/// sex and region are accepted and echoed back only.
fn field_table() -> Vec<FieldSpec> {
    vec![
        FieldSpec::numeric("age", "age", FieldKind::Integer),
        FieldSpec::categorical("sex", "sex", "male").echo_only(),
        FieldSpec::numeric("bmi", "bmi", FieldKind::Float),
        FieldSpec::numeric("children", "children", FieldKind::Integer),
        FieldSpec::categorical("smoker", "smoker", "no"),
        FieldSpec::categorical("region", "region", "northeast").echo_only(),
    ]
}

/// Regression response contract
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsurancePrediction {
    /// Predicted annual cost, non-negative, rounded to 2 decimals
    pub predicted_cost: f64,
    pub currency: String,
    /// The raw request fields after defaulting, as received
    pub echoed_input: Value,
}

impl InsuranceService {
    /// Run the full regression pipeline over one raw payload:
    /// coerce → encode → score → shape.
    pub fn predict(
        &self,
        payload: &Map<String, Value>,
    ) -> Result<InsurancePrediction, PredictionError> {
        let (record, echoed) = coerce_payload(payload, &field_table())?;

        let encoded = self.encoder.transform(&record, &self.code_table)?;

        let features = encoded.to_vector(&self.model.feature_names)?;
        let raw_cost = self.model.predict(&features)?;
        let predicted_cost = round2(raw_cost.max(0.0));

        debug!(predicted_cost, "scored insurance record");

        Ok(InsurancePrediction {
            predicted_cost,
            currency: CURRENCY.to_string(),
            echoed_input: Value::Object(echoed),
        })
    }
}

/// Round to 2 decimal places for presentation
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
