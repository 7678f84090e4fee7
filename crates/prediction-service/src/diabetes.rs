//! Diabetes Classification Path

use crate::coerce::{coerce_payload, FieldKind, FieldSpec};
use crate::context::DiabetesService;
use crate::PredictionError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// Risk tier shown for a positive prediction
const HIGH_RISK: &str = "High Risk";
/// Risk tier shown for a negative prediction
const LOW_RISK: &str = "Low Risk";

/// Request field table: every field defaults to 0 when absent, and the
/// payload's camelCase names map onto the training columns
fn field_table() -> Vec<FieldSpec> {
    vec![
        FieldSpec::numeric("pregnancies", "Pregnancies", FieldKind::Integer),
        FieldSpec::numeric("glucose", "Glucose", FieldKind::Float),
        FieldSpec::numeric("bloodPressure", "BloodPressure", FieldKind::Float),
        FieldSpec::numeric("skinThickness", "SkinThickness", FieldKind::Float),
        FieldSpec::numeric("insulin", "Insulin", FieldKind::Float),
        FieldSpec::numeric("bmi", "BMI", FieldKind::Float),
        FieldSpec::numeric(
            "diabetesPedigreeFunction",
            "DiabetesPedigreeFunction",
            FieldKind::Float,
        ),
        FieldSpec::numeric("age", "Age", FieldKind::Integer),
    ]
}

/// Classification response contract
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiabetesPrediction {
    /// Predicted class label, 0 or 1
    pub prediction: i64,
    /// Human-readable tier derived from the label
    pub risk_tier: String,
    pub probability_class0: f64,
    pub probability_class1: f64,
    /// The raw request fields after defaulting, as received
    pub echoed_input: Value,
}

impl DiabetesService {
    /// Run the full classification pipeline over one raw payload:
    /// coerce → impute → engineer → score → shape.
    pub fn predict(
        &self,
        payload: &Map<String, Value>,
    ) -> Result<DiabetesPrediction, PredictionError> {
        let (record, echoed) = coerce_payload(payload, &field_table())?;

        let imputed = self.imputer.transform(&record, &self.statistics)?;
        let engineered = self.engineer.transform(&imputed);

        let features = engineered.to_vector(&self.model.feature_names)?;
        let probabilities = self.model.predict_proba(&features)?;
        let prediction = if probabilities[1] > 0.5 { 1 } else { 0 };

        debug!(prediction, p1 = probabilities[1], "scored diabetes record");

        Ok(DiabetesPrediction {
            prediction,
            risk_tier: if prediction == 1 { HIGH_RISK } else { LOW_RISK }.to_string(),
            probability_class0: probabilities[0],
            probability_class1: probabilities[1],
            echoed_input: Value::Object(echoed),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::test_support;
    use serde_json::json;

    fn payload(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_high_risk_scenario() {
        let ctx = test_support::context();
        let result = ctx
            .diabetes
            .predict(&payload(json!({
                "pregnancies": 10, "glucose": 200, "bloodPressure": 90,
                "skinThickness": 35, "insulin": 150, "bmi": 35.0,
                "diabetesPedigreeFunction": 1.5, "age": 45
            })))
            .unwrap();

        assert_eq!(result.prediction, 1);
        assert_eq!(result.risk_tier, "High Risk");
        assert!(result.probability_class1 > 0.5);
    }

    #[test]
    fn test_low_risk_scenario_with_imputed_insulin() {
        let ctx = test_support::context();
        let result = ctx
            .diabetes
            .predict(&payload(json!({
                "pregnancies": 1, "glucose": 85, "bloodPressure": 66,
                "skinThickness": 29, "insulin": 0, "bmi": 26.6,
                "diabetesPedigreeFunction": 0.351, "age": 31
            })))
            .unwrap();

        assert_eq!(result.prediction, 0);
        assert_eq!(result.risk_tier, "Low Risk");
        // The caller sees the raw insulin value, not the imputed median
        assert_eq!(result.echoed_input["insulin"], json!(0));
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let ctx = test_support::context();
        let result = ctx
            .diabetes
            .predict(&payload(json!({"glucose": 120, "bmi": 30.0})))
            .unwrap();
        assert!((result.probability_class0 + result.probability_class1 - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_absent_fields_default_to_zero() {
        let ctx = test_support::context();
        // Empty payload: every field defaults to 0; the zero-invalid columns
        // impute from their frozen statistics, so the pipeline still runs
        let result = ctx.diabetes.predict(&Map::new()).unwrap();
        assert_eq!(result.echoed_input["age"], json!(0));
        assert!((0.0..=1.0).contains(&result.probability_class1));
    }

    #[test]
    fn test_malformed_value_is_client_error() {
        let ctx = test_support::context();
        let err = ctx
            .diabetes
            .predict(&payload(json!({"glucose": "lots"})))
            .unwrap_err();
        assert!(err.is_client_error());
    }
}
