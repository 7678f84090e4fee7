//! Artifact Schema

use crate::linear::{expand_polynomial, sigmoid};
use crate::ArtifactError;
use feature_pipeline::{CategoryCodeTable, ImputationStatistics};
use serde::{Deserialize, Serialize};

/// Current artifact schema version. Version 1 predates `class_names`; the
/// loader migrates v1 files on read.
pub const SCHEMA_VERSION: u32 = 2;

/// Standardization parameters applied before classifier scoring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scaler {
    /// Per-feature training means
    pub mean: Vec<f64>,
    /// Per-feature training standard deviations
    pub scale: Vec<f64>,
}

/// Frozen logistic-regression classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierParams {
    /// Model input columns, in coefficient order
    pub feature_names: Vec<String>,
    /// One coefficient per feature
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    /// Display names per class label
    pub class_names: Vec<String>,
    /// Standardization applied between preprocessing and scoring
    #[serde(default)]
    pub scaler: Option<Scaler>,
}

impl ClassifierParams {
    /// Probability of each class for a preprocessed feature vector,
    /// `[P(class 0), P(class 1)]`, summing to 1
    pub fn predict_proba(&self, features: &[f64]) -> Result<[f64; 2], ArtifactError> {
        if features.len() != self.coefficients.len() {
            return Err(ArtifactError::LoadFailure(format!(
                "classifier expects {} features, got {}",
                self.coefficients.len(),
                features.len()
            )));
        }

        let mut z = self.intercept;
        match &self.scaler {
            Some(scaler) => {
                if scaler.mean.len() != features.len() || scaler.scale.len() != features.len() {
                    return Err(ArtifactError::LoadFailure(
                        "classifier scaler length does not match feature count".to_string(),
                    ));
                }
                for (i, &x) in features.iter().enumerate() {
                    let scale = scaler.scale[i].max(f64::EPSILON);
                    z += self.coefficients[i] * (x - scaler.mean[i]) / scale;
                }
            }
            None => {
                for (i, &x) in features.iter().enumerate() {
                    z += self.coefficients[i] * x;
                }
            }
        }

        let p1 = sigmoid(z);
        Ok([1.0 - p1, p1])
    }

    /// Predicted class label: 1 when P(class 1) exceeds 0.5
    pub fn predict(&self, features: &[f64]) -> Result<i64, ArtifactError> {
        let proba = self.predict_proba(features)?;
        Ok(if proba[1] > 0.5 { 1 } else { 0 })
    }
}

/// Frozen linear regressor over a polynomial feature expansion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressorParams {
    /// Raw input columns, pre-expansion, in declared order
    pub feature_names: Vec<String>,
    /// Polynomial expansion degree (1 = plain linear terms)
    pub polynomial_degree: u32,
    /// One coefficient per expanded term
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl RegressorParams {
    /// Predicted value for a preprocessed raw feature vector
    pub fn predict(&self, features: &[f64]) -> Result<f64, ArtifactError> {
        if features.len() != self.feature_names.len() {
            return Err(ArtifactError::LoadFailure(format!(
                "regressor expects {} raw features, got {}",
                self.feature_names.len(),
                features.len()
            )));
        }

        let expanded = expand_polynomial(features, self.polynomial_degree);
        if expanded.len() != self.coefficients.len() {
            return Err(ArtifactError::LoadFailure(format!(
                "regressor has {} coefficients but expansion produced {} terms",
                self.coefficients.len(),
                expanded.len()
            )));
        }

        let mut y = self.intercept;
        for (coef, term) in self.coefficients.iter().zip(&expanded) {
            y += coef * term;
        }
        Ok(y)
    }
}

/// The frozen model inside an artifact file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    Classifier(ClassifierParams),
    Regressor(RegressorParams),
}

/// One exported artifact: the model plus the preprocessing statistics it
/// was trained against
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactFile {
    pub schema_version: u32,
    pub model: ModelArtifact,
    /// Frozen imputation statistics, for models with an imputation stage
    #[serde(default)]
    pub imputation: ImputationStatistics,
    /// Frozen category code lists, for models with an encoding stage
    #[serde(default)]
    pub categories: CategoryCodeTable,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier(scaler: Option<Scaler>) -> ClassifierParams {
        ClassifierParams {
            feature_names: vec!["a".to_string(), "b".to_string()],
            coefficients: vec![1.0, -1.0],
            intercept: 0.0,
            class_names: vec!["0".to_string(), "1".to_string()],
            scaler,
        }
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let model = classifier(None);
        let proba = model.predict_proba(&[2.0, 0.5]).unwrap();
        assert!((proba[0] + proba[1] - 1.0).abs() < 1e-9);
        assert!(proba[1] > 0.5);
        assert_eq!(model.predict(&[2.0, 0.5]).unwrap(), 1);
    }

    #[test]
    fn test_scaler_shifts_decision() {
        let model = classifier(Some(Scaler {
            mean: vec![10.0, 0.0],
            scale: vec![1.0, 1.0],
        }));
        // Raw 2.0 standardizes to -8.0, flipping the sign of z
        assert_eq!(model.predict(&[2.0, 0.5]).unwrap(), 0);
    }

    #[test]
    fn test_feature_count_mismatch() {
        let model = classifier(None);
        assert!(model.predict_proba(&[1.0]).is_err());
    }

    #[test]
    fn test_regressor_linear_terms() {
        let model = RegressorParams {
            feature_names: vec!["x".to_string(), "y".to_string()],
            polynomial_degree: 1,
            coefficients: vec![2.0, 3.0],
            intercept: 1.0,
        };
        assert_eq!(model.predict(&[4.0, 5.0]).unwrap(), 1.0 + 8.0 + 15.0);
    }
}
