//! Shared Service Context
//!
//! All frozen state an endpoint needs: the model parameters plus the
//! preprocessing statistics exported alongside them. Built once at process
//! start and passed by reference into every request; nothing in here is
//! mutated after load, so concurrent requests need no locking.

use feature_pipeline::{
    CategoricalEncoder, CategoryCodeTable, FeatureEngineer, FeatureImputer, ImputationStatistics,
    InteractionSpec,
};
use model_artifact::{load_artifact, ArtifactError, ClassifierParams, ModelArtifact, RegressorParams};
use std::path::Path;
use tracing::info;

/// Well-known artifact file name for the diabetes endpoint
pub const DIABETES_ARTIFACT: &str = "diabetes_classifier.json";
/// Well-known artifact file name for the insurance endpoint
pub const INSURANCE_ARTIFACT: &str = "insurance_regressor.json";

/// Columns where a raw 0 is medically impossible and means "missing"
const ZERO_INVALID: [&str; 5] = ["Glucose", "Insulin", "SkinThickness", "BloodPressure", "BMI"];
/// Columns filled with the training-set median
const MEDIAN_FILLED: [&str; 3] = ["Glucose", "Insulin", "SkinThickness"];
/// Columns filled with the training-set mean
const MEAN_FILLED: [&str; 2] = ["BMI", "BloodPressure"];

/// Frozen state for the diabetes classification endpoint
#[derive(Debug)]
pub struct DiabetesService {
    pub imputer: FeatureImputer,
    pub statistics: ImputationStatistics,
    pub engineer: FeatureEngineer,
    pub model: ClassifierParams,
}

/// Frozen state for the insurance regression endpoint
#[derive(Debug)]
pub struct InsuranceService {
    pub encoder: CategoricalEncoder,
    pub code_table: CategoryCodeTable,
    pub model: RegressorParams,
}

/// Immutable per-process context holding both endpoints' frozen artifacts
#[derive(Debug)]
pub struct ServiceContext {
    pub diabetes: DiabetesService,
    pub insurance: InsuranceService,
}

impl ServiceContext {
    /// Load both artifacts from the model directory.
    ///
    /// Any missing or undecodable artifact fails the whole load; the caller
    /// treats that as startup-fatal rather than serving a half-ready
    /// process.
    pub fn load(model_dir: &Path) -> Result<Self, ArtifactError> {
        let diabetes = Self::load_diabetes(&model_dir.join(DIABETES_ARTIFACT))?;
        let insurance = Self::load_insurance(&model_dir.join(INSURANCE_ARTIFACT))?;
        info!(model_dir = %model_dir.display(), "service context ready");
        Ok(Self {
            diabetes,
            insurance,
        })
    }

    fn load_diabetes(path: &Path) -> Result<DiabetesService, ArtifactError> {
        let artifact = load_artifact(path)?;
        let model = match artifact.model {
            ModelArtifact::Classifier(params) => params,
            ModelArtifact::Regressor(_) => {
                return Err(ArtifactError::LoadFailure(format!(
                    "{}: expected a classifier artifact",
                    path.display()
                )));
            }
        };

        Ok(DiabetesService {
            imputer: FeatureImputer::new(ZERO_INVALID, MEDIAN_FILLED, MEAN_FILLED),
            statistics: artifact.imputation,
            engineer: FeatureEngineer::new(vec![InteractionSpec::product(
                "BloodPressure",
                "Insulin",
            )]),
            model,
        })
    }

    fn load_insurance(path: &Path) -> Result<InsuranceService, ArtifactError> {
        let artifact = load_artifact(path)?;
        let model = match artifact.model {
            ModelArtifact::Regressor(params) => params,
            ModelArtifact::Classifier(_) => {
                return Err(ArtifactError::LoadFailure(format!(
                    "{}: expected a regressor artifact",
                    path.display()
                )));
            }
        };

        Ok(InsuranceService {
            encoder: CategoricalEncoder::new(["smoker"]),
            code_table: artifact.categories,
            model,
        })
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::path::PathBuf;

    /// Context loaded from the workspace's shipped artifacts
    pub fn context() -> ServiceContext {
        let model_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../models");
        ServiceContext::load(&model_dir).expect("workspace artifacts should load")
    }
}
