//! Prediction Service
//!
//! Orchestrates the per-request inference pipeline for both endpoints:
//! raw payload → typed coercion with documented defaults → the preprocessing
//! stages the model was trained with → frozen model scoring → response
//! shaping. Each request is a single pass over one record; the only shared
//! state is the immutable `ServiceContext` built once at startup.

mod coerce;
mod context;
mod diabetes;
mod insurance;

pub use coerce::{coerce_payload, FieldKind, FieldSpec};
pub use context::{DiabetesService, InsuranceService, ServiceContext};
pub use diabetes::DiabetesPrediction;
pub use insurance::InsurancePrediction;

use feature_pipeline::PipelineError;
use model_artifact::ArtifactError;
use thiserror::Error;

/// Errors surfaced by the per-request pipeline
#[derive(Debug, Error)]
pub enum PredictionError {
    /// A preprocessing stage rejected the record
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// The frozen model or its parameters are unusable
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}

impl PredictionError {
    /// Whether the caller sent bad input, as opposed to a broken artifact
    pub fn is_client_error(&self) -> bool {
        matches!(self, PredictionError::Pipeline(_))
    }
}
