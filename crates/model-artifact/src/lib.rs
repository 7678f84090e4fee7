//! Frozen Model Artifacts
//!
//! The training side exports each fitted pipeline to a small, versioned JSON
//! artifact: explicit coefficients, intercept, and the preprocessing
//! statistics the model was trained against. Serving code deserializes a
//! tagged variant instead of introspecting an opaque pickle, so the wire
//! contract between training and serving is a schema, not a library
//! internals dependency.

mod linear;
mod loader;
mod schema;

pub use loader::load_artifact;
pub use schema::{
    ArtifactFile, ClassifierParams, ModelArtifact, RegressorParams, Scaler, SCHEMA_VERSION,
};

use thiserror::Error;

/// Errors while locating or decoding a frozen artifact
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// No artifact file at the configured path
    #[error("Model artifact not found at {0}")]
    NotFound(String),

    /// The file exists but cannot be decoded into a supported schema
    #[error("Failed to load model artifact: {0}")]
    LoadFailure(String),
}
