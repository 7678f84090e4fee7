//! Feature Pipeline
//!
//! Deterministic preprocessing stages for single-record tabular inference:
//! sentinel-aware imputation, interaction features, and label encoding.
//! Statistics and code tables are fitted once at training time and applied
//! read-only at serving time, so serving output matches training exactly.

mod encoder;
mod engineer;
mod error;
mod imputer;
mod record;

pub use encoder::{CategoricalEncoder, CategoryCodeTable};
pub use engineer::{FeatureEngineer, InteractionSpec};
pub use error::PipelineError;
pub use imputer::{FeatureImputer, FillStatistic, ImputationStatistics, StatisticKind};
pub use record::{FeatureRecord, FeatureValue};
