//! Interaction Feature Engineering

use crate::record::{FeatureRecord, FeatureValue};

/// A derived column built from the product of two source columns
#[derive(Debug, Clone)]
pub struct InteractionSpec {
    /// Left source column
    pub left: String,
    /// Right source column
    pub right: String,
    /// Name of the derived column
    pub output: String,
}

impl InteractionSpec {
    /// Derived product column named `p_<left>_<right>`, the convention the
    /// training pipeline used
    pub fn product(left: impl Into<String>, right: impl Into<String>) -> Self {
        let left = left.into();
        let right = right.into();
        let output = format!("p_{left}_{right}");
        Self {
            left,
            right,
            output,
        }
    }
}

/// Adds interaction columns to an already-imputed record.
///
/// Must run after imputation: it multiplies cell values directly, and a
/// leftover missing marker would poison the derived column.
#[derive(Debug, Clone)]
pub struct FeatureEngineer {
    interactions: Vec<InteractionSpec>,
}

impl FeatureEngineer {
    /// Create an engineer for the given interactions
    pub fn new(interactions: Vec<InteractionSpec>) -> Self {
        Self { interactions }
    }

    /// Derive interaction columns. An interaction whose source columns are
    /// not both present numerics is skipped silently, mirroring the guard
    /// the training pipeline applied.
    pub fn transform(&self, record: &FeatureRecord) -> FeatureRecord {
        let mut out = record.clone();
        for spec in &self.interactions {
            let left = record.get(&spec.left).and_then(FeatureValue::as_number);
            let right = record.get(&spec.right).and_then(FeatureValue::as_number);
            if let (Some(l), Some(r)) = (left, right) {
                out.insert(spec.output.clone(), FeatureValue::Number(l * r));
            }
        }
        out
    }
}
