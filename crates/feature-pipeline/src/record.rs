//! Single-Record Feature Container

use crate::error::PipelineError;
use serde::{Deserialize, Serialize};

/// A scalar cell value in a feature record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    /// Numeric value (integer fields are carried as f64 after coercion)
    Number(f64),
    /// Categorical string, pre-encoding
    Text(String),
    /// Missing marker, awaiting imputation
    Missing,
}

impl FeatureValue {
    /// Numeric payload, if this is a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FeatureValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Text payload, if this is a categorical string
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FeatureValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Whether this is the missing marker
    pub fn is_missing(&self) -> bool {
        matches!(self, FeatureValue::Missing)
    }
}

/// An ordered column-name → value mapping for exactly one request.
///
/// Column counts are small and fixed per endpoint, so lookups are a linear
/// scan over the insertion-ordered pairs. There are no batch semantics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureRecord {
    columns: Vec<(String, FeatureValue)>,
}

impl FeatureRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing any existing value for the column
    pub fn insert(&mut self, column: impl Into<String>, value: FeatureValue) {
        let column = column.into();
        if let Some(slot) = self.columns.iter_mut().find(|(name, _)| *name == column) {
            slot.1 = value;
        } else {
            self.columns.push((column, value));
        }
    }

    /// Look up a column's value
    pub fn get(&self, column: &str) -> Option<&FeatureValue> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Whether the column is present at all (a missing marker still counts)
    pub fn contains(&self, column: &str) -> bool {
        self.columns.iter().any(|(name, _)| name == column)
    }

    /// Iterate columns in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FeatureValue)> {
        self.columns
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the record holds no columns
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Assemble the model input vector in the artifact's declared column
    /// order. Every named column must be present and numeric; a leftover
    /// missing marker or unencoded string means a pipeline stage was skipped.
    pub fn to_vector(&self, column_order: &[String]) -> Result<Vec<f64>, PipelineError> {
        column_order
            .iter()
            .map(|column| match self.get(column) {
                None => Err(PipelineError::MissingColumn(column.clone())),
                Some(FeatureValue::Number(v)) => Ok(*v),
                Some(FeatureValue::Missing) => Err(PipelineError::MalformedValue {
                    column: column.clone(),
                    detail: "value still missing after preprocessing".to_string(),
                }),
                Some(FeatureValue::Text(s)) => Err(PipelineError::MalformedValue {
                    column: column.clone(),
                    detail: format!("unencoded categorical value '{s}'"),
                }),
            })
            .collect()
    }
}

impl FromIterator<(String, FeatureValue)> for FeatureRecord {
    fn from_iter<T: IntoIterator<Item = (String, FeatureValue)>>(iter: T) -> Self {
        let mut record = FeatureRecord::new();
        for (column, value) in iter {
            record.insert(column, value);
        }
        record
    }
}
