//! Categorical Label Encoding

use crate::error::PipelineError;
use crate::record::{FeatureRecord, FeatureValue};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Per-column category lists, fitted once at training time.
///
/// A value's integer code is its index in the column's list. Fitting sorts
/// the distinct training values lexicographically, so codes are stable
/// across runs. Read-only after load; shared across requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryCodeTable {
    columns: BTreeMap<String, Vec<String>>,
}

impl CategoryCodeTable {
    /// Integer code for a value, if it was seen at training time
    pub fn code(&self, column: &str, value: &str) -> Option<usize> {
        self.columns
            .get(column)?
            .iter()
            .position(|seen| seen == value)
    }

    /// Columns covered by the table
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Ordered category list for a column
    pub fn categories(&self, column: &str) -> Option<&[String]> {
        self.columns.get(column).map(Vec::as_slice)
    }
}

/// Maps categorical string columns to frozen integer codes
#[derive(Debug, Clone)]
pub struct CategoricalEncoder {
    /// Columns to encode
    columns: Vec<String>,
}

impl CategoricalEncoder {
    /// Create an encoder for the given categorical columns
    pub fn new(columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Build the code table from the distinct values seen in training,
    /// in lexicographic order
    pub fn fit(&self, training: &[FeatureRecord]) -> CategoryCodeTable {
        let mut table = BTreeMap::new();
        for column in &self.columns {
            let distinct: BTreeSet<String> = training
                .iter()
                .filter_map(|record| record.get(column))
                .filter_map(FeatureValue::as_text)
                .map(str::to_string)
                .collect();
            if !distinct.is_empty() {
                table.insert(column.clone(), distinct.into_iter().collect());
            }
        }
        debug!(columns = table.len(), "fitted category code table");
        CategoryCodeTable { columns: table }
    }

    /// Replace each tabled column's string with its integer code.
    ///
    /// A value outside the table is an `UnknownCategory` error; there is no
    /// fallback code. Columns in the table but absent from the record are
    /// skipped, matching the training-time column guard.
    pub fn transform(
        &self,
        record: &FeatureRecord,
        table: &CategoryCodeTable,
    ) -> Result<FeatureRecord, PipelineError> {
        let mut out = record.clone();
        for column in table.columns() {
            let value = match record.get(column) {
                None => continue,
                Some(value) => value,
            };
            let text = value
                .as_text()
                .ok_or_else(|| PipelineError::MalformedValue {
                    column: column.to_string(),
                    detail: "expected a categorical string".to_string(),
                })?;
            let code = table
                .code(column, text)
                .ok_or_else(|| PipelineError::UnknownCategory {
                    column: column.to_string(),
                    value: text.to_string(),
                })?;
            out.insert(column.to_string(), FeatureValue::Number(code as f64));
        }
        Ok(out)
    }
}
