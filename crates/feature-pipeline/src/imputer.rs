//! Sentinel-Aware Imputation

use crate::error::PipelineError;
use crate::record::{FeatureRecord, FeatureValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Which statistic a column is filled with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatisticKind {
    Median,
    Mean,
}

/// A fitted fill value for one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillStatistic {
    /// Statistic the value was computed with
    pub statistic: StatisticKind,
    /// The training-set value substituted for missing cells
    pub value: f64,
}

/// Per-column fill statistics, computed once over the training set and
/// frozen for serving. Read-only after load; shared across requests.
pub type ImputationStatistics = BTreeMap<String, FillStatistic>;

/// Replaces domain-invalid zero sentinels with missing markers, then fills
/// missing cells from frozen training-set statistics.
#[derive(Debug, Clone)]
pub struct FeatureImputer {
    /// Columns where an exact 0 is domain-impossible and means "missing"
    zero_invalid: Vec<String>,
    /// Columns filled with the training-set median
    median_filled: Vec<String>,
    /// Columns filled with the training-set mean
    mean_filled: Vec<String>,
}

impl FeatureImputer {
    /// Create an imputer over the given column lists
    pub fn new(
        zero_invalid: impl IntoIterator<Item = impl Into<String>>,
        median_filled: impl IntoIterator<Item = impl Into<String>>,
        mean_filled: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            zero_invalid: zero_invalid.into_iter().map(Into::into).collect(),
            median_filled: median_filled.into_iter().map(Into::into).collect(),
            mean_filled: mean_filled.into_iter().map(Into::into).collect(),
        }
    }

    /// Compute fill statistics over a training set.
    ///
    /// Zero sentinels are converted to missing first, and missing cells are
    /// excluded from the statistic, so the result is a pure function of the
    /// training data. Columns absent from every training record are skipped,
    /// matching the training-time column guard.
    pub fn fit(&self, training: &[FeatureRecord]) -> ImputationStatistics {
        let mut stats = ImputationStatistics::new();

        for column in &self.median_filled {
            let values = self.observed_values(training, column);
            if let Some(value) = median(&values) {
                stats.insert(
                    column.clone(),
                    FillStatistic {
                        statistic: StatisticKind::Median,
                        value,
                    },
                );
            }
        }

        for column in &self.mean_filled {
            let values = self.observed_values(training, column);
            if let Some(value) = mean(&values) {
                stats.insert(
                    column.clone(),
                    FillStatistic {
                        statistic: StatisticKind::Mean,
                        value,
                    },
                );
            }
        }

        debug!(columns = stats.len(), "fitted imputation statistics");
        stats
    }

    /// Apply zero-substitution and statistic fill to one record.
    ///
    /// Every configured column must be present in the record; absence is a
    /// `MissingColumn` error rather than an implied zero. A zero-invalid
    /// column with no fitted fill value stays a missing marker.
    pub fn transform(
        &self,
        record: &FeatureRecord,
        stats: &ImputationStatistics,
    ) -> Result<FeatureRecord, PipelineError> {
        for column in self
            .zero_invalid
            .iter()
            .chain(&self.median_filled)
            .chain(&self.mean_filled)
        {
            if !record.contains(column) {
                return Err(PipelineError::MissingColumn(column.clone()));
            }
        }

        let mut out = record.clone();

        for column in &self.zero_invalid {
            if let Some(FeatureValue::Number(v)) = out.get(column) {
                if *v == 0.0 {
                    out.insert(column.clone(), FeatureValue::Missing);
                }
            }
        }

        for (column, fill) in stats {
            if let Some(value) = out.get(column) {
                if value.is_missing() {
                    out.insert(column.clone(), FeatureValue::Number(fill.value));
                }
            }
        }

        Ok(out)
    }

    /// Collect a column's non-missing values after zero-substitution
    fn observed_values(&self, training: &[FeatureRecord], column: &str) -> Vec<f64> {
        let zero_is_missing = self.zero_invalid.iter().any(|c| c == column);
        training
            .iter()
            .filter_map(|record| record.get(column))
            .filter_map(FeatureValue::as_number)
            .filter(|v| !(zero_is_missing && *v == 0.0))
            .collect()
    }
}

/// Median of a value set; midpoint of the two central values for even counts
fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn record(pairs: &[(&str, f64)]) -> FeatureRecord {
        pairs
            .iter()
            .map(|(name, v)| (name.to_string(), FeatureValue::Number(*v)))
            .collect()
    }

    fn imputer() -> FeatureImputer {
        FeatureImputer::new(
            ["Glucose", "Insulin", "BMI"],
            ["Glucose", "Insulin"],
            ["BMI"],
        )
    }

    #[test]
    fn test_fit_ignores_zero_sentinels() {
        let training = vec![
            record(&[("Glucose", 0.0), ("Insulin", 100.0), ("BMI", 30.0)]),
            record(&[("Glucose", 120.0), ("Insulin", 200.0), ("BMI", 0.0)]),
            record(&[("Glucose", 140.0), ("Insulin", 300.0), ("BMI", 34.0)]),
        ];
        let stats = imputer().fit(&training);

        // Median of {120, 140}, the zero never participates
        assert_eq!(stats["Glucose"].value, 130.0);
        assert_eq!(stats["Glucose"].statistic, StatisticKind::Median);
        assert_eq!(stats["Insulin"].value, 200.0);
        // Mean of {30, 34}
        assert_eq!(stats["BMI"].value, 32.0);
        assert_eq!(stats["BMI"].statistic, StatisticKind::Mean);
    }

    #[test]
    fn test_zero_replaced_by_fitted_median() {
        let training = vec![
            record(&[("Glucose", 100.0), ("Insulin", 100.0), ("BMI", 30.0)]),
            record(&[("Glucose", 140.0), ("Insulin", 200.0), ("BMI", 34.0)]),
        ];
        let imp = imputer();
        let stats = imp.fit(&training);

        let input = record(&[("Glucose", 0.0), ("Insulin", 150.0), ("BMI", 32.0)]);
        let out = imp.transform(&input, &stats).unwrap();
        assert_eq!(out.get("Glucose"), Some(&FeatureValue::Number(120.0)));
        // Non-sentinel values pass through untouched
        assert_eq!(out.get("Insulin"), Some(&FeatureValue::Number(150.0)));
    }

    #[test]
    fn test_zero_invalid_without_fill_stays_missing() {
        // SkinThickness is sentinel-checked but in neither fill list
        let imp = FeatureImputer::new(vec!["SkinThickness"], vec!["Glucose"], Vec::<&str>::new());
        let stats = imp.fit(&[record(&[("Glucose", 100.0), ("SkinThickness", 20.0)])]);

        let input = record(&[("Glucose", 100.0), ("SkinThickness", 0.0)]);
        let out = imp.transform(&input, &stats).unwrap();
        assert_eq!(out.get("SkinThickness"), Some(&FeatureValue::Missing));
    }

    #[test]
    fn test_absent_column_is_an_error() {
        let imp = imputer();
        let stats = ImputationStatistics::new();
        let input = record(&[("Glucose", 100.0), ("Insulin", 150.0)]);
        let err = imp.transform(&input, &stats).unwrap_err();
        assert_eq!(err, PipelineError::MissingColumn("BMI".to_string()));
    }

    #[test]
    fn test_median_even_count() {
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&[5.0]), Some(5.0));
        assert_eq!(median(&[]), None);
    }

    proptest! {
        // Transform against frozen statistics is idempotent: a second pass
        // sees no zeros and no missing markers, so it changes nothing.
        #[test]
        fn transform_idempotent(glucose in 0.0f64..300.0, insulin in 0.0f64..400.0, bmi in 10.0f64..60.0) {
            let imp = imputer();
            let training = vec![
                record(&[("Glucose", 110.0), ("Insulin", 120.0), ("BMI", 28.0)]),
                record(&[("Glucose", 150.0), ("Insulin", 240.0), ("BMI", 36.0)]),
            ];
            let stats = imp.fit(&training);
            let input = record(&[("Glucose", glucose), ("Insulin", insulin), ("BMI", bmi)]);

            let once = imp.transform(&input, &stats).unwrap();
            let twice = imp.transform(&once, &stats).unwrap();
            prop_assert_eq!(once, twice);
        }
    }
}
