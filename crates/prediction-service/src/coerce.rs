//! Payload Coercion
//!
//! Turns a loosely-typed JSON payload into a `FeatureRecord` against a
//! declared field table. Absent fields take the table's default before the
//! core pipeline ever sees the record, so the transport boundary never
//! raises `MissingColumn` for an omitted field.

use feature_pipeline::{FeatureRecord, FeatureValue, PipelineError};
use serde_json::{Map, Value};

/// Declared type of a request field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Whole number; fractional input is truncated toward zero
    Integer,
    /// Floating-point number
    Float,
    /// Categorical string, passed through for the encoder
    Categorical,
}

/// One entry in an endpoint's field table
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// Field name in the request payload
    pub request_name: &'static str,
    /// Column name the model was trained with
    pub column: &'static str,
    pub kind: FieldKind,
    /// Value assumed when the field is absent
    pub default: Value,
    /// Echoed back to the caller but never fed to the model
    pub echo_only: bool,
}

impl FieldSpec {
    /// Numeric field defaulting to 0
    pub fn numeric(request_name: &'static str, column: &'static str, kind: FieldKind) -> Self {
        Self {
            request_name,
            column,
            kind,
            default: Value::from(0),
            echo_only: false,
        }
    }

    /// Categorical field with a string default
    pub fn categorical(
        request_name: &'static str,
        column: &'static str,
        default: &'static str,
    ) -> Self {
        Self {
            request_name,
            column,
            kind: FieldKind::Categorical,
            default: Value::from(default),
            echo_only: false,
        }
    }

    /// Mark the field as accepted-and-echoed but not model input
    pub fn echo_only(mut self) -> Self {
        self.echo_only = true;
        self
    }
}

/// Coerce a raw payload against a field table.
///
/// Returns the model-facing record plus the echo map (raw values after
/// defaulting, before coercion) that both response contracts carry back.
pub fn coerce_payload(
    payload: &Map<String, Value>,
    fields: &[FieldSpec],
) -> Result<(FeatureRecord, Map<String, Value>), PipelineError> {
    let mut record = FeatureRecord::new();
    let mut echoed = Map::new();

    for spec in fields {
        let raw = payload
            .get(spec.request_name)
            .cloned()
            .unwrap_or_else(|| spec.default.clone());
        echoed.insert(spec.request_name.to_string(), raw.clone());

        if spec.echo_only {
            continue;
        }
        record.insert(spec.column, coerce_value(&raw, spec)?);
    }

    Ok((record, echoed))
}

fn coerce_value(raw: &Value, spec: &FieldSpec) -> Result<FeatureValue, PipelineError> {
    match spec.kind {
        FieldKind::Integer => Ok(FeatureValue::Number(parse_numeric(raw, spec)?.trunc())),
        FieldKind::Float => Ok(FeatureValue::Number(parse_numeric(raw, spec)?)),
        FieldKind::Categorical => match raw {
            Value::String(s) => Ok(FeatureValue::Text(s.clone())),
            other => Err(malformed(spec, other, "expected a string")),
        },
    }
}

fn parse_numeric(raw: &Value, spec: &FieldSpec) -> Result<f64, PipelineError> {
    match raw {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| malformed(spec, raw, "not representable as f64")),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| malformed(spec, raw, "not a numeric literal")),
        other => Err(malformed(spec, other, "expected a number")),
    }
}

fn malformed(spec: &FieldSpec, raw: &Value, detail: &str) -> PipelineError {
    PipelineError::MalformedValue {
        column: spec.request_name.to_string(),
        detail: format!("{detail} (got {raw})"),
    }
}
