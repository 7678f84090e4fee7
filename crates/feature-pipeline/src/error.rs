//! Pipeline Error Types

use thiserror::Error;

/// Errors raised by the preprocessing stages
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PipelineError {
    /// A column the stage requires is entirely absent from the record
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A categorical value was never seen at training time
    #[error("Unknown category '{value}' for column {column}")]
    UnknownCategory { column: String, value: String },

    /// A value could not be coerced to its declared type
    #[error("Malformed value for {column}: {detail}")]
    MalformedValue { column: String, detail: String },
}
