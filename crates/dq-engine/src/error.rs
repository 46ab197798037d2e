//! Custom error types for the data quality engine.
//!
//! This module provides the error hierarchy using `thiserror`. Errors are
//! serializable as `{code, message}` pairs so a boundary layer (HTTP, IPC)
//! can hand them to clients without inspecting variants.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for quality evaluation and remediation.
#[derive(Error, Debug)]
pub enum QualityError {
    /// The dataset has zero rows; per-row rule scores are undefined.
    #[error("Dataset is empty; rule scores are undefined")]
    EmptyDataset,

    /// A configured column was not found in the dataset.
    #[error("Column '{0}' not found in dataset")]
    MissingColumn(String),

    /// A coherence category value is absent from the configured lookup table.
    #[error("Unknown categories in column '{column}': {values:?}")]
    UnknownCategory { column: String, values: Vec<String> },

    /// Every non-null value in a column failed to parse as the declared type.
    #[error("Column '{column}' does not contain {expected} values: {reason}")]
    TypeMismatch {
        column: String,
        expected: String,
        reason: String,
    },

    /// Incomplete or contradictory rule configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<QualityError>,
    },
}

impl QualityError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        QualityError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Get a stable error code for boundary-layer handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyDataset => "EMPTY_DATASET",
            Self::MissingColumn(_) => "MISSING_COLUMN",
            Self::UnknownCategory { .. } => "UNKNOWN_CATEGORY",
            Self::TypeMismatch { .. } => "TYPE_MISMATCH",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error is a configuration problem the caller can fix
    /// without touching the data.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::MissingColumn(_) | Self::InvalidConfig(_) | Self::UnknownCategory { .. }
        )
    }
}

/// Serialize implementation for boundary-layer compatibility.
///
/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for QualityError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("QualityError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for quality operations.
pub type Result<T> = std::result::Result<T, QualityError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| QualityError::Polars(e).with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(QualityError::EmptyDataset.error_code(), "EMPTY_DATASET");
        assert_eq!(
            QualityError::MissingColumn("order_id".to_string()).error_code(),
            "MISSING_COLUMN"
        );
    }

    #[test]
    fn test_is_config_error() {
        assert!(QualityError::MissingColumn("x".to_string()).is_config_error());
        assert!(QualityError::InvalidConfig("empty identifier list".to_string()).is_config_error());
        assert!(!QualityError::EmptyDataset.is_config_error());
    }

    #[test]
    fn test_error_serialization() {
        let error = QualityError::MissingColumn("Age".to_string());
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("MISSING_COLUMN"));
        assert!(json.contains("Age"));
    }

    #[test]
    fn test_unknown_category_lists_values() {
        let error = QualityError::UnknownCategory {
            column: "state".to_string(),
            values: vec!["XX".to_string(), "YY".to_string()],
        };
        let msg = error.to_string();
        assert!(msg.contains("XX"));
        assert!(msg.contains("YY"));
    }

    #[test]
    fn test_with_context() {
        let error = QualityError::MissingColumn("ts".to_string())
            .with_context("While evaluating timeliness");
        assert!(error.to_string().contains("While evaluating timeliness"));
        assert_eq!(error.error_code(), "MISSING_COLUMN"); // Preserves original code
    }
}
