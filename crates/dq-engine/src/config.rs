//! Configuration types for quality evaluation and remediation.
//!
//! Every rule is driven by caller-supplied configuration: identifier
//! columns, completeness columns, validity constraints, the timeliness
//! column and reference timestamp, and the coherence lookup table. Nothing
//! is inferred from column names; a rule without its configuration section
//! reports `Unavailable` rather than guessing.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default cap on record age for the timeliness rule, in days.
pub const DEFAULT_MAX_AGE_DAYS: f64 = 365.0;

/// Constraint a column's values must satisfy for the validity rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "check", rename_all = "snake_case")]
pub enum ValidityCheck {
    /// Value parses as a number within [min, max] (inclusive).
    NumericRange { min: f64, max: f64 },
    /// Value parses as a datetime against the given chrono format string.
    DatetimeParses { format: String },
}

/// A validity constraint bound to a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidityConstraint {
    pub column: String,
    #[serde(flatten)]
    pub check: ValidityCheck,
}

/// Configuration for the timeliness rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelinessConfig {
    /// Name of the datetime column to age-check.
    pub column: String,
    /// chrono format string the column (and `reference`) parse against.
    /// Day/month/year ordering is explicit here, never guessed.
    pub format: String,
    /// Reference "now" timestamp in the same format. When absent the
    /// current UTC time is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Ages are clipped to this many days before averaging so very old
    /// records don't dominate the score.
    #[serde(default = "default_max_age_days")]
    pub max_age_days: f64,
}

fn default_max_age_days() -> f64 {
    DEFAULT_MAX_AGE_DAYS
}

/// Configuration for the coherence rule: two columns expected to encode the
/// same fact redundantly, plus the category → expected-code lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoherenceConfig {
    /// Column holding the category name (e.g. a state name).
    pub category_column: String,
    /// Column holding the redundant encoding (e.g. the state code).
    pub code_column: String,
    /// Expected code per category. A category value absent from this table
    /// is a configuration error, not a silent mismatch.
    pub lookup: HashMap<String, String>,
}

/// Strategy for handling missing values during remediation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MissingValueStrategy {
    /// Remove any row with a null in any column.
    Drop,
    /// Replace nulls in numeric columns with the column mean.
    /// Categorical nulls are left in place (known limitation).
    FillMean,
    /// Replace nulls in numeric columns with the column median.
    /// Categorical nulls are left in place (known limitation).
    FillMedian,
    /// Leave missing values untouched.
    #[default]
    None,
}

/// Configuration for the remediation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemediationConfig {
    /// Remove duplicate rows, keeping the first occurrence.
    pub drop_duplicates: bool,
    pub handle_missing: MissingValueStrategy,
}

impl Default for RemediationConfig {
    fn default() -> Self {
        Self {
            drop_duplicates: true,
            handle_missing: MissingValueStrategy::None,
        }
    }
}

/// Configuration for a quality evaluation.
///
/// Use [`QualityConfig::builder()`] for fluent construction, or deserialize
/// the whole struct from caller-supplied JSON.
///
/// # Example
///
/// ```rust,ignore
/// use dq_engine::config::QualityConfig;
///
/// let config = QualityConfig::builder()
///     .identifier_columns(["order_id"])
///     .completeness_columns(["order_id", "email"])
///     .build()?;
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QualityConfig {
    /// Columns expected to identify records; drives the uniqueness rule.
    /// `None` leaves the rule unavailable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier_columns: Option<Vec<String>>,

    /// Columns whose fill rate drives the completeness rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completeness_columns: Option<Vec<String>>,

    /// Per-column constraints for the validity rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validity: Option<Vec<ValidityConstraint>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeliness: Option<TimelinessConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coherence: Option<CoherenceConfig>,

    /// Declared datetime formats per column, used by the type classifier.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub datetime_formats: HashMap<String, String>,

    #[serde(default)]
    pub remediation: RemediationConfig,
}

impl QualityConfig {
    /// Create a new configuration builder.
    pub fn builder() -> QualityConfigBuilder {
        QualityConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    ///
    /// Presence with emptiness is an error (an empty identifier list can
    /// score nothing); absence is fine (the rule reports unavailable).
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if let Some(cols) = &self.identifier_columns
            && cols.is_empty()
        {
            return Err(ConfigValidationError::EmptyColumnList {
                rule: "uniqueness".to_string(),
            });
        }

        if let Some(cols) = &self.completeness_columns
            && cols.is_empty()
        {
            return Err(ConfigValidationError::EmptyColumnList {
                rule: "completeness".to_string(),
            });
        }

        if let Some(constraints) = &self.validity {
            if constraints.is_empty() {
                return Err(ConfigValidationError::EmptyColumnList {
                    rule: "validity".to_string(),
                });
            }
            for constraint in constraints {
                if let ValidityCheck::NumericRange { min, max } = &constraint.check
                    && min > max
                {
                    return Err(ConfigValidationError::InvalidRange {
                        column: constraint.column.clone(),
                        min: *min,
                        max: *max,
                    });
                }
            }
        }

        if let Some(timeliness) = &self.timeliness
            && timeliness.max_age_days <= 0.0
        {
            return Err(ConfigValidationError::InvalidMaxAge(timeliness.max_age_days));
        }

        if let Some(coherence) = &self.coherence
            && coherence.lookup.is_empty()
        {
            return Err(ConfigValidationError::EmptyLookupTable);
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Column list for the {rule} rule is present but empty")]
    EmptyColumnList { rule: String },

    #[error("Invalid numeric range for '{column}': min {min} > max {max}")]
    InvalidRange { column: String, min: f64, max: f64 },

    #[error("Invalid max age for timeliness: {0} days (must be positive)")]
    InvalidMaxAge(f64),

    #[error("Coherence lookup table is empty")]
    EmptyLookupTable,
}

/// Builder for [`QualityConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct QualityConfigBuilder {
    identifier_columns: Option<Vec<String>>,
    completeness_columns: Option<Vec<String>>,
    validity: Option<Vec<ValidityConstraint>>,
    timeliness: Option<TimelinessConfig>,
    coherence: Option<CoherenceConfig>,
    datetime_formats: HashMap<String, String>,
    remediation: Option<RemediationConfig>,
}

impl QualityConfigBuilder {
    /// Set the identifier columns for the uniqueness rule.
    pub fn identifier_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.identifier_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Set the columns scored by the completeness rule.
    pub fn completeness_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.completeness_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Add a validity constraint.
    pub fn validity_constraint(mut self, column: impl Into<String>, check: ValidityCheck) -> Self {
        self.validity
            .get_or_insert_with(Vec::new)
            .push(ValidityConstraint {
                column: column.into(),
                check,
            });
        self
    }

    /// Configure the timeliness rule.
    pub fn timeliness(mut self, config: TimelinessConfig) -> Self {
        self.timeliness = Some(config);
        self
    }

    /// Configure the coherence rule.
    pub fn coherence(mut self, config: CoherenceConfig) -> Self {
        self.coherence = Some(config);
        self
    }

    /// Declare a datetime format for a column (used by the classifier).
    pub fn datetime_format(
        mut self,
        column: impl Into<String>,
        format: impl Into<String>,
    ) -> Self {
        self.datetime_formats.insert(column.into(), format.into());
        self
    }

    /// Set the remediation configuration.
    pub fn remediation(mut self, config: RemediationConfig) -> Self {
        self.remediation = Some(config);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `QualityConfig` or an error if validation fails.
    pub fn build(self) -> Result<QualityConfig, ConfigValidationError> {
        let config = QualityConfig {
            identifier_columns: self.identifier_columns,
            completeness_columns: self.completeness_columns,
            validity: self.validity,
            timeliness: self.timeliness,
            coherence: self.coherence,
            datetime_formats: self.datetime_formats,
            remediation: self.remediation.unwrap_or_default(),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_scores_nothing() {
        let config = QualityConfig::default();
        assert!(config.identifier_columns.is_none());
        assert!(config.completeness_columns.is_none());
        assert!(config.validity.is_none());
        assert!(config.timeliness.is_none());
        assert!(config.coherence.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_custom_values() {
        let config = QualityConfig::builder()
            .identifier_columns(["order_id"])
            .completeness_columns(["order_id", "email"])
            .validity_constraint("amount", ValidityCheck::NumericRange { min: 0.0, max: 1e6 })
            .build()
            .unwrap();

        assert_eq!(
            config.identifier_columns.as_deref(),
            Some(&["order_id".to_string()][..])
        );
        assert_eq!(config.completeness_columns.as_ref().unwrap().len(), 2);
        assert_eq!(config.validity.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn test_validation_empty_identifier_list() {
        let result = QualityConfig::builder()
            .identifier_columns(Vec::<String>::new())
            .build();

        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::EmptyColumnList { .. }
        ));
    }

    #[test]
    fn test_validation_inverted_range() {
        let result = QualityConfig::builder()
            .validity_constraint("age", ValidityCheck::NumericRange { min: 120.0, max: 0.0 })
            .build();

        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidRange { .. }
        ));
    }

    #[test]
    fn test_validation_non_positive_max_age() {
        let result = QualityConfig::builder()
            .timeliness(TimelinessConfig {
                column: "ts".to_string(),
                format: "%Y-%m-%d".to_string(),
                reference: None,
                max_age_days: 0.0,
            })
            .build();

        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidMaxAge(_)
        ));
    }

    #[test]
    fn test_validation_empty_lookup() {
        let result = QualityConfig::builder()
            .coherence(CoherenceConfig {
                category_column: "state".to_string(),
                code_column: "state_code".to_string(),
                lookup: HashMap::new(),
            })
            .build();

        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::EmptyLookupTable
        ));
    }

    #[test]
    fn test_config_from_json() {
        // Simulate JSON supplied by a caller at the service boundary
        let json = r#"{
            "identifier_columns": ["id"],
            "completeness_columns": ["id", "email"],
            "validity": [
                {"column": "age", "check": "numeric_range", "min": 0.0, "max": 120.0},
                {"column": "created", "check": "datetime_parses", "format": "%Y-%m-%d"}
            ],
            "timeliness": {
                "column": "created",
                "format": "%Y-%m-%d",
                "reference": "2026-01-01"
            },
            "coherence": {
                "category_column": "state",
                "code_column": "state_code",
                "lookup": {"California": "CA", "Texas": "TX"}
            },
            "datetime_formats": {"created": "%Y-%m-%d"},
            "remediation": {"drop_duplicates": true, "handle_missing": "fill_median"}
        }"#;

        let config: QualityConfig = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.identifier_columns.as_ref().unwrap().len(), 1);
        assert_eq!(config.validity.as_ref().unwrap().len(), 2);
        assert_eq!(
            config.timeliness.as_ref().unwrap().max_age_days,
            DEFAULT_MAX_AGE_DAYS
        );
        assert_eq!(
            config.remediation.handle_missing,
            MissingValueStrategy::FillMedian
        );
        assert_eq!(config.coherence.as_ref().unwrap().lookup["Texas"], "TX");
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = QualityConfig::builder()
            .identifier_columns(["id"])
            .validity_constraint("age", ValidityCheck::NumericRange { min: 0.0, max: 120.0 })
            .build()
            .unwrap();

        let json = serde_json::to_string(&config).unwrap();
        let back: QualityConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.identifier_columns, config.identifier_columns);
        assert_eq!(back.validity, config.validity);
    }

    #[test]
    fn test_remediation_config_default() {
        let config = RemediationConfig::default();
        assert!(config.drop_duplicates);
        assert_eq!(config.handle_missing, MissingValueStrategy::None);
    }
}
