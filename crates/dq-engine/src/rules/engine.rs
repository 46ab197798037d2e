//! The rule engine: one deterministic scoring function per quality
//! dimension.

use crate::config::{
    CoherenceConfig, QualityConfig, TimelinessConfig, ValidityCheck, ValidityConstraint,
};
use crate::error::{QualityError, Result};
use crate::types::{RuleKind, RuleScore};
use crate::utils::{is_numeric_dtype, numeric_values, parse_datetime_string, string_values};
use chrono::{NaiveDateTime, Utc};
use polars::prelude::*;
use std::collections::BTreeSet;
use tracing::debug;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Evaluates the configured quality rules against a dataset.
pub struct RuleEngine;

impl RuleEngine {
    /// Evaluate every rule against the dataset.
    ///
    /// Rules without configuration report `Unavailable`. Consistency and
    /// accuracy are always `Unavailable`: no deterministic definition is
    /// configured for them, and an undefined rule must not contribute noise
    /// to the aggregate.
    ///
    /// Fails with [`QualityError::EmptyDataset`] on a zero-row frame, since
    /// every score divides by the row count.
    pub fn evaluate_all(df: &DataFrame, config: &QualityConfig) -> Result<Vec<RuleScore>> {
        if df.height() == 0 {
            return Err(QualityError::EmptyDataset);
        }

        let mut scores = Vec::with_capacity(7);

        scores.push(match &config.identifier_columns {
            Some(columns) => RuleScore::scored(RuleKind::Uniqueness, Self::uniqueness(df, columns)?),
            None => RuleScore::unavailable(RuleKind::Uniqueness),
        });

        scores.push(match &config.completeness_columns {
            Some(columns) => {
                RuleScore::scored(RuleKind::Completeness, Self::completeness(df, columns)?)
            }
            None => RuleScore::unavailable(RuleKind::Completeness),
        });

        scores.push(match &config.validity {
            Some(constraints) => RuleScore::scored(RuleKind::Validity, Self::validity(df, constraints)?),
            None => RuleScore::unavailable(RuleKind::Validity),
        });

        scores.push(match &config.timeliness {
            Some(timeliness) => {
                RuleScore::scored(RuleKind::Timeliness, Self::timeliness(df, timeliness)?)
            }
            None => RuleScore::unavailable(RuleKind::Timeliness),
        });

        scores.push(match &config.coherence {
            Some(coherence) => RuleScore::scored(RuleKind::Coherence, Self::coherence(df, coherence)?),
            None => RuleScore::unavailable(RuleKind::Coherence),
        });

        scores.push(RuleScore::unavailable(RuleKind::Consistency));
        scores.push(RuleScore::unavailable(RuleKind::Accuracy));

        Ok(scores)
    }

    fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Series> {
        df.column(name)
            .map(|c| c.as_materialized_series())
            .map_err(|_| QualityError::MissingColumn(name.to_string()))
    }

    /// Uniqueness: average over the identifier columns of
    /// `distinct_count / row_count * 100`. Distinct counts exclude nulls.
    pub fn uniqueness(df: &DataFrame, columns: &[String]) -> Result<f64> {
        if df.height() == 0 {
            return Err(QualityError::EmptyDataset);
        }
        if columns.is_empty() {
            return Err(QualityError::InvalidConfig(
                "uniqueness requires at least one identifier column".to_string(),
            ));
        }

        let mut total = 0.0;
        for name in columns {
            let series = Self::column(df, name)?;
            let distinct = series.drop_nulls().n_unique()?;
            total += distinct as f64 / df.height() as f64 * 100.0;
        }

        Ok(total / columns.len() as f64)
    }

    /// Completeness: average over the configured columns of
    /// `non_null_count / row_count * 100`.
    pub fn completeness(df: &DataFrame, columns: &[String]) -> Result<f64> {
        if df.height() == 0 {
            return Err(QualityError::EmptyDataset);
        }
        if columns.is_empty() {
            return Err(QualityError::InvalidConfig(
                "completeness requires at least one column".to_string(),
            ));
        }

        let mut total = 0.0;
        for name in columns {
            let series = Self::column(df, name)?;
            let non_null = series.len() - series.null_count();
            total += non_null as f64 / df.height() as f64 * 100.0;
        }

        Ok(total / columns.len() as f64)
    }

    /// Validity: fraction of values satisfying their declared constraint,
    /// averaged over the configured columns. Nulls and unparseable values
    /// count as invalid; the denominator is the row count.
    pub fn validity(df: &DataFrame, constraints: &[ValidityConstraint]) -> Result<f64> {
        if df.height() == 0 {
            return Err(QualityError::EmptyDataset);
        }
        if constraints.is_empty() {
            return Err(QualityError::InvalidConfig(
                "validity requires at least one constraint".to_string(),
            ));
        }

        let mut total = 0.0;
        for constraint in constraints {
            let series = Self::column(df, &constraint.column)?;
            let valid = match &constraint.check {
                ValidityCheck::NumericRange { min, max } => {
                    let values = numeric_values(series)?;
                    Self::ensure_some_parse(
                        series,
                        values.iter().filter(|v| v.is_some()).count(),
                        &constraint.column,
                        "numeric",
                    )?;
                    values
                        .iter()
                        .filter(|v| v.is_some_and(|v| v >= *min && v <= *max))
                        .count()
                }
                ValidityCheck::DatetimeParses { format } => {
                    let values = string_values(series)?;
                    values
                        .iter()
                        .filter(|v| {
                            v.as_deref()
                                .is_some_and(|s| parse_datetime_string(s, format).is_some())
                        })
                        .count()
                }
            };
            total += valid as f64 / df.height() as f64 * 100.0;
        }

        Ok(total / constraints.len() as f64)
    }

    /// Timeliness: ages relative to the reference timestamp, clipped to
    /// `max_age_days`, scored as `(1 - mean(clipped) / max(raw)) * 100`
    /// clamped to [0, 100].
    ///
    /// Unparseable cells are treated as null and excluded from the mean;
    /// ages of future-dated records clamp to zero. When no age is positive
    /// (or nothing parses) the score is 100 by convention.
    pub fn timeliness(df: &DataFrame, config: &TimelinessConfig) -> Result<f64> {
        if df.height() == 0 {
            return Err(QualityError::EmptyDataset);
        }

        let series = Self::column(df, &config.column)?;
        let reference = Self::reference_timestamp(config)?;

        let values = string_values(series)?;
        let ages: Vec<f64> = values
            .iter()
            .flatten()
            .filter_map(|s| parse_datetime_string(s, &config.format))
            .map(|dt| ((reference - dt).num_seconds() as f64).max(0.0))
            .collect();

        Self::ensure_some_parse(series, ages.len(), &config.column, "datetime")?;

        let max_age = ages.iter().copied().fold(0.0, f64::max);
        if max_age == 0.0 {
            return Ok(100.0);
        }

        let cap = config.max_age_days * SECONDS_PER_DAY;
        let clipped_mean =
            ages.iter().map(|age| age.min(cap)).sum::<f64>() / ages.len() as f64;

        let score = (1.0 - clipped_mean / max_age) * 100.0;
        debug!(
            column = %config.column,
            max_age_seconds = max_age,
            clipped_mean_seconds = clipped_mean,
            "timeliness evaluated"
        );
        Ok(score.clamp(0.0, 100.0))
    }

    /// Coherence: fraction of rows where the code column agrees with the
    /// lookup's expected code for the category column.
    ///
    /// The category series is mapped through the lookup in one batch pass.
    /// Categories absent from the lookup are a configuration error: all
    /// distinct offenders are collected and reported together. Null
    /// categories and null codes count as mismatches.
    pub fn coherence(df: &DataFrame, config: &CoherenceConfig) -> Result<f64> {
        if df.height() == 0 {
            return Err(QualityError::EmptyDataset);
        }

        let categories = Self::column(df, &config.category_column)?;
        let codes = Self::column(df, &config.code_column)?;

        let category_values = string_values(categories)?;

        let unknown: BTreeSet<String> = category_values
            .iter()
            .flatten()
            .filter(|c| !config.lookup.contains_key(c.as_str()))
            .cloned()
            .collect();
        if !unknown.is_empty() {
            return Err(QualityError::UnknownCategory {
                column: config.category_column.clone(),
                values: unknown.into_iter().collect(),
            });
        }

        let expected: Vec<Option<&String>> = category_values
            .iter()
            .map(|c| c.as_ref().and_then(|c| config.lookup.get(c)))
            .collect();

        // Numeric code columns compare numerically so "1" matches 1 and 1.0
        let mut matches = 0usize;
        if is_numeric_dtype(codes.dtype()) {
            let actual = numeric_values(codes)?;
            for (exp, act) in expected.iter().zip(actual.iter()) {
                if let (Some(exp), Some(act)) = (exp, act)
                    && crate::utils::parse_numeric_string(exp)
                        .is_some_and(|e| (e - act).abs() < f64::EPSILON)
                {
                    matches += 1;
                }
            }
        } else {
            let actual = string_values(codes)?;
            for (exp, act) in expected.iter().zip(actual.iter()) {
                if let (Some(exp), Some(act)) = (exp, act)
                    && exp.as_str() == act.as_str()
                {
                    matches += 1;
                }
            }
        }

        Ok(matches as f64 / df.height() as f64 * 100.0)
    }

    /// Resolve the reference "now": the configured timestamp parsed with
    /// the column's format, or the current UTC time when unset.
    fn reference_timestamp(config: &TimelinessConfig) -> Result<NaiveDateTime> {
        match &config.reference {
            Some(reference) => {
                parse_datetime_string(reference, &config.format).ok_or_else(|| {
                    QualityError::InvalidConfig(format!(
                        "timeliness reference '{}' does not parse with format '{}'",
                        reference, config.format
                    ))
                })
            }
            None => Ok(Utc::now().naive_utc()),
        }
    }

    /// A declared numeric/datetime column where NOTHING parses (but
    /// non-null values exist) is a type mismatch, not a zero score.
    fn ensure_some_parse(
        series: &Series,
        parsed_count: usize,
        column: &str,
        expected: &str,
    ) -> Result<()> {
        let non_null = series.len() - series.null_count();
        if non_null > 0 && parsed_count == 0 {
            return Err(QualityError::TypeMismatch {
                column: column.to_string(),
                expected: expected.to_string(),
                reason: format!("none of the {} non-null values parse", non_null),
            });
        }
        Ok(())
    }
}
