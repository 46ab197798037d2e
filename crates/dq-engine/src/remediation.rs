//! Remediation engine: deterministic cleansing of a dataset.
//!
//! Operations: duplicate removal (keep first occurrence) and missing-value
//! handling (drop rows, or fill numeric columns with mean/median). Faulty
//! rows are captured from the ORIGINAL dataset before any mutation, so the
//! faulty output is independent of the cleansing options. The caller's
//! frame is never mutated.

use crate::config::{MissingValueStrategy, RemediationConfig};
use crate::error::Result;
use crate::types::RemediationOutcome;
use crate::utils::{faulty_row_mask, fill_numeric_nulls, is_numeric_dtype, null_row_mask};
use polars::prelude::*;
use tracing::{debug, info};

/// Applies configured cleansing operations to a dataset.
pub struct RemediationEngine {
    config: RemediationConfig,
}

impl RemediationEngine {
    pub fn new(config: RemediationConfig) -> Self {
        Self { config }
    }

    /// Remediate a dataset, producing the cleaned frame and the faulty-row
    /// frame as independent outputs.
    pub fn remediate(&self, df: &DataFrame) -> Result<RemediationOutcome> {
        let mut actions = Vec::new();

        info!(rows = df.height(), "starting remediation");

        // Capture faulty rows from the original snapshot before mutating
        let faulty_mask = faulty_row_mask(df)?;
        let faulty = df.filter(&faulty_mask)?;
        if faulty.height() > 0 {
            actions.push(format!(
                "Captured {} faulty rows (null-containing or duplicate)",
                faulty.height()
            ));
        }

        let mut remediated = df.clone();

        if self.config.drop_duplicates {
            let before = remediated.height();
            remediated =
                remediated.unique::<&str, &str>(None, UniqueKeepStrategy::First, None)?;
            let removed = before - remediated.height();
            if removed > 0 {
                let pct = (removed as f64 / before as f64) * 100.0;
                actions.push(format!("Removed {} duplicate rows ({:.1}%)", removed, pct));
                debug!("Removed {} duplicate rows", removed);
            } else {
                actions.push("No duplicate rows found".to_string());
            }
        }

        remediated = self.handle_missing(remediated, &mut actions)?;

        Ok(RemediationOutcome {
            remediated,
            faulty,
            actions,
        })
    }

    fn handle_missing(&self, df: DataFrame, actions: &mut Vec<String>) -> Result<DataFrame> {
        match self.config.handle_missing {
            MissingValueStrategy::None => Ok(df),
            MissingValueStrategy::Drop => {
                let before = df.height();
                let nulls = null_row_mask(&df);
                let keep: BooleanChunked = nulls
                    .into_iter()
                    .map(|flagged| Some(!flagged.unwrap_or(false)))
                    .collect();
                let dropped = df.filter(&keep)?;
                let removed = before - dropped.height();
                if removed > 0 {
                    actions.push(format!("Dropped {} rows with missing values", removed));
                    debug!("Dropped {} rows with missing values", removed);
                }
                Ok(dropped)
            }
            MissingValueStrategy::FillMean => self.fill_numeric(df, actions, "mean"),
            MissingValueStrategy::FillMedian => self.fill_numeric(df, actions, "median"),
        }
    }

    /// Fill nulls in numeric columns with the column's mean or median over
    /// non-null values. Nulls in non-numeric columns remain unresolved
    /// (known limitation of these strategies).
    fn fill_numeric(
        &self,
        mut df: DataFrame,
        actions: &mut Vec<String>,
        method: &str,
    ) -> Result<DataFrame> {
        let column_names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|n| n.to_string())
            .collect();

        for name in column_names {
            let series = df.column(&name)?.as_materialized_series();
            if !is_numeric_dtype(series.dtype()) || series.null_count() == 0 {
                continue;
            }

            let fill_value = match method {
                "mean" => series.mean(),
                _ => series.median(),
            };

            // A fully-null column has no statistic to fill with
            let Some(fill_value) = fill_value else {
                actions.push(format!(
                    "Left '{}' untouched: no non-null values to compute a {}",
                    name, method
                ));
                continue;
            };

            let null_count = series.null_count();
            let filled = fill_numeric_nulls(series, fill_value)?;
            df.replace(&name, filled)?;

            actions.push(format!(
                "Filled {} missing values in '{}' with {}: {:.2}",
                null_count, name, method, fill_value
            ));
        }

        Ok(df)
    }
}
