//! Aggregation of rule scores into a quality report.
//!
//! Row partition policy: a row is "failed" when it contains at least one
//! null value OR duplicates an earlier row (structural equality, null
//! equals null). The two conditions are combined as a union. Processed
//! rows are the remainder.

use crate::config::QualityConfig;
use crate::error::Result;
use crate::profiler::DataProfiler;
use crate::rules::RuleEngine;
use crate::types::{DatasetProfile, QualityReport, RuleScore};
use crate::utils::faulty_row_mask;
use polars::prelude::*;
use tracing::info;

/// Composes profiles and rule scores into a [`QualityReport`].
pub struct Aggregator;

impl Aggregator {
    /// Profile the dataset, evaluate the configured rules and compose the
    /// quality report.
    pub fn evaluate(df: &DataFrame, config: &QualityConfig) -> Result<QualityReport> {
        let profile = DataProfiler::profile_dataset(df, config)?;
        let rule_scores = RuleEngine::evaluate_all(df, config)?;
        Self::compose(df, profile, rule_scores)
    }

    /// Build the report from already-computed parts.
    pub fn compose(
        df: &DataFrame,
        profile: DatasetProfile,
        rule_scores: Vec<RuleScore>,
    ) -> Result<QualityReport> {
        let dq_score = Self::dq_score(&rule_scores);

        let mask = faulty_row_mask(df)?;
        let failed_rows = mask.into_iter().flatten().filter(|flagged| *flagged).count();
        let processed_rows = df.height() - failed_rows;

        info!(
            rows = df.height(),
            failed_rows,
            dq_score = ?dq_score,
            "quality report composed"
        );

        Ok(QualityReport {
            profile,
            rule_scores,
            dq_score,
            processed_rows,
            failed_rows,
        })
    }

    /// Unweighted mean of the scored rules; `None` when nothing scored.
    fn dq_score(rule_scores: &[RuleScore]) -> Option<f64> {
        let scores: Vec<f64> = rule_scores
            .iter()
            .filter_map(|s| s.outcome.score())
            .collect();
        if scores.is_empty() {
            return None;
        }
        Some(scores.iter().sum::<f64>() / scores.len() as f64)
    }
}
