//! Statistical analysis functions for column profiling.

use crate::types::{CategoricalSummary, NumericSummary};
use crate::utils::{numeric_values, string_mode};
use polars::prelude::*;

/// Compute the numeric summary of a column over its non-null values.
///
/// Returns `None` when no value parses as numeric. `std` is the sample
/// standard deviation (n - 1 divisor, 0.0 for a single value); quartiles
/// use linear interpolation between order statistics.
pub(crate) fn numeric_summary(series: &Series) -> PolarsResult<Option<NumericSummary>> {
    let mut values: Vec<f64> = numeric_values(series)?.into_iter().flatten().collect();
    if values.is_empty() {
        return Ok(None);
    }

    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let std = sample_std(&values, mean);

    Ok(Some(NumericSummary {
        mean,
        std,
        min: values[0],
        max: values[values.len() - 1],
        p25: quantile_linear(&values, 0.25),
        p50: quantile_linear(&values, 0.50),
        p75: quantile_linear(&values, 0.75),
    }))
}

/// Compute the categorical summary: mode and its frequency, ties broken by
/// first occurrence in column order.
pub(crate) fn categorical_summary(series: &Series) -> Option<CategoricalSummary> {
    string_mode(series).map(|(mode, mode_count)| CategoricalSummary { mode, mode_count })
}

/// Sample standard deviation (n - 1 divisor).
pub(crate) fn sample_std(values: &[f64], mean: f64) -> f64 {
    let n = values.len() as f64;
    if n <= 1.0 {
        return 0.0;
    }

    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    variance.sqrt()
}

/// Quantile of a sorted slice using linear interpolation between order
/// statistics: h = (n - 1) * p, result = x[floor(h)] + (x[floor(h)+1] - x[floor(h)]) * (h - floor(h)).
pub(crate) fn quantile_linear(sorted: &[f64], p: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    if sorted.len() == 1 {
        return sorted[0];
    }

    let h = (sorted.len() - 1) as f64 * p;
    let floor = h.floor() as usize;
    let gamma = h - floor as f64;

    if floor + 1 >= sorted.len() {
        return sorted[sorted.len() - 1];
    }
    sorted[floor] + (sorted[floor + 1] - sorted[floor]) * gamma
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== sample_std tests ====================

    #[test]
    fn test_sample_std_basic() {
        // Values: 1, 2, 3, 4, 5
        // Mean = 3, Variance = 10/4 = 2.5, Std = sqrt(2.5) ≈ 1.58
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        let std = sample_std(&values, 3.0);
        assert!((std - 1.5811).abs() < 0.001);
    }

    #[test]
    fn test_sample_std_single_value() {
        assert_eq!(sample_std(&[5.0], 5.0), 0.0);
    }

    #[test]
    fn test_sample_std_identical_values() {
        assert_eq!(sample_std(&[5.0, 5.0, 5.0, 5.0], 5.0), 0.0);
    }

    // ==================== quantile_linear tests ====================

    #[test]
    fn test_quantile_linear_median_odd() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(quantile_linear(&values, 0.5), 3.0);
    }

    #[test]
    fn test_quantile_linear_median_even() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile_linear(&values, 0.5), 2.5);
    }

    #[test]
    fn test_quantile_linear_interpolates() {
        // n=4, p=0.25: h = 0.75, x[0] + (x[1]-x[0])*0.75 = 1.75
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile_linear(&values, 0.25), 1.75);
        assert_eq!(quantile_linear(&values, 0.75), 3.25);
    }

    #[test]
    fn test_quantile_linear_endpoints() {
        let values = [1.0, 2.0, 3.0];
        assert_eq!(quantile_linear(&values, 0.0), 1.0);
        assert_eq!(quantile_linear(&values, 1.0), 3.0);
    }

    #[test]
    fn test_quantile_linear_single_value() {
        assert_eq!(quantile_linear(&[42.0], 0.75), 42.0);
    }

    // ==================== numeric_summary tests ====================

    #[test]
    fn test_numeric_summary_basic() {
        let series = Series::new("price".into(), &[10.0f64, 20.0, 30.0, 40.0, 50.0]);
        let summary = numeric_summary(&series).unwrap().unwrap();

        assert!((summary.mean - 30.0).abs() < 1e-9);
        assert_eq!(summary.min, 10.0);
        assert_eq!(summary.max, 50.0);
        assert_eq!(summary.p25, 20.0);
        assert_eq!(summary.p50, 30.0);
        assert_eq!(summary.p75, 40.0);
    }

    #[test]
    fn test_numeric_summary_ignores_nulls() {
        let series = Series::new("v".into(), &[Some(1.0f64), None, Some(3.0)]);
        let summary = numeric_summary(&series).unwrap().unwrap();
        assert_eq!(summary.mean, 2.0);
        assert_eq!(summary.p50, 2.0);
    }

    #[test]
    fn test_numeric_summary_string_column() {
        let series = Series::new("v".into(), &["10", "20", "bad"]);
        let summary = numeric_summary(&series).unwrap().unwrap();
        // "bad" is treated as null, not an error
        assert_eq!(summary.mean, 15.0);
    }

    #[test]
    fn test_numeric_summary_non_numeric_returns_none() {
        let series = Series::new("v".into(), &["red", "blue"]);
        assert!(numeric_summary(&series).unwrap().is_none());
    }

    // ==================== categorical_summary tests ====================

    #[test]
    fn test_categorical_summary_mode() {
        let series = Series::new("category".into(), &["a", "b", "a", "b", "a"]);
        let summary = categorical_summary(&series).unwrap();
        assert_eq!(summary.mode, "a");
        assert_eq!(summary.mode_count, 3);
    }

    #[test]
    fn test_categorical_summary_tie_first_encountered() {
        let series = Series::new("category".into(), &["blue", "red", "blue", "red"]);
        let summary = categorical_summary(&series).unwrap();
        assert_eq!(summary.mode, "blue");
        assert_eq!(summary.mode_count, 2);
    }

    #[test]
    fn test_categorical_summary_empty() {
        let series = Series::new("category".into(), &[None::<&str>, None]);
        assert!(categorical_summary(&series).is_none());
    }
}
