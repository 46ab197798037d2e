//! Data profiling module for dataset analysis.
//!
//! This module provides functionality for profiling datasets, including:
//! - Column kind classification (numeric / datetime / categorical)
//! - Per-column descriptive statistics
//! - Duplicate-row detection

mod statistics;
mod type_inference;

use crate::config::QualityConfig;
use crate::error::Result;
use crate::types::{ColumnKind, ColumnProfile, DatasetProfile};
use polars::prelude::*;
use rand::prelude::*;

pub use type_inference::classify_column;

use statistics::{categorical_summary, numeric_summary};

/// Maximum number of sample values captured per column profile.
const MAX_SAMPLE_VALUES: usize = 10;

/// Data profiler for analyzing dataset structure and characteristics.
pub struct DataProfiler;

impl DataProfiler {
    /// Profile an entire dataset.
    ///
    /// Analyzes each column and counts rows that are exact structural
    /// duplicates of an earlier row (null equals null for this purpose).
    /// The profile is derived once per request and immutable afterwards.
    pub fn profile_dataset(df: &DataFrame, config: &QualityConfig) -> Result<DatasetProfile> {
        let mut column_profiles = Vec::with_capacity(df.width());

        for col_name in df.get_column_names() {
            let profile = Self::profile_column(df, col_name.as_str(), config)?;
            column_profiles.push(profile);
        }

        let duplicate_count = df.height()
            - df.unique::<&str, &str>(None, UniqueKeepStrategy::First, None)?
                .height();
        let duplicate_percentage = if df.height() > 0 {
            (duplicate_count as f64 / df.height() as f64) * 100.0
        } else {
            0.0
        };

        Ok(DatasetProfile {
            shape: (df.height(), df.width()),
            column_profiles,
            duplicate_count,
            duplicate_percentage,
        })
    }

    fn profile_column(df: &DataFrame, col_name: &str, config: &QualityConfig) -> Result<ColumnProfile> {
        let col = df.column(col_name)?;
        let series = col.as_materialized_series();
        let dtype = format!("{:?}", series.dtype());
        let null_count = series.null_count();
        let non_null_count = series.len() - null_count;
        let null_percentage = if series.is_empty() {
            0.0
        } else {
            (null_count as f64 / series.len() as f64) * 100.0
        };
        let distinct_count = series.drop_nulls().n_unique()?;

        let declared_format = config.datetime_formats.get(col_name).map(String::as_str);
        let kind = classify_column(series, declared_format)?;

        let sample_values = Self::sample_values(series);

        let numeric = if kind == ColumnKind::Numeric {
            numeric_summary(series)?
        } else {
            None
        };
        let categorical = if kind == ColumnKind::Categorical {
            categorical_summary(series)
        } else {
            None
        };

        Ok(ColumnProfile {
            name: col_name.to_string(),
            dtype,
            kind,
            non_null_count,
            null_count,
            null_percentage,
            distinct_count,
            sample_values,
            numeric,
            categorical,
        })
    }

    /// Collect up to [`MAX_SAMPLE_VALUES`] non-null values, chosen with a
    /// fixed-seed RNG so repeated profiling of the same data is stable.
    fn sample_values(series: &Series) -> Vec<String> {
        let non_null = series.drop_nulls();
        if non_null.is_empty() {
            return Vec::new();
        }

        let sample_size = std::cmp::min(MAX_SAMPLE_VALUES, non_null.len());
        let mut rng = StdRng::seed_from_u64(42);
        let indices: Vec<usize> = (0..non_null.len()).collect();
        let mut sampled: Vec<usize> = indices
            .choose_multiple(&mut rng, sample_size)
            .copied()
            .collect();
        sampled.sort_unstable();

        let mut samples = Vec::with_capacity(sample_size);
        for idx in sampled {
            if let Ok(val) = non_null.get(idx) {
                samples.push(format!("{}", val));
            }
        }
        samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QualityConfig;

    fn profile(df: &DataFrame) -> DatasetProfile {
        DataProfiler::profile_dataset(df, &QualityConfig::default()).unwrap()
    }

    #[test]
    fn test_profile_shape_and_counts() {
        let df = df![
            "id" => [1, 1, 2],
            "email" => [Some("a@x.com"), Some("a@x.com"), None],
        ]
        .unwrap();

        let profile = profile(&df);
        assert_eq!(profile.shape, (3, 2));

        let id = &profile.column_profiles[0];
        assert_eq!(id.kind, ColumnKind::Numeric);
        assert_eq!(id.null_count, 0);
        assert_eq!(id.distinct_count, 2);

        let email = &profile.column_profiles[1];
        assert_eq!(email.kind, ColumnKind::Categorical);
        assert_eq!(email.non_null_count, 2);
        assert_eq!(email.null_count, 1);
        assert_eq!(email.distinct_count, 1);
    }

    #[test]
    fn test_profile_duplicate_count() {
        // Rows [(1,"a@x.com"), (1,"a@x.com"), (2,null)]
        let df = df![
            "id" => [1, 1, 2],
            "email" => [Some("a@x.com"), Some("a@x.com"), None],
        ]
        .unwrap();

        let profile = profile(&df);
        assert_eq!(profile.duplicate_count, 1);
        assert!((profile.duplicate_percentage - 33.333).abs() < 0.01);
    }

    #[test]
    fn test_profile_numeric_statistics() {
        let df = df!["v" => [10.0f64, 20.0, 30.0, 40.0, 50.0]].unwrap();

        let profile = profile(&df);
        let numeric = profile.column_profiles[0].numeric.as_ref().unwrap();
        assert!((numeric.mean - 30.0).abs() < 1e-9);
        assert_eq!(numeric.min, 10.0);
        assert_eq!(numeric.max, 50.0);
        assert_eq!(numeric.p50, 30.0);
        // Sample std of 10..50 step 10 is sqrt(1000/4) ≈ 15.811
        assert!((numeric.std - 15.811).abs() < 0.01);
    }

    #[test]
    fn test_profile_categorical_mode() {
        let df = df!["color" => ["red", "blue", "red"]].unwrap();

        let profile = profile(&df);
        let categorical = profile.column_profiles[0].categorical.as_ref().unwrap();
        assert_eq!(categorical.mode, "red");
        assert_eq!(categorical.mode_count, 2);
    }

    #[test]
    fn test_profile_declared_datetime_format() {
        let df = df!["created" => ["15/01/2026", "20/02/2026"]].unwrap();
        let config = QualityConfig::builder()
            .datetime_format("created", "%d/%m/%Y")
            .build()
            .unwrap();

        let profile = DataProfiler::profile_dataset(&df, &config).unwrap();
        assert_eq!(profile.column_profiles[0].kind, ColumnKind::Datetime);
    }

    #[test]
    fn test_profile_empty_dataset() {
        let df = DataFrame::new(vec![Series::new("v".into(), Vec::<f64>::new()).into()]).unwrap();

        let profile = profile(&df);
        assert_eq!(profile.shape, (0, 1));
        assert_eq!(profile.duplicate_count, 0);
        assert_eq!(profile.column_profiles[0].null_percentage, 0.0);
    }

    #[test]
    fn test_sample_values_stable() {
        let df = df!["v" => (0..100).collect::<Vec<i32>>()].unwrap();
        let first = profile(&df);
        let second = profile(&df);
        assert_eq!(
            first.column_profiles[0].sample_values,
            second.column_profiles[0].sample_values
        );
        assert_eq!(first.column_profiles[0].sample_values.len(), 10);
    }
}
