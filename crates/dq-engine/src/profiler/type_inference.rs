//! Column kind classification.
//!
//! Determines whether a column is numeric, datetime-like, or categorical,
//! which drives the metric rules and profile statistics that apply to it.

use crate::types::ColumnKind;
use crate::utils::{is_datetime_dtype, is_numeric_dtype, is_numeric_string, parse_datetime_string};
use once_cell::sync::Lazy;
use polars::prelude::*;
use regex::Regex;

// Date pattern regexes - compiled once at startup. Used only for dtype
// detection on columns without a declared format; rules always require the
// explicit format string.
static DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"^\d{4}[-/]\d{1,2}[-/]\d{1,2}$").expect("Invalid regex: YYYY-MM-DD"),
        Regex::new(r"^\d{1,2}[-/]\d{1,2}[-/]\d{4}$").expect("Invalid regex: DD-MM-YYYY"),
        Regex::new(r"^\d{4}-\d{2}-\d{2}\s\d{2}:\d{2}:\d{2}").expect("Invalid regex: datetime"),
        Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}").expect("Invalid regex: ISO"),
    ]
});

/// Classify a column as numeric, datetime or categorical.
///
/// Numeric when every non-null value parses as an integer or float.
/// Datetime when a format string is declared for the column and every
/// non-null value parses against it, or (without a declared format) when
/// the values match the compiled date patterns. Otherwise categorical.
pub fn classify_column(series: &Series, declared_format: Option<&str>) -> PolarsResult<ColumnKind> {
    let non_null = series.drop_nulls();
    if non_null.is_empty() {
        return Ok(ColumnKind::Categorical);
    }

    if is_numeric_dtype(series.dtype()) {
        return Ok(ColumnKind::Numeric);
    }

    if is_datetime_dtype(series.dtype()) {
        return Ok(ColumnKind::Datetime);
    }

    if series.dtype() == &DataType::String {
        let str_series = non_null.str()?;

        if let Some(format) = declared_format {
            let all_parse = str_series
                .into_iter()
                .flatten()
                .all(|v| parse_datetime_string(v, format).is_some());
            if all_parse {
                return Ok(ColumnKind::Datetime);
            }
            // Partially unparseable values are treated as null by the
            // rules; they do not flip the declared kind to categorical
            let any_parse = str_series
                .into_iter()
                .flatten()
                .any(|v| parse_datetime_string(v, format).is_some());
            if any_parse {
                return Ok(ColumnKind::Datetime);
            }
            return Ok(ColumnKind::Categorical);
        }

        let all_numeric = str_series
            .into_iter()
            .flatten()
            .all(|v| is_numeric_string(v.trim()));
        if all_numeric {
            return Ok(ColumnKind::Numeric);
        }

        if matches_date_patterns(str_series) {
            return Ok(ColumnKind::Datetime);
        }
    }

    Ok(ColumnKind::Categorical)
}

/// Heuristic datetime detection for columns without a declared format.
///
/// Samples up to the first 10 non-null values; at least 70% must match one
/// of the compiled date patterns. Numeric-looking values are skipped so
/// epoch timestamps stay numeric.
fn matches_date_patterns(values: &StringChunked) -> bool {
    let mut date_like_count = 0;
    let mut total_checked = 0;

    for value in values.into_iter().flatten().take(10) {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.parse::<f64>().is_ok() {
            continue;
        }
        total_checked += 1;

        if DATE_PATTERNS.iter().any(|p| p.is_match(trimmed)) {
            date_like_count += 1;
        }
    }

    total_checked > 0 && (date_like_count as f64 / total_checked as f64) > 0.7
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_all_null_is_categorical() {
        let series = Series::new("col".into(), &[None::<i64>, None, None]);
        assert_eq!(
            classify_column(&series, None).unwrap(),
            ColumnKind::Categorical
        );
    }

    #[test]
    fn test_classify_native_int() {
        let series = Series::new("count".into(), &[1i64, 2, 3]);
        assert_eq!(classify_column(&series, None).unwrap(), ColumnKind::Numeric);
    }

    #[test]
    fn test_classify_native_float() {
        let series = Series::new("price".into(), &[1.5f64, 2.5, 3.5]);
        assert_eq!(classify_column(&series, None).unwrap(), ColumnKind::Numeric);
    }

    #[test]
    fn test_classify_string_numeric() {
        let series = Series::new("amount".into(), &["100", "200.5", "-3"]);
        assert_eq!(classify_column(&series, None).unwrap(), ColumnKind::Numeric);
    }

    #[test]
    fn test_classify_string_with_one_word_is_categorical() {
        // One non-numeric value means not every value parses
        let series = Series::new("amount".into(), &["100", "oops", "300"]);
        assert_eq!(
            classify_column(&series, None).unwrap(),
            ColumnKind::Categorical
        );
    }

    #[test]
    fn test_classify_declared_datetime_format() {
        let series = Series::new("created".into(), &["15/01/2026", "20/02/2026"]);
        assert_eq!(
            classify_column(&series, Some("%d/%m/%Y")).unwrap(),
            ColumnKind::Datetime
        );
    }

    #[test]
    fn test_classify_declared_format_tolerates_bad_cells() {
        let series = Series::new("created".into(), &["2026-01-15", "garbage"]);
        assert_eq!(
            classify_column(&series, Some("%Y-%m-%d")).unwrap(),
            ColumnKind::Datetime
        );
    }

    #[test]
    fn test_classify_declared_format_no_parses_falls_back() {
        let series = Series::new("created".into(), &["garbage", "more garbage"]);
        assert_eq!(
            classify_column(&series, Some("%Y-%m-%d")).unwrap(),
            ColumnKind::Categorical
        );
    }

    #[test]
    fn test_classify_heuristic_iso_dates() {
        let series = Series::new("date".into(), &["2024-01-15", "2024-02-20", "2024-03-25"]);
        assert_eq!(
            classify_column(&series, None).unwrap(),
            ColumnKind::Datetime
        );
    }

    #[test]
    fn test_classify_epoch_timestamps_stay_numeric() {
        let series = Series::new(
            "ts".into(),
            &["1705312200", "1705398600", "1705485000"],
        );
        assert_eq!(classify_column(&series, None).unwrap(), ColumnKind::Numeric);
    }

    #[test]
    fn test_classify_labels_are_categorical() {
        let series = Series::new("category".into(), &["red", "blue", "green", "red"]);
        assert_eq!(
            classify_column(&series, None).unwrap(),
            ColumnKind::Categorical
        );
    }
}
