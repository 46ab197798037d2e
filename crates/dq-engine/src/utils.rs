//! Shared utilities for the data quality engine.
//!
//! This module contains common helper functions used across the profiler,
//! rule engine and remediation engine to reduce duplication and ensure
//! consistency.

use polars::prelude::*;
use std::collections::HashSet;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Check if a DataType is a datetime type.
#[inline]
pub fn is_datetime_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Datetime(_, _) | DataType::Date | DataType::Time
    )
}

// =============================================================================
// String Parsing Utilities
// =============================================================================

/// Characters commonly used in numeric formatting that should be stripped.
pub const NUMERIC_FORMAT_CHARS: [char; 6] = [',', '$', '%', '€', '£', ' '];

/// Clean a string for numeric parsing by removing formatting characters.
pub fn clean_numeric_string(s: &str) -> String {
    let mut result = s.trim().to_string();
    for c in NUMERIC_FORMAT_CHARS {
        result = result.replace(c, "");
    }
    result
}

/// Try to parse a string as a numeric value (f64).
///
/// Handles common formatting like currency symbols, percentages, and
/// thousands separators.
pub fn parse_numeric_string(s: &str) -> Option<f64> {
    let cleaned = clean_numeric_string(s);
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

/// Check if a string can be parsed as a numeric value.
pub fn is_numeric_string(s: &str) -> bool {
    parse_numeric_string(s).is_some()
}

/// Parse a string as a datetime against an explicit chrono format string.
///
/// Date-only formats are accepted and anchored at midnight. Locale-specific
/// day/month ordering comes from the format string, never from guessing.
pub fn parse_datetime_string(s: &str, format: &str) -> Option<chrono::NaiveDateTime> {
    let trimmed = s.trim();
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(trimmed, format) {
        return Some(dt);
    }
    chrono::NaiveDate::parse_from_str(trimmed, format)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

// =============================================================================
// Series Extraction Utilities
// =============================================================================

/// Extract a column's values as `Option<f64>` per row.
///
/// Native numeric columns are cast; string columns go through the lenient
/// numeric parser. Values that fail to parse come back as `None`, matching
/// the contract that unparseable cells are treated as null for rule
/// purposes.
pub fn numeric_values(series: &Series) -> PolarsResult<Vec<Option<f64>>> {
    if is_numeric_dtype(series.dtype()) {
        let float_series = series.cast(&DataType::Float64)?;
        return Ok(float_series.f64()?.into_iter().collect());
    }

    if series.dtype() == &DataType::String {
        let str_series = series.str()?;
        return Ok(str_series
            .into_iter()
            .map(|v| v.and_then(parse_numeric_string))
            .collect());
    }

    // Booleans, dates etc. are not numeric for rule purposes
    Ok(vec![None; series.len()])
}

/// Extract a column's values as trimmed strings per row.
pub fn string_values(series: &Series) -> PolarsResult<Vec<Option<String>>> {
    let str_series = series.cast(&DataType::String)?;
    let ca = str_series.str()?;
    Ok(ca
        .into_iter()
        .map(|v| v.map(|s| s.trim().to_string()))
        .collect())
}

/// Calculate the mode of a string Series with its frequency.
///
/// Ties are broken by the first-encountered value in column order.
pub fn string_mode(series: &Series) -> Option<(String, usize)> {
    let str_series = series.cast(&DataType::String).ok()?;
    let ca = str_series.str().ok()?;

    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut seen: std::collections::HashMap<String, usize> = std::collections::HashMap::new();

    for val in ca.into_iter().flatten() {
        match seen.get(val) {
            Some(&idx) => counts[idx].1 += 1,
            None => {
                seen.insert(val.to_string(), counts.len());
                counts.push((val.to_string(), 1));
            }
        }
    }

    // max_by_key returns the LAST max; iterate in reverse so the first
    // encountered value wins ties
    counts
        .into_iter()
        .rev()
        .max_by_key(|(_, count)| *count)
}

// =============================================================================
// Series Transformation Utilities
// =============================================================================

/// Fill null values in a numeric Series with a specific value.
pub fn fill_numeric_nulls(series: &Series, fill_value: f64) -> PolarsResult<Series> {
    let mask = series.is_null();
    let len = series.len();
    let mut result_vec = Vec::with_capacity(len);

    for i in 0..len {
        if mask.get(i).unwrap_or(false) {
            result_vec.push(Some(fill_value));
        } else {
            let val = series.get(i)?;
            result_vec.push(Some(val.try_extract::<f64>()?));
        }
    }

    Ok(Series::new(series.name().clone(), result_vec))
}

// =============================================================================
// Row Partition Masks
// =============================================================================

/// Mask of rows that contain at least one null value.
pub fn null_row_mask(df: &DataFrame) -> BooleanChunked {
    let height = df.height();
    let mut has_null = vec![false; height];

    for col in df.get_columns() {
        let null_mask = col.as_materialized_series().is_null();
        for (i, flag) in has_null.iter_mut().enumerate() {
            if null_mask.get(i).unwrap_or(false) {
                *flag = true;
            }
        }
    }

    has_null.into_iter().map(Some).collect()
}

/// Mask of rows that are exact structural duplicates of an EARLIER row
/// across all columns. Null equals null for this purpose, unlike standard
/// equality semantics; the first occurrence of each row is not flagged.
pub fn duplicate_row_mask(df: &DataFrame) -> PolarsResult<BooleanChunked> {
    let height = df.height();
    let mut seen: HashSet<String> = HashSet::with_capacity(height);
    let mut mask = Vec::with_capacity(height);

    let columns: Vec<&Series> = df
        .get_columns()
        .iter()
        .map(|c| c.as_materialized_series())
        .collect();

    for i in 0..height {
        let mut fingerprint = String::new();
        for series in &columns {
            let value = series.get(i)?;
            // Debug form distinguishes Null from the string "null"
            fingerprint.push_str(&format!("{:?}", value));
            fingerprint.push('\u{1f}');
        }
        mask.push(!seen.insert(fingerprint));
    }

    Ok(mask.into_iter().map(Some).collect())
}

/// Mask of faulty rows: at least one null OR a duplicate of an earlier row.
pub fn faulty_row_mask(df: &DataFrame) -> PolarsResult<BooleanChunked> {
    let nulls = null_row_mask(df);
    let duplicates = duplicate_row_mask(df)?;
    Ok(&nulls | &duplicates)
}

// =============================================================================
// Tests
// =============================================================================
