use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

/// Inferred kind of a column, driving which metric rules apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Integer or floating point values
    Numeric,
    /// Date or timestamp values
    Datetime,
    /// Everything else (text, labels, codes)
    Categorical,
}

impl ColumnKind {
    /// Get a human-readable display name for the kind.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Datetime => "datetime",
            Self::Categorical => "categorical",
        }
    }
}

/// Summary statistics for a numeric column.
///
/// `std` is the SAMPLE standard deviation (n - 1 divisor); quartiles use
/// linear interpolation between order statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumericSummary {
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
}

/// Summary of a categorical column: the most frequent value and its count.
///
/// Ties are broken by the first-encountered value in column order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoricalSummary {
    pub mode: String,
    pub mode_count: usize,
}

/// Profile of a single column, derived once per profiling request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub name: String,
    /// Polars dtype label as read from the source (e.g. "Int64", "String").
    pub dtype: String,
    pub kind: ColumnKind,
    pub non_null_count: usize,
    pub null_count: usize,
    pub null_percentage: f64,
    /// Distinct non-null values.
    pub distinct_count: usize,
    pub sample_values: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric: Option<NumericSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categorical: Option<CategoricalSummary>,
}

/// Profile of an entire dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetProfile {
    /// (rows, columns)
    pub shape: (usize, usize),
    pub column_profiles: Vec<ColumnProfile>,
    /// Rows that are exact structural duplicates of an earlier row
    /// (null equals null for this purpose).
    pub duplicate_count: usize,
    pub duplicate_percentage: f64,
}

/// The quality dimension a rule scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Uniqueness,
    Completeness,
    Validity,
    Timeliness,
    Coherence,
    Consistency,
    Accuracy,
}

impl RuleKind {
    /// Get a human-readable display name for the rule.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Uniqueness => "Uniqueness",
            Self::Completeness => "Completeness",
            Self::Validity => "Validity",
            Self::Timeliness => "Timeliness",
            Self::Coherence => "Coherence",
            Self::Consistency => "Consistency",
            Self::Accuracy => "Accuracy",
        }
    }

    /// All rule kinds in reporting order.
    pub fn all() -> [RuleKind; 7] {
        [
            Self::Uniqueness,
            Self::Completeness,
            Self::Validity,
            Self::Timeliness,
            Self::Coherence,
            Self::Consistency,
            Self::Accuracy,
        ]
    }
}

/// Outcome of evaluating one rule.
///
/// `Unavailable` means the rule is not defined for the supplied
/// configuration; it is reported but excluded from the DQ Score average.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "score", rename_all = "snake_case")]
pub enum RuleOutcome {
    /// A computed score in [0, 100].
    Scored(f64),
    /// Rule not configured / not defined for this dataset shape.
    Unavailable,
}

impl RuleOutcome {
    /// The score, if one was computed.
    pub fn score(&self) -> Option<f64> {
        match self {
            Self::Scored(s) => Some(*s),
            Self::Unavailable => None,
        }
    }
}

/// One rule's result within a quality report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleScore {
    pub rule: RuleKind,
    #[serde(flatten)]
    pub outcome: RuleOutcome,
}

impl RuleScore {
    pub fn scored(rule: RuleKind, score: f64) -> Self {
        Self {
            rule,
            outcome: RuleOutcome::Scored(score),
        }
    }

    pub fn unavailable(rule: RuleKind) -> Self {
        Self {
            rule,
            outcome: RuleOutcome::Unavailable,
        }
    }
}

/// Composed quality report: profile, per-rule scores, aggregate DQ Score and
/// the processed/failed row partition.
///
/// Constructed fresh per evaluation and discarded after the response is
/// sent; nothing is cached across requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityReport {
    pub profile: DatasetProfile,
    pub rule_scores: Vec<RuleScore>,
    /// Unweighted mean of the scored rules; `None` when no rule produced a
    /// score (all unavailable).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dq_score: Option<f64>,
    /// Rows with no nulls that do not duplicate an earlier row.
    pub processed_rows: usize,
    /// Rows with at least one null OR duplicating an earlier row.
    pub failed_rows: usize,
}

/// Output of a remediation run: the cleaned dataset, the faulty rows
/// captured from the original snapshot, and a log of applied actions.
///
/// Both frames are independent copies; the caller's input is never mutated.
#[derive(Debug, Clone)]
pub struct RemediationOutcome {
    pub remediated: DataFrame,
    pub faulty: DataFrame,
    pub actions: Vec<String>,
}
