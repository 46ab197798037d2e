//! Tabular Data Quality Engine
//!
//! A deterministic data quality profiling, scoring and remediation library
//! built with Rust and Polars.
//!
//! # Overview
//!
//! This library provides quality assessment for tabular (CSV) datasets:
//!
//! - **Descriptive Profiling**: column kind classification, null/distinct
//!   counts, numeric statistics with interpolated quartiles
//! - **Rule Evaluation**: uniqueness, completeness, validity, timeliness
//!   and coherence, each producing a 0–100 score from caller-supplied
//!   configuration
//! - **Aggregation**: an unweighted DQ Score over the scored rules plus a
//!   processed/failed row partition
//! - **Remediation**: duplicate removal and missing-value handling
//!   (drop, fill with mean/median), with the faulty rows emitted separately
//!
//! Every rule is configured by the caller: identifier columns, validity
//! constraints, datetime formats, coherence lookup tables. Nothing is
//! inferred from column names, and an unconfigured rule is reported as
//! unavailable rather than guessed.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use dq_engine::{Aggregator, QualityConfig, RemediationEngine};
//! use polars::prelude::*;
//!
//! let df = CsvReadOptions::default()
//!     .with_has_header(true)
//!     .try_into_reader_with_file_path(Some("data.csv".into()))?
//!     .finish()?;
//!
//! let config = QualityConfig::builder()
//!     .identifier_columns(["order_id"])
//!     .completeness_columns(["order_id", "email"])
//!     .build()?;
//!
//! let report = Aggregator::evaluate(&df, &config)?;
//! println!("DQ Score: {:?}", report.dq_score);
//!
//! let outcome = RemediationEngine::new(config.remediation).remediate(&df)?;
//! println!("{} faulty rows", outcome.faulty.height());
//! ```
//!
//! # Error Handling
//!
//! Failures identify the offending column or value and are never folded
//! into a default score: an empty dataset, a config column missing from
//! the data, a coherence category absent from the lookup, or a declared
//! numeric/datetime column where nothing parses all surface as
//! [`QualityError`] variants. Individual unparseable cells are tolerated
//! and treated as null.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod profiler;
pub mod remediation;
pub mod rules;
pub mod store;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use aggregate::Aggregator;
pub use config::{
    CoherenceConfig, ConfigValidationError, MissingValueStrategy, QualityConfig,
    QualityConfigBuilder, RemediationConfig, TimelinessConfig, ValidityCheck, ValidityConstraint,
};
pub use error::{QualityError, Result as QualityResult, ResultExt};
pub use profiler::{DataProfiler, classify_column};
pub use remediation::RemediationEngine;
pub use rules::RuleEngine;
pub use store::{ResultStore, ResultToken};
pub use types::{
    CategoricalSummary, ColumnKind, ColumnProfile, DatasetProfile, NumericSummary, QualityReport,
    RemediationOutcome, RuleKind, RuleOutcome, RuleScore,
};
