//! Quality rule evaluation.
//!
//! Each rule is a pure function `(DataFrame, config) -> score in [0, 100]`.
//! Rules are independent and order-irrelevant; the aggregate DQ Score is
//! the unweighted mean of the rules that produced a score. A rule whose
//! configuration section is absent reports [`RuleOutcome::Unavailable`]
//! and is excluded from the mean.

mod engine;

pub use engine::RuleEngine;

// Re-exported so callers importing the rules module see the outcome types
// next to the engine.
pub use crate::types::{RuleKind, RuleOutcome, RuleScore};
