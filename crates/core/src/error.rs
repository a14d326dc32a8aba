//! Error types for the weather generator

use crate::core_types::{DownfallKind, Severity};
use thiserror::Error;

/// Errors raised by weather construction and sampling.
///
/// All variants are precondition failures: they surface at the call that
/// produced the bad input and are never retried internally.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeatherError {
    /// Severity, kind and thunder do not form a legal downfall.
    #[error("illegal downfall combination: severity {severity}, kind {kind}, thunder {thunder}")]
    InvalidCombination {
        severity: Severity,
        kind: DownfallKind,
        thunder: bool,
    },

    /// A weighting function left no candidate with positive weight.
    ///
    /// This indicates a bug in the weighting function, not bad user input.
    #[error("transition weights over {candidates} candidates are all zero or invalid")]
    DegenerateDistribution { candidates: usize },

    /// A construction parameter is out of range.
    #[error("invalid {parameter}: {reason}")]
    InvalidConstruction {
        parameter: &'static str,
        reason: String,
    },
}
