//! Error types for the amortization engine

use thiserror::Error;

/// Errors surfaced by the engine, the loan loader and the exporter.
///
/// An infeasible accelerated payoff is not an error; see
/// [`crate::amortization::AcceleratedPayoff::Infeasible`].
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Unknown payment frequency: {0:?} (expected monthly, quarterly or annual)")]
    InvalidFrequency(String),

    #[error("Invalid loan terms: {field} {reason}")]
    InvalidTerms { field: &'static str, reason: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    pub(crate) fn terms(field: &'static str, reason: impl Into<String>) -> Self {
        EngineError::InvalidTerms {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
