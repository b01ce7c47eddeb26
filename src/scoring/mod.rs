//! Knowledge-transfer risk scoring
//!
//! - `ScoringEngine`: per-interface composite loss under a factor model
//! - Legacy migrator: bond type strings onto factor assignments
//! - Network aggregator: scope-wide averages and tier histograms
//! - Model validation against recorded outcomes

pub mod engine;
pub mod legacy;
pub mod network;
pub mod tier;
pub mod validation;

pub use engine::{AppliedFactor, ScoreResult, ScoringEngine};
pub use legacy::MigrationReport;
pub use network::{NetworkScore, TierHistogram};
pub use tier::RiskTier;

use crate::graph::StoreError;
use thiserror::Error;

/// Scoring errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoringError {
    /// A referenced model, interface, factor or outcome is absent
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed or inconsistent request
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No model was given and none is flagged active
    #[error("No active model; run bootstrap or activate a model")]
    NoActiveModel,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ScoringError {
    pub fn is_not_found(&self) -> bool {
        match self {
            ScoringError::NotFound(_) | ScoringError::NoActiveModel => true,
            ScoringError::Store(e) => e.is_not_found(),
            ScoringError::InvalidInput(_) => false,
        }
    }
}

pub type ScoringResult<T> = Result<T, ScoringError>;

/// Round to `decimals` places, ties to even
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}
