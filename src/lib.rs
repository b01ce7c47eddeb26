//! Lossgraph
//!
//! Knowledge-transfer loss scoring over an organisation graph. Teams,
//! faculty and projects are connected by directed interfaces; each
//! interface is scored for how much knowledge it loses.
//!
//! # Architecture
//!
//! - `graph`: typed ids, entities, interfaces and the `GraphStore` trait,
//!   with a thread-safe in-memory implementation
//! - `factor`: researcher-managed risk factors, their values, weighted
//!   factor models and observed outcomes
//! - `scoring`: the scoring engine, legacy bond type migration, network
//!   aggregation and model validation
//! - `diagnostics`: rule-based dimension scores and backward tracing,
//!   independent of the factor system
//! - `config`, `snapshot`, `sample`: YAML configuration, JSON snapshots and
//!   the reference sample organisation
//!
//! ## Example Usage
//!
//! ```rust
//! use lossgraph::factor::{AssignmentRequest, BOND_STRENGTH, KNOWLEDGE_TYPE};
//! use lossgraph::graph::{MemoryStore, NewInterface};
//! use lossgraph::scoring::{RiskTier, ScoringEngine};
//! use std::sync::Arc;
//!
//! let engine = ScoringEngine::with_store(Arc::new(MemoryStore::new()));
//! engine.bootstrap().unwrap();
//!
//! let iface = engine
//!     .create_interface(NewInterface::new("i1", "team_1", "team_2"))
//!     .unwrap();
//!
//! let (kt, institutional) = engine.find_value(KNOWLEDGE_TYPE, "institutional").unwrap();
//! let (bs, weak) = engine.find_value(BOND_STRENGTH, "weak").unwrap();
//! engine
//!     .assign_factors(
//!         &iface.id,
//!         &[
//!             AssignmentRequest::new(kt.id, institutional.id),
//!             AssignmentRequest::new(bs.id, weak.id),
//!         ],
//!     )
//!     .unwrap();
//!
//! let score = engine.compute_interface_score(&iface.id, None).unwrap();
//! assert_eq!(score.energy_loss_percent, 75);
//! assert_eq!(score.risk_level, RiskTier::Critical);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod diagnostics;
pub mod factor;
pub mod graph;
pub mod sample;
pub mod scoring;
pub mod snapshot;

// Re-export main types for convenience
pub use config::{ConfigError, ConfigResult, EngineConfig};

pub use diagnostics::{get_diagnostics, DiagnosticReport, Dimension, DimensionResult, Population};

pub use factor::{
    AssignmentRequest, FactorAssignment, FactorCategory, FactorModel, FactorValue, ModelFactorWeight, RiskFactor,
};

pub use graph::{
    Entity, EntityId, GraphStore, Interface, InterfaceId, MemoryStore, ModelId, NewInterface, Scope, StoreError,
    StoreResult, UnitId,
};

pub use scoring::{
    MigrationReport, NetworkScore, RiskTier, ScoreResult, ScoringEngine, ScoringError, ScoringResult,
};

pub use snapshot::{Snapshot, SnapshotError, SnapshotResult};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let ver = version();
        assert!(!ver.is_empty());
        assert_eq!(ver, "0.3.0");
    }
}
