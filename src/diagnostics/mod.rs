//! Rule-based organisational diagnostics
//!
//! Independent of the factor system: six dimension scores computed by
//! point accumulation over raw entity and interface counts, backward
//! tracing of common failure scenarios, and summary statistics over the
//! legacy energy loss field. Every function here is pure; the same
//! population always yields the same report.

pub mod backward;
pub mod population;
pub mod rules;
pub mod summary;

pub use backward::{backward_tracing, BackwardTracing, FailureKind, RiskLevel, Scenario};
pub use population::{ratio, Population, PopulationMetrics};
pub use rules::{Dimension, DimensionResult, Rule};
pub use summary::{LifecycleDistribution, LifecycleShare, NetworkStatistics};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Complete diagnostic analysis of one population
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticReport {
    /// One result per dimension, in `Dimension::ALL` order
    pub dimensions: Vec<DimensionResult>,
    pub backward_tracing: BackwardTracing,
    pub statistics: NetworkStatistics,
    pub lifecycle: LifecycleDistribution,
}

impl DiagnosticReport {
    pub fn dimension(&self, dimension: Dimension) -> Option<&DimensionResult> {
        self.dimensions.iter().find(|d| d.dimension == dimension.name())
    }
}

pub fn get_diagnostics(population: &Population) -> DiagnosticReport {
    let metrics = population.metrics();
    debug!(
        "Diagnosing {} entities, {} interfaces",
        metrics.entity_count, metrics.interface_count
    );

    DiagnosticReport {
        dimensions: Dimension::ALL.iter().map(|d| d.evaluate(&metrics)).collect(),
        backward_tracing: backward_tracing(&metrics),
        statistics: NetworkStatistics::from_population(population),
        lifecycle: LifecycleDistribution::from_population(population),
    }
}
