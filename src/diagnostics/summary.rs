//! Whole-population summaries over the legacy energy loss field

use super::population::{ratio, Population};
use crate::graph::Lifecycle;
use crate::scoring::round_to;
use serde::{Deserialize, Serialize};

/// Interfaces at or below this legacy loss carry energy well
const STRONG_LOSS_MAX: u32 = 15;
/// Interfaces at or above this legacy loss risk decomposition
const WEAK_LOSS_MIN: u32 = 35;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkStatistics {
    pub total_entities: usize,
    pub total_interfaces: usize,
    /// Percent of interfaces with legacy loss <= 15
    pub energy_flow: f64,
    /// Percent of interfaces with legacy loss >= 35
    pub decomposition_risk: f64,
    /// Mean legacy loss in percent
    pub average_energy_loss: f64,
}

impl NetworkStatistics {
    pub fn from_population(population: &Population) -> Self {
        let total = population.interfaces.len();
        let losses = population.interfaces.iter().map(|i| i.legacy_loss());

        let strong = losses.clone().filter(|l| *l <= STRONG_LOSS_MAX).count();
        let weak = losses.clone().filter(|l| *l >= WEAK_LOSS_MIN).count();
        let sum: u32 = losses.sum();

        NetworkStatistics {
            total_entities: population.entities.len(),
            total_interfaces: total,
            energy_flow: round_to(ratio(strong, total) * 100.0, 1),
            decomposition_risk: round_to(ratio(weak, total) * 100.0, 1),
            average_energy_loss: round_to(ratio(sum as usize, total), 1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LifecycleShare {
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LifecycleDistribution {
    pub incoming: LifecycleShare,
    pub established: LifecycleShare,
    pub outgoing: LifecycleShare,
    pub total: usize,
}

impl LifecycleDistribution {
    pub fn from_population(population: &Population) -> Self {
        let total = population.teams().count();
        let share = |stage: Lifecycle| {
            let count = population.teams().filter(|t| t.lifecycle == stage).count();
            LifecycleShare {
                count,
                percentage: round_to(ratio(count, total) * 100.0, 1),
            }
        };

        LifecycleDistribution {
            incoming: share(Lifecycle::Incoming),
            established: share(Lifecycle::Established),
            outgoing: share(Lifecycle::Outgoing),
            total,
        }
    }
}
