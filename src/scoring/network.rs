//! Network aggregation
//!
//! Scores every interface in a scope under one model. An interface whose
//! scoring fails is counted in `failed_interfaces` and left out of the
//! averages; it never aborts the aggregation.

use super::engine::{ModelWeights, ScoreResult, ScoringEngine};
use super::tier::RiskTier;
use super::{round_to, ScoringResult};
use crate::graph::{ModelId, Scope, UnitId};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Interface count per risk tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierHistogram {
    pub low: usize,
    pub moderate: usize,
    pub high: usize,
    pub critical: usize,
}

impl TierHistogram {
    pub fn record(&mut self, tier: RiskTier) {
        match tier {
            RiskTier::Low => self.low += 1,
            RiskTier::Moderate => self.moderate += 1,
            RiskTier::High => self.high += 1,
            RiskTier::Critical => self.critical += 1,
        }
    }

    pub fn count(&self, tier: RiskTier) -> usize {
        match tier {
            RiskTier::Low => self.low,
            RiskTier::Moderate => self.moderate,
            RiskTier::High => self.high,
            RiskTier::Critical => self.critical,
        }
    }

    pub fn total(&self) -> usize {
        self.low + self.moderate + self.high + self.critical
    }
}

/// Aggregate score of a scope under one model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkScore {
    /// `None` for the whole graph
    pub unit_id: Option<UnitId>,
    pub model_id: ModelId,
    pub model_name: String,
    pub total_interfaces: usize,
    pub analyzed_interfaces: usize,
    pub failed_interfaces: usize,
    /// Mean of per-interface totals, 3 decimals; 0.0 when nothing was analyzed
    pub average_energy_loss: f64,
    pub average_energy_loss_percent: u32,
    pub risk_distribution: TierHistogram,
    pub interfaces: Vec<ScoreResult>,
}

impl ScoringEngine {
    /// Score every interface in `scope` under `model_id`, or the active model
    pub fn compute_network_score(&self, scope: &Scope, model_id: Option<ModelId>) -> ScoringResult<NetworkScore> {
        let model = self.resolve_model(model_id)?;
        let weights = ModelWeights::load(self.store().as_ref(), model.id);
        let interfaces = self.store().interfaces(scope);

        let mut results = Vec::with_capacity(interfaces.len());
        let mut failed = 0;
        for interface in &interfaces {
            match self.score_with(&interface.id, &model, &weights) {
                Ok(score) => results.push(score),
                Err(e) => {
                    warn!("Could not score interface {}: {}", interface.id, e);
                    failed += 1;
                }
            }
        }

        let mut risk_distribution = TierHistogram::default();
        let mut sum = 0.0;
        for score in &results {
            risk_distribution.record(score.risk_level);
            sum += score.total_energy_loss;
        }
        let average = if results.is_empty() {
            0.0
        } else {
            sum / results.len() as f64
        };

        debug!(
            "Network score for {:?} under '{}': {} of {} analyzed",
            scope.unit_id(),
            model.model_name,
            results.len(),
            interfaces.len()
        );

        Ok(NetworkScore {
            unit_id: scope.unit_id().cloned(),
            model_id: model.id,
            model_name: model.model_name,
            total_interfaces: interfaces.len(),
            analyzed_interfaces: results.len(),
            failed_interfaces: failed,
            average_energy_loss: round_to(average, 3),
            average_energy_loss_percent: (average * 100.0) as u32,
            risk_distribution,
            interfaces: results,
        })
    }

    /// Aggregate the same scope once per model, side by side
    pub fn compare_models(&self, model_ids: &[ModelId], scope: &Scope) -> ScoringResult<Vec<NetworkScore>> {
        model_ids
            .iter()
            .map(|id| self.compute_network_score(scope, Some(*id)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram() {
        let mut histogram = TierHistogram::default();
        histogram.record(RiskTier::Low);
        histogram.record(RiskTier::Critical);
        histogram.record(RiskTier::Critical);

        assert_eq!(histogram.count(RiskTier::Critical), 2);
        assert_eq!(histogram.count(RiskTier::High), 0);
        assert_eq!(histogram.total(), 3);
    }

    #[test]
    fn test_histogram_json_keys() {
        let json = serde_json::to_value(TierHistogram::default()).unwrap();
        for tier in RiskTier::ALL {
            assert_eq!(json[tier.as_str()], 0);
        }
    }
}
