//! Scoring engine
//!
//! Computes the composite energy loss of an interface from its factor
//! assignments and a model's weights:
//!
//! ```text
//! total = min(1.0, sum(value.energy_loss_contribution * weight))
//! ```
//!
//! A factor with no weight row in the model is scored at weight 1.0. A row
//! with `enabled = false` excludes the factor, as does deactivating the
//! factor itself.

use super::tier::RiskTier;
use super::{round_to, ScoringError, ScoringResult};
use crate::config::EngineConfig;
use crate::factor::{
    baseline_factors, baseline_model, is_valid_contribution, AssignmentRequest, FactorModel, FactorValue,
    ModelFactorWeight, NewFactorModel, NewFactorValue, NewRiskFactor, RiskFactor,
};
use crate::graph::{
    AssignedValue, FactorId, FactorValueId, GraphStore, Interface, InterfaceId, ModelId, NewInterface,
    StoreError,
};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// One factor's part in a score, itemised for auditing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedFactor {
    pub factor_id: FactorId,
    pub factor_name: String,
    pub factor_display_name: String,
    pub factor_value: String,
    pub factor_value_display: String,
    /// Base contribution of the value
    pub contribution: f64,
    pub weight: f64,
    pub weighted_contribution: f64,
}

/// Score of one interface under one model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub interface_id: InterfaceId,
    pub model_id: ModelId,
    pub model_name: String,
    /// Clamped loss rounded to 3 decimals
    pub total_energy_loss: f64,
    /// Clamped loss as a truncated percentage
    pub energy_loss_percent: u32,
    pub risk_level: RiskTier,
    pub factors_applied: Vec<AppliedFactor>,
}

/// Weight lookup for one model
#[derive(Debug, Default)]
pub(crate) struct ModelWeights {
    rows: FxHashMap<FactorId, ModelFactorWeight>,
}

impl ModelWeights {
    pub(crate) fn load(store: &dyn GraphStore, model_id: ModelId) -> Self {
        let rows = store
            .model_weights(model_id)
            .into_iter()
            .map(|w| (w.factor_id, w))
            .collect();
        ModelWeights { rows }
    }

    /// Weight applied to `factor_id`, or `None` if the model disables it
    pub(crate) fn weight_for(&self, factor_id: FactorId) -> Option<f64> {
        match self.rows.get(&factor_id) {
            Some(row) if !row.enabled => None,
            Some(row) => Some(row.weight),
            None => Some(1.0),
        }
    }
}

/// Factor-model scoring over a shared graph store
pub struct ScoringEngine {
    store: Arc<dyn GraphStore>,
    config: EngineConfig,
}

impl ScoringEngine {
    pub fn new(store: Arc<dyn GraphStore>, config: EngineConfig) -> Self {
        ScoringEngine { store, config }
    }

    /// Engine with the default configuration
    pub fn with_store(store: Arc<dyn GraphStore>) -> Self {
        Self::new(store, EngineConfig::default())
    }

    pub fn store(&self) -> &Arc<dyn GraphStore> {
        &self.store
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ============================================================
    // Bootstrap
    // ============================================================

    /// Seed any missing baseline factors (matched by name) with their
    /// values. Returns the number of factors created.
    pub fn seed_baseline(&self) -> ScoringResult<usize> {
        let mut created = 0;
        for factor in baseline_factors() {
            if self.store.factor_by_name(factor.factor_name).is_some() {
                continue;
            }
            match self.store.insert_factor(factor.to_request()) {
                Ok(_) => created += 1,
                // Seeded concurrently by another caller
                Err(StoreError::AlreadyExists(_)) => {}
                Err(e) => return Err(e.into()),
            }
        }

        if created > 0 {
            info!("Seeded {} baseline factor(s)", created);
        }
        Ok(created)
    }

    /// Ensure the baseline factors and model exist and that some model is
    /// active. Idempotent; returns the active model.
    pub fn bootstrap(&self) -> ScoringResult<FactorModel> {
        self.seed_baseline()?;

        let name = &self.config.baseline_model_name;
        let baseline = match self.store.model_by_name(name) {
            Some(model) => model,
            None => match self.store.insert_model(baseline_model(name)) {
                Ok(model) => model,
                Err(StoreError::AlreadyExists(_)) => self
                    .store
                    .model_by_name(name)
                    .ok_or_else(|| ScoringError::NotFound(format!("Model '{}'", name)))?,
                Err(e) => return Err(e.into()),
            },
        };

        if let Some(active) = self.store.active_model() {
            debug!("Bootstrap: model '{}' already active", active.model_name);
            return Ok(active);
        }

        let active = self.store.activate_model(baseline.id)?;
        info!("Bootstrap: activated baseline model '{}'", active.model_name);
        Ok(active)
    }

    /// Look up an explicit model, or the active one. Never writes.
    pub fn resolve_model(&self, model_id: Option<ModelId>) -> ScoringResult<FactorModel> {
        match model_id {
            Some(id) => Ok(self.store.get_model(id)?),
            None => self.store.active_model().ok_or(ScoringError::NoActiveModel),
        }
    }

    // ============================================================
    // Scoring
    // ============================================================

    /// Score one interface under `model_id`, or the active model
    pub fn compute_interface_score(
        &self,
        interface_id: &InterfaceId,
        model_id: Option<ModelId>,
    ) -> ScoringResult<ScoreResult> {
        let model = self.resolve_model(model_id)?;
        self.store.get_interface(interface_id)?;
        let weights = ModelWeights::load(self.store.as_ref(), model.id);
        self.score_with(interface_id, &model, &weights)
    }

    /// Score against an already-resolved model and weight table
    pub(crate) fn score_with(
        &self,
        interface_id: &InterfaceId,
        model: &FactorModel,
        weights: &ModelWeights,
    ) -> ScoringResult<ScoreResult> {
        let details = self.store.assignment_details(interface_id)?;

        let mut total = 0.0;
        let mut factors_applied = Vec::with_capacity(details.len());

        for AssignedValue { factor, value, .. } in details {
            if !factor.active {
                debug!("{}: skipping inactive factor '{}'", interface_id, factor.factor_name);
                continue;
            }
            let Some(weight) = weights.weight_for(factor.id) else {
                debug!(
                    "{}: factor '{}' disabled in model '{}'",
                    interface_id, factor.factor_name, model.model_name
                );
                continue;
            };

            let weighted = value.energy_loss_contribution * weight;
            total += weighted;

            factors_applied.push(AppliedFactor {
                factor_id: factor.id,
                factor_name: factor.factor_name,
                factor_display_name: factor.display_name,
                factor_value: value.value_name,
                factor_value_display: value.display_name,
                contribution: value.energy_loss_contribution,
                weight,
                weighted_contribution: weighted,
            });
        }

        let total = total.clamp(0.0, 1.0);
        let result = ScoreResult {
            interface_id: interface_id.clone(),
            model_id: model.id,
            model_name: model.model_name.clone(),
            total_energy_loss: round_to(total, 3),
            energy_loss_percent: (total * 100.0) as u32,
            risk_level: RiskTier::from_loss(total),
            factors_applied,
        };

        debug!(
            "{} under '{}': {:.3} ({})",
            interface_id, model.model_name, result.total_energy_loss, result.risk_level
        );
        Ok(result)
    }

    // ============================================================
    // Interfaces and assignments
    // ============================================================

    /// Create an interface, deriving endpoint units with the configured
    /// declared unit as fallback
    pub fn create_interface(&self, request: NewInterface) -> ScoringResult<Interface> {
        let interface = Interface::from_request(request, &self.config.declared_unit);
        self.store.insert_interface(interface.clone())?;
        Ok(interface)
    }

    /// Replace every factor assignment of an interface with `assignments`.
    ///
    /// Each value must belong to its claimed factor and no factor may appear
    /// twice; on any failure nothing is written.
    pub fn assign_factors(
        &self,
        interface_id: &InterfaceId,
        assignments: &[AssignmentRequest],
    ) -> ScoringResult<bool> {
        self.store.get_interface(interface_id)?;

        let mut seen: FxHashSet<FactorId> = FxHashSet::default();
        for request in assignments {
            self.check_assignment(request)?;
            if !seen.insert(request.factor_id) {
                return Err(ScoringError::InvalidInput(format!(
                    "{} assigned more than once",
                    request.factor_id
                )));
            }
        }

        let rows = self.store.replace_assignments(interface_id, assignments)?;
        info!("Assigned {} factor value(s) to {}", rows.len(), interface_id);
        Ok(true)
    }

    fn check_assignment(&self, request: &AssignmentRequest) -> ScoringResult<()> {
        let factor = self.store.get_factor(request.factor_id).map_err(|_| {
            ScoringError::InvalidInput(format!("Unknown {}", request.factor_id))
        })?;
        let value = self.store.get_factor_value(request.factor_value_id).map_err(|_| {
            ScoringError::InvalidInput(format!("Unknown {}", request.factor_value_id))
        })?;
        if value.factor_id != factor.id {
            return Err(ScoringError::InvalidInput(format!(
                "{} ('{}') does not belong to factor '{}'",
                value.id, value.value_name, factor.factor_name
            )));
        }
        Ok(())
    }

    /// Current assignments of an interface with their factor and value rows
    pub fn interface_assignments(&self, interface_id: &InterfaceId) -> ScoringResult<Vec<AssignedValue>> {
        self.store.get_interface(interface_id)?;
        Ok(self.store.assignment_details(interface_id)?)
    }

    // ============================================================
    // Factor and model management
    // ============================================================

    pub fn create_factor(&self, factor: NewRiskFactor) -> ScoringResult<RiskFactor> {
        for value in &factor.values {
            check_contribution(&value.value_name, value.energy_loss_contribution)?;
        }
        Ok(self.store.insert_factor(factor)?)
    }

    pub fn add_factor_value(&self, factor_id: FactorId, value: NewFactorValue) -> ScoringResult<FactorValue> {
        check_contribution(&value.value_name, value.energy_loss_contribution)?;
        Ok(self.store.insert_factor_value(factor_id, value)?)
    }

    /// Exclude a factor from new scores; existing assignments are kept
    pub fn deactivate_factor(&self, factor_id: FactorId) -> ScoringResult<RiskFactor> {
        Ok(self.store.set_factor_active(factor_id, false)?)
    }

    pub fn reactivate_factor(&self, factor_id: FactorId) -> ScoringResult<RiskFactor> {
        Ok(self.store.set_factor_active(factor_id, true)?)
    }

    /// Values of a factor, by display order
    pub fn factor_values(&self, factor_id: FactorId) -> ScoringResult<Vec<FactorValue>> {
        self.store.get_factor(factor_id)?;
        Ok(self.store.factor_values(factor_id))
    }

    /// Look up a value by factor and value name
    pub fn find_value(&self, factor_name: &str, value_name: &str) -> Option<(RiskFactor, FactorValue)> {
        let factor = self.store.factor_by_name(factor_name)?;
        let value = self.store.factor_value_by_name(factor.id, value_name)?;
        Some((factor, value))
    }

    /// Create a new, inactive model
    pub fn create_model(&self, model: NewFactorModel) -> ScoringResult<FactorModel> {
        Ok(self.store.insert_model(model)?)
    }

    pub fn set_model_weight(
        &self,
        model_id: ModelId,
        factor_id: FactorId,
        weight: f64,
        enabled: bool,
    ) -> ScoringResult<()> {
        if !weight.is_finite() {
            return Err(ScoringError::InvalidInput(format!(
                "Weight for {} must be finite, got {}",
                factor_id, weight
            )));
        }
        self.store.upsert_model_weight(ModelFactorWeight {
            enabled,
            ..ModelFactorWeight::new(model_id, factor_id, weight)
        })?;
        debug!("{}: {} weight={} enabled={}", model_id, factor_id, weight, enabled);
        Ok(())
    }

    /// Make `model_id` the single active model
    pub fn activate_model(&self, model_id: ModelId) -> ScoringResult<FactorModel> {
        Ok(self.store.activate_model(model_id)?)
    }

    pub fn list_models(&self) -> Vec<FactorModel> {
        self.store.models()
    }

    pub fn list_factors(&self) -> Vec<RiskFactor> {
        self.store.factors()
    }

    pub(crate) fn value_by_name(&self, factor_id: FactorId, value_name: &str) -> Option<FactorValueId> {
        self.store.factor_value_by_name(factor_id, value_name).map(|v| v.id)
    }
}

fn check_contribution(value_name: &str, contribution: f64) -> ScoringResult<()> {
    if is_valid_contribution(contribution) {
        Ok(())
    } else {
        Err(ScoringError::InvalidInput(format!(
            "Contribution of '{}' must be within [0.0, 1.0], got {}",
            value_name, contribution
        )))
    }
}
