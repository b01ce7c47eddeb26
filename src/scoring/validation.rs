//! Model validation against recorded outcomes

use super::engine::ScoringEngine;
use super::ScoringResult;
use crate::factor::{ModelValidation, NewOutcome, Outcome};
use crate::graph::{ModelId, OutcomeId, Scope};
use tracing::info;

impl ScoringEngine {
    pub fn record_outcome(&self, outcome: NewOutcome) -> ScoringResult<Outcome> {
        let outcome = self.store().insert_outcome(outcome)?;
        info!("Recorded {:?} outcome for {} (success={})", outcome.outcome_type, outcome.unit_id, outcome.success);
        Ok(outcome)
    }

    /// Compare a model's prediction for the outcome's unit with what was
    /// observed, and record the result.
    ///
    /// The prediction is the model's average loss over every interface
    /// touching the unit; knowledge loss counts as having occurred when the
    /// outcome was not a success.
    pub fn validate_model(&self, model_id: ModelId, outcome_id: OutcomeId) -> ScoringResult<ModelValidation> {
        let outcome = self.store().get_outcome(outcome_id)?;
        let network = self.compute_network_score(&Scope::Unit(outcome.unit_id.clone()), Some(model_id))?;

        let validation = ModelValidation::new(model_id, &outcome, network.average_energy_loss);
        self.store().record_validation(validation.clone())?;

        info!(
            "Validated {} against {}: predicted {:.3}, accuracy {:.3}",
            model_id, outcome_id, validation.predicted_risk_score, validation.prediction_accuracy
        );
        Ok(validation)
    }

    pub fn model_validations(&self, model_id: ModelId) -> ScoringResult<Vec<ModelValidation>> {
        self.store().get_model(model_id)?;
        Ok(self.store().validations(model_id))
    }
}
