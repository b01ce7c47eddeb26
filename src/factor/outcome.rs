//! Observed outcomes and model validation records
//!
//! Outcomes are validation ground truth only; they never feed a score.

use crate::graph::{EntityId, ModelId, OutcomeId, UnitId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeType {
    MissionSuccess,
    ProgramSuccess,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outcome {
    pub id: OutcomeId,
    pub unit_id: UnitId,
    pub project_id: Option<EntityId>,
    pub outcome_type: OutcomeType,
    pub success: bool,
    pub cohort_year: Option<i32>,
    pub notes: Option<String>,
    pub recorded_at: i64,
}

impl Outcome {
    /// Knowledge loss is taken to have occurred when the outcome failed
    pub fn knowledge_lost(&self) -> bool {
        !self.success
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOutcome {
    pub unit_id: UnitId,
    #[serde(default)]
    pub project_id: Option<EntityId>,
    pub outcome_type: OutcomeType,
    pub success: bool,
    #[serde(default)]
    pub cohort_year: Option<i32>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Comparison of one model's prediction against one observed outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelValidation {
    pub model_id: ModelId,
    pub outcome_id: OutcomeId,
    /// Predicted loss in [0.0, 1.0]
    pub predicted_risk_score: f64,
    /// Whether knowledge loss actually occurred
    pub actual_outcome: bool,
    /// 1 - |predicted - actual|, in [0.0, 1.0]
    pub prediction_accuracy: f64,
    pub validated_at: i64,
}

impl ModelValidation {
    pub fn new(model_id: ModelId, outcome: &Outcome, predicted_risk_score: f64) -> Self {
        let actual = outcome.knowledge_lost();
        let target = if actual { 1.0 } else { 0.0 };
        ModelValidation {
            model_id,
            outcome_id: outcome.id,
            predicted_risk_score,
            actual_outcome: actual,
            prediction_accuracy: 1.0 - (predicted_risk_score - target).abs(),
            validated_at: chrono::Utc::now().timestamp_millis(),
        }
    }
}
