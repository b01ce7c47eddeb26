//! Factor models and their per-factor weights

use crate::graph::{FactorId, ModelId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    #[default]
    Testing,
    Validated,
    Rejected,
}

/// A named, weighted combination of risk factors
///
/// At most one model is active system-wide; the store enforces this in
/// `GraphStore::activate_model`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorModel {
    pub id: ModelId,
    /// Unique machine key
    pub model_name: String,
    pub display_name: String,
    pub description: Option<String>,
    pub is_active: bool,
    /// Informational only
    pub is_baseline: bool,
    pub hypothesis: Option<String>,
    pub validation_status: ValidationStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFactorModel {
    pub model_name: String,
    pub display_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_baseline: bool,
    #[serde(default)]
    pub hypothesis: Option<String>,
    #[serde(default)]
    pub validation_status: ValidationStatus,
}

impl NewFactorModel {
    pub fn new(model_name: impl Into<String>, display_name: impl Into<String>) -> Self {
        NewFactorModel {
            model_name: model_name.into(),
            display_name: display_name.into(),
            description: None,
            is_baseline: false,
            hypothesis: None,
            validation_status: ValidationStatus::default(),
        }
    }

    pub fn with_hypothesis(mut self, hypothesis: impl Into<String>) -> Self {
        self.hypothesis = Some(hypothesis.into());
        self
    }
}

/// Weight of one factor inside one model
///
/// A factor with no weight row in a model is scored at weight 1.0; only
/// `enabled = false` excludes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelFactorWeight {
    pub model_id: ModelId,
    pub factor_id: FactorId,
    /// Multiplier, conventionally in [0.0, 2.0]
    pub weight: f64,
    pub enabled: bool,
}

impl ModelFactorWeight {
    pub fn new(model_id: ModelId, factor_id: FactorId, weight: f64) -> Self {
        ModelFactorWeight {
            model_id,
            factor_id,
            weight,
            enabled: true,
        }
    }
}
