//! Risk factor catalog
//!
//! Researcher-managed reference data describing what contributes to
//! knowledge-transfer loss:
//! - `RiskFactor`: a named qualitative dimension (soft-deleted via `active`)
//! - `FactorValue`: one enumerable value of a factor with its baseline loss
//! - `FactorModel` / `ModelFactorWeight`: a weighted scoring hypothesis
//! - `FactorAssignment`: the value an interface takes for a factor

pub mod baseline;
pub mod model;
pub mod outcome;

pub use baseline::{baseline_factors, baseline_model, BaselineFactor, BaselineValue, BASELINE_MODEL_NAME};
pub use model::{FactorModel, ModelFactorWeight, NewFactorModel, ValidationStatus};
pub use outcome::{ModelValidation, NewOutcome, Outcome, OutcomeType};

use crate::graph::{FactorId, FactorValueId, InterfaceId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Well-known factor keys used by the baseline model and the legacy migrator
pub const KNOWLEDGE_TYPE: &str = "knowledge_type";
pub const BOND_STRENGTH: &str = "bond_strength";
pub const TEMPORAL_ALIGNMENT: &str = "temporal_alignment";
pub const ACTOR_AUTONOMY: &str = "actor_autonomy";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FactorCategory {
    #[serde(rename = "NDA_Dimension")]
    NdaDimension,
    #[serde(rename = "Interface_Property")]
    InterfaceProperty,
    #[serde(rename = "Entity_Attribute")]
    EntityAttribute,
}

impl fmt::Display for FactorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FactorCategory::NdaDimension => "NDA_Dimension",
            FactorCategory::InterfaceProperty => "Interface_Property",
            FactorCategory::EntityAttribute => "Entity_Attribute",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    Established,
    #[default]
    Provisional,
    Exploratory,
}

/// A named dimension of knowledge-transfer risk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskFactor {
    pub id: FactorId,
    /// Unique machine key (e.g. "knowledge_type")
    pub factor_name: String,
    pub display_name: String,
    pub description: Option<String>,
    pub category: FactorCategory,
    pub confidence_level: ConfidenceLevel,
    pub research_notes: Option<String>,
    /// Inactive factors are excluded from new scores; assignments are kept
    pub active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// One qualitative value of a factor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorValue {
    pub id: FactorValueId,
    pub factor_id: FactorId,
    /// Machine key, unique within its factor
    pub value_name: String,
    pub display_name: String,
    pub description: Option<String>,
    /// Baseline fractional loss in [0.0, 1.0]
    pub energy_loss_contribution: f64,
    pub sort_order: u32,
    pub created_at: i64,
}

/// Creation request for a factor value
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFactorValue {
    pub value_name: String,
    pub display_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub energy_loss_contribution: f64,
    /// Display position; defaults to the value's index on creation
    #[serde(default)]
    pub sort_order: Option<u32>,
}

impl NewFactorValue {
    pub fn new(value_name: impl Into<String>, display_name: impl Into<String>, contribution: f64) -> Self {
        NewFactorValue {
            value_name: value_name.into(),
            display_name: display_name.into(),
            description: None,
            energy_loss_contribution: contribution,
            sort_order: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Creation request for a factor together with its initial values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRiskFactor {
    pub factor_name: String,
    pub display_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: FactorCategory,
    #[serde(default)]
    pub confidence_level: ConfidenceLevel,
    #[serde(default)]
    pub research_notes: Option<String>,
    #[serde(default)]
    pub values: Vec<NewFactorValue>,
}

impl NewRiskFactor {
    pub fn new(factor_name: impl Into<String>, display_name: impl Into<String>, category: FactorCategory) -> Self {
        NewRiskFactor {
            factor_name: factor_name.into(),
            display_name: display_name.into(),
            description: None,
            category,
            confidence_level: ConfidenceLevel::default(),
            research_notes: None,
            values: Vec::new(),
        }
    }

    pub fn with_confidence(mut self, level: ConfidenceLevel) -> Self {
        self.confidence_level = level;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_value(mut self, value: NewFactorValue) -> Self {
        self.values.push(value);
        self
    }
}

/// The value an interface takes for one factor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorAssignment {
    pub interface_id: InterfaceId,
    pub factor_id: FactorId,
    pub factor_value_id: FactorValueId,
    pub assigned_at: i64,
}

/// A submitted (factor, value) pair, before validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRequest {
    pub factor_id: FactorId,
    pub factor_value_id: FactorValueId,
}

impl AssignmentRequest {
    pub fn new(factor_id: FactorId, factor_value_id: FactorValueId) -> Self {
        AssignmentRequest { factor_id, factor_value_id }
    }
}

/// Check that a contribution is a finite fraction in [0.0, 1.0]
pub fn is_valid_contribution(contribution: f64) -> bool {
    contribution.is_finite() && (0.0..=1.0).contains(&contribution)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_wire_names() {
        let json = serde_json::to_string(&FactorCategory::InterfaceProperty).unwrap();
        assert_eq!(json, "\"Interface_Property\"");
        assert_eq!(FactorCategory::NdaDimension.to_string(), "NDA_Dimension");
    }

    #[test]
    fn test_contribution_bounds() {
        assert!(is_valid_contribution(0.0));
        assert!(is_valid_contribution(1.0));
        assert!(!is_valid_contribution(1.01));
        assert!(!is_valid_contribution(-0.1));
        assert!(!is_valid_contribution(f64::NAN));
    }

    #[test]
    fn test_new_factor_builder() {
        let factor = NewRiskFactor::new("mentoring", "Mentoring", FactorCategory::EntityAttribute)
            .with_confidence(ConfidenceLevel::Exploratory)
            .with_value(NewFactorValue::new("present", "Present", 0.0))
            .with_value(NewFactorValue::new("absent", "Absent", 0.2));

        assert_eq!(factor.values.len(), 2);
        assert_eq!(factor.confidence_level, ConfidenceLevel::Exploratory);
    }
}
