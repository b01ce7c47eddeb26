//! Baseline factor definitions derived from Nearly Decomposable Architecture theory

use super::{
    ConfidenceLevel, FactorCategory, NewFactorModel, NewFactorValue, NewRiskFactor, ValidationStatus,
    ACTOR_AUTONOMY, BOND_STRENGTH, KNOWLEDGE_TYPE, TEMPORAL_ALIGNMENT,
};

pub const BASELINE_MODEL_NAME: &str = "baseline_v1";

#[derive(Debug, Clone, Copy)]
pub struct BaselineValue {
    pub value_name: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub contribution: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct BaselineFactor {
    pub factor_name: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub category: FactorCategory,
    pub confidence_level: ConfidenceLevel,
    pub values: &'static [BaselineValue],
}

impl BaselineFactor {
    pub fn to_request(&self) -> NewRiskFactor {
        let mut request = NewRiskFactor::new(self.factor_name, self.display_name, self.category)
            .with_confidence(self.confidence_level)
            .with_description(self.description);
        for value in self.values {
            request = request.with_value(
                NewFactorValue::new(value.value_name, value.display_name, value.contribution)
                    .with_description(value.description),
            );
        }
        request
    }
}

const BASELINE: [BaselineFactor; 4] = [
    BaselineFactor {
        factor_name: KNOWLEDGE_TYPE,
        display_name: "Knowledge Type",
        description: "Whether knowledge is codified (documented) or institutional (tacit)",
        category: FactorCategory::NdaDimension,
        confidence_level: ConfidenceLevel::Established,
        values: &[
            BaselineValue {
                value_name: "codified",
                display_name: "Codified",
                description: "Documented, transferable knowledge",
                contribution: 0.10,
            },
            BaselineValue {
                value_name: "institutional",
                display_name: "Institutional",
                description: "Tacit, experience-based knowledge",
                contribution: 0.40,
            },
        ],
    },
    BaselineFactor {
        factor_name: BOND_STRENGTH,
        display_name: "Bond Strength",
        description: "Strength of relationship between entities",
        category: FactorCategory::InterfaceProperty,
        confidence_level: ConfidenceLevel::Established,
        values: &[
            BaselineValue {
                value_name: "strong",
                display_name: "Strong",
                description: "Frequent, high-quality interactions",
                contribution: 0.05,
            },
            BaselineValue {
                value_name: "moderate",
                display_name: "Moderate",
                description: "Regular but limited interactions",
                contribution: 0.20,
            },
            BaselineValue {
                value_name: "weak",
                display_name: "Weak",
                description: "Infrequent or low-quality interactions",
                contribution: 0.35,
            },
        ],
    },
    BaselineFactor {
        factor_name: TEMPORAL_ALIGNMENT,
        display_name: "Temporal Alignment",
        description: "Timing of knowledge transfer relative to need",
        category: FactorCategory::NdaDimension,
        confidence_level: ConfidenceLevel::Provisional,
        values: &[
            BaselineValue {
                value_name: "aligned",
                display_name: "Well-Aligned",
                description: "Knowledge transferred when needed",
                contribution: 0.05,
            },
            BaselineValue {
                value_name: "misaligned",
                display_name: "Misaligned",
                description: "Knowledge transferred too early or late",
                contribution: 0.25,
            },
        ],
    },
    BaselineFactor {
        factor_name: ACTOR_AUTONOMY,
        display_name: "Actor Autonomy",
        description: "Degree of independence of entities at interface",
        category: FactorCategory::NdaDimension,
        confidence_level: ConfidenceLevel::Provisional,
        values: &[
            BaselineValue {
                value_name: "high",
                display_name: "High Autonomy",
                description: "Entities operate independently",
                contribution: 0.15,
            },
            BaselineValue {
                value_name: "low",
                display_name: "Low Autonomy",
                description: "Entities are tightly coupled",
                contribution: 0.05,
            },
        ],
    },
];

/// The four seeded factors, in seeding order
pub fn baseline_factors() -> &'static [BaselineFactor] {
    &BASELINE
}

/// Creation request for the baseline model itself
pub fn baseline_model(model_name: &str) -> NewFactorModel {
    NewFactorModel {
        model_name: model_name.to_string(),
        display_name: "Baseline Model (NDA-Based)".to_string(),
        description: Some("Initial model based on Nearly Decomposable Architecture theory".to_string()),
        is_baseline: true,
        hypothesis: Some(
            "Knowledge transfer risk correlates with knowledge type and bond strength".to_string(),
        ),
        validation_status: ValidationStatus::Testing,
    }
}
