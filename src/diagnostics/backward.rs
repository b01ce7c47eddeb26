//! Backward tracing from observable failures to interface weaknesses

use super::population::{ratio, PopulationMetrics};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Documentation,
    Communication,
    Rationale,
    Handoff,
}

impl FailureKind {
    /// Risk in [0, 100] for this failure mode
    pub fn risk(&self, m: &PopulationMetrics) -> u32 {
        let raw = match self {
            FailureKind::Documentation => 100.0 - ratio(m.codified_interfaces, m.interface_count) * 100.0,
            // Denominator is the team count, not the interface count
            FailureKind::Communication => 100.0 - ratio(m.cross_discipline_interfaces, m.team_count) * 50.0,
            FailureKind::Rationale => ratio(m.institutional_interfaces, m.interface_count) * 100.0,
            FailureKind::Handoff => ratio(m.outgoing_teams.max(m.incoming_teams), m.team_count) * 100.0,
        };
        raw.clamp(0.0, 100.0).round_ties_even() as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_risk(risk: u32) -> Self {
        if risk > 70 {
            RiskLevel::High
        } else if risk > 40 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub failure: String,
    pub cause: String,
    pub solution: String,
    pub kind: FailureKind,
    pub risk: u32,
    pub risk_level: RiskLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackwardTracing {
    pub scenarios: Vec<Scenario>,
    pub methodology: Vec<String>,
}

struct ScenarioTemplate {
    failure: &'static str,
    cause: &'static str,
    solution: &'static str,
    kind: FailureKind,
}

const SCENARIOS: [ScenarioTemplate; 4] = [
    ScenarioTemplate {
        failure: "Students repeating completed work",
        cause: "Missing documentation interface",
        solution: "Strengthen codified knowledge interfaces",
        kind: FailureKind::Documentation,
    },
    ScenarioTemplate {
        failure: "Teams unaware of prior technical choices",
        cause: "Weak cross-team communication interfaces",
        solution: "Establish formal design review processes",
        kind: FailureKind::Communication,
    },
    ScenarioTemplate {
        failure: "Integration problems from undocumented rationale",
        cause: "Institutional knowledge not codified",
        solution: "Convert tacit knowledge to structured documentation",
        kind: FailureKind::Rationale,
    },
    ScenarioTemplate {
        failure: "New cohorts unable to operate systems",
        cause: "Outgoing teams left incomplete handoffs",
        solution: "Implement structured onboarding and handoff procedures",
        kind: FailureKind::Handoff,
    },
];

pub const METHODOLOGY: [&str; 5] = [
    "Identify observable failures",
    "Trace backward to knowledge transfer points",
    "Identify interface mechanism responsible",
    "Determine why transfer failed",
    "Design interventions to strengthen interfaces",
];

pub fn backward_tracing(metrics: &PopulationMetrics) -> BackwardTracing {
    let scenarios = SCENARIOS
        .iter()
        .map(|t| {
            let risk = t.kind.risk(metrics);
            Scenario {
                failure: t.failure.to_string(),
                cause: t.cause.to_string(),
                solution: t.solution.to_string(),
                kind: t.kind,
                risk,
                risk_level: RiskLevel::from_risk(risk),
            }
        })
        .collect();

    BackwardTracing {
        scenarios,
        methodology: METHODOLOGY.iter().map(|s| s.to_string()).collect(),
    }
}
