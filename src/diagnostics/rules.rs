//! Dimension rule tables
//!
//! Each dimension is an ordered list of independent rules. A dimension's
//! score is the sum of the points of every rule whose predicate holds, and
//! its analysis is the triggered messages joined in order.

use super::population::{ratio, PopulationMetrics};
use serde::{Deserialize, Serialize};

pub struct Rule {
    pub predicate: fn(&PopulationMetrics) -> bool,
    pub points: u32,
    pub message: &'static str,
}

/// One diagnostic dimension of Nearly Decomposable Architecture theory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    ActorAutonomy,
    PartitionedKnowledge,
    EmergentOutputs,
    TemporalMisalignment,
    IntegrationCost,
    CouplingDegradation,
}

impl Dimension {
    pub const ALL: [Dimension; 6] = [
        Dimension::ActorAutonomy,
        Dimension::PartitionedKnowledge,
        Dimension::EmergentOutputs,
        Dimension::TemporalMisalignment,
        Dimension::IntegrationCost,
        Dimension::CouplingDegradation,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Dimension::ActorAutonomy => "Actor Autonomy",
            Dimension::PartitionedKnowledge => "Partitioned Knowledge",
            Dimension::EmergentOutputs => "Emergent Outputs",
            Dimension::TemporalMisalignment => "Temporal Misalignment",
            Dimension::IntegrationCost => "Integration Cost",
            Dimension::CouplingDegradation => "Coupling Degradation",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Dimension::ActorAutonomy => "🎯",
            Dimension::PartitionedKnowledge => "📚",
            Dimension::EmergentOutputs => "🎲",
            Dimension::TemporalMisalignment => "⏰",
            Dimension::IntegrationCost => "💰",
            Dimension::CouplingDegradation => "🔗",
        }
    }

    pub fn rules(&self) -> &'static [Rule] {
        match self {
            Dimension::ActorAutonomy => ACTOR_AUTONOMY,
            Dimension::PartitionedKnowledge => PARTITIONED_KNOWLEDGE,
            Dimension::EmergentOutputs => EMERGENT_OUTPUTS,
            Dimension::TemporalMisalignment => TEMPORAL_MISALIGNMENT,
            Dimension::IntegrationCost => INTEGRATION_COST,
            Dimension::CouplingDegradation => COUPLING_DEGRADATION,
        }
    }

    /// Evaluate every rule of the dimension against `metrics`
    pub fn evaluate(&self, metrics: &PopulationMetrics) -> DimensionResult {
        let triggered: Vec<&Rule> = self.rules().iter().filter(|r| (r.predicate)(metrics)).collect();

        DimensionResult {
            dimension: self.name().to_string(),
            score: triggered.iter().map(|r| r.points).sum(),
            analysis: triggered.iter().map(|r| r.message).collect::<Vec<_>>().join(" "),
            icon: self.icon().to_string(),
        }
    }
}

/// Score of one dimension
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionResult {
    pub dimension: String,
    /// Sum of triggered rule points; not normalised
    pub score: u32,
    pub analysis: String,
    pub icon: String,
}

const ACTOR_AUTONOMY: &[Rule] = &[
    Rule {
        predicate: |m| ratio(m.team_count, m.faculty_count) > 3.0,
        points: 30,
        message: "High team-to-faculty ratio suggests independent operation.",
    },
    Rule {
        predicate: |m| m.institutional_interfaces > m.codified_interfaces,
        points: 40,
        message: "More institutional than codified interfaces indicates high autonomy.",
    },
    Rule {
        predicate: |m| ratio(m.outgoing_teams, m.team_count) > 0.3,
        points: 30,
        message: "High proportion of outgoing teams suggests independent operation.",
    },
];

const PARTITIONED_KNOWLEDGE: &[Rule] = &[
    Rule {
        predicate: |m| m.discipline_count > 4,
        points: 25,
        message: "High number of disciplines suggests knowledge siloing.",
    },
    Rule {
        predicate: |m| m.cross_discipline_interfaces < m.discipline_count * 2,
        points: 35,
        message: "Limited cross-discipline interfaces indicate knowledge partitioning.",
    },
    Rule {
        predicate: |m| ratio(m.institutional_interfaces, m.interface_count) > 0.5,
        points: 40,
        message: "High proportion of institutional knowledge interfaces suggests tacit knowledge silos.",
    },
];

const EMERGENT_OUTPUTS: &[Rule] = &[
    Rule {
        predicate: |m| m.multi_institution_projects > 0,
        points: 30,
        message: "Multi-university projects often have emergent goals.",
    },
    Rule {
        predicate: |m| m.research_projects > m.contract_projects,
        points: 40,
        message: "Research-focused projects more likely to have shifting objectives.",
    },
    Rule {
        predicate: |m| ratio(m.incoming_teams, m.team_count) > 0.4,
        points: 30,
        message: "High proportion of incoming teams may lead to goal ambiguity.",
    },
];

const TEMPORAL_MISALIGNMENT: &[Rule] = &[
    Rule {
        predicate: |m| m.incoming_teams > m.outgoing_teams,
        points: 25,
        message: "More incoming than outgoing teams suggests temporal misalignment.",
    },
    Rule {
        predicate: |m| ratio(m.outgoing_teams, m.established_teams) > 0.5,
        points: 35,
        message: "High proportion of outgoing teams indicates turnover timing issues.",
    },
    Rule {
        predicate: |m| m.mean_project_duration.is_some_and(|d| d > 3.0),
        points: 40,
        message: "Long project durations increase temporal misalignment risk.",
    },
];

const INTEGRATION_COST: &[Rule] = &[
    Rule {
        predicate: |m| ratio(m.interface_count, m.entity_count) > 2.0,
        points: 30,
        message: "High interface density suggests high integration cost.",
    },
    Rule {
        predicate: |m| ratio(m.high_loss_interfaces, m.interface_count) > 0.5,
        points: 40,
        message: "High proportion of weak interfaces increases coordination effort.",
    },
    Rule {
        predicate: |m| ratio(m.cross_discipline_interfaces, m.interface_count) > 0.3,
        points: 30,
        message: "High cross-discipline integration requires significant coordination.",
    },
];

const COUPLING_DEGRADATION: &[Rule] = &[
    Rule {
        predicate: |m| ratio(m.fragile_temporary_interfaces, m.interface_count) > 0.2,
        points: 35,
        message: "High proportion of fragile interfaces indicates coupling degradation risk.",
    },
    Rule {
        predicate: |m| ratio(m.institutional_interfaces, m.interface_count) > 0.4,
        points: 30,
        message: "High proportion of institutional knowledge interfaces vulnerable to degradation.",
    },
    Rule {
        predicate: |m| ratio(m.outgoing_teams, m.team_count) > 0.3,
        points: 35,
        message: "High proportion of outgoing teams suggests imminent coupling degradation.",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> PopulationMetrics {
        PopulationMetrics::default()
    }

    #[test]
    fn test_empty_population() {
        // Only "cross < 2 x disciplines" can fire on nothing: 0 < 0 is false
        for dimension in Dimension::ALL {
            let result = dimension.evaluate(&metrics());
            assert_eq!(result.score, 0, "{}", result.dimension);
            assert!(result.analysis.is_empty());
        }
    }

    #[test]
    fn test_actor_autonomy_rules() {
        let m = PopulationMetrics {
            team_count: 7,
            faculty_count: 2,
            outgoing_teams: 3,
            institutional_interfaces: 2,
            codified_interfaces: 2,
            ..metrics()
        };
        let result = Dimension::ActorAutonomy.evaluate(&m);
        assert_eq!(result.score, 60);
        assert!(result.analysis.starts_with("High team-to-faculty ratio"));
        assert_eq!(result.icon, "🎯");
    }

    #[test]
    fn test_team_faculty_ratio_without_faculty() {
        let m = PopulationMetrics { team_count: 4, ..metrics() };
        assert_eq!(Dimension::ActorAutonomy.evaluate(&m).score, 30);

        let m = PopulationMetrics { team_count: 3, ..metrics() };
        assert_eq!(Dimension::ActorAutonomy.evaluate(&m).score, 0);
    }

    #[test]
    fn test_partitioned_knowledge_rules() {
        let m = PopulationMetrics {
            discipline_count: 5,
            cross_discipline_interfaces: 9,
            institutional_interfaces: 6,
            interface_count: 10,
            ..metrics()
        };
        assert_eq!(Dimension::PartitionedKnowledge.evaluate(&m).score, 100);

        let m = PopulationMetrics { cross_discipline_interfaces: 10, ..m };
        assert_eq!(Dimension::PartitionedKnowledge.evaluate(&m).score, 65);
    }

    #[test]
    fn test_temporal_duration_rule() {
        let m = PopulationMetrics { mean_project_duration: Some(3.0), ..metrics() };
        assert_eq!(Dimension::TemporalMisalignment.evaluate(&m).score, 0);

        let m = PopulationMetrics { mean_project_duration: Some(3.5), ..metrics() };
        assert_eq!(Dimension::TemporalMisalignment.evaluate(&m).score, 40);
    }

    #[test]
    fn test_outgoing_without_established() {
        let m = PopulationMetrics {
            team_count: 1,
            outgoing_teams: 1,
            ..metrics()
        };
        let result = Dimension::TemporalMisalignment.evaluate(&m);
        assert_eq!(result.score, 35);
    }

    #[test]
    fn test_coupling_thresholds_are_strict() {
        let m = PopulationMetrics {
            interface_count: 10,
            fragile_temporary_interfaces: 2,
            institutional_interfaces: 4,
            team_count: 10,
            outgoing_teams: 3,
            ..metrics()
        };
        assert_eq!(Dimension::CouplingDegradation.evaluate(&m).score, 0);

        let m = PopulationMetrics { fragile_temporary_interfaces: 3, ..m };
        assert_eq!(Dimension::CouplingDegradation.evaluate(&m).score, 35);
    }
}
