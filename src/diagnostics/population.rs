//! Entity/interface populations and the counts the rules read

use crate::graph::{BondType, Entity, EntityId, GraphStore, Interface, Lifecycle, Scope, TeamProfile};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

/// Legacy loss above which an interface counts as weak for integration cost
const HIGH_LOSS_THRESHOLD: u32 = 30;

/// A snapshot of entities and interfaces to diagnose
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Population {
    pub entities: Vec<Entity>,
    pub interfaces: Vec<Interface>,
}

impl Population {
    pub fn new(entities: Vec<Entity>, interfaces: Vec<Interface>) -> Self {
        Population { entities, interfaces }
    }

    /// Entities owned by the scope and interfaces touching it
    pub fn from_store(store: &dyn GraphStore, scope: &Scope) -> Self {
        Population {
            entities: store.entities(scope),
            interfaces: store.interfaces(scope),
        }
    }

    pub fn teams(&self) -> impl Iterator<Item = &TeamProfile> {
        self.entities.iter().filter_map(Entity::as_team)
    }

    pub fn metrics(&self) -> PopulationMetrics {
        PopulationMetrics::from_population(self)
    }
}

/// Counts over a population, computed once and shared by every rule
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PopulationMetrics {
    pub entity_count: usize,
    pub team_count: usize,
    pub faculty_count: usize,
    pub project_count: usize,
    pub interface_count: usize,

    pub incoming_teams: usize,
    pub established_teams: usize,
    pub outgoing_teams: usize,
    pub discipline_count: usize,

    pub codified_interfaces: usize,
    pub institutional_interfaces: usize,
    pub fragile_temporary_interfaces: usize,
    /// Team-to-team interfaces whose endpoints differ in discipline
    pub cross_discipline_interfaces: usize,
    /// Interfaces with legacy energy loss above 30
    pub high_loss_interfaces: usize,

    pub multi_institution_projects: usize,
    pub research_projects: usize,
    pub contract_projects: usize,
    /// Mean over projects with a recorded duration
    pub mean_project_duration: Option<f64>,
}

impl PopulationMetrics {
    pub fn from_population(population: &Population) -> Self {
        let mut m = PopulationMetrics {
            entity_count: population.entities.len(),
            interface_count: population.interfaces.len(),
            ..Default::default()
        };

        let mut disciplines: FxHashSet<&str> = FxHashSet::default();
        let mut team_disciplines: FxHashMap<&EntityId, &str> = FxHashMap::default();
        let mut durations: Vec<u32> = Vec::new();

        for entity in &population.entities {
            if let Some(team) = entity.as_team() {
                m.team_count += 1;
                match team.lifecycle {
                    Lifecycle::Incoming => m.incoming_teams += 1,
                    Lifecycle::Established => m.established_teams += 1,
                    Lifecycle::Outgoing => m.outgoing_teams += 1,
                }
                disciplines.insert(team.discipline.as_str());
                team_disciplines.insert(&entity.id, team.discipline.as_str());
            } else if let Some(project) = entity.as_project() {
                m.project_count += 1;
                if project.is_multi_institution() {
                    m.multi_institution_projects += 1;
                }
                if project.is_research() {
                    m.research_projects += 1;
                }
                if project.is_contract() {
                    m.contract_projects += 1;
                }
                durations.extend(project.duration_years);
            } else if entity.is_faculty() {
                m.faculty_count += 1;
            }
        }
        m.discipline_count = disciplines.len();

        for interface in &population.interfaces {
            if interface.bond_contains("codified") {
                m.codified_interfaces += 1;
            }
            if interface.bond_contains("institutional") {
                m.institutional_interfaces += 1;
            }
            if interface.bond() == Some(BondType::FragileTemporary) {
                m.fragile_temporary_interfaces += 1;
            }
            if interface.legacy_loss() > HIGH_LOSS_THRESHOLD {
                m.high_loss_interfaces += 1;
            }
            if let (Some(from), Some(to)) = (
                team_disciplines.get(&interface.from),
                team_disciplines.get(&interface.to),
            ) {
                if from != to {
                    m.cross_discipline_interfaces += 1;
                }
            }
        }

        if !durations.is_empty() {
            let total: u32 = durations.iter().sum();
            m.mean_project_duration = Some(total as f64 / durations.len() as f64);
        }

        m
    }
}

/// `count / max(denominator, 1)`; a zero denominator yields 0.0 for a zero count
pub fn ratio(count: usize, denominator: usize) -> f64 {
    count as f64 / denominator.max(1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{NewInterface, UnitId, PROJECT_RESEARCH};

    fn iface(id: &str, from: &str, to: &str, bond: &str) -> Interface {
        Interface::from_request(NewInterface::new(id, from, to).with_bond(bond), &UnitId::new("u"))
    }

    #[test]
    fn test_ratio_guards_zero() {
        assert_eq!(ratio(0, 0), 0.0);
        assert_eq!(ratio(3, 0), 3.0);
        assert_eq!(ratio(1, 4), 0.25);
    }

    #[test]
    fn test_counts() {
        let population = Population::new(
            vec![
                Entity::team("team_1", "A", "electrical", Lifecycle::Incoming),
                Entity::team("team_2", "B", "software", Lifecycle::Outgoing),
                Entity::team("team_3", "C", "software", Lifecycle::Established),
                Entity::faculty("faculty_1", "Dr. X", "PI"),
                Entity::project("project_1", "P", PROJECT_RESEARCH, Some(2)),
                Entity::project("project_2", "Q", PROJECT_RESEARCH, None),
            ],
            vec![
                iface("i1", "team_1", "team_2", "codified-strong"),
                iface("i2", "team_2", "team_3", "Institutional-Weak"),
                iface("i3", "team_1", "faculty_1", "fragile-temporary"),
            ],
        );
        let m = population.metrics();

        assert_eq!(m.team_count, 3);
        assert_eq!(m.faculty_count, 1);
        assert_eq!(m.project_count, 2);
        assert_eq!(m.discipline_count, 2);
        assert_eq!(m.codified_interfaces, 1);
        assert_eq!(m.institutional_interfaces, 1);
        assert_eq!(m.fragile_temporary_interfaces, 1);
        assert_eq!(m.cross_discipline_interfaces, 1);
        assert_eq!(m.high_loss_interfaces, 2);
        assert_eq!(m.research_projects, 2);
        assert_eq!(m.mean_project_duration, Some(2.0));
    }
}
