//! Reference sample organisation
//!
//! One student satellite program: 8 teams, 3 faculty, 3 projects and 11
//! interfaces. Entities are shared (no owning unit).

use crate::graph::{
    Entity, EntityKind, GraphStore, Interface, Lifecycle, NewInterface, StoreResult, TeamProfile, UnitId,
    PROJECT_CONTRACT, PROJECT_MULTI_INSTITUTION,
};
use tracing::info;

const TEAMS: [(&str, &str, Lifecycle, &str, u32, u32, &str); 8] = [
    ("team_1", "electrical", Lifecycle::Established, "Power Systems", 4, 18, "Power and avionics systems - experienced team"),
    ("team_2", "electrical", Lifecycle::Incoming, "Electrical Beta", 3, 6, "New electrical team in training phase"),
    ("team_3", "software", Lifecycle::Established, "Flight Software", 5, 24, "Flight software and data processing"),
    ("team_4", "software", Lifecycle::Outgoing, "Software Legacy", 2, 36, "Graduating software team with critical knowledge"),
    ("team_5", "mission-ops", Lifecycle::Incoming, "Mission Ops New", 3, 3, "New mission operations team"),
    ("team_6", "mission-ops", Lifecycle::Established, "Mission Ops Core", 4, 15, "Established operations team"),
    ("team_7", "mechanical", Lifecycle::Established, "Mechanical Systems", 3, 12, "Mechanical systems and structures"),
    ("team_8", "communications", Lifecycle::Incoming, "Comm Systems", 2, 4, "New communications team"),
];

const FACULTY: [(&str, &str, &str, &str); 3] = [
    ("faculty_1", "Dr. Principal Investigator", "Principal Investigator", "Project oversight and coordination, institutional interface"),
    ("faculty_2", "Dr. Technical Lead", "Technical Lead", "Technical guidance and mentoring, knowledge transfer"),
    ("faculty_3", "Program Director", "Program Director", "Program continuity and institutional support"),
];

const PROJECTS: [(&str, &str, &str, u32, &str); 3] = [
    ("project_1", "JPL CubeSat Mission", PROJECT_CONTRACT, 3, "Primary satellite mission with JPL contract"),
    ("project_2", "Multi-University Research", PROJECT_MULTI_INSTITUTION, 2, "Multi-university collaborative research project"),
    ("project_3", "Contract Pursuit", "contract-pursuit", 1, "New contract opportunity being pursued"),
];

const INTERFACES: [(&str, &str, &str, &str, &str, u32); 11] = [
    ("interface_1", "team_1", "faculty_1", "team-to-faculty", "codified-strong", 5),
    ("interface_2", "team_3", "faculty_2", "team-to-faculty", "codified-strong", 5),
    ("interface_3", "team_6", "faculty_3", "team-to-faculty", "codified-moderate", 15),
    ("interface_4", "team_4", "team_3", "team-to-team", "institutional-weak", 35),
    ("interface_5", "team_2", "team_1", "team-to-team", "institutional-weak", 35),
    ("interface_6", "team_5", "team_6", "team-to-team", "institutional-weak", 35),
    ("interface_7", "team_1", "project_1", "team-to-project", "codified-strong", 5),
    ("interface_8", "team_3", "project_1", "team-to-project", "codified-strong", 5),
    ("interface_9", "team_6", "project_2", "team-to-project", "codified-moderate", 15),
    ("interface_10", "team_7", "project_2", "team-to-project", "codified-moderate", 15),
    ("interface_11", "team_8", "project_3", "team-to-project", "fragile-temporary", 60),
];

/// Insert the sample organisation. Returns the number of interfaces added.
pub fn load_sample_organisation(store: &dyn GraphStore, declared_unit: &UnitId) -> StoreResult<usize> {
    for (id, discipline, lifecycle, name, size, experience_months, description) in TEAMS {
        let kind = EntityKind::Team(TeamProfile {
            discipline: discipline.to_string(),
            lifecycle,
            size,
            experience_months,
        });
        store.insert_entity(Entity::new(id, name, kind).with_description(description))?;
    }

    for (id, name, role, description) in FACULTY {
        store.insert_entity(Entity::faculty(id, name, role).with_description(description))?;
    }

    for (id, name, project_type, duration, description) in PROJECTS {
        store.insert_entity(Entity::project(id, name, project_type, Some(duration)).with_description(description))?;
    }

    for (id, from, to, interface_type, bond_type, energy_loss) in INTERFACES {
        let request = NewInterface::new(id, from, to)
            .with_type(interface_type)
            .with_bond(bond_type)
            .with_energy_loss(energy_loss);
        store.insert_interface(Interface::from_request(request, declared_unit))?;
    }

    info!(
        "Loaded sample organisation: {} teams, {} faculty, {} projects, {} interfaces",
        TEAMS.len(),
        FACULTY.len(),
        PROJECTS.len(),
        INTERFACES.len()
    );
    Ok(INTERFACES.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{InterfaceId, MemoryStore, Scope, StoreError};

    #[test]
    fn test_load_sample() {
        let store = MemoryStore::new();
        let added = load_sample_organisation(&store, &UnitId::new("CalPolyPomona")).unwrap();

        assert_eq!(added, 11);
        assert_eq!(store.entity_count(), 14);
        let iface = store.get_interface(&InterfaceId::new("interface_11")).unwrap();
        assert_eq!(iface.bond_type.as_deref(), Some("fragile-temporary"));
        assert_eq!(iface.energy_loss, Some(60));
        assert_eq!(store.entities(&Scope::All).iter().filter(|e| e.unit_id.is_some()).count(), 0);
    }

    #[test]
    fn test_load_twice_fails() {
        let store = MemoryStore::new();
        load_sample_organisation(&store, &UnitId::new("u")).unwrap();
        let err = load_sample_organisation(&store, &UnitId::new("u")).unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists(_)));
    }
}
