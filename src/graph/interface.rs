//! Interfaces: directed knowledge-transfer edges between entities

use super::types::{EntityId, InterfaceId, UnitId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Legacy four-category classification of interface strength
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BondType {
    CodifiedStrong,
    CodifiedModerate,
    InstitutionalWeak,
    FragileTemporary,
}

impl BondType {
    pub const ALL: [BondType; 4] = [
        BondType::CodifiedStrong,
        BondType::CodifiedModerate,
        BondType::InstitutionalWeak,
        BondType::FragileTemporary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BondType::CodifiedStrong => "codified-strong",
            BondType::CodifiedModerate => "codified-moderate",
            BondType::InstitutionalWeak => "institutional-weak",
            BondType::FragileTemporary => "fragile-temporary",
        }
    }

    /// Recognise one of the four canonical spellings (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|b| b.as_str() == s)
    }

    /// Legacy percentage loss historically attached to each category
    pub fn default_energy_loss(&self) -> u32 {
        match self {
            BondType::CodifiedStrong => 5,
            BondType::CodifiedModerate => 15,
            BondType::InstitutionalWeak => 35,
            BondType::FragileTemporary => 60,
        }
    }
}

impl fmt::Display for BondType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Creation request for an interface; unit fields are derived, never supplied
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewInterface {
    #[serde(default)]
    pub id: Option<InterfaceId>,
    pub from: EntityId,
    pub to: EntityId,
    #[serde(default)]
    pub interface_type: Option<String>,
    #[serde(default)]
    pub bond_type: Option<String>,
    #[serde(default)]
    pub energy_loss: Option<u32>,
}

impl NewInterface {
    pub fn new(id: impl Into<InterfaceId>, from: impl Into<EntityId>, to: impl Into<EntityId>) -> Self {
        NewInterface {
            id: Some(id.into()),
            from: from.into(),
            to: to.into(),
            ..Default::default()
        }
    }

    pub fn with_type(mut self, interface_type: impl Into<String>) -> Self {
        self.interface_type = Some(interface_type.into());
        self
    }

    pub fn with_bond(mut self, bond_type: impl Into<String>) -> Self {
        self.bond_type = Some(bond_type.into());
        self
    }

    pub fn with_energy_loss(mut self, energy_loss: u32) -> Self {
        self.energy_loss = Some(energy_loss);
        self
    }
}

/// A directed interface between two entities
///
/// `from_unit`/`to_unit` are denormalised copies derived from the endpoint
/// ids when the interface is created; they are not authoritative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interface {
    pub id: InterfaceId,
    pub from: EntityId,
    pub to: EntityId,
    /// team-to-team, team-to-faculty, team-to-project, ...
    pub interface_type: Option<String>,
    /// Free-text legacy bond classification
    pub bond_type: Option<String>,
    /// Legacy percentage loss (0-100)
    pub energy_loss: Option<u32>,
    pub from_unit: UnitId,
    pub to_unit: UnitId,
    pub is_cross_unit: bool,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: i64,
}

impl Interface {
    /// Build an interface from a creation request.
    ///
    /// Endpoint units come from the id prefix before the first underscore,
    /// falling back to `declared_unit`. A missing legacy loss is derived from
    /// a recognised bond type.
    pub fn from_request(request: NewInterface, declared_unit: &UnitId) -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        let from_unit = request.from.unit_prefix().unwrap_or_else(|| declared_unit.clone());
        let to_unit = request.to.unit_prefix().unwrap_or_else(|| declared_unit.clone());
        let energy_loss = request.energy_loss.or_else(|| {
            request
                .bond_type
                .as_deref()
                .and_then(BondType::parse)
                .map(|b| b.default_energy_loss())
        });

        Interface {
            id: request
                .id
                .unwrap_or_else(|| InterfaceId::new(format!("interface_{}", now))),
            from: request.from,
            to: request.to,
            interface_type: request.interface_type,
            bond_type: request.bond_type,
            energy_loss: energy_loss.map(|loss| loss.min(100)),
            is_cross_unit: from_unit != to_unit,
            from_unit,
            to_unit,
            created_at: now,
        }
    }

    /// Case-insensitive substring test against the legacy bond type
    pub fn bond_contains(&self, needle: &str) -> bool {
        self.bond_type
            .as_deref()
            .map(|b| b.to_ascii_lowercase().contains(needle))
            .unwrap_or(false)
    }

    pub fn bond(&self) -> Option<BondType> {
        self.bond_type.as_deref().and_then(BondType::parse)
    }

    /// Legacy loss, treating an unset value as zero
    pub fn legacy_loss(&self) -> u32 {
        self.energy_loss.unwrap_or(0)
    }

    /// Check whether either endpoint belongs to `unit`
    pub fn touches_unit(&self, unit: &UnitId) -> bool {
        &self.from_unit == unit || &self.to_unit == unit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_units_from_entity_prefix() {
        let declared = UnitId::new("CalPolyPomona");
        let iface = Interface::from_request(
            NewInterface::new("x1", "MIT_team_1", "Stanford_faculty_2"),
            &declared,
        );

        assert_eq!(iface.from_unit, UnitId::new("MIT"));
        assert_eq!(iface.to_unit, UnitId::new("Stanford"));
        assert!(iface.is_cross_unit);
        assert!(iface.touches_unit(&UnitId::new("MIT")));
    }

    #[test]
    fn test_units_fall_back_to_declared() {
        let declared = UnitId::new("CalPolyPomona");
        let iface = Interface::from_request(NewInterface::new("x2", "PROVES", "Lead"), &declared);

        assert_eq!(iface.from_unit, declared);
        assert_eq!(iface.to_unit, declared);
        assert!(!iface.is_cross_unit);
    }

    #[test]
    fn test_energy_loss_derived_from_bond() {
        let declared = UnitId::new("u");
        let iface = Interface::from_request(
            NewInterface::new("x3", "a", "b").with_bond("Fragile-Temporary"),
            &declared,
        );
        assert_eq!(iface.energy_loss, Some(60));
        assert_eq!(iface.bond(), Some(BondType::FragileTemporary));
        assert!(iface.bond_contains("fragile"));

        let explicit = Interface::from_request(
            NewInterface::new("x4", "a", "b")
                .with_bond("codified-strong")
                .with_energy_loss(12),
            &declared,
        );
        assert_eq!(explicit.energy_loss, Some(12));
    }

    #[test]
    fn test_unknown_bond_has_no_loss() {
        let iface = Interface::from_request(
            NewInterface::new("x5", "a", "b").with_bond("informal"),
            &UnitId::new("u"),
        );
        assert_eq!(iface.energy_loss, None);
        assert_eq!(iface.legacy_loss(), 0);
        assert!(iface.bond().is_none());
    }

    #[test]
    fn test_generated_id() {
        let iface = Interface::from_request(
            NewInterface {
                from: "a".into(),
                to: "b".into(),
                ..Default::default()
            },
            &UnitId::new("u"),
        );
        assert!(iface.id.as_str().starts_with("interface_"));
    }
}
