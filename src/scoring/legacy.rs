//! Legacy bond type migration
//!
//! Maps the free-text `bond_type` of an interface onto factor assignments.
//! Matching is a case-insensitive substring test; for each factor the first
//! matching rule wins.

use super::engine::ScoringEngine;
use super::ScoringResult;
use crate::factor::{AssignmentRequest, BOND_STRENGTH, KNOWLEDGE_TYPE, TEMPORAL_ALIGNMENT};
use crate::graph::{InterfaceId, Scope};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

struct LegacyRule {
    factor: &'static str,
    /// Any of these substrings triggers the rule; empty matches everything
    needles: &'static [&'static str],
    value: &'static str,
}

const LEGACY_RULES: &[LegacyRule] = &[
    LegacyRule { factor: KNOWLEDGE_TYPE, needles: &["codified"], value: "codified" },
    LegacyRule { factor: KNOWLEDGE_TYPE, needles: &["institutional", "fragile"], value: "institutional" },
    LegacyRule { factor: BOND_STRENGTH, needles: &["strong"], value: "strong" },
    LegacyRule { factor: BOND_STRENGTH, needles: &["moderate"], value: "moderate" },
    LegacyRule { factor: BOND_STRENGTH, needles: &[], value: "weak" },
    LegacyRule { factor: TEMPORAL_ALIGNMENT, needles: &["fragile", "temporary"], value: "misaligned" },
];

/// Factors a migration cannot proceed without
const REQUIRED_FACTORS: [&str; 2] = [KNOWLEDGE_TYPE, BOND_STRENGTH];

/// (factor, value) names a bond type maps to, first match per factor
pub fn legacy_mapping(bond_type: &str) -> Vec<(&'static str, &'static str)> {
    let bond = bond_type.to_ascii_lowercase();
    let mut mapped: Vec<(&'static str, &'static str)> = Vec::new();

    for rule in LEGACY_RULES {
        if mapped.iter().any(|(factor, _)| *factor == rule.factor) {
            continue;
        }
        if rule.needles.is_empty() || rule.needles.iter().any(|n| bond.contains(n)) {
            mapped.push((rule.factor, rule.value));
        }
    }
    mapped
}

/// Outcome counts of a batch migration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationReport {
    pub migrated: usize,
    /// Interfaces with no bond type, or with required factors missing
    pub skipped: usize,
    pub failed: usize,
}

impl MigrationReport {
    pub fn total(&self) -> usize {
        self.migrated + self.skipped + self.failed
    }
}

impl ScoringEngine {
    /// Replace the interface's assignments with those derived from its
    /// legacy bond type.
    ///
    /// Returns `Ok(false)` without writing when the interface has no bond
    /// type or the knowledge_type/bond_strength factors do not exist.
    pub fn migrate_legacy_interface(&self, interface_id: &InterfaceId) -> ScoringResult<bool> {
        let interface = self.store().get_interface(interface_id)?;
        let Some(bond_type) = interface.bond_type.as_deref().filter(|b| !b.trim().is_empty()) else {
            return Ok(false);
        };

        if REQUIRED_FACTORS
            .iter()
            .any(|name| self.store().factor_by_name(name).is_none())
        {
            warn!("Cannot migrate {}: baseline factors missing", interface_id);
            return Ok(false);
        }

        let mut requests = Vec::new();
        for (factor_name, value_name) in legacy_mapping(bond_type) {
            let Some(factor) = self.store().factor_by_name(factor_name) else {
                continue;
            };
            if let Some(value_id) = self.value_by_name(factor.id, value_name) {
                requests.push(AssignmentRequest::new(factor.id, value_id));
            }
        }

        self.assign_factors(interface_id, &requests)
    }

    /// Migrate each interface, counting rather than propagating failures
    pub fn migrate_legacy_batch(&self, interface_ids: &[InterfaceId]) -> MigrationReport {
        let mut report = MigrationReport::default();
        for id in interface_ids {
            match self.migrate_legacy_interface(id) {
                Ok(true) => report.migrated += 1,
                Ok(false) => report.skipped += 1,
                Err(e) => {
                    warn!("Legacy migration failed for {}: {}", id, e);
                    report.failed += 1;
                }
            }
        }

        info!(
            "Legacy migration: {} migrated, {} skipped, {} failed",
            report.migrated, report.skipped, report.failed
        );
        report
    }

    /// Migrate every interface in the store
    pub fn migrate_all_legacy(&self) -> MigrationReport {
        let ids: Vec<InterfaceId> = self
            .store()
            .interfaces(&Scope::All)
            .into_iter()
            .map(|i| i.id)
            .collect();
        self.migrate_legacy_batch(&ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_table() {
        assert_eq!(
            legacy_mapping("codified-strong"),
            vec![(KNOWLEDGE_TYPE, "codified"), (BOND_STRENGTH, "strong")]
        );
        assert_eq!(
            legacy_mapping("codified-moderate"),
            vec![(KNOWLEDGE_TYPE, "codified"), (BOND_STRENGTH, "moderate")]
        );
        assert_eq!(
            legacy_mapping("institutional-weak"),
            vec![(KNOWLEDGE_TYPE, "institutional"), (BOND_STRENGTH, "weak")]
        );
        assert_eq!(
            legacy_mapping("Fragile-Temporary"),
            vec![
                (KNOWLEDGE_TYPE, "institutional"),
                (BOND_STRENGTH, "weak"),
                (TEMPORAL_ALIGNMENT, "misaligned"),
            ]
        );
    }

    #[test]
    fn test_first_rule_wins() {
        assert_eq!(
            legacy_mapping("codified-institutional-strong-moderate"),
            vec![(KNOWLEDGE_TYPE, "codified"), (BOND_STRENGTH, "strong")]
        );
    }

    #[test]
    fn test_unknown_bond_defaults_to_weak() {
        assert_eq!(legacy_mapping("informal"), vec![(BOND_STRENGTH, "weak")]);
        assert_eq!(
            legacy_mapping("temporary"),
            vec![(BOND_STRENGTH, "weak"), (TEMPORAL_ALIGNMENT, "misaligned")]
        );
    }
}
