//! In-memory graph store
//!
//! All tables live behind one `RwLock`, so every `GraphStore` method runs in
//! a single critical section. Multi-step mutations (model activation,
//! assignment replacement, factor-with-values insertion) are therefore
//! all-or-nothing, and concurrent scoring reads share the read lock.

use super::entity::Entity;
use super::interface::Interface;
use super::store::{AssignedValue, GraphStore, Scope, StoreError, StoreResult};
use super::types::{EntityId, FactorId, FactorValueId, InterfaceId, ModelId, OutcomeId};
use crate::factor::{
    AssignmentRequest, FactorAssignment, FactorModel, FactorValue, ModelFactorWeight, ModelValidation,
    NewFactorModel, NewFactorValue, NewOutcome, NewRiskFactor, Outcome, RiskFactor,
};
use crate::snapshot::Snapshot;
use indexmap::IndexMap;
use parking_lot::RwLock;
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
struct Tables {
    entities: IndexMap<EntityId, Entity>,
    interfaces: IndexMap<InterfaceId, Interface>,
    factors: IndexMap<FactorId, RiskFactor>,
    factor_values: IndexMap<FactorValueId, FactorValue>,
    models: IndexMap<ModelId, FactorModel>,
    weights: Vec<ModelFactorWeight>,
    assignments: IndexMap<InterfaceId, Vec<FactorAssignment>>,
    outcomes: IndexMap<OutcomeId, Outcome>,
    validations: Vec<ModelValidation>,

    next_factor_id: u64,
    next_value_id: u64,
    next_model_id: u64,
    next_outcome_id: u64,
}

impl Tables {
    fn new() -> Self {
        Tables {
            next_factor_id: 1,
            next_value_id: 1,
            next_model_id: 1,
            next_outcome_id: 1,
            ..Default::default()
        }
    }

    fn allocate_factor_id(&mut self) -> FactorId {
        let id = FactorId::new(self.next_factor_id);
        self.next_factor_id += 1;
        id
    }

    fn allocate_value_id(&mut self) -> FactorValueId {
        let id = FactorValueId::new(self.next_value_id);
        self.next_value_id += 1;
        id
    }

    fn value_name_taken(&self, factor_id: FactorId, value_name: &str) -> bool {
        self.factor_values
            .values()
            .any(|v| v.factor_id == factor_id && v.value_name == value_name)
    }

    /// Keep at most one active model: the most recently updated one, the
    /// earliest in table order on a tie
    fn normalise_active_model(&mut self) {
        let keep = self
            .models
            .values()
            .filter(|m| m.is_active)
            .fold(None::<&FactorModel>, |best, m| match best {
                Some(b) if b.updated_at >= m.updated_at => Some(b),
                _ => Some(m),
            })
            .map(|m| m.id);

        for model in self.models.values_mut() {
            if model.is_active && Some(model.id) != keep {
                warn!("Deactivating model '{}' ({}): more than one model was active", model.model_name, model.id);
                model.is_active = false;
            }
        }
    }

    fn build_value(&mut self, factor_id: FactorId, value: NewFactorValue, default_order: u32, now: i64) -> FactorValue {
        FactorValue {
            id: self.allocate_value_id(),
            factor_id,
            value_name: value.value_name,
            display_name: value.display_name,
            description: value.description,
            energy_loss_contribution: value.energy_loss_contribution,
            sort_order: value.sort_order.unwrap_or(default_order),
            created_at: now,
        }
    }
}

/// Thread-safe in-memory implementation of `GraphStore`
#[derive(Debug)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        MemoryStore {
            tables: RwLock::new(Tables::new()),
        }
    }

    /// Rebuild a store from a snapshot, continuing id allocation after the
    /// highest id present
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut tables = Tables::new();

        tables.next_factor_id = snapshot.factors.iter().map(|f| f.id.as_u64()).max().unwrap_or(0) + 1;
        tables.next_value_id = snapshot.factor_values.iter().map(|v| v.id.as_u64()).max().unwrap_or(0) + 1;
        tables.next_model_id = snapshot.models.iter().map(|m| m.id.as_u64()).max().unwrap_or(0) + 1;
        tables.next_outcome_id = snapshot.outcomes.iter().map(|o| o.id.as_u64()).max().unwrap_or(0) + 1;

        tables.entities = snapshot.entities.into_iter().map(|e| (e.id.clone(), e)).collect();
        tables.interfaces = snapshot.interfaces.into_iter().map(|i| (i.id.clone(), i)).collect();
        tables.factors = snapshot.factors.into_iter().map(|f| (f.id, f)).collect();
        tables.factor_values = snapshot.factor_values.into_iter().map(|v| (v.id, v)).collect();
        tables.models = snapshot.models.into_iter().map(|m| (m.id, m)).collect();
        tables.weights = snapshot.weights;
        for assignment in snapshot.assignments {
            tables
                .assignments
                .entry(assignment.interface_id.clone())
                .or_default()
                .push(assignment);
        }
        tables.outcomes = snapshot.outcomes.into_iter().map(|o| (o.id, o)).collect();
        tables.validations = snapshot.validations;
        tables.normalise_active_model();

        info!(
            "Restored store: {} entities, {} interfaces, {} factors, {} models",
            tables.entities.len(),
            tables.interfaces.len(),
            tables.factors.len(),
            tables.models.len()
        );

        MemoryStore {
            tables: RwLock::new(tables),
        }
    }

    /// Copy every table into a snapshot
    pub fn to_snapshot(&self) -> Snapshot {
        let tables = self.tables.read();
        Snapshot {
            version: crate::VERSION.to_string(),
            entities: tables.entities.values().cloned().collect(),
            interfaces: tables.interfaces.values().cloned().collect(),
            factors: tables.factors.values().cloned().collect(),
            factor_values: tables.factor_values.values().cloned().collect(),
            models: tables.models.values().cloned().collect(),
            weights: tables.weights.clone(),
            assignments: tables.assignments.values().flatten().cloned().collect(),
            outcomes: tables.outcomes.values().cloned().collect(),
            validations: tables.validations.clone(),
        }
    }

    pub fn entity_count(&self) -> usize {
        self.tables.read().entities.len()
    }

    pub fn interface_count(&self) -> usize {
        self.tables.read().interfaces.len()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphStore for MemoryStore {
    fn insert_entity(&self, entity: Entity) -> StoreResult<()> {
        let mut tables = self.tables.write();
        if tables.entities.contains_key(&entity.id) {
            return Err(StoreError::AlreadyExists(format!("Entity {}", entity.id)));
        }
        debug!("Inserted {} {}", entity.kind.label(), entity.id);
        tables.entities.insert(entity.id.clone(), entity);
        Ok(())
    }

    fn get_entity(&self, id: &EntityId) -> StoreResult<Entity> {
        self.tables
            .read()
            .entities
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::EntityNotFound(id.clone()))
    }

    fn entities(&self, scope: &Scope) -> Vec<Entity> {
        self.tables
            .read()
            .entities
            .values()
            .filter(|e| scope.includes_entity(e))
            .cloned()
            .collect()
    }

    fn insert_interface(&self, interface: Interface) -> StoreResult<()> {
        let mut tables = self.tables.write();
        if tables.interfaces.contains_key(&interface.id) {
            return Err(StoreError::AlreadyExists(format!("Interface {}", interface.id)));
        }
        debug!("Inserted interface {} ({} -> {})", interface.id, interface.from, interface.to);
        tables.interfaces.insert(interface.id.clone(), interface);
        Ok(())
    }

    fn get_interface(&self, id: &InterfaceId) -> StoreResult<Interface> {
        self.tables
            .read()
            .interfaces
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::InterfaceNotFound(id.clone()))
    }

    fn interfaces(&self, scope: &Scope) -> Vec<Interface> {
        self.tables
            .read()
            .interfaces
            .values()
            .filter(|i| scope.includes_interface(i))
            .cloned()
            .collect()
    }

    fn insert_factor(&self, factor: NewRiskFactor) -> StoreResult<RiskFactor> {
        let mut tables = self.tables.write();

        if tables.factors.values().any(|f| f.factor_name == factor.factor_name) {
            return Err(StoreError::AlreadyExists(format!("Factor '{}'", factor.factor_name)));
        }
        for (i, value) in factor.values.iter().enumerate() {
            if factor.values[..i].iter().any(|v| v.value_name == value.value_name) {
                return Err(StoreError::AlreadyExists(format!(
                    "Value '{}' of factor '{}'",
                    value.value_name, factor.factor_name
                )));
            }
        }

        let now = chrono::Utc::now().timestamp_millis();
        let record = RiskFactor {
            id: tables.allocate_factor_id(),
            factor_name: factor.factor_name,
            display_name: factor.display_name,
            description: factor.description,
            category: factor.category,
            confidence_level: factor.confidence_level,
            research_notes: factor.research_notes,
            active: true,
            created_at: now,
            updated_at: now,
        };

        for (order, value) in factor.values.into_iter().enumerate() {
            let value = tables.build_value(record.id, value, order as u32, now);
            tables.factor_values.insert(value.id, value);
        }

        info!("Created factor '{}' ({})", record.factor_name, record.id);
        tables.factors.insert(record.id, record.clone());
        Ok(record)
    }

    fn get_factor(&self, id: FactorId) -> StoreResult<RiskFactor> {
        self.tables
            .read()
            .factors
            .get(&id)
            .cloned()
            .ok_or(StoreError::FactorNotFound(id))
    }

    fn factor_by_name(&self, factor_name: &str) -> Option<RiskFactor> {
        self.tables
            .read()
            .factors
            .values()
            .find(|f| f.factor_name == factor_name)
            .cloned()
    }

    fn factors(&self) -> Vec<RiskFactor> {
        self.tables.read().factors.values().cloned().collect()
    }

    fn set_factor_active(&self, id: FactorId, active: bool) -> StoreResult<RiskFactor> {
        let mut tables = self.tables.write();
        let factor = tables.factors.get_mut(&id).ok_or(StoreError::FactorNotFound(id))?;
        factor.active = active;
        factor.updated_at = chrono::Utc::now().timestamp_millis();
        info!("Factor '{}' active={}", factor.factor_name, active);
        Ok(factor.clone())
    }

    fn insert_factor_value(&self, factor_id: FactorId, value: NewFactorValue) -> StoreResult<FactorValue> {
        let mut tables = self.tables.write();
        if !tables.factors.contains_key(&factor_id) {
            return Err(StoreError::FactorNotFound(factor_id));
        }
        if tables.value_name_taken(factor_id, &value.value_name) {
            return Err(StoreError::AlreadyExists(format!(
                "Value '{}' of {}",
                value.value_name, factor_id
            )));
        }

        let default_order = tables
            .factor_values
            .values()
            .filter(|v| v.factor_id == factor_id)
            .count() as u32;
        let now = chrono::Utc::now().timestamp_millis();
        let record = tables.build_value(factor_id, value, default_order, now);
        tables.factor_values.insert(record.id, record.clone());
        Ok(record)
    }

    fn get_factor_value(&self, id: FactorValueId) -> StoreResult<FactorValue> {
        self.tables
            .read()
            .factor_values
            .get(&id)
            .cloned()
            .ok_or(StoreError::FactorValueNotFound(id))
    }

    fn factor_value_by_name(&self, factor_id: FactorId, value_name: &str) -> Option<FactorValue> {
        self.tables
            .read()
            .factor_values
            .values()
            .find(|v| v.factor_id == factor_id && v.value_name == value_name)
            .cloned()
    }

    fn factor_values(&self, factor_id: FactorId) -> Vec<FactorValue> {
        let mut values: Vec<FactorValue> = self
            .tables
            .read()
            .factor_values
            .values()
            .filter(|v| v.factor_id == factor_id)
            .cloned()
            .collect();
        values.sort_by_key(|v| v.sort_order);
        values
    }

    fn insert_model(&self, model: NewFactorModel) -> StoreResult<FactorModel> {
        let mut tables = self.tables.write();
        if tables.models.values().any(|m| m.model_name == model.model_name) {
            return Err(StoreError::AlreadyExists(format!("Model '{}'", model.model_name)));
        }

        let now = chrono::Utc::now().timestamp_millis();
        let record = FactorModel {
            id: ModelId::new(tables.next_model_id),
            model_name: model.model_name,
            display_name: model.display_name,
            description: model.description,
            is_active: false,
            is_baseline: model.is_baseline,
            hypothesis: model.hypothesis,
            validation_status: model.validation_status,
            created_at: now,
            updated_at: now,
        };
        tables.next_model_id += 1;

        info!("Created model '{}' ({})", record.model_name, record.id);
        tables.models.insert(record.id, record.clone());
        Ok(record)
    }

    fn get_model(&self, id: ModelId) -> StoreResult<FactorModel> {
        self.tables
            .read()
            .models
            .get(&id)
            .cloned()
            .ok_or(StoreError::ModelNotFound(id))
    }

    fn model_by_name(&self, model_name: &str) -> Option<FactorModel> {
        self.tables
            .read()
            .models
            .values()
            .find(|m| m.model_name == model_name)
            .cloned()
    }

    fn active_model(&self) -> Option<FactorModel> {
        self.tables.read().models.values().find(|m| m.is_active).cloned()
    }

    fn models(&self) -> Vec<FactorModel> {
        self.tables.read().models.values().cloned().collect()
    }

    fn activate_model(&self, id: ModelId) -> StoreResult<FactorModel> {
        let mut tables = self.tables.write();
        if !tables.models.contains_key(&id) {
            return Err(StoreError::ModelNotFound(id));
        }

        let now = chrono::Utc::now().timestamp_millis();
        for model in tables.models.values_mut() {
            let active = model.id == id;
            if model.is_active != active {
                model.is_active = active;
                model.updated_at = now;
            }
        }

        let model = tables.models[&id].clone();
        info!("Activated model '{}' ({})", model.model_name, model.id);
        Ok(model)
    }

    fn upsert_model_weight(&self, weight: ModelFactorWeight) -> StoreResult<()> {
        let mut tables = self.tables.write();
        if !tables.models.contains_key(&weight.model_id) {
            return Err(StoreError::ModelNotFound(weight.model_id));
        }
        if !tables.factors.contains_key(&weight.factor_id) {
            return Err(StoreError::FactorNotFound(weight.factor_id));
        }

        match tables
            .weights
            .iter_mut()
            .find(|w| w.model_id == weight.model_id && w.factor_id == weight.factor_id)
        {
            Some(existing) => *existing = weight,
            None => tables.weights.push(weight),
        }
        Ok(())
    }

    fn model_weights(&self, model_id: ModelId) -> Vec<ModelFactorWeight> {
        self.tables
            .read()
            .weights
            .iter()
            .filter(|w| w.model_id == model_id)
            .cloned()
            .collect()
    }

    fn replace_assignments(
        &self,
        interface_id: &InterfaceId,
        assignments: &[AssignmentRequest],
    ) -> StoreResult<Vec<FactorAssignment>> {
        let mut tables = self.tables.write();
        if !tables.interfaces.contains_key(interface_id) {
            return Err(StoreError::InterfaceNotFound(interface_id.clone()));
        }
        for request in assignments {
            if !tables.factors.contains_key(&request.factor_id) {
                return Err(StoreError::FactorNotFound(request.factor_id));
            }
            if !tables.factor_values.contains_key(&request.factor_value_id) {
                return Err(StoreError::FactorValueNotFound(request.factor_value_id));
            }
        }

        let now = chrono::Utc::now().timestamp_millis();
        let rows: Vec<FactorAssignment> = assignments
            .iter()
            .map(|request| FactorAssignment {
                interface_id: interface_id.clone(),
                factor_id: request.factor_id,
                factor_value_id: request.factor_value_id,
                assigned_at: now,
            })
            .collect();

        let previous = tables.assignments.insert(interface_id.clone(), rows.clone());
        debug!(
            "Replaced {} assignment(s) on {} with {}",
            previous.map(|p| p.len()).unwrap_or(0),
            interface_id,
            rows.len()
        );
        Ok(rows)
    }

    fn assignments(&self, interface_id: &InterfaceId) -> Vec<FactorAssignment> {
        self.tables
            .read()
            .assignments
            .get(interface_id)
            .cloned()
            .unwrap_or_default()
    }

    fn assignment_details(&self, interface_id: &InterfaceId) -> StoreResult<Vec<AssignedValue>> {
        let tables = self.tables.read();
        let Some(rows) = tables.assignments.get(interface_id) else {
            return Ok(Vec::new());
        };

        rows.iter()
            .map(|assignment| {
                let factor = tables.factors.get(&assignment.factor_id).ok_or_else(|| {
                    StoreError::DanglingReference(format!(
                        "assignment on {} references missing {}",
                        interface_id, assignment.factor_id
                    ))
                })?;
                let value = tables.factor_values.get(&assignment.factor_value_id).ok_or_else(|| {
                    StoreError::DanglingReference(format!(
                        "assignment on {} references missing {}",
                        interface_id, assignment.factor_value_id
                    ))
                })?;
                Ok(AssignedValue {
                    assignment: assignment.clone(),
                    factor: factor.clone(),
                    value: value.clone(),
                })
            })
            .collect()
    }

    fn insert_outcome(&self, outcome: NewOutcome) -> StoreResult<Outcome> {
        let mut tables = self.tables.write();
        let record = Outcome {
            id: OutcomeId::new(tables.next_outcome_id),
            unit_id: outcome.unit_id,
            project_id: outcome.project_id,
            outcome_type: outcome.outcome_type,
            success: outcome.success,
            cohort_year: outcome.cohort_year,
            notes: outcome.notes,
            recorded_at: chrono::Utc::now().timestamp_millis(),
        };
        tables.next_outcome_id += 1;
        tables.outcomes.insert(record.id, record.clone());
        Ok(record)
    }

    fn get_outcome(&self, id: OutcomeId) -> StoreResult<Outcome> {
        self.tables
            .read()
            .outcomes
            .get(&id)
            .cloned()
            .ok_or(StoreError::OutcomeNotFound(id))
    }

    fn outcomes(&self) -> Vec<Outcome> {
        self.tables.read().outcomes.values().cloned().collect()
    }

    fn record_validation(&self, validation: ModelValidation) -> StoreResult<()> {
        let mut tables = self.tables.write();
        if !tables.models.contains_key(&validation.model_id) {
            return Err(StoreError::ModelNotFound(validation.model_id));
        }
        tables.validations.push(validation);
        Ok(())
    }

    fn validations(&self, model_id: ModelId) -> Vec<ModelValidation> {
        self.tables
            .read()
            .validations
            .iter()
            .filter(|v| v.model_id == model_id)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factor::{FactorCategory, NewFactorValue};
    use crate::graph::{Lifecycle, NewInterface, UnitId};

    fn store_with_interface() -> MemoryStore {
        let store = MemoryStore::new();
        store
            .insert_interface(Interface::from_request(
                NewInterface::new("i1", "team_1", "team_2").with_bond("codified-strong"),
                &UnitId::new("u"),
            ))
            .unwrap();
        store
    }

    fn factor_request() -> NewRiskFactor {
        NewRiskFactor::new("knowledge_type", "Knowledge Type", FactorCategory::NdaDimension)
            .with_value(NewFactorValue::new("codified", "Codified", 0.10))
            .with_value(NewFactorValue::new("institutional", "Institutional", 0.40))
    }

    #[test]
    fn test_duplicate_entity() {
        let store = MemoryStore::new();
        let team = Entity::team("team_1", "Power", "electrical", Lifecycle::Established);
        store.insert_entity(team.clone()).unwrap();

        let result = store.insert_entity(team);
        assert!(matches!(result, Err(StoreError::AlreadyExists(_))));
        assert_eq!(store.entity_count(), 1);
    }

    #[test]
    fn test_insert_factor_with_values() {
        let store = MemoryStore::new();
        let factor = store.insert_factor(factor_request()).unwrap();

        let values = store.factor_values(factor.id);
        assert_eq!(values.len(), 2);
        assert_eq!(values[0].value_name, "codified");
        assert_eq!(values[1].sort_order, 1);
        assert!(store.factor_value_by_name(factor.id, "institutional").is_some());
    }

    #[test]
    fn test_factor_name_unique() {
        let store = MemoryStore::new();
        store.insert_factor(factor_request()).unwrap();
        let result = store.insert_factor(factor_request());
        assert!(matches!(result, Err(StoreError::AlreadyExists(_))));
        assert_eq!(store.factors().len(), 1);
    }

    #[test]
    fn test_duplicate_value_in_request_writes_nothing() {
        let store = MemoryStore::new();
        let request = factor_request().with_value(NewFactorValue::new("codified", "Again", 0.2));

        assert!(store.insert_factor(request).is_err());
        assert!(store.factors().is_empty());
        assert!(store.factor_by_name("knowledge_type").is_none());
    }

    #[test]
    fn test_activate_model_is_exclusive() {
        let store = MemoryStore::new();
        let a = store.insert_model(NewFactorModel::new("a", "A")).unwrap();
        let b = store.insert_model(NewFactorModel::new("b", "B")).unwrap();
        assert!(store.active_model().is_none());

        store.activate_model(a.id).unwrap();
        store.activate_model(b.id).unwrap();

        let active: Vec<_> = store.models().into_iter().filter(|m| m.is_active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, b.id);
    }

    #[test]
    fn test_activate_missing_model_keeps_state() {
        let store = MemoryStore::new();
        let a = store.insert_model(NewFactorModel::new("a", "A")).unwrap();
        store.activate_model(a.id).unwrap();

        assert_eq!(
            store.activate_model(ModelId::new(99)).unwrap_err(),
            StoreError::ModelNotFound(ModelId::new(99))
        );
        assert_eq!(store.active_model().unwrap().id, a.id);
    }

    #[test]
    fn test_replace_assignments_rejects_unknown_value() {
        let store = store_with_interface();
        let factor = store.insert_factor(factor_request()).unwrap();
        let value = store.factor_value_by_name(factor.id, "codified").unwrap();
        let iface = InterfaceId::new("i1");

        store
            .replace_assignments(&iface, &[AssignmentRequest::new(factor.id, value.id)])
            .unwrap();

        let bad = [AssignmentRequest::new(factor.id, FactorValueId::new(404))];
        assert!(store.replace_assignments(&iface, &bad).is_err());
        assert_eq!(store.assignments(&iface).len(), 1);
    }

    #[test]
    fn test_weight_upsert() {
        let store = MemoryStore::new();
        let factor = store.insert_factor(factor_request()).unwrap();
        let model = store.insert_model(NewFactorModel::new("m", "M")).unwrap();

        store.upsert_model_weight(ModelFactorWeight::new(model.id, factor.id, 1.5)).unwrap();
        store.upsert_model_weight(ModelFactorWeight::new(model.id, factor.id, 0.5)).unwrap();

        let weights = store.model_weights(model.id);
        assert_eq!(weights.len(), 1);
        assert_eq!(weights[0].weight, 0.5);
    }

    #[test]
    fn test_snapshot_with_several_active_models_keeps_one() {
        let store = MemoryStore::new();
        let a = store.insert_model(NewFactorModel::new("a", "A")).unwrap();
        let b = store.insert_model(NewFactorModel::new("b", "B")).unwrap();
        let c = store.insert_model(NewFactorModel::new("c", "C")).unwrap();

        let mut snapshot = store.to_snapshot();
        for model in snapshot.models.iter_mut() {
            model.is_active = model.id != c.id;
            model.updated_at = if model.id == b.id { 200 } else { 100 };
        }

        let restored = MemoryStore::from_snapshot(snapshot);
        let active: Vec<_> = restored.models().into_iter().filter(|m| m.is_active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, b.id);
        assert_eq!(restored.active_model().unwrap().id, b.id);
        assert!(!restored.get_model(a.id).unwrap().is_active);
    }

    #[test]
    fn test_snapshot_active_tie_keeps_first() {
        let store = MemoryStore::new();
        let a = store.insert_model(NewFactorModel::new("a", "A")).unwrap();
        store.insert_model(NewFactorModel::new("b", "B")).unwrap();

        let mut snapshot = store.to_snapshot();
        for model in snapshot.models.iter_mut() {
            model.is_active = true;
            model.updated_at = 100;
        }

        let restored = MemoryStore::from_snapshot(snapshot);
        assert_eq!(restored.models().iter().filter(|m| m.is_active).count(), 1);
        assert_eq!(restored.active_model().unwrap().id, a.id);
    }

    #[test]
    fn test_snapshot_restores_id_allocation() {
        let store = MemoryStore::new();
        store.insert_factor(factor_request()).unwrap();
        store.insert_model(NewFactorModel::new("m", "M")).unwrap();

        let restored = MemoryStore::from_snapshot(store.to_snapshot());
        let next = restored
            .insert_factor(NewRiskFactor::new("other", "Other", FactorCategory::EntityAttribute))
            .unwrap();
        assert_eq!(next.id, FactorId::new(2));
        let model = restored.insert_model(NewFactorModel::new("n", "N")).unwrap();
        assert_eq!(model.id, ModelId::new(2));
    }
}
