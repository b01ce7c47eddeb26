//! Graph store interface
//!
//! The core reads and writes entities, interfaces and the factor catalog
//! through `GraphStore`. Every method is a single atomic step: a failure
//! leaves the store as it was before the call.

use super::entity::Entity;
use super::interface::Interface;
use super::types::{EntityId, FactorId, FactorValueId, InterfaceId, ModelId, OutcomeId, UnitId};
use crate::factor::{
    AssignmentRequest, FactorAssignment, FactorModel, FactorValue, ModelFactorWeight, ModelValidation,
    NewFactorModel, NewFactorValue, NewOutcome, NewRiskFactor, Outcome, RiskFactor,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during store operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Entity {0} not found")]
    EntityNotFound(EntityId),

    #[error("Interface {0} not found")]
    InterfaceNotFound(InterfaceId),

    #[error("{0} not found")]
    FactorNotFound(FactorId),

    #[error("{0} not found")]
    FactorValueNotFound(FactorValueId),

    #[error("{0} not found")]
    ModelNotFound(ModelId),

    #[error("{0} not found")]
    OutcomeNotFound(OutcomeId),

    #[error("{0} already exists")]
    AlreadyExists(String),

    #[error("Dangling reference: {0}")]
    DanglingReference(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        !matches!(self, StoreError::AlreadyExists(_) | StoreError::DanglingReference(_))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Which part of the graph an operation covers
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Every interface and entity
    #[default]
    All,
    /// Interfaces with either endpoint in the unit, entities owned by it
    Unit(UnitId),
}

impl Scope {
    pub fn unit(unit: impl Into<UnitId>) -> Self {
        Scope::Unit(unit.into())
    }

    pub fn unit_id(&self) -> Option<&UnitId> {
        match self {
            Scope::All => None,
            Scope::Unit(unit) => Some(unit),
        }
    }

    pub fn includes_interface(&self, interface: &Interface) -> bool {
        match self {
            Scope::All => true,
            Scope::Unit(unit) => interface.touches_unit(unit),
        }
    }

    pub fn includes_entity(&self, entity: &Entity) -> bool {
        match self {
            Scope::All => true,
            Scope::Unit(unit) => entity.unit_id.as_ref() == Some(unit),
        }
    }
}

/// An assignment joined with the factor and value it references
#[derive(Debug, Clone)]
pub struct AssignedValue {
    pub assignment: FactorAssignment,
    pub factor: RiskFactor,
    pub value: FactorValue,
}

/// Read/write access to the organisation graph and the factor catalog
pub trait GraphStore: Send + Sync {
    // Entities

    fn insert_entity(&self, entity: Entity) -> StoreResult<()>;

    fn get_entity(&self, id: &EntityId) -> StoreResult<Entity>;

    fn entities(&self, scope: &Scope) -> Vec<Entity>;

    // Interfaces

    fn insert_interface(&self, interface: Interface) -> StoreResult<()>;

    fn get_interface(&self, id: &InterfaceId) -> StoreResult<Interface>;

    fn interfaces(&self, scope: &Scope) -> Vec<Interface>;

    // Factor catalog

    /// Insert a factor and all of its initial values in one step
    fn insert_factor(&self, factor: NewRiskFactor) -> StoreResult<RiskFactor>;

    fn get_factor(&self, id: FactorId) -> StoreResult<RiskFactor>;

    fn factor_by_name(&self, factor_name: &str) -> Option<RiskFactor>;

    fn factors(&self) -> Vec<RiskFactor>;

    fn set_factor_active(&self, id: FactorId, active: bool) -> StoreResult<RiskFactor>;

    fn insert_factor_value(&self, factor_id: FactorId, value: NewFactorValue) -> StoreResult<FactorValue>;

    fn get_factor_value(&self, id: FactorValueId) -> StoreResult<FactorValue>;

    fn factor_value_by_name(&self, factor_id: FactorId, value_name: &str) -> Option<FactorValue>;

    /// Values of a factor ordered by `sort_order`
    fn factor_values(&self, factor_id: FactorId) -> Vec<FactorValue>;

    // Models

    /// Insert a new, inactive model
    fn insert_model(&self, model: NewFactorModel) -> StoreResult<FactorModel>;

    fn get_model(&self, id: ModelId) -> StoreResult<FactorModel>;

    fn model_by_name(&self, model_name: &str) -> Option<FactorModel>;

    fn active_model(&self) -> Option<FactorModel>;

    fn models(&self) -> Vec<FactorModel>;

    /// Mark `id` active and every other model inactive, atomically
    fn activate_model(&self, id: ModelId) -> StoreResult<FactorModel>;

    /// Insert or replace the weight row for (model, factor)
    fn upsert_model_weight(&self, weight: ModelFactorWeight) -> StoreResult<()>;

    fn model_weights(&self, model_id: ModelId) -> Vec<ModelFactorWeight>;

    // Assignments

    /// Delete every assignment of the interface and insert `assignments`,
    /// atomically
    fn replace_assignments(
        &self,
        interface_id: &InterfaceId,
        assignments: &[AssignmentRequest],
    ) -> StoreResult<Vec<FactorAssignment>>;

    fn assignments(&self, interface_id: &InterfaceId) -> Vec<FactorAssignment>;

    /// Assignments joined with their factor and value rows
    fn assignment_details(&self, interface_id: &InterfaceId) -> StoreResult<Vec<AssignedValue>>;

    // Outcomes and validation

    fn insert_outcome(&self, outcome: NewOutcome) -> StoreResult<Outcome>;

    fn get_outcome(&self, id: OutcomeId) -> StoreResult<Outcome>;

    fn outcomes(&self) -> Vec<Outcome>;

    fn record_validation(&self, validation: ModelValidation) -> StoreResult<()>;

    fn validations(&self, model_id: ModelId) -> Vec<ModelValidation>;
}
