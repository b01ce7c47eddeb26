//! Organisation graph
//!
//! This module holds the graph the scoring engine reads:
//! - Entities (teams, faculty, projects), optionally owned by a unit
//! - Directed interfaces carrying legacy bond type and energy loss
//! - The `GraphStore` trait the core uses for every read and write
//! - `MemoryStore`, a thread-safe in-memory implementation

pub mod entity;
pub mod interface;
pub mod memory;
pub mod store;
pub mod types;

pub use entity::{
    Entity, EntityKind, FacultyProfile, Lifecycle, ProjectProfile, TeamProfile, PROJECT_CONTRACT,
    PROJECT_MULTI_INSTITUTION, PROJECT_RESEARCH,
};
pub use interface::{BondType, Interface, NewInterface};
pub use memory::MemoryStore;
pub use store::{AssignedValue, GraphStore, Scope, StoreError, StoreResult};
pub use types::{EntityId, FactorId, FactorValueId, InterfaceId, ModelId, OutcomeId, UnitId};
