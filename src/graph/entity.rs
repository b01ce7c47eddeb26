//! Entities of the organisation graph: teams, faculty and projects

use super::types::{EntityId, UnitId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Project type marking a multi-institution collaboration
pub const PROJECT_MULTI_INSTITUTION: &str = "multiversity";
/// Project type marking externally contracted work
pub const PROJECT_CONTRACT: &str = "jpl-contract";
/// Project type marking open-ended research
pub const PROJECT_RESEARCH: &str = "research";

/// Where a team is in its membership lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifecycle {
    Incoming,
    Established,
    Outgoing,
}

impl Lifecycle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Lifecycle::Incoming => "incoming",
            Lifecycle::Established => "established",
            Lifecycle::Outgoing => "outgoing",
        }
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamProfile {
    /// Engineering discipline (electrical, software, mission-ops, ...)
    pub discipline: String,
    pub lifecycle: Lifecycle,
    #[serde(default)]
    pub size: u32,
    /// Accumulated experience in months
    #[serde(default)]
    pub experience_months: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacultyProfile {
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectProfile {
    pub project_type: String,
    /// Planned duration in years, if known
    #[serde(default)]
    pub duration_years: Option<u32>,
}

impl ProjectProfile {
    pub fn is_multi_institution(&self) -> bool {
        self.project_type == PROJECT_MULTI_INSTITUTION
    }

    pub fn is_contract(&self) -> bool {
        self.project_type == PROJECT_CONTRACT
    }

    pub fn is_research(&self) -> bool {
        self.project_type == PROJECT_RESEARCH
    }
}

/// Kind-specific attributes of an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntityKind {
    Team(TeamProfile),
    Faculty(FacultyProfile),
    Project(ProjectProfile),
}

impl EntityKind {
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Team(_) => "team",
            EntityKind::Faculty(_) => "faculty",
            EntityKind::Project(_) => "project",
        }
    }
}

/// A node of the organisation graph
///
/// Entities are immutable once stored. `unit_id` of `None` marks a shared
/// entity that belongs to no single organisational unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub unit_id: Option<UnitId>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub kind: EntityKind,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: i64,
}

impl Entity {
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>, kind: EntityKind) -> Self {
        Entity {
            id: id.into(),
            unit_id: None,
            name: name.into(),
            description: String::new(),
            kind,
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn team(
        id: impl Into<EntityId>,
        name: impl Into<String>,
        discipline: impl Into<String>,
        lifecycle: Lifecycle,
    ) -> Self {
        Self::new(
            id,
            name,
            EntityKind::Team(TeamProfile {
                discipline: discipline.into(),
                lifecycle,
                size: 0,
                experience_months: 0,
            }),
        )
    }

    pub fn faculty(id: impl Into<EntityId>, name: impl Into<String>, role: impl Into<String>) -> Self {
        Self::new(id, name, EntityKind::Faculty(FacultyProfile { role: role.into() }))
    }

    pub fn project(
        id: impl Into<EntityId>,
        name: impl Into<String>,
        project_type: impl Into<String>,
        duration_years: Option<u32>,
    ) -> Self {
        Self::new(
            id,
            name,
            EntityKind::Project(ProjectProfile {
                project_type: project_type.into(),
                duration_years,
            }),
        )
    }

    pub fn in_unit(mut self, unit: impl Into<UnitId>) -> Self {
        self.unit_id = Some(unit.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn as_team(&self) -> Option<&TeamProfile> {
        match &self.kind {
            EntityKind::Team(team) => Some(team),
            _ => None,
        }
    }

    pub fn as_project(&self) -> Option<&ProjectProfile> {
        match &self.kind {
            EntityKind::Project(project) => Some(project),
            _ => None,
        }
    }

    pub fn is_faculty(&self) -> bool {
        matches!(self.kind, EntityKind::Faculty(_))
    }
}
