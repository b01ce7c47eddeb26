//! Core identifier types for the organisation graph

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a team, faculty member or project (e.g. "MIT_team_3")
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        EntityId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Organisational unit encoded as the prefix before the first underscore
    pub fn unit_prefix(&self) -> Option<UnitId> {
        self.0
            .split_once('_')
            .map(|(prefix, _)| UnitId::new(prefix))
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        EntityId(s.to_string())
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        EntityId(s)
    }
}

/// Identifier of an interface (edge)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct InterfaceId(String);

impl InterfaceId {
    pub fn new(id: impl Into<String>) -> Self {
        InterfaceId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InterfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for InterfaceId {
    fn from(s: &str) -> Self {
        InterfaceId(s.to_string())
    }
}

impl From<String> for InterfaceId {
    fn from(s: String) -> Self {
        InterfaceId(s)
    }
}

/// Top-level organisational unit (e.g. a university)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct UnitId(String);

impl UnitId {
    pub fn new(id: impl Into<String>) -> Self {
        UnitId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UnitId {
    fn from(s: &str) -> Self {
        UnitId(s.to_string())
    }
}

impl From<String> for UnitId {
    fn from(s: String) -> Self {
        UnitId(s)
    }
}

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            pub fn new(id: u64) -> Self {
                $name(id)
            }

            pub fn as_u64(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                $name(id)
            }
        }
    };
}

numeric_id!(
    /// Identifier of a risk factor
    FactorId
);
numeric_id!(
    /// Identifier of a factor value
    FactorValueId
);
numeric_id!(
    /// Identifier of a factor model
    ModelId
);
numeric_id!(
    /// Identifier of a recorded outcome
    OutcomeId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_ids() {
        let id = FactorId::new(42);
        assert_eq!(id.as_u64(), 42);
        assert_eq!(format!("{}", id), "FactorId(42)");

        let model: ModelId = 7.into();
        assert_eq!(format!("{}", model), "ModelId(7)");
    }

    #[test]
    fn test_unit_prefix() {
        assert_eq!(
            EntityId::new("MIT_team_3").unit_prefix(),
            Some(UnitId::new("MIT"))
        );
        assert_eq!(EntityId::new("PROVES").unit_prefix(), None);
    }

    #[test]
    fn test_string_ids_serialize_transparently() {
        let id = InterfaceId::new("interface_11");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"interface_11\"");
        assert_eq!(format!("{}", id), "interface_11");
    }

    #[test]
    fn test_id_ordering() {
        assert!(ModelId::new(1) < ModelId::new(2));
    }
}
