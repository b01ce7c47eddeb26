//! Engine configuration

use crate::factor::BASELINE_MODEL_NAME;
use crate::graph::UnitId;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration for a scoring engine and the CLI around it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Unit assigned to interface endpoints whose id carries no unit prefix
    pub declared_unit: UnitId,
    /// Name of the model created by `ScoringEngine::bootstrap`
    pub baseline_model_name: String,
    /// Run bootstrap when a store is opened
    pub bootstrap_on_start: bool,
    /// JSON snapshot to load on start and save after mutations
    pub snapshot_path: Option<PathBuf>,
    /// Default tracing filter when RUST_LOG is unset
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            declared_unit: UnitId::new("default"),
            baseline_model_name: BASELINE_MODEL_NAME.to_string(),
            bootstrap_on_start: true,
            snapshot_path: None,
            log_level: "info".to_string(),
        }
    }
}

impl EngineConfig {
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Load config from a YAML file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = EngineConfig::from_yaml_str("declared_unit: CalPolyPomona\n").unwrap();
        assert_eq!(config.declared_unit, UnitId::new("CalPolyPomona"));
        assert_eq!(config.baseline_model_name, "baseline_v1");
        assert!(config.bootstrap_on_start);
        assert!(config.snapshot_path.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "bootstrap_on_start: false").unwrap();
        writeln!(file, "snapshot_path: /tmp/org.json").unwrap();
        writeln!(file, "log_level: debug").unwrap();

        let config = EngineConfig::load(file.path()).unwrap();
        assert!(!config.bootstrap_on_start);
        assert_eq!(config.snapshot_path, Some(PathBuf::from("/tmp/org.json")));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_bad_yaml() {
        let result = EngineConfig::from_yaml_str("bootstrap_on_start: [1, 2");
        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = EngineConfig::default();
        let back = EngineConfig::from_yaml_str(&config.to_yaml().unwrap()).unwrap();
        assert_eq!(back, config);
    }
}
