//! JSON snapshots of a whole store
//!
//! Every table is written as a flat list so the file diffs cleanly and
//! needs no non-string map keys.

use crate::factor::{FactorAssignment, FactorModel, FactorValue, ModelFactorWeight, ModelValidation, Outcome, RiskFactor};
use crate::graph::{Entity, Interface};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SnapshotResult<T> = Result<T, SnapshotError>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// Crate version that wrote the snapshot
    pub version: String,
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub interfaces: Vec<Interface>,
    #[serde(default)]
    pub factors: Vec<RiskFactor>,
    #[serde(default)]
    pub factor_values: Vec<FactorValue>,
    #[serde(default)]
    pub models: Vec<FactorModel>,
    #[serde(default)]
    pub weights: Vec<ModelFactorWeight>,
    #[serde(default)]
    pub assignments: Vec<FactorAssignment>,
    #[serde(default)]
    pub outcomes: Vec<Outcome>,
    #[serde(default)]
    pub validations: Vec<ModelValidation>,
}

impl Snapshot {
    /// Write the snapshot as pretty-printed JSON, creating parent directories
    pub fn save(&self, path: &Path) -> SnapshotResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;

        info!(
            "Saved snapshot to {}: {} entities, {} interfaces",
            path.display(),
            self.entities.len(),
            self.interfaces.len()
        );
        Ok(())
    }

    pub fn load(path: &Path) -> SnapshotResult<Self> {
        let file = File::open(path)?;
        let snapshot: Snapshot = serde_json::from_reader(BufReader::new(file))?;
        info!("Loaded snapshot {} (version {})", path.display(), snapshot.version);
        Ok(snapshot)
    }
}
