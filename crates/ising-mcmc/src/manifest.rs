use std::fs;
use std::path::{Path, PathBuf};

use ising_core::errors::ErrorInfo;
use ising_core::{IsingError, RunProvenance, SchemaVersion};
use serde::{Deserialize, Serialize};

use crate::config::RunConfig;

/// Structured manifest describing a completed temperature sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    /// Schema version of this manifest layout.
    #[serde(default)]
    pub schema_version: SchemaVersion,
    /// Configuration used for the run.
    pub config: RunConfig,
    /// Seeds, timestamp, and tool versions.
    pub provenance: RunProvenance,
    /// Optional seed label captured from the configuration.
    pub seed_label: Option<String>,
    /// SHA-256 of the JSON-encoded configuration.
    pub config_hash: String,
    /// Canonical hash of the lattice after the last temperature.
    pub final_lattice_hash: String,
    /// Observables CSV relative to the run directory.
    pub observables_file: Option<PathBuf>,
    /// Summary JSON relative to the run directory.
    pub summary_file: Option<PathBuf>,
    /// Wall-clock duration of the simulation in seconds.
    pub elapsed_seconds: f64,
}

impl RunManifest {
    /// Writes the manifest to a JSON file.
    pub fn write(&self, path: &Path) -> Result<(), IsingError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|err| IsingError::io("manifest-mkdir", &err, parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|err| {
            IsingError::Serde(
                ErrorInfo::new("manifest-serialize", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        fs::write(path, json).map_err(|err| IsingError::io("manifest-write", &err, path.display()))
    }

    /// Loads a manifest from disk.
    pub fn load(path: &Path) -> Result<Self, IsingError> {
        let contents = fs::read_to_string(path)
            .map_err(|err| IsingError::io("manifest-read", &err, path.display()))?;
        serde_json::from_str(&contents).map_err(|err| {
            IsingError::Serde(
                ErrorInfo::new("manifest-parse", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })
    }
}
