use ising_core::errors::ErrorInfo;
use ising_core::IsingError;
use sha2::{Digest, Sha256};

use crate::config::RunConfig;
use crate::lattice::Lattice;

fn hex_digest(hasher: Sha256) -> String {
    hasher
        .finalize()
        .iter()
        .map(|byte| format!("{:02x}", byte))
        .collect::<String>()
}

/// Canonical SHA-256 hash of a spin configuration.
pub fn lattice_hash(lattice: &Lattice) -> String {
    let mut hasher = Sha256::new();
    hasher.update((lattice.size() as u64).to_le_bytes());
    for &spin in lattice.spins() {
        hasher.update(spin.to_le_bytes());
    }
    hex_digest(hasher)
}

/// SHA-256 hash of the JSON encoding of a run configuration.
pub fn config_hash(config: &RunConfig) -> Result<String, IsingError> {
    let json = serde_json::to_vec(config)
        .map_err(|err| IsingError::Serde(ErrorInfo::new("config-serialize", err.to_string())))?;
    let mut hasher = Sha256::new();
    hasher.update(&json);
    Ok(hex_digest(hasher))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lattice_hash_tracks_spins() {
        let mut lattice = Lattice::uniform(4, 1).unwrap();
        let aligned = lattice_hash(&lattice);
        assert_eq!(aligned.len(), 64);
        assert_eq!(aligned, lattice_hash(&Lattice::uniform(4, 1).unwrap()));
        lattice.flip(2, 3);
        assert_ne!(aligned, lattice_hash(&lattice));
        lattice.flip(2, 3);
        assert_eq!(aligned, lattice_hash(&lattice));
    }

    #[test]
    fn config_hash_changes_with_parameters() {
        let base = RunConfig::default();
        let mut other = base.clone();
        other.field = 0.0;
        assert_eq!(config_hash(&base).unwrap(), config_hash(&base).unwrap());
        assert_ne!(config_hash(&base).unwrap(), config_hash(&other).unwrap());
    }
}
