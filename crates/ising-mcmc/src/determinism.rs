use ising_core::{derive_substream_seed, RngHandle, DYNAMICS_SUBSTREAM, LATTICE_SUBSTREAM};

/// Seed of the stream that draws the initial spin configuration.
pub fn lattice_seed(master_seed: u64) -> u64 {
    derive_substream_seed(master_seed, LATTICE_SUBSTREAM)
}

/// Seed of the stream that drives site selection and acceptance draws.
pub fn dynamics_seed(master_seed: u64) -> u64 {
    derive_substream_seed(master_seed, DYNAMICS_SUBSTREAM)
}

/// Generator for the initial lattice.
pub fn lattice_rng(master_seed: u64) -> RngHandle {
    RngHandle::from_seed(lattice_seed(master_seed))
}

/// Generator for the Metropolis dynamics.
pub fn dynamics_rng(master_seed: u64) -> RngHandle {
    RngHandle::from_seed(dynamics_seed(master_seed))
}
