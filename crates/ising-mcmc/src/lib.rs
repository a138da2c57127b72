#![deny(missing_docs)]

//! Single-spin Metropolis Monte Carlo for the 2D Ising model with periodic
//! boundaries, driven across an ordered temperature schedule.

/// Metropolis acceptance rule.
pub mod acceptance;
/// YAML configuration schema, defaults, and validated parameters.
pub mod config;
/// Deterministic seed derivation helpers.
pub mod determinism;
/// Flip energy change and per-site energy and magnetization.
pub mod energy;
/// Canonical hashes of lattices and configurations.
pub mod hash;
/// Temperature sweep driver and public `run`/`simulate` entry points.
pub mod kernel;
/// Periodic square spin lattice.
pub mod lattice;
/// Run manifest serialization helpers.
pub mod manifest;
/// Per-temperature observables CSV export.
pub mod metrics;
/// Running moments and the measurement phase.
pub mod observables;
/// Temperature schedule expansion.
pub mod schedule;
/// Random-site sweep loop.
pub mod sweep;

pub use acceptance::{acceptance_probability, metropolis_accept};
pub use config::{
    AttemptPolicy, InitialState, OutputConfig, RunConfig, SeedPolicy, SimulationParameters,
    TemperatureSchedule,
};
pub use energy::{
    energy_delta, magnetization_per_site, total_energy_per_site, DeltaTerms, Hamiltonian,
};
pub use kernel::{run, run_config, run_with_lattice, simulate, RunSummary};
pub use lattice::{checked_sites, Lattice, MIN_LATTICE_SIZE};
pub use manifest::RunManifest;
pub use metrics::MetricsRecorder;
pub use observables::{measure, ObservableSample, RunningMoments};
pub use schedule::build_schedule;
pub use sweep::{sweep, SweepStats};
