use std::fs;
use std::path::{Path, PathBuf};

use ising_core::errors::ErrorInfo;
use ising_core::{IsingError, RngHandle};
use serde::{Deserialize, Serialize};

use crate::energy::Hamiltonian;
use crate::lattice::{checked_sites, Lattice};
use crate::schedule;

/// YAML-configurable parameters governing a temperature sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Side length `L` of the square lattice.
    #[serde(default = "default_lattice_size")]
    pub lattice_size: usize,
    /// Number of update attempts per sweep (also the number of measurements).
    #[serde(default)]
    pub attempts: AttemptPolicy,
    /// External magnetic field strength `B`.
    #[serde(default = "default_field")]
    pub field: f64,
    /// Magnetic moment `µ` of each spin.
    #[serde(default = "default_moment")]
    pub moment: f64,
    /// Ordered temperatures to visit.
    #[serde(default)]
    pub schedule: TemperatureSchedule,
    /// Starting spin configuration.
    #[serde(default)]
    pub initial_state: InitialState,
    /// Master seed and substream policy.
    #[serde(default)]
    pub seed_policy: SeedPolicy,
    /// Output directory configuration.
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_lattice_size() -> usize {
    50
}

fn default_field() -> f64 {
    0.1
}

fn default_moment() -> f64 {
    1.0
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            lattice_size: default_lattice_size(),
            attempts: AttemptPolicy::default(),
            field: default_field(),
            moment: default_moment(),
            schedule: TemperatureSchedule::default(),
            initial_state: InitialState::default(),
            seed_policy: SeedPolicy::default(),
            output: OutputConfig::default(),
        }
    }
}

impl RunConfig {
    /// Parses a configuration from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self, IsingError> {
        serde_yaml::from_str(text)
            .map_err(|err| IsingError::Serde(ErrorInfo::new("config-parse", err.to_string())))
    }

    /// Reads and parses a YAML configuration file.
    pub fn load(path: &Path) -> Result<Self, IsingError> {
        let contents = fs::read_to_string(path)
            .map_err(|err| IsingError::io("config-read", &err, path.display()))?;
        Self::from_yaml_str(&contents).map_err(|err| match err {
            IsingError::Serde(info) => {
                IsingError::Serde(info.with_context("path", path.display().to_string()))
            }
            other => other,
        })
    }

    /// Validates the configuration and resolves it into simulation parameters.
    pub fn parameters(&self) -> Result<SimulationParameters, IsingError> {
        let attempts = self.attempts.resolve(self.lattice_size)?;
        let temperatures = schedule::build_schedule(&self.schedule)?;
        SimulationParameters::new(
            self.lattice_size,
            attempts,
            Hamiltonian::new(self.field, self.moment),
            temperatures,
        )
    }
}

/// How many single-spin update attempts make up one sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum AttemptPolicy {
    /// Exact number of attempts.
    Fixed {
        /// Attempts per sweep.
        attempts: u64,
    },
    /// `sweeps · L²` attempts, i.e. `sweeps` visits per site on average.
    PerSite {
        /// Average number of attempts per site.
        #[serde(default = "default_sweeps_per_site")]
        sweeps: u64,
    },
}

fn default_sweeps_per_site() -> u64 {
    1000
}

impl Default for AttemptPolicy {
    fn default() -> Self {
        AttemptPolicy::PerSite {
            sweeps: default_sweeps_per_site(),
        }
    }
}

impl AttemptPolicy {
    /// Resolves the policy into an attempt count for a lattice of side `lattice_size`.
    pub fn resolve(&self, lattice_size: usize) -> Result<u64, IsingError> {
        match self {
            AttemptPolicy::Fixed { attempts } => Ok(*attempts),
            AttemptPolicy::PerSite { sweeps } => (lattice_size as u64)
                .checked_mul(lattice_size as u64)
                .and_then(|sites| sites.checked_mul(*sweeps))
                .ok_or_else(|| {
                    IsingError::Config(
                        ErrorInfo::new("attempts-overflow", "attempt count does not fit in u64")
                            .with_context("lattice_size", lattice_size.to_string())
                            .with_context("sweeps", sweeps.to_string()),
                    )
                }),
        }
    }
}

/// Supported temperature schedules. Temperatures are visited in the order produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum TemperatureSchedule {
    /// Half-open arithmetic range `start, start + step, …` strictly below `stop`.
    Range {
        /// First temperature.
        start: f64,
        /// Exclusive upper bound.
        stop: f64,
        /// Spacing between consecutive temperatures.
        step: f64,
    },
    /// `count` temperatures `base · ratio^k`.
    Geometric {
        /// First temperature.
        base: f64,
        /// Multiplicative spacing.
        ratio: f64,
        /// Number of temperatures.
        count: usize,
    },
    /// Explicit list supplied by the user.
    Manual {
        /// Ordered temperatures.
        temperatures: Vec<f64>,
    },
}

impl Default for TemperatureSchedule {
    fn default() -> Self {
        TemperatureSchedule::Range {
            start: 1.6,
            stop: 3.25,
            step: 0.01,
        }
    }
}

/// Starting spin configuration for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InitialState {
    /// Each spin drawn independently and uniformly from `{+1, -1}`.
    #[default]
    Random,
    /// Every spin `+1`.
    AllUp,
    /// Every spin `-1`.
    AllDown,
}

impl InitialState {
    /// Builds the starting lattice. Only [`InitialState::Random`] draws from `rng`.
    pub fn build(&self, lattice_size: usize, rng: &mut RngHandle) -> Result<Lattice, IsingError> {
        match self {
            InitialState::Random => Lattice::random(lattice_size, rng),
            InitialState::AllUp => Lattice::uniform(lattice_size, 1),
            InitialState::AllDown => Lattice::uniform(lattice_size, -1),
        }
    }
}

/// Deterministic seeding configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedPolicy {
    /// Master seed used for the run.
    #[serde(default = "default_master_seed")]
    pub master_seed: u64,
    /// Optional label recorded in manifests.
    #[serde(default)]
    pub label: Option<String>,
}

fn default_master_seed() -> u64 {
    0x05EE_D5EE_DD15_5EED_u64
}

impl Default for SeedPolicy {
    fn default() -> Self {
        Self {
            master_seed: default_master_seed(),
            label: None,
        }
    }
}

/// Output directory layout configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Root directory for run artefacts. Nothing is written when unset.
    #[serde(default)]
    pub run_directory: Option<PathBuf>,
    /// Per-temperature observables CSV relative to `run_directory`.
    #[serde(default = "default_observables_filename")]
    pub observables_file: PathBuf,
    /// Run summary JSON relative to `run_directory`.
    #[serde(default = "default_summary_filename")]
    pub summary_file: PathBuf,
    /// Manifest filename relative to `run_directory`.
    #[serde(default = "default_manifest_filename")]
    pub manifest_file: PathBuf,
}

fn default_observables_filename() -> PathBuf {
    PathBuf::from("observables.csv")
}

fn default_summary_filename() -> PathBuf {
    PathBuf::from("summary.json")
}

fn default_manifest_filename() -> PathBuf {
    PathBuf::from("manifest.json")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            run_directory: None,
            observables_file: default_observables_filename(),
            summary_file: default_summary_filename(),
            manifest_file: default_manifest_filename(),
        }
    }
}

/// Validated, immutable parameters of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationParameters {
    lattice_size: usize,
    attempts: u64,
    hamiltonian: Hamiltonian,
    temperatures: Vec<f64>,
}

impl SimulationParameters {
    /// Validates and builds the parameter set.
    ///
    /// Rejects lattices smaller than 2x2 or too large to index, non-finite field or moment, and any
    /// temperature that is not a finite positive number. An empty temperature
    /// list and `attempts == 0` are accepted.
    pub fn new(
        lattice_size: usize,
        attempts: u64,
        hamiltonian: Hamiltonian,
        temperatures: Vec<f64>,
    ) -> Result<Self, IsingError> {
        checked_sites(lattice_size)?;
        for (name, value) in [("field", hamiltonian.field), ("moment", hamiltonian.moment)] {
            if !value.is_finite() {
                return Err(IsingError::Config(
                    ErrorInfo::new(format!("{name}-not-finite"), format!("{name} must be finite"))
                        .with_context(name, value.to_string()),
                ));
            }
        }
        for (index, &temperature) in temperatures.iter().enumerate() {
            if !temperature.is_finite() {
                return Err(IsingError::Config(
                    ErrorInfo::new("temperature-not-finite", "temperatures must be finite")
                        .with_context("index", index.to_string())
                        .with_context("value", temperature.to_string()),
                ));
            }
            if temperature <= 0.0 {
                return Err(IsingError::Config(
                    ErrorInfo::new("temperature-not-positive", "temperatures must be > 0")
                        .with_context("index", index.to_string())
                        .with_context("value", temperature.to_string())
                        .with_hint("the acceptance rule and specific heat both divide by T"),
                ));
            }
        }
        Ok(Self {
            lattice_size,
            attempts,
            hamiltonian,
            temperatures,
        })
    }

    /// Side length `L`.
    pub fn lattice_size(&self) -> usize {
        self.lattice_size
    }

    /// Update attempts per sweep, `n`.
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    /// Field strength and moment.
    pub fn hamiltonian(&self) -> &Hamiltonian {
        &self.hamiltonian
    }

    /// Temperatures in visiting order.
    pub fn temperatures(&self) -> &[f64] {
        &self.temperatures
    }
}
