use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use ising_core::errors::ErrorInfo;
use ising_core::{IsingError, RunProvenance, SchemaVersion};
use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{OutputConfig, RunConfig, SimulationParameters};
use crate::determinism;
use crate::energy::Hamiltonian;
use crate::hash;
use crate::lattice::Lattice;
use crate::manifest::RunManifest;
use crate::metrics::MetricsRecorder;
use crate::observables::{measure, ObservableSample};
use crate::sweep::sweep;

/// Summary returned to callers after a temperature sweep completes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunSummary {
    /// Side length `L` of the lattice.
    pub lattice_size: usize,
    /// Update attempts per sweep and measurement samples per temperature.
    pub attempts_per_sweep: u64,
    /// Field and moment used throughout the run.
    pub hamiltonian: Hamiltonian,
    /// Master seed the run was derived from.
    pub master_seed: u64,
    /// One sample per temperature, in visiting order.
    pub samples: Vec<ObservableSample>,
    /// Canonical hash of the lattice after the last temperature.
    pub final_lattice_hash: String,
    /// Observables CSV written during the run.
    pub observables_path: Option<PathBuf>,
    /// Summary JSON written during the run.
    pub summary_path: Option<PathBuf>,
    /// Manifest path, if emitted.
    pub manifest_path: Option<PathBuf>,
}

impl RunSummary {
    /// Temperatures in visiting order.
    pub fn temperatures(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.temperature).collect()
    }

    /// Mean energy per site at each temperature.
    pub fn energies(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.energy).collect()
    }

    /// Mean absolute magnetization per site at each temperature.
    pub fn magnetizations(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.magnetization).collect()
    }

    /// Specific heat at each temperature.
    pub fn heat_capacities(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.specific_heat).collect()
    }

    /// Magnetic susceptibility at each temperature.
    pub fn susceptibilities(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.susceptibility).collect()
    }

    /// `(energies, magnetizations, heat_capacities)`, index-aligned with the temperatures.
    pub fn series(&self) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        (self.energies(), self.magnetizations(), self.heat_capacities())
    }
}

/// Runs the sweep from a uniformly random lattice drawn from `seed`.
pub fn run(params: &SimulationParameters, seed: u64) -> Result<RunSummary, IsingError> {
    let mut lattice_rng = determinism::lattice_rng(seed);
    let lattice = Lattice::random(params.lattice_size(), &mut lattice_rng)?;
    drive(params, seed, lattice)
}

/// Runs a fully configured sweep and writes its artefacts when
/// `config.output.run_directory` is set.
pub fn run_config(config: &RunConfig) -> Result<RunSummary, IsingError> {
    let params = config.parameters()?;
    let seed = config.seed_policy.master_seed;
    let mut lattice_rng = determinism::lattice_rng(seed);
    let lattice = config
        .initial_state
        .build(params.lattice_size(), &mut lattice_rng)?;

    let started = Instant::now();
    let mut summary = drive(&params, seed, lattice)?;
    let elapsed_seconds = started.elapsed().as_secs_f64();

    if let Some(layout) = ResolvedOutput::resolve(&config.output) {
        write_artefacts(config, &layout, &mut summary, elapsed_seconds)?;
    }
    Ok(summary)
}

/// Drives `lattice` through every temperature of `params` with `rng`.
///
/// At each temperature the lattice receives one equilibration sweep of
/// `n` attempts followed by `n` measurement samples. The lattice is never
/// reset, so each temperature starts from the state the previous one left.
pub fn run_with_lattice<R: Rng + ?Sized>(
    params: &SimulationParameters,
    lattice: &mut Lattice,
    rng: &mut R,
) -> Result<Vec<ObservableSample>, IsingError> {
    if lattice.size() != params.lattice_size() {
        return Err(IsingError::Config(
            ErrorInfo::new("lattice-size-mismatch", "lattice does not match the parameters")
                .with_context("expected", params.lattice_size().to_string())
                .with_context("actual", lattice.size().to_string()),
        ));
    }
    let attempts = params.attempts();
    let hamiltonian = params.hamiltonian();
    let mut recorder = MetricsRecorder::new();
    for &temperature in params.temperatures() {
        let equilibration = sweep(lattice, temperature, attempts, hamiltonian, rng);
        let sample = measure(lattice, temperature, attempts, hamiltonian, rng);
        debug!(
            "T={temperature:.4} E={:.6} M={:.6} CV={:.6} chi={:.6} eq_acc={:.4} acc={:.4}",
            sample.energy,
            sample.magnetization,
            sample.specific_heat,
            sample.susceptibility,
            equilibration.acceptance_rate(),
            sample.acceptance_rate
        );
        recorder.push(sample);
    }
    Ok(recorder.into_samples())
}

/// Convenience entry point returning `(energies, magnetizations, heat_capacities)`.
pub fn simulate(
    lattice_size: usize,
    attempts: u64,
    temperatures: &[f64],
    field: f64,
    moment: f64,
    seed: u64,
) -> Result<(Vec<f64>, Vec<f64>, Vec<f64>), IsingError> {
    let params = SimulationParameters::new(
        lattice_size,
        attempts,
        Hamiltonian::new(field, moment),
        temperatures.to_vec(),
    )?;
    Ok(run(&params, seed)?.series())
}

fn drive(
    params: &SimulationParameters,
    seed: u64,
    mut lattice: Lattice,
) -> Result<RunSummary, IsingError> {
    info!(
        "starting sweep: L={} attempts={} temperatures={} B={} mu={} seed={seed}",
        params.lattice_size(),
        params.attempts(),
        params.temperatures().len(),
        params.hamiltonian().field,
        params.hamiltonian().moment
    );
    let started = Instant::now();
    let mut rng = determinism::dynamics_rng(seed);
    let samples = run_with_lattice(params, &mut lattice, &mut rng)?;
    info!(
        "sweep finished in {:.3}s over {} temperatures",
        started.elapsed().as_secs_f64(),
        samples.len()
    );
    Ok(RunSummary {
        lattice_size: params.lattice_size(),
        attempts_per_sweep: params.attempts(),
        hamiltonian: *params.hamiltonian(),
        master_seed: seed,
        samples,
        final_lattice_hash: hash::lattice_hash(&lattice),
        observables_path: None,
        summary_path: None,
        manifest_path: None,
    })
}

struct ResolvedOutput {
    run_directory: PathBuf,
    observables_file: PathBuf,
    summary_file: PathBuf,
    manifest_file: PathBuf,
}

impl ResolvedOutput {
    fn resolve(config: &OutputConfig) -> Option<Self> {
        config.run_directory.as_ref().map(|dir| Self {
            run_directory: dir.clone(),
            observables_file: config.observables_file.clone(),
            summary_file: config.summary_file.clone(),
            manifest_file: config.manifest_file.clone(),
        })
    }
}

fn write_artefacts(
    config: &RunConfig,
    layout: &ResolvedOutput,
    summary: &mut RunSummary,
    elapsed_seconds: f64,
) -> Result<(), IsingError> {
    let run_dir = &layout.run_directory;
    fs::create_dir_all(run_dir)
        .map_err(|err| IsingError::io("run-dir-create", &err, run_dir.display()))?;

    let observables_path = run_dir.join(&layout.observables_file);
    let summary_path = run_dir.join(&layout.summary_file);
    let manifest_path = run_dir.join(&layout.manifest_file);
    summary.observables_path = Some(observables_path.clone());
    summary.summary_path = Some(summary_path.clone());
    summary.manifest_path = Some(manifest_path.clone());

    let mut recorder = MetricsRecorder::new();
    for sample in &summary.samples {
        recorder.push(*sample);
    }
    recorder
        .write_csv(&observables_path)
        .map_err(|err| IsingError::io("observables-write", &err, observables_path.display()))?;

    write_summary(summary, &summary_path)?;

    let manifest = RunManifest {
        schema_version: SchemaVersion::default(),
        config: config.clone(),
        provenance: provenance(summary.master_seed),
        seed_label: config.seed_policy.label.clone(),
        config_hash: hash::config_hash(config)?,
        final_lattice_hash: summary.final_lattice_hash.clone(),
        observables_file: relative_to(run_dir, &observables_path),
        summary_file: relative_to(run_dir, &summary_path),
        elapsed_seconds,
    };
    manifest.write(&manifest_path)?;
    info!("artefacts written to {}", run_dir.display());
    Ok(())
}

fn write_summary(summary: &RunSummary, path: &Path) -> Result<(), IsingError> {
    let json = serde_json::to_string_pretty(summary).map_err(|err| {
        IsingError::Serde(
            ErrorInfo::new("summary-serialize", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    fs::write(path, json).map_err(|err| IsingError::io("summary-write", &err, path.display()))
}

fn provenance(seed: u64) -> RunProvenance {
    let mut tool_versions = BTreeMap::new();
    tool_versions.insert(
        env!("CARGO_PKG_NAME").to_string(),
        env!("CARGO_PKG_VERSION").to_string(),
    );
    RunProvenance {
        seed,
        lattice_seed: determinism::lattice_seed(seed),
        dynamics_seed: determinism::dynamics_seed(seed),
        created_at: chrono::Utc::now().to_rfc3339(),
        tool_versions,
    }
}

fn relative_to(root: &Path, path: &Path) -> Option<PathBuf> {
    path.strip_prefix(root).ok().map(Path::to_path_buf)
}
