use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::energy::{magnetization_per_site, total_energy_per_site, Hamiltonian};
use crate::lattice::Lattice;
use crate::sweep::{sweep, SweepStats};

/// Thermodynamic observables measured at a single temperature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObservableSample {
    /// Temperature at which the sample was measured.
    pub temperature: f64,
    /// Mean energy per site.
    pub energy: f64,
    /// Mean absolute magnetization per site.
    pub magnetization: f64,
    /// `(⟨E²⟩ − ⟨E⟩²) / T²`.
    pub specific_heat: f64,
    /// `(⟨M²⟩ − ⟨M⟩²) / T`.
    pub susceptibility: f64,
    /// Fraction of measurement-phase proposals that were accepted.
    pub acceptance_rate: f64,
}

/// Running first and second moments of energy and magnetization.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunningMoments {
    count: u64,
    sum_e: f64,
    sum_e2: f64,
    sum_m: f64,
    sum_m2: f64,
}

impl RunningMoments {
    /// Empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one `(energy, magnetization)` observation.
    #[inline]
    pub fn push(&mut self, energy: f64, magnetization: f64) {
        self.count += 1;
        self.sum_e += energy;
        self.sum_e2 += energy * energy;
        self.sum_m += magnetization;
        self.sum_m2 += magnetization * magnetization;
    }

    /// Number of observations recorded.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Sample mean of the energy.
    pub fn mean_energy(&self) -> f64 {
        self.sum_e / self.count as f64
    }

    /// Sample mean of the magnetization.
    pub fn mean_magnetization(&self) -> f64 {
        self.sum_m / self.count as f64
    }

    /// `⟨E²⟩ − ⟨E⟩²`.
    pub fn energy_variance(&self) -> f64 {
        let mean = self.mean_energy();
        (self.sum_e2 / self.count as f64 - mean * mean).max(0.0)
    }

    /// `⟨M²⟩ − ⟨M⟩²`.
    pub fn magnetization_variance(&self) -> f64 {
        let mean = self.mean_magnetization();
        (self.sum_m2 / self.count as f64 - mean * mean).max(0.0)
    }

    /// Turns the accumulated moments into the sample for `temperature`.
    pub fn finish(&self, temperature: f64, stats: SweepStats) -> ObservableSample {
        ObservableSample {
            temperature,
            energy: self.mean_energy(),
            magnetization: self.mean_magnetization(),
            specific_heat: self.energy_variance() / (temperature * temperature),
            susceptibility: self.magnetization_variance() / temperature,
            acceptance_rate: stats.acceptance_rate(),
        }
    }
}

/// Measurement phase at one temperature.
///
/// Runs `samples` iterations of one single-attempt sweep followed by a read
/// of the energy and magnetization, so the lattice keeps evolving between
/// observations. With `samples == 0` the lattice is read once as it stands,
/// which reports its entry state with zero variance.
pub fn measure<R: Rng + ?Sized>(
    lattice: &mut Lattice,
    temperature: f64,
    samples: u64,
    hamiltonian: &Hamiltonian,
    rng: &mut R,
) -> ObservableSample {
    let mut moments = RunningMoments::new();
    let mut stats = SweepStats::default();
    for _ in 0..samples {
        stats.absorb(sweep(lattice, temperature, 1, hamiltonian, rng));
        moments.push(
            total_energy_per_site(lattice, hamiltonian),
            magnetization_per_site(lattice),
        );
    }
    if moments.count() == 0 {
        moments.push(
            total_energy_per_site(lattice, hamiltonian),
            magnetization_per_site(lattice),
        );
    }
    moments.finish(temperature, stats)
}
