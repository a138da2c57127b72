use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::acceptance::metropolis_accept;
use crate::energy::{energy_delta, DeltaTerms, Hamiltonian};
use crate::lattice::Lattice;

/// Proposal bookkeeping for one or more sweeps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepStats {
    /// Number of single-spin flips attempted.
    pub proposed: u64,
    /// Number of attempts that passed the Metropolis test.
    pub accepted: u64,
}

impl SweepStats {
    /// Fraction of accepted proposals, `0` when nothing was proposed.
    pub fn acceptance_rate(&self) -> f64 {
        if self.proposed == 0 {
            0.0
        } else {
            self.accepted as f64 / self.proposed as f64
        }
    }

    /// Adds another tally into this one.
    pub fn absorb(&mut self, other: SweepStats) {
        self.proposed += other.proposed;
        self.accepted += other.accepted;
    }
}

/// Performs `attempts` random-site Metropolis updates at `temperature`.
///
/// Each attempt draws a row and a column independently and uniformly from
/// `[0, L)`, so sites are chosen with replacement and a call is not
/// guaranteed to visit every site.
pub fn sweep<R: Rng + ?Sized>(
    lattice: &mut Lattice,
    temperature: f64,
    attempts: u64,
    hamiltonian: &Hamiltonian,
    rng: &mut R,
) -> SweepStats {
    let l = lattice.size();
    let mut stats = SweepStats::default();
    for _ in 0..attempts {
        let row = rng.gen_range(0..l);
        let col = rng.gen_range(0..l);
        let delta = energy_delta(lattice, row, col, hamiltonian, DeltaTerms::ALL);
        stats.proposed += 1;
        if metropolis_accept(delta, temperature, rng) {
            lattice.flip(row, col);
            stats.accepted += 1;
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use ising_core::RngHandle;

    #[test]
    fn zero_attempts_leave_lattice_untouched() {
        let mut rng = RngHandle::from_seed(5);
        let mut lattice = Lattice::random(6, &mut rng).unwrap();
        let before = lattice.clone();
        let stats = sweep(&mut lattice, 1.0, 0, &Hamiltonian::zero_field(), &mut rng);
        assert_eq!(lattice, before);
        assert_eq!(stats, SweepStats::default());
        assert_eq!(stats.acceptance_rate(), 0.0);
    }

    #[test]
    fn cold_aligned_lattice_rejects_every_flip() {
        let mut rng = RngHandle::from_seed(11);
        let mut lattice = Lattice::uniform(8, 1).unwrap();
        // exp(-8 / 0.05) is far below the 2^-53 resolution of a uniform draw.
        let stats = sweep(&mut lattice, 0.05, 10_000, &Hamiltonian::zero_field(), &mut rng);
        assert_eq!(stats.proposed, 10_000);
        assert_eq!(stats.accepted, 0);
        assert_eq!(lattice, Lattice::uniform(8, 1).unwrap());
    }

    #[test]
    fn accepted_count_matches_changed_sites_for_single_attempts() {
        let mut rng = RngHandle::from_seed(99);
        let mut lattice = Lattice::random(5, &mut rng).unwrap();
        let h = Hamiltonian::new(0.3, 1.0);
        for _ in 0..500 {
            let before = lattice.clone();
            let stats = sweep(&mut lattice, 2.5, 1, &h, &mut rng);
            let changed = before
                .spins()
                .iter()
                .zip(lattice.spins())
                .filter(|(a, b)| a != b)
                .count() as u64;
            assert_eq!(changed, stats.accepted);
        }
    }

    #[test]
    fn stats_absorb_sums_counts() {
        let mut total = SweepStats {
            proposed: 4,
            accepted: 1,
        };
        total.absorb(SweepStats {
            proposed: 6,
            accepted: 4,
        });
        assert_eq!(total.proposed, 10);
        assert!((total.acceptance_rate() - 0.5).abs() < 1e-12);
    }
}
