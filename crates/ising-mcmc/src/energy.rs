use serde::{Deserialize, Serialize};

use crate::lattice::Lattice;

/// Field coupling of the Hamiltonian `H = -Σ<ij> s_i s_j - µ B Σ s_i`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hamiltonian {
    /// External magnetic field strength `B`.
    pub field: f64,
    /// Magnetic moment `µ` of each spin.
    pub moment: f64,
}

impl Hamiltonian {
    /// Creates a Hamiltonian for the given field and moment.
    pub const fn new(field: f64, moment: f64) -> Self {
        Self { field, moment }
    }

    /// Zero external field.
    pub const fn zero_field() -> Self {
        Self::new(0.0, 1.0)
    }

    /// Product `µ·B`.
    #[inline]
    pub fn zeeman(&self) -> f64 {
        self.moment * self.field
    }
}

/// Which terms of the flip energy change [`energy_delta`] evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaTerms {
    /// Include the nearest-neighbour interaction `2·s·(t+b+l+r)`.
    pub interaction: bool,
    /// Include the field contribution `2·µ·B·s`.
    pub field: bool,
}

impl DeltaTerms {
    /// Both terms; the change actually produced by a flip.
    pub const ALL: Self = Self {
        interaction: true,
        field: true,
    };
    /// Neighbour interaction only, used when summing bond energies.
    pub const INTERACTION: Self = Self {
        interaction: true,
        field: false,
    };
    /// Field contribution only.
    pub const FIELD: Self = Self {
        interaction: false,
        field: true,
    };
}

impl Default for DeltaTerms {
    fn default() -> Self {
        Self::ALL
    }
}

/// Energy change that flipping `(row, col)` would produce, without flipping it.
///
/// `Δ = 2·s·(t+b+l+r) + 2·µ·B·s`, restricted to the requested `terms`.
#[inline]
pub fn energy_delta(
    lattice: &Lattice,
    row: usize,
    col: usize,
    hamiltonian: &Hamiltonian,
    terms: DeltaTerms,
) -> f64 {
    let spin = lattice.get(row, col) as f64;
    let mut delta = 0.0;
    if terms.interaction {
        let [top, bottom, left, right] = lattice.neighbors(row, col);
        let neighbor_sum = (top + bottom + left + right) as f64;
        delta += 2.0 * spin * neighbor_sum;
    }
    if terms.field {
        delta += 2.0 * hamiltonian.zeeman() * spin;
    }
    delta
}

/// Total energy per site: `(Σ −Δ_interaction(i,j)/2 − µ·B·s(i,j)) / L²`.
pub fn total_energy_per_site(lattice: &Lattice, hamiltonian: &Hamiltonian) -> f64 {
    let l = lattice.size();
    let mut interaction = 0.0;
    for row in 0..l {
        for col in 0..l {
            interaction -= energy_delta(lattice, row, col, hamiltonian, DeltaTerms::INTERACTION) / 2.0;
        }
    }
    let field = hamiltonian.zeeman() * lattice.spin_sum() as f64;
    (interaction - field) / lattice.num_sites() as f64
}

/// Absolute magnetization per site, `|Σ s| / L²`, always in `[0, 1]`.
pub fn magnetization_per_site(lattice: &Lattice) -> f64 {
    lattice.spin_sum().unsigned_abs() as f64 / lattice.num_sites() as f64
}
