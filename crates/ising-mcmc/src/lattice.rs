use ising_core::errors::ErrorInfo;
use ising_core::IsingError;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Smallest side length for which the four neighbours of a site are not the site itself.
pub const MIN_LATTICE_SIZE: usize = 2;

/// Square `L x L` grid of Ising spins with periodic (toroidal) boundaries.
///
/// Spins are stored row-major as `i8` values that are always exactly `+1` or
/// `-1`. The side length is fixed at construction; the only mutation is
/// [`Lattice::flip`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lattice {
    size: usize,
    spins: Vec<i8>,
}

impl Lattice {
    /// Draws every spin independently and uniformly from `{+1, -1}`.
    pub fn random<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<Self, IsingError> {
        let sites = checked_sites(size)?;
        let spins = (0..sites)
            .map(|_| if rng.gen::<bool>() { 1 } else { -1 })
            .collect();
        Ok(Self { size, spins })
    }

    /// Builds a lattice with every site set to `spin` (`+1` or `-1`).
    pub fn uniform(size: usize, spin: i8) -> Result<Self, IsingError> {
        let sites = checked_sites(size)?;
        if spin != 1 && spin != -1 {
            return Err(IsingError::Config(
                ErrorInfo::new("invalid-spin", "spins must be +1 or -1")
                    .with_context("spin", spin.to_string()),
            ));
        }
        Ok(Self {
            size,
            spins: vec![spin; sites],
        })
    }

    /// Side length `L`.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of sites, `L²`.
    #[inline]
    pub fn num_sites(&self) -> usize {
        self.spins.len()
    }

    /// Spin at `(row, col)`. Both indices must already lie in `[0, L)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> i8 {
        self.spins[row * self.size + col]
    }

    /// Negates the spin at `(row, col)` in place.
    #[inline]
    pub fn flip(&mut self, row: usize, col: usize) {
        let idx = row * self.size + col;
        self.spins[idx] = -self.spins[idx];
    }

    /// Periodic neighbours of `(row, col)` ordered `[top, bottom, left, right]`.
    ///
    /// Row 0's top neighbour is row `L - 1`; column 0's left neighbour is
    /// column `L - 1`.
    #[inline]
    pub fn neighbors(&self, row: usize, col: usize) -> [i8; 4] {
        let l = self.size;
        let up = if row == 0 { l - 1 } else { row - 1 };
        let down = if row + 1 == l { 0 } else { row + 1 };
        let left = if col == 0 { l - 1 } else { col - 1 };
        let right = if col + 1 == l { 0 } else { col + 1 };
        [
            self.get(up, col),
            self.get(down, col),
            self.get(row, left),
            self.get(row, right),
        ]
    }

    /// Sum of all spins.
    pub fn spin_sum(&self) -> i64 {
        self.spins.iter().map(|&s| s as i64).sum()
    }

    /// Row-major view of the spin values.
    pub fn spins(&self) -> &[i8] {
        &self.spins
    }
}

/// Validates a side length and returns the site count `L²`.
///
/// Fails with `lattice-too-small` below [`MIN_LATTICE_SIZE`] and with
/// `lattice-too-large` when `L²` does not fit in `usize`.
pub fn checked_sites(size: usize) -> Result<usize, IsingError> {
    if size < MIN_LATTICE_SIZE {
        return Err(IsingError::Config(
            ErrorInfo::new(
                "lattice-too-small",
                "lattice side length must be at least 2",
            )
            .with_context("size", size.to_string())
            .with_hint("a 1x1 torus makes the site its own neighbour in all four directions"),
        ));
    }
    size.checked_mul(size).ok_or_else(|| {
        IsingError::Config(
            ErrorInfo::new("lattice-too-large", "lattice site count does not fit in usize")
                .with_context("size", size.to_string()),
        )
    })
}
