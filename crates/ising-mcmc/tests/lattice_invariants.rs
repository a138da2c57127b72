use ising_core::RngHandle;
use ising_mcmc::{
    magnetization_per_site, sweep, total_energy_per_site, Hamiltonian, Lattice,
};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn sweeps_preserve_spin_values(
        size in 2usize..9,
        seed in any::<u64>(),
        temperature in 0.1f64..10.0,
        field in -1.0f64..1.0,
        attempts in 0u64..500,
    ) {
        let mut rng = RngHandle::from_seed(seed);
        let mut lattice = Lattice::random(size, &mut rng).unwrap();
        let h = Hamiltonian::new(field, 1.0);
        let stats = sweep(&mut lattice, temperature, attempts, &h, &mut rng);
        prop_assert_eq!(stats.proposed, attempts);
        prop_assert!(stats.accepted <= attempts);
        prop_assert_eq!(lattice.spins().len(), size * size);
        prop_assert!(lattice.spins().iter().all(|&s| s == 1 || s == -1));
        let m = magnetization_per_site(&lattice);
        prop_assert!((0.0..=1.0).contains(&m));
        let e = total_energy_per_site(&lattice, &h);
        prop_assert!(e.is_finite());
        prop_assert!(e.abs() <= 4.0 + field.abs() + 1e-12);
    }

    #[test]
    fn double_flip_is_identity(size in 2usize..9, seed in any::<u64>(), row in 0usize..9, col in 0usize..9) {
        let mut rng = RngHandle::from_seed(seed);
        let mut lattice = Lattice::random(size, &mut rng).unwrap();
        let before = lattice.clone();
        let (row, col) = (row % size, col % size);
        lattice.flip(row, col);
        prop_assert_ne!(&lattice, &before);
        lattice.flip(row, col);
        prop_assert_eq!(lattice, before);
    }

    #[test]
    fn neighbours_wrap_periodically(size in 2usize..9, seed in any::<u64>(), row in 0usize..9, col in 0usize..9) {
        let mut rng = RngHandle::from_seed(seed);
        let lattice = Lattice::random(size, &mut rng).unwrap();
        let (row, col) = (row % size, col % size);
        let [top, bottom, left, right] = lattice.neighbors(row, col);
        prop_assert_eq!(top, lattice.get((row + size - 1) % size, col));
        prop_assert_eq!(bottom, lattice.get((row + 1) % size, col));
        prop_assert_eq!(left, lattice.get(row, (col + size - 1) % size));
        prop_assert_eq!(right, lattice.get(row, (col + 1) % size));
    }
}
