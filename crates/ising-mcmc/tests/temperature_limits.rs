use ising_core::RngHandle;
use ising_mcmc::{run_with_lattice, Hamiltonian, Lattice, SimulationParameters};

#[test]
fn cold_ordered_lattice_stays_magnetized() {
    let size = 8;
    let params = SimulationParameters::new(
        size,
        200 * (size * size) as u64,
        Hamiltonian::zero_field(),
        vec![0.5],
    )
    .unwrap();
    let mut lattice = Lattice::uniform(size, 1).unwrap();
    let mut rng = RngHandle::from_seed(5);
    let samples = run_with_lattice(&params, &mut lattice, &mut rng).unwrap();
    assert!(samples[0].magnetization > 0.99, "{:?}", samples[0]);
    assert!(samples[0].energy < -3.9, "{:?}", samples[0]);
}

#[test]
fn hot_lattice_loses_magnetization() {
    let size = 16;
    let params = SimulationParameters::new(
        size,
        200 * (size * size) as u64,
        Hamiltonian::zero_field(),
        vec![50.0],
    )
    .unwrap();
    let mut lattice = Lattice::uniform(size, 1).unwrap();
    let mut rng = RngHandle::from_seed(6);
    let samples = run_with_lattice(&params, &mut lattice, &mut rng).unwrap();
    assert!(samples[0].magnetization < 0.15, "{:?}", samples[0]);
    assert!(samples[0].energy.abs() < 0.5, "{:?}", samples[0]);
}

#[test]
fn magnetization_decreases_across_the_transition() {
    let size = 10;
    let params = SimulationParameters::new(
        size,
        300 * (size * size) as u64,
        Hamiltonian::zero_field(),
        vec![1.0, 5.0],
    )
    .unwrap();
    let mut lattice = Lattice::uniform(size, 1).unwrap();
    let mut rng = RngHandle::from_seed(12);
    let samples = run_with_lattice(&params, &mut lattice, &mut rng).unwrap();
    assert!(samples[0].magnetization > samples[1].magnetization);
    assert!(samples[0].energy < samples[1].energy);
}
