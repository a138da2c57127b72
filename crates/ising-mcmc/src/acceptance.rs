use rand::Rng;

/// Metropolis acceptance probability `min(1, exp(-Δ/T))`.
#[inline]
pub fn acceptance_probability(delta: f64, temperature: f64) -> f64 {
    if delta <= 0.0 {
        1.0
    } else {
        (-delta / temperature).exp()
    }
}

/// Metropolis test for an energy change `delta` at `temperature`.
///
/// Moves with `delta <= 0` are accepted without consuming a random draw;
/// otherwise a uniform `[0, 1)` draw is compared against `exp(-Δ/T)`.
/// `temperature` must be strictly positive.
#[inline]
pub fn metropolis_accept<R: Rng + ?Sized>(delta: f64, temperature: f64, rng: &mut R) -> bool {
    if delta <= 0.0 {
        return true;
    }
    rng.gen::<f64>() < (-delta / temperature).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ising_core::RngHandle;
    use rand::RngCore;

    #[test]
    fn non_positive_delta_is_free() {
        let mut rng = RngHandle::from_seed(1);
        let mut untouched = rng.clone();
        assert!(metropolis_accept(0.0, 1.0, &mut rng));
        assert!(metropolis_accept(-4.0, 0.01, &mut rng));
        assert_eq!(rng.next_u64(), untouched.next_u64());
    }

    #[test]
    fn probability_matches_boltzmann_factor() {
        assert_eq!(acceptance_probability(-8.0, 1.0), 1.0);
        assert!((acceptance_probability(8.0, 1.0) - 0.000_335_462_6).abs() < 1e-9);
        assert!((acceptance_probability(4.0, 2.0) - (-2.0f64).exp()).abs() < 1e-15);
    }

    #[test]
    fn probability_increases_with_temperature() {
        let temps = [0.5, 1.0, 1.5, 2.269, 3.0, 10.0, 100.0];
        for delta in [0.5, 4.0, 8.0] {
            for pair in temps.windows(2) {
                assert!(acceptance_probability(delta, pair[0]) < acceptance_probability(delta, pair[1]));
            }
        }
    }

    #[test]
    fn empirical_rate_tracks_probability() {
        let mut rng = RngHandle::from_seed(2024);
        let trials = 200_000;
        let accepted = (0..trials)
            .filter(|_| metropolis_accept(4.0, 2.0, &mut rng))
            .count();
        let rate = accepted as f64 / trials as f64;
        assert!((rate - (-2.0f64).exp()).abs() < 0.005, "rate {rate}");
    }
}
