use medirust_core::MediRustError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal, Uniform};

/// Random number source owned by every random transform.
///
/// A fresh state is seeded from entropy; [`RandomState::reseed`] makes the
/// sequence of draws reproducible.
#[derive(Debug, Clone)]
pub struct RandomState {
    rng: StdRng,
}

impl RandomState {
    pub fn new() -> Self {
        RandomState {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        RandomState {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Draws a seed for a child transform.
    pub fn next_seed(&mut self) -> u64 {
        self.rng.gen()
    }

    /// Uniform sample in `[0, 1)`.
    pub fn random(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Uniform sample between `low` and `high`. The bounds may be given in
    /// either order; equal bounds return `low`.
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.random()
    }

    /// Uniform integer in `[0, n)`.
    pub fn randint(&mut self, n: usize) -> Result<usize, MediRustError> {
        if n == 0 {
            return Err(MediRustError::InvalidArgument(
                "randint upper bound must be positive".to_string(),
            ));
        }
        Ok(self.rng.gen_range(0..n))
    }

    /// `n` samples of `N(mean, std^2)`. `std` must be finite and non-negative.
    pub fn normal_vec(&mut self, n: usize, mean: f64, std: f64) -> Result<Vec<f64>, MediRustError> {
        if !(std >= 0.0) || !std.is_finite() {
            return Err(MediRustError::InvalidArgument(format!(
                "normal distribution std must be finite and non-negative, got {}",
                std
            )));
        }
        let normal = Normal::new(mean, std).map_err(|e| {
            MediRustError::InvalidArgument(format!("normal distribution N({}, {}): {}", mean, std, e))
        })?;
        Ok((0..n).map(|_| normal.sample(&mut self.rng)).collect())
    }

    /// `n` samples of `U(low, high)`.
    pub fn uniform_vec(&mut self, n: usize, low: f64, high: f64) -> Vec<f64> {
        if low >= high {
            return vec![low; n];
        }
        let uniform = Uniform::new(low, high);
        (0..n).map(|_| uniform.sample(&mut self.rng)).collect()
    }

    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}

impl Default for RandomState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_draws() {
        let mut a = RandomState::from_seed(42);
        let mut b = RandomState::from_seed(42);
        for _ in 0..5 {
            assert_eq!(a.random(), b.random());
        }
        assert_eq!(a.uniform_vec(4, -1.0, 1.0), b.uniform_vec(4, -1.0, 1.0));
    }

    #[test]
    fn test_reseed_restarts_sequence() {
        let mut state = RandomState::from_seed(7);
        let first = state.random();
        state.reseed(7);
        assert_eq!(state.random(), first);
    }

    #[test]
    fn test_ranges() -> Result<(), MediRustError> {
        let mut state = RandomState::from_seed(0);
        for _ in 0..100 {
            let r = state.random();
            assert!((0.0..1.0).contains(&r));
            let u = state.uniform(-2.0, 3.0);
            assert!((-2.0..3.0).contains(&u));
            assert!(state.randint(3)? < 3);
        }
        assert_eq!(state.uniform(1.5, 1.5), 1.5);
        assert!(state.randint(0).is_err());
        Ok(())
    }

    #[test]
    fn test_normal_vec() -> Result<(), MediRustError> {
        let mut state = RandomState::from_seed(3);
        let samples = state.normal_vec(2000, 5.0, 0.5)?;
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        assert!((mean - 5.0).abs() < 0.1);
        assert!(state.normal_vec(3, 0.0, -1.0).is_err());
        assert!(state.normal_vec(3, 0.0, f64::NAN).is_err());
        assert!(state.normal_vec(3, 0.0, f64::INFINITY).is_err());
        assert_eq!(state.normal_vec(2, 1.5, 0.0)?, vec![1.5, 1.5]);
        Ok(())
    }

    #[test]
    fn test_uniform_vec_degenerate_range() {
        let mut state = RandomState::from_seed(1);
        assert_eq!(state.uniform_vec(3, 2.0, 2.0), vec![2.0; 3]);
    }
}
