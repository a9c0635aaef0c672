use std::fmt;

use rand::Rng;
use rand_distr::{Distribution, Normal, NormalError, StandardNormal};

use crate::env::Environment;

/// N-armed bandit environment
///
/// Each arm pays its true mean reward plus independent Gaussian noise with a shared standard
/// deviation. The bandit has no state: it is queried repeatedly and never terminates.
#[derive(Debug, Clone)]
pub struct Bandit {
    means: Vec<f64>,
    noise_std: f64,
    noise: Normal<f64>,
}

impl Bandit {
    /// Initialize a bandit from the true mean reward of each arm
    ///
    /// Fails if `noise_std` is negative or not finite
    pub fn new(means: Vec<f64>, noise_std: f64) -> Result<Self, NormalError> {
        // `Normal` only rejects non-finite spreads
        if noise_std.is_nan() || noise_std < 0.0 {
            return Err(NormalError::BadVariance);
        }
        Ok(Self {
            means,
            noise_std,
            noise: Normal::new(0.0, noise_std)?,
        })
    }

    /// Initialize a `k`-armed bandit whose true means are drawn from N(0, 1)
    pub fn sample<R: Rng + ?Sized>(
        k: usize,
        noise_std: f64,
        rng: &mut R,
    ) -> Result<Self, NormalError> {
        let means = (0..k).map(|_| StandardNormal.sample(rng)).collect();
        Self::new(means, noise_std)
    }

    pub fn means(&self) -> &[f64] {
        &self.means
    }

    pub fn noise_std(&self) -> f64 {
        self.noise_std
    }

    /// Index of the arm with the highest true mean
    pub fn optimal_arm(&self) -> Option<usize> {
        self.means
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(i, _)| i)
    }
}

impl Environment for Bandit {
    type Action = usize;

    fn actions(&self) -> Vec<Self::Action> {
        (0..self.means.len()).collect()
    }

    /// **Panics** if `action` is not an arm index
    fn step<R: Rng + ?Sized>(&mut self, action: Self::Action, rng: &mut R) -> (f64, bool) {
        assert!(action < self.means.len(), "Invalid action: {}", action);
        (self.means[action] + self.noise.sample(rng), false)
    }
}

impl fmt::Display for Bandit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bandit({:?}, noise_std={})", self.means, self.noise_std())
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};
    use statrs::statistics::Statistics;

    use super::*;

    #[test]
    fn bandit_functional() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut env = Bandit::sample(3, 1.0, &mut rng).unwrap();
        assert_eq!(env.actions(), vec![0, 1, 2], "Actions are correct");
        assert_eq!(env.means().len(), 3);

        let (reward, terminal) = env.step(2, &mut rng);
        assert!(reward.is_finite(), "Reward is finite");
        assert!(!terminal, "Bandit never terminates");
    }

    #[test]
    fn noiseless_arm_pays_its_mean() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut env = Bandit::new(vec![1.0, 0.0], 0.0).unwrap();
        for _ in 0..10 {
            assert_eq!(env.step(0, &mut rng), (1.0, false));
            assert_eq!(env.step(1, &mut rng), (0.0, false));
        }
    }

    #[test]
    fn noise_has_configured_spread() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut env = Bandit::new(vec![0.5], 2.0).unwrap();
        let rewards: Vec<f64> = (0..20_000).map(|_| env.step(0, &mut rng).0).collect();
        let mean = rewards.iter().mean();
        let std_dev = rewards.iter().std_dev();
        assert!((mean - 0.5).abs() < 0.05, "Sample mean {mean} near 0.5");
        assert!((std_dev - 2.0).abs() < 0.05, "Sample std {std_dev} near 2.0");
    }

    #[test]
    fn negative_noise_is_rejected() {
        assert!(Bandit::new(vec![0.0], -1.0).is_err());
        assert!(matches!(
            Bandit::new(vec![0.0], -1e-9),
            Err(NormalError::BadVariance)
        ));
        assert!(Bandit::new(vec![0.0], f64::NAN).is_err(), "NaN spread");
        assert!(Bandit::new(vec![0.0], f64::INFINITY).is_err(), "Infinite spread");
        let mut rng = StdRng::seed_from_u64(0);
        assert!(Bandit::sample(3, -0.5, &mut rng).is_err());
    }

    #[test]
    #[should_panic(expected = "Invalid action")]
    fn out_of_range_arm_panics() {
        let mut env = Bandit::new(vec![0.0, 1.0], 0.0).unwrap();
        env.step(2, &mut StdRng::seed_from_u64(0));
    }

    #[test]
    fn display_and_optimal_arm() {
        let env = Bandit::new(vec![0.25, 1.5, -1.0], 1.0).unwrap();
        assert_eq!(env.optimal_arm(), Some(1));
        assert_eq!(env.to_string(), "Bandit([0.25, 1.5, -1.0], noise_std=1)");
    }
}
