use std::fmt;

use rand::{Rng, RngCore};

use crate::{
    agent::BanditAgent,
    assert_interval,
    decay::{self, Decay},
    exploration::{Choice, EpsilonGreedy},
};

use super::GreedyAgent;

/// A [`GreedyAgent`] that explores a uniformly random arm with probability epsilon
///
/// Epsilon comes from a [`Decay`] schedule evaluated at the number of learning updates made so
/// far. [`EpsilonGreedyAgent::new`] uses a [`Constant`](decay::Constant) schedule.
#[derive(Debug, Clone)]
pub struct EpsilonGreedyAgent<D: Decay = decay::Constant> {
    greedy: GreedyAgent,
    exploration: EpsilonGreedy<D>,
    t: u32,
}

impl EpsilonGreedyAgent {
    /// Initialize an agent with a fixed exploration probability
    ///
    /// **Panics** if `epsilon` is not in the interval `[0,1]`
    pub fn new(num_actions: usize, epsilon: f64) -> Self {
        assert_interval!(epsilon, 0.0, 1.0);
        Self::with_decay(num_actions, decay::Constant::new(epsilon))
    }
}

impl<D: Decay> EpsilonGreedyAgent<D> {
    /// Initialize an agent whose exploration probability follows `decay`
    pub fn with_decay(num_actions: usize, decay: D) -> Self {
        Self {
            greedy: GreedyAgent::new(num_actions),
            exploration: EpsilonGreedy::new(decay),
            t: 0,
        }
    }

    /// The exploration probability for the next decision
    pub fn epsilon(&self) -> f64 {
        self.exploration.epsilon(self.t as f64)
    }

    /// The wrapped sample-average estimator
    pub fn greedy(&self) -> &GreedyAgent {
        &self.greedy
    }
}

impl<D: Decay> BanditAgent for EpsilonGreedyAgent<D> {
    fn act(&self, rng: &mut dyn RngCore) -> usize {
        match self.exploration.choose(self.t as f64, rng) {
            Choice::Explore => rng.gen_range(0..self.greedy.num_actions()),
            Choice::Exploit => self.greedy.greedy(),
        }
    }

    fn learn(&mut self, action: usize, reward: f64) {
        self.greedy.update(action, reward);
        self.t += 1;
    }
}

impl<D: Decay> fmt::Display for EpsilonGreedyAgent<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EpsilonGreedyAgent(epsilon={:.6})", self.epsilon())
    }
}
