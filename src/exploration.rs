use rand::Rng;

use crate::decay::{self, Decay};

/// Exploration policy result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Explore,
    Exploit,
}

/// Epsilon greedy exploration policy driven by a [`Decay`] schedule
#[derive(Debug, Clone)]
pub struct EpsilonGreedy<D: Decay = decay::Constant> {
    epsilon: D,
}

impl<D: Decay> EpsilonGreedy<D> {
    /// Initialize epsilon greedy policy with a decay strategy
    pub fn new(decay: D) -> Self {
        Self { epsilon: decay }
    }

    /// The exploration probability at time `t`
    pub fn epsilon(&self, t: f64) -> f64 {
        self.epsilon.evaluate(t)
    }

    /// Invoke epsilon greedy policy at time `t`
    ///
    /// Explores when a uniform draw from `[0, 1)` falls below epsilon.
    pub fn choose<R: Rng + ?Sized>(&self, t: f64, rng: &mut R) -> Choice {
        if rng.gen::<f64>() < self.epsilon(t) {
            Choice::Explore
        } else {
            Choice::Exploit
        }
    }
}
