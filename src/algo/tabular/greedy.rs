use std::fmt;

use rand::RngCore;

use crate::{agent::BanditAgent, util::argmax_last};

/// Purely greedy sample-average agent for n-armed bandits
///
/// Each arm's value is the exact mean of the rewards it has paid, tracked incrementally:
///
/// Q<sub>n+1</sub> = Q<sub>n</sub> + (R<sub>n</sub> - Q<sub>n</sub>) / n
///
/// Counts start at 1 so the first update replaces the initial estimate of 0 with the reward.
#[derive(Debug, Clone, PartialEq)]
pub struct GreedyAgent {
    values: Vec<f64>,
    counts: Vec<u32>,
    arms: Vec<usize>,
}

impl GreedyAgent {
    pub fn new(num_actions: usize) -> Self {
        Self {
            values: vec![0.0; num_actions],
            counts: vec![1; num_actions],
            arms: (0..num_actions).collect(),
        }
    }

    pub fn num_actions(&self) -> usize {
        self.values.len()
    }

    /// Current value estimate of each arm
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Selection count of each arm, starting from 1
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    /// The arm with the highest estimate, ties going to the highest index
    ///
    /// **Panics** if the agent has no arms
    pub fn greedy(&self) -> usize {
        argmax_last(&self.arms, |a| self.values[a])
    }

    /// Fold `reward` into the running mean for `action`
    pub fn update(&mut self, action: usize, reward: f64) {
        let value = &mut self.values[action];
        *value += (reward - *value) / f64::from(self.counts[action]);
        self.counts[action] += 1;
    }
}

impl BanditAgent for GreedyAgent {
    fn act(&self, _rng: &mut dyn RngCore) -> usize {
        self.greedy()
    }

    fn learn(&mut self, action: usize, reward: f64) {
        self.update(action, reward);
    }
}

impl fmt::Display for GreedyAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("GreedyAgent")
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use statrs::statistics::Statistics;

    use crate::{env::Environment, gym::Bandit};

    use super::*;

    #[test]
    fn fresh_agent_picks_last_arm() {
        let agent = GreedyAgent::new(4);
        assert_eq!(agent.values(), [0.0; 4]);
        assert_eq!(agent.counts(), [1; 4]);
        assert_eq!(agent.greedy(), 3, "All zero estimates tie, highest index wins");
    }

    #[test]
    fn greedy_maximises_with_right_biased_ties() {
        let mut agent = GreedyAgent::new(5);
        agent.update(0, 2.0);
        agent.update(2, 2.0);
        agent.update(4, -1.0);
        assert_eq!(agent.greedy(), 2, "Later of two equal maxima");
        agent.update(1, 3.0);
        assert_eq!(agent.greedy(), 1);
    }

    #[test]
    fn estimate_is_exact_sample_mean() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut agent = GreedyAgent::new(2);
        let rewards: Vec<f64> = (0..57).map(|_| rng.gen_range(-3.0..5.0)).collect();
        for &r in &rewards {
            agent.update(1, r);
        }
        let mean = rewards.iter().mean();
        assert!((agent.values()[1] - mean).abs() < 1e-12, "Sample average, not EMA");
        assert_eq!(agent.counts()[1], 58);
        assert_eq!(agent.values()[0], 0.0, "Other arms untouched");
    }

    #[test]
    fn constant_reward_is_tracked_exactly() {
        let mut agent = GreedyAgent::new(1);
        for _ in 0..10 {
            agent.update(0, 0.75);
            assert_eq!(agent.values()[0], 0.75);
        }
    }

    #[test]
    fn settles_on_better_arm_after_one_sample() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut env = Bandit::new(vec![1.0, 0.0], 0.0).unwrap();
        let mut agent = GreedyAgent::new(2);

        // With all estimates at 0 the tie goes to arm 1, whose reward of 0 keeps the tie alive,
        // so arm 0 is sampled once by hand as well
        let first = agent.act(&mut rng);
        assert_eq!(first, 1);
        for action in [first, 0] {
            let (reward, _) = env.step(action, &mut rng);
            agent.learn(action, reward);
        }

        let mut picks = Vec::with_capacity(98);
        for _ in 0..98 {
            let action = agent.act(&mut rng);
            let (reward, _) = env.step(action, &mut rng);
            agent.learn(action, reward);
            picks.push(action);
        }
        assert!(picks.iter().all(|&a| a == 0), "Arm 0 every time after arm 1 is known");
        assert_eq!(agent.values(), [1.0, 0.0]);
        assert_eq!(agent.counts(), [100, 2], "99 pulls of arm 0, 1 of arm 1");
    }

    #[test]
    fn display_name() {
        assert_eq!(GreedyAgent::new(3).to_string(), "GreedyAgent");
    }
}
