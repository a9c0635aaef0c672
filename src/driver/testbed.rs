use std::time::Instant;

use log::{debug, info};
use rand::RngCore;

use crate::{agent::BanditAgent, env::Environment, stats::LearningCurve};

/// Builds a fresh agent for an environment with the given number of actions
pub type AgentFactory = Box<dyn Fn(usize) -> Box<dyn BanditAgent>>;

/// Wrap an agent constructor as an [`AgentFactory`]
///
/// ### Example
/// ```
/// use rl_testbeds::{algo::tabular::{EpsilonGreedyAgent, GreedyAgent}, driver::testbed::factory};
///
/// let factories = vec![
///     factory(GreedyAgent::new),
///     factory(|n| EpsilonGreedyAgent::new(n, 0.1)),
/// ];
/// assert_eq!(factories[1](10).to_string(), "EpsilonGreedyAgent(epsilon=0.100000)");
/// ```
pub fn factory<A, F>(f: F) -> AgentFactory
where
    A: BanditAgent + 'static,
    F: Fn(usize) -> A + 'static,
{
    Box::new(move |n| Box::new(f(n)) as Box<dyn BanditAgent>)
}

/// Configuration for [`Testbed::evaluate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestbedConfig {
    /// Independent episodes, each with a fresh environment and fresh agents
    ///
    /// **Default**: `2000`
    pub num_episodes: usize,
    /// Steps per episode
    ///
    /// **Default**: `1000`
    pub episode_length: usize,
    /// Report the curves every this many episodes
    ///
    /// **Default**: `20`
    pub report_every: usize,
    /// Log throughput every this many episodes
    ///
    /// **Default**: `100`
    pub log_every: usize,
}

impl Default for TestbedConfig {
    fn default() -> Self {
        Self {
            num_episodes: 2000,
            episode_length: 1000,
            report_every: 20,
            log_every: 100,
        }
    }
}

/// Compares bandit agents by their average reward at each step of an episode
///
/// Every episode draws a new environment from `environment_fn` and builds one new agent per
/// factory, so the curves show how a freshly initialized agent learns, averaged over
/// episodes. Agents share the environment but never each other's state.
pub struct Testbed<F> {
    environment_fn: F,
    agent_fns: Vec<AgentFactory>,
}

impl<E, F> Testbed<F>
where
    E: Environment<Action = usize>,
    F: FnMut(&mut dyn RngCore) -> E,
{
    pub fn new(environment_fn: F, agent_fns: Vec<AgentFactory>) -> Self {
        Self {
            environment_fn,
            agent_fns,
        }
    }

    /// Display names of the agents, in factory order
    pub fn labels(&self, num_actions: usize) -> Vec<String> {
        self.agent_fns
            .iter()
            .map(|f| f(num_actions).to_string())
            .collect()
    }

    /// Run every episode and return one per-step reward curve per agent
    ///
    /// `on_update(episode, curves)` is called every `report_every` episodes and after the last
    /// one.
    ///
    /// **Panics** if `report_every` or `log_every` is 0
    pub fn evaluate<R: RngCore>(
        &mut self,
        config: &TestbedConfig,
        rng: &mut R,
        mut on_update: impl FnMut(usize, &[LearningCurve]),
    ) -> Vec<LearningCurve> {
        let &TestbedConfig {
            num_episodes,
            episode_length,
            report_every,
            log_every,
        } = config;
        assert!(report_every > 0, "`report_every` must be positive");
        assert!(log_every > 0, "`log_every` must be positive");

        let rng: &mut dyn RngCore = rng;
        let mut rewards = vec![LearningCurve::new(episode_length); self.agent_fns.len()];
        let start = Instant::now();

        for episode in 0..num_episodes {
            let mut environment = (self.environment_fn)(rng);
            let num_actions = environment.actions().len();
            let mut agents: Vec<_> = self.agent_fns.iter().map(|f| f(num_actions)).collect();

            for step in 0..episode_length {
                for (agent, curve) in agents.iter_mut().zip(rewards.iter_mut()) {
                    let action = agent.act(rng);
                    let (reward, _) = environment.step(action, rng);
                    agent.learn(action, reward);
                    curve.record(step, episode, reward);
                }
            }

            if episode % report_every == 0 || episode + 1 == num_episodes {
                debug!("Episode {}: reporting {} curves", episode, rewards.len());
                on_update(episode, &rewards);
            }

            if episode > 0 && episode % log_every == 0 {
                info!(
                    "Episode {}: {:.2} episodes/second",
                    episode,
                    episode as f64 / start.elapsed().as_secs_f64()
                );
            }
        }

        rewards
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use rand::{rngs::StdRng, SeedableRng};

    use crate::{
        algo::tabular::{EpsilonGreedyAgent, GreedyAgent},
        gym::Bandit,
    };

    use super::*;

    fn two_armed(_: &mut dyn RngCore) -> Bandit {
        Bandit::new(vec![1.0, 0.0], 0.0).unwrap()
    }

    fn sampled(rng: &mut dyn RngCore) -> Bandit {
        Bandit::sample(10, 1.0, rng).unwrap()
    }

    fn config(num_episodes: usize, episode_length: usize) -> TestbedConfig {
        TestbedConfig {
            num_episodes,
            episode_length,
            ..Default::default()
        }
    }

    #[test]
    fn exploration_escapes_a_greedy_tie() {
        let mut testbed = Testbed::new(
            two_armed,
            vec![
                factory(GreedyAgent::new),
                factory(|n| EpsilonGreedyAgent::new(n, 0.1)),
            ],
        );
        let curves =
            testbed.evaluate(&config(50, 100), &mut StdRng::seed_from_u64(3), |_, _| {});

        assert_eq!(curves.len(), 2);
        assert!(
            curves[0].values().iter().all(|&r| r == 0.0),
            "Greedy stays on the arm that wins the initial tie"
        );
        let late = curves[1].mean(50..100).unwrap();
        assert!(late > 0.75, "Epsilon greedy finds the paying arm: {late}");
    }

    #[test]
    fn exploration_beats_greedy_on_sampled_bandits() {
        let mut testbed = Testbed::new(
            sampled,
            vec![
                factory(GreedyAgent::new),
                factory(|n| EpsilonGreedyAgent::new(n, 0.1)),
            ],
        );
        let curves =
            testbed.evaluate(&config(200, 500), &mut StdRng::seed_from_u64(8), |_, _| {});

        let greedy = curves[0].mean(400..500).unwrap();
        let explorer = curves[1].mean(400..500).unwrap();
        assert!(explorer > greedy, "{explorer} > {greedy}");
    }

    #[test]
    fn agents_are_rebuilt_every_episode() {
        let built = Rc::new(Cell::new(0));
        let counter = Rc::clone(&built);
        let mut testbed = Testbed::new(
            two_armed,
            vec![factory(move |n| {
                counter.set(counter.get() + 1);
                GreedyAgent::new(n)
            })],
        );
        let mut reported = Vec::new();
        testbed.evaluate(&config(45, 3), &mut StdRng::seed_from_u64(0), |episode, curves| {
            assert_eq!(curves[0].len(), 3);
            reported.push(episode);
        });

        assert_eq!(built.get(), 45);
        assert_eq!(reported, vec![0, 20, 40, 44]);
    }

    #[test]
    fn same_seed_same_curves() {
        let run = |seed| {
            let mut testbed = Testbed::new(
                sampled,
                vec![factory(|n| EpsilonGreedyAgent::new(n, 0.01))],
            );
            testbed.evaluate(&config(10, 50), &mut StdRng::seed_from_u64(seed), |_, _| {})
        };
        assert_eq!(run(4), run(4));
        assert_ne!(run(4), run(5));
    }

    #[test]
    fn labels_name_each_agent() {
        let testbed = Testbed::new(
            two_armed,
            vec![
                factory(GreedyAgent::new),
                factory(|n| EpsilonGreedyAgent::new(n, 0.1)),
                factory(|n| EpsilonGreedyAgent::new(n, 0.01)),
            ],
        );
        assert_eq!(
            testbed.labels(10),
            [
                "GreedyAgent",
                "EpsilonGreedyAgent(epsilon=0.100000)",
                "EpsilonGreedyAgent(epsilon=0.010000)"
            ]
        );
    }
}
