use std::time::Instant;

use log::{debug, info};
use rand::Rng;

use crate::{
    agent::Agent,
    algo::tabular::{QLearner, QLearnerConfig},
    env::{Environment, Episodic, Exp},
    gym::Catch,
    stats::{LearningCurve, MovingAverage},
};

/// Configuration for a [`CatchExperiment`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatchConfig {
    /// Width and height of the screen
    ///
    /// **Default**: `5`
    pub width: usize,
    /// Episodes per repetition
    ///
    /// **Default**: `350`
    pub num_episodes: usize,
    /// Independent repetitions, each with a fresh environment and learner
    ///
    /// **Default**: `200`
    pub num_repetitions: usize,
    /// Weight of the newest terminal reward in the moving average
    ///
    /// **Default**: `0.05`
    pub smoothing: f64,
    /// **Default**: α = 0.1, γ = 0.9
    pub learner: QLearnerConfig,
    /// Report the curve every this many repetitions
    ///
    /// **Default**: `3`
    pub report_every: usize,
}

impl Default for CatchConfig {
    fn default() -> Self {
        Self {
            width: 5,
            num_episodes: 350,
            num_repetitions: 200,
            smoothing: 0.05,
            learner: QLearnerConfig::default(),
            report_every: 3,
        }
    }
}

/// Play one episode from the environment's current state until it terminates
///
/// The agent learns from every transition. **Returns** the terminal reward
pub fn play_episode<E, A, R>(env: &mut E, agent: &mut A, rng: &mut R) -> f64
where
    E: Episodic,
    A: Agent<E>,
    R: Rng + ?Sized,
{
    loop {
        let observation = env.observe();
        let action = agent.act(&observation);
        let (reward, terminal) = env.step(action, rng);
        let next_observation = env.observe();

        agent.learn(Exp {
            observation,
            action,
            next_observation,
            reward,
        });

        if terminal {
            return reward;
        }
    }
}

/// Q-learning on [`Catch`], averaged over independent repetitions
///
/// Within a repetition a single [`QLearner`] keeps its table across all episodes, and the
/// terminal rewards are smoothed by a [`MovingAverage`]. The resulting moving average at each
/// episode index is then averaged across repetitions.
pub struct CatchExperiment {
    config: CatchConfig,
}

impl CatchExperiment {
    /// **Panics** if `report_every` is 0
    pub fn new(config: CatchConfig) -> Self {
        assert!(config.report_every > 0, "`report_every` must be positive");
        Self { config }
    }

    /// Run every repetition and return the averaged moving-average curve
    ///
    /// `on_update(repetition, curve)` is called after every `report_every`-th repetition and
    /// after the last one.
    pub fn run<R: Rng>(
        &self,
        rng: &mut R,
        mut on_update: impl FnMut(usize, &LearningCurve),
    ) -> LearningCurve {
        let CatchConfig {
            width,
            num_episodes,
            num_repetitions,
            smoothing,
            learner,
            report_every,
        } = self.config;

        let mut rewards = LearningCurve::new(num_episodes);
        let start = Instant::now();

        for repetition in 0..num_repetitions {
            let mut env = Catch::new(width, rng);
            let mut agent = QLearner::<Catch>::new(env.actions(), learner);
            let mut reward_ma = MovingAverage::new(smoothing);

            for i in 0..num_episodes {
                env.reset(rng);
                let reward = play_episode(&mut env, &mut agent, rng);
                rewards.record(i, repetition, reward_ma.update(reward));
            }

            debug!(
                "Repetition {}: moving average {:.3}, {} table entries",
                repetition,
                reward_ma.value(),
                agent.len()
            );

            if repetition % report_every == 0 || repetition + 1 == num_repetitions {
                info!(
                    "Repetition {}: {:.2} repetitions/second",
                    repetition,
                    (repetition + 1) as f64 / start.elapsed().as_secs_f64()
                );
                on_update(repetition, &rewards);
            }
        }

        rewards
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn fixed_start_learns_to_catch() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut env = Catch::new(3, &mut rng);
        let mut agent = QLearner::<Catch>::new(
            env.actions(),
            QLearnerConfig {
                alpha: 0.1,
                gamma: 0.9,
            },
        );
        let mut reward_ma = MovingAverage::new(0.05);

        let trace: Vec<f64> = (0..50)
            .map(|_| {
                env.place(1, 1);
                reward_ma.update(play_episode(&mut env, &mut agent, &mut rng))
            })
            .collect();

        let early = trace[..5].iter().sum::<f64>() / 5.0;
        let late = trace[45..].iter().sum::<f64>() / 5.0;
        assert!(late > early, "Moving average rises: {early} -> {late}");
        assert!(trace[49] > 0.5, "Catching reliably by the end");
        assert!(
            trace.windows(2).skip(5).all(|w| w[1] >= w[0]),
            "Every later episode is a catch"
        );
    }

    #[test]
    fn play_episode_returns_terminal_reward() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut env = Catch::new(4, &mut rng);
        let mut agent = QLearner::<Catch>::new(env.actions(), QLearnerConfig::default());
        env.place(0, 3);
        // An untrained learner always moves right and cannot reach column 0
        assert_eq!(play_episode(&mut env, &mut agent, &mut rng), -1.0);
        assert!(!env.is_active());
        assert_eq!(agent.len(), 3, "One table entry per step");
    }

    #[test]
    fn experiment_improves_over_episodes() {
        let experiment = CatchExperiment::new(CatchConfig {
            width: 3,
            num_episodes: 200,
            num_repetitions: 10,
            ..Default::default()
        });
        let curve = experiment.run(&mut StdRng::seed_from_u64(1), |_, _| {});

        assert_eq!(curve.len(), 200);
        assert!(curve.values().iter().all(|v| (-1.0..=1.0).contains(v)));
        let early = curve.mean(0..10).unwrap();
        let late = curve.mean(150..200).unwrap();
        assert!(late > early, "Learning curve rises: {early} -> {late}");
        assert!(late > 0.5, "Most balls are caught late on: {late}");
    }

    #[test]
    fn experiment_is_reproducible_and_reports() {
        let experiment = CatchExperiment::new(CatchConfig {
            num_episodes: 20,
            num_repetitions: 8,
            ..Default::default()
        });
        let mut reported = Vec::new();
        let first = experiment.run(&mut StdRng::seed_from_u64(5), |rep, curve| {
            assert_eq!(curve.len(), 20);
            reported.push(rep);
        });
        let second = experiment.run(&mut StdRng::seed_from_u64(5), |_, _| {});

        assert_eq!(first, second, "Same seed, same curve");
        assert_eq!(reported, vec![0, 3, 6, 7]);
    }

    #[test]
    fn curve_averages_fresh_repetitions() {
        let config = CatchConfig {
            width: 3,
            num_episodes: 8,
            num_repetitions: 2,
            ..Default::default()
        };
        let curve = CatchExperiment::new(config).run(&mut StdRng::seed_from_u64(9), |_, _| {});

        // Same draws in the same order as the experiment
        let mut rng = StdRng::seed_from_u64(9);
        let traces: Vec<Vec<f64>> = (0..2)
            .map(|_| {
                let mut env = Catch::new(config.width, &mut rng);
                let mut agent = QLearner::<Catch>::new(env.actions(), config.learner);
                let mut reward_ma = MovingAverage::new(config.smoothing);
                (0..config.num_episodes)
                    .map(|_| {
                        env.reset(&mut rng);
                        reward_ma.update(play_episode(&mut env, &mut agent, &mut rng))
                    })
                    .collect()
            })
            .collect();

        for trace in &traces {
            assert_eq!(trace[0].abs(), 0.05, "Moving average starts from 0 each repetition");
        }
        for (i, &v) in curve.values().iter().enumerate() {
            let expected = (traces[0][i] + traces[1][i]) / 2.0;
            assert!((v - expected).abs() < 1e-12, "Index {i}: {v} vs {expected}");
        }
    }

    #[test]
    #[should_panic(expected = "`report_every` must be positive")]
    fn zero_report_interval_panics() {
        CatchExperiment::new(CatchConfig {
            report_every: 0,
            ..Default::default()
        });
    }
}
