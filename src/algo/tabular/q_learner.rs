use std::{collections::HashMap, marker::PhantomData};

use crate::{
    agent::Agent,
    assert_interval,
    env::{Episodic, Exp},
    util::argmax_last,
};

use super::{Condense, Hashable};

/// Configuration for the [`QLearner`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QLearnerConfig {
    /// Learning rate
    ///
    /// **Default**: `0.1`
    pub alpha: f64,
    /// Discount factor
    ///
    /// **Default**: `0.9`
    pub gamma: f64,
}

impl Default for QLearnerConfig {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            gamma: 0.9,
        }
    }
}

/// Off-policy TD control with a Q-table keyed by condensed observations
///
/// Decisions are purely greedy over the table, ties going to the last available action.
/// Updates bootstrap from the greedy value of the next observation:
///
/// Q(s, a) ← Q(s, a) + α(r + γ max<sub>a'</sub> Q(s', a') - Q(s, a))
///
/// Entries that have never been written read as 0. Condensed observations are interned to
/// indices the first time they are written, and the table is keyed by `(index, action)`, so
/// probing it only borrows the condensed key.
///
/// ### Generics
/// - `E` - The [`Episodic`] environment in which the agent will learn
///     - Observations must implement [`Condense`] so they can key the table
///     - Actions must be [`Hashable`]
pub struct QLearner<E>
where
    E: Episodic,
    E::Observation: Condense,
    E::Action: Hashable,
{
    states: HashMap<String, usize>,
    q_table: HashMap<(usize, E::Action), f64>,
    actions: Vec<E::Action>,
    alpha: f64,
    gamma: f64,
    env: PhantomData<E>,
}

impl<E> QLearner<E>
where
    E: Episodic,
    E::Observation: Condense,
    E::Action: Hashable,
{
    /// Initialize a learner over the environment's available actions
    ///
    /// **Panics** if `alpha` or `gamma` is not in the interval `[0,1]`, or if `actions` is empty
    pub fn new(actions: Vec<E::Action>, config: QLearnerConfig) -> Self {
        assert_interval!(config.alpha, 0.0, 1.0);
        assert_interval!(config.gamma, 0.0, 1.0);
        assert!(!actions.is_empty(), "There is always at least one action available");
        Self {
            states: HashMap::new(),
            q_table: HashMap::new(),
            actions,
            alpha: config.alpha,
            gamma: config.gamma,
            env: PhantomData,
        }
    }

    /// Number of state-action pairs that have been written
    pub fn len(&self) -> usize {
        self.q_table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.q_table.is_empty()
    }

    /// The estimate for taking `action` after seeing `observation`
    pub fn value(&self, observation: &E::Observation, action: E::Action) -> f64 {
        self.lookup(&observation.condense(), action)
    }

    fn lookup(&self, key: &str, action: E::Action) -> f64 {
        self.states
            .get(key)
            .and_then(|&state| self.q_table.get(&(state, action)))
            .copied()
            .unwrap_or(0.0)
    }

    fn max_value(&self, key: &str) -> f64 {
        self.actions
            .iter()
            .map(|&a| self.lookup(key, a))
            .fold(f64::NEG_INFINITY, f64::max)
    }
}

impl<E> Agent<E> for QLearner<E>
where
    E: Episodic,
    E::Observation: Condense,
    E::Action: Hashable,
{
    fn act(&self, observation: &E::Observation) -> E::Action {
        let key = observation.condense();
        argmax_last(&self.actions, |a| self.lookup(&key, a))
    }

    fn learn(&mut self, exp: Exp<E>) {
        let Exp {
            observation,
            action,
            next_observation,
            reward,
        } = exp;

        let key = observation.condense();
        let max_next_q = self.max_value(&next_observation.condense());
        let q_value = self.lookup(&key, action);
        let updated = q_value + self.alpha * (reward + self.gamma * max_next_q - q_value);

        let next_state = self.states.len();
        let state = *self.states.entry(key).or_insert(next_state);
        self.q_table.insert((state, action), updated);
    }
}
