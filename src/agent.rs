use std::fmt;

use rand::RngCore;

use crate::env::{Episodic, Exp};

/// An agent whose decisions do not depend on any observation, as in an n-armed bandit
///
/// Actions are arm indices in `0..n`. The [`Display`](fmt::Display) impl names the agent
/// for plot legends.
pub trait BanditAgent: fmt::Display {
    fn act(&self, rng: &mut dyn RngCore) -> usize;
    fn learn(&mut self, action: usize, reward: f64);
}

/// An agent that conditions its decisions on observations of an [`Episodic`] environment
pub trait Agent<E: Episodic> {
    fn act(&self, observation: &E::Observation) -> E::Action;
    fn learn(&mut self, exp: Exp<E>);
}
