pub mod epsilon_greedy;
pub mod greedy;
pub mod q_learner;

pub use epsilon_greedy::EpsilonGreedyAgent;
pub use greedy::GreedyAgent;
pub use q_learner::{QLearner, QLearnerConfig};

/// A trait for action types that can be used as keys in a [`HashMap`](std::collections::HashMap)
pub trait Hashable: Copy + Eq + std::hash::Hash {}

impl<T> Hashable for T where T: Copy + Eq + std::hash::Hash {}

/// Converts an observation into a canonical string key for a value table
///
/// Implementations must be deterministic and injective: equal observations give equal keys,
/// distinct observations give distinct keys.
pub trait Condense {
    fn condense(&self) -> String;
}
