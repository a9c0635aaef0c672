/// Agent interfaces
pub mod agent;

/// Implemented RL algorithms
pub mod algo;

/// Implementations of strategies for time-decaying hyperparameters
pub mod decay;

/// Experiment loops
pub mod driver;

/// Environment
pub mod env;

/// Exploration policies
pub mod exploration;

/// Testing environments
pub mod gym;

/// Running reward statistics
pub mod stats;

/// Terminal dashboard for learning curves
#[cfg(feature = "viz")]
pub mod viz;

mod util;
