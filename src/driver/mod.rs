pub mod catch;
pub mod testbed;

pub use catch::{play_episode, CatchConfig, CatchExperiment};
pub use testbed::{factory, AgentFactory, Testbed, TestbedConfig};
