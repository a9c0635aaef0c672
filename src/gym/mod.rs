pub mod bandit;
pub mod catch;

pub use bandit::Bandit;
pub use catch::{Catch, Cell, Grid};
