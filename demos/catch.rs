use std::{error::Error, slice};

use rand::{rngs::StdRng, SeedableRng};
use rl_testbeds::{
    driver::{CatchConfig, CatchExperiment},
    viz::{self, PlotConfig, Update},
};

const SEED: u64 = 0;

fn main() -> Result<(), Box<dyn Error>> {
    let config = CatchConfig::default();
    let experiment = CatchExperiment::new(config);

    let (handle, tx) = viz::init(
        PlotConfig {
            title: format!("Q-learning on Catch ({0}x{0})", config.width),
            x_title: "Episode".into(),
            y_title: "Terminal reward (moving average)".into(),
            labels: vec!["QLearner".into()],
            len: config.num_episodes,
            y_bounds: [-1.1, 1.1],
        },
        config.num_repetitions,
    )?;

    let mut rng = StdRng::seed_from_u64(SEED);
    experiment.run(&mut rng, |repetition, curve| {
        // The dashboard may already have been closed
        let _ = tx.send(Update::new(repetition + 1, slice::from_ref(curve)));
    });
    drop(tx);

    handle
        .join()
        .map_err(|_| "Dashboard thread panicked")??;

    Ok(())
}
