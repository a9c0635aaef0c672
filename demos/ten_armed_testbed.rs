use std::{error::Error, fs};

use rand::{rngs::StdRng, RngCore, SeedableRng};
use rl_testbeds::{
    algo::tabular::{EpsilonGreedyAgent, GreedyAgent},
    decay,
    driver::{factory, Testbed, TestbedConfig},
    gym::Bandit,
    viz::{self, PlotConfig, Update},
};

const NUM_ARMS: usize = 10;
const SEED: u64 = 0;

fn main() -> Result<(), Box<dyn Error>> {
    let config = TestbedConfig::default();
    let annealed = decay::Exponential::new(5e-3, 0.5, 0.01)?;

    let mut testbed = Testbed::new(
        |rng: &mut dyn RngCore| {
            Bandit::sample(NUM_ARMS, 1.0, rng).expect("Unit noise is a valid standard deviation")
        },
        vec![
            factory(GreedyAgent::new),
            factory(|n| EpsilonGreedyAgent::new(n, 0.1)),
            factory(|n| EpsilonGreedyAgent::new(n, 0.01)),
            factory(move |n| EpsilonGreedyAgent::with_decay(n, annealed)),
        ],
    );
    let labels = testbed.labels(NUM_ARMS);

    let (handle, tx) = viz::init(
        PlotConfig {
            title: format!("{NUM_ARMS}-armed testbed"),
            x_title: "Step".into(),
            y_title: "Average reward".into(),
            labels: labels.clone(),
            len: config.episode_length,
            y_bounds: [0.0, 1.5],
        },
        config.num_episodes,
    )?;

    let mut rng = StdRng::seed_from_u64(SEED);
    let curves = testbed.evaluate(&config, &mut rng, |episode, curves| {
        let _ = tx.send(Update::new(episode + 1, curves));
    });
    drop(tx);

    fs::create_dir_all("local")?;
    let mut wtr = csv::Writer::from_path("local/ten_armed_testbed.csv")?;
    let mut header = vec!["step".to_owned()];
    header.extend(labels);
    wtr.write_record(&header)?;
    for step in 0..config.episode_length {
        let mut record = vec![step.to_string()];
        record.extend(curves.iter().map(|c| c.values()[step].to_string()));
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    log::info!("Wrote local/ten_armed_testbed.csv");

    handle
        .join()
        .map_err(|_| "Dashboard thread panicked")??;

    Ok(())
}
