use std::{
    io,
    sync::mpsc::{self, Sender},
    thread::{self, JoinHandle},
};

use log::{LevelFilter, SetLoggerError};

use crate::stats::LearningCurve;

use self::app::App;
pub use self::components::PlotConfig;

mod app;
mod components;
mod tui;

/// A snapshot of the learning curves sent from the experiment to the dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    /// Number of completed episodes or repetitions
    pub progress: usize,
    /// One series per plotted curve, in legend order
    pub curves: Vec<Vec<f64>>,
}

impl Update {
    pub fn new(progress: usize, curves: &[LearningCurve]) -> Self {
        Self {
            progress,
            curves: curves.iter().map(|c| c.values().to_vec()).collect(),
        }
    }
}

/// Route log records into the dashboard and start it on its own thread
///
/// The dashboard redraws whatever it receives on the returned sender. Once the sender is
/// dropped it marks the run as finished and keeps the final curves on screen until the user
/// presses `q`; join the handle to wait for that.
///
/// Fails if a logger has already been installed
pub fn init(
    plot: PlotConfig,
    total: usize,
) -> Result<(JoinHandle<io::Result<()>>, Sender<Update>), SetLoggerError> {
    tui_logger::init_logger(LevelFilter::Trace)?;
    tui_logger::set_default_level(LevelFilter::Info);

    let (tx, rx) = mpsc::channel();
    let handle = thread::spawn(move || App::new(plot, total).run(rx));
    Ok((handle, tx))
}
