use std::path::Path;

use anyhow::Result;

use hodograph::data::loader;
use hodograph::plot::VectorPlotter;

fn main() -> Result<()> {
    env_logger::init();

    // With a file argument the energy/duration series come from the file;
    // otherwise a built-in probe dataset is shown.
    let (energy, duration) = match std::env::args().nth(1) {
        Some(path) => {
            let measurements = loader::load(Path::new(&path))?;
            (measurements.energy, measurements.duration)
        }
        None => (
            vec![81.8928, 42.4162, 23.2282, 14.6381, 16.4917, 14.2877],
            vec![0.0898, 0.0677, 0.0493, 0.0336, 0.0314, 0.033],
        ),
    };

    // Deposit thickness grows with the probe index.
    let thickness: Vec<f64> = (0..energy.len()).map(|i| i as f64).collect();

    let plotter = VectorPlotter::default();
    plotter.plot_hodograph_3d(&energy, &duration, &thickness, "Годограф толщины отложений");

    Ok(())
}
