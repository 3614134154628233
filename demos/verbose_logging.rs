//! Print sigkit's dispatch decisions.
//!
//! Run with `cargo run --example verbose_logging --features verbose-logging`.
//! Add `--features parallel` to see the parallel cut-over being logged too.

use log::LevelFilter;
use sigkit::smoothing::savitzky_golay;
use sigkit::window::generate;
use sigkit::{Signal, WindowShape};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(LevelFilter::Trace)
        .init();

    // Power-of-two length takes the radix-2 path, the others the direct one.
    for len in [16usize, 12] {
        let signal = Signal::from_samples((0..len).map(|i| i as f64).collect());
        let spectrum = signal.fourier_transform()?;
        log::info!("len {} -> DC bin {}", len, spectrum[0]);
    }

    let mut s = Signal::new(70);
    s.resize_to_nearest_power_of_two();

    let ramp: Vec<f64> = (0..32).map(|i| i as f64).collect();
    savitzky_golay(&ramp, 7, 2, 0)?;

    if let Err(e) = savitzky_golay(&ramp, 6, 2, 0) {
        log::warn!("expected failure: {}", e);
    }
    if let Err(e) = generate(WindowShape::Hann, 1, 0.0) {
        log::warn!("expected failure: {}", e);
    }
    Ok(())
}
