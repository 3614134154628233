//! Basic usage example for sigkit
//!
//! Walks through tone generation, spectra, windowing and smoothing on a
//! small `Signal`.

use sigkit::smoothing::savitzky_golay_kernel;
use sigkit::{Signal, SignalError, WindowShape};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== sigkit Basic Usage Example ===\n");

    // 1. Tone generation
    println!("1. Two-tone mixture at 64 Hz");
    let mut signal = Signal::new(64).with_sampling_frequency(64.0)?;
    signal.generate_sine(&[4.0, 12.0], &[1.0, 0.5], &[0.0, 0.0])?;
    println!(
        "   rms = {:.4}, peak-to-peak = {:.4}",
        signal.rms().unwrap_or(0.0),
        signal.amplitude().unwrap_or(0.0)
    );
    println!();

    // 2. Spectrum
    println!("2. Fourier transform");
    let spectrum = signal.fourier_transform()?;
    for (bin, value) in spectrum.iter().enumerate().take(spectrum.len() / 2) {
        if value.norm() > 1.0 {
            println!(
                "   bin {:2} ({:5.1} Hz): |X| = {:.2}",
                bin,
                signal.bin_frequency(bin).unwrap_or(0.0),
                value.norm()
            );
        }
    }
    let rebuilt = Signal::from_spectrum(&spectrum, signal.sampling_frequency())?;
    println!("   inverse transform matches: {}", close(&signal, &rebuilt));
    println!();

    // 3. Windows
    println!("3. Window functions (width 9)");
    for shape in [WindowShape::Hann, WindowShape::Hamming, WindowShape::Kaiser] {
        let mut w = Signal::new(9);
        w.generate_window(shape, 0.0)?;
        println!("   {:8} {:?}", shape.name(), rounded(w.samples()));
    }
    let mut w = Signal::new(9);
    match w.generate_window(WindowShape::Tukey, 0.5) {
        Ok(()) => println!("   tukey    {:?}", rounded(w.samples())),
        Err(e) => println!("   tukey    error: {}", e),
    }
    println!();

    // 4. Smoothing
    println!("4. Smoothing a noisy ramp");
    let noisy: Vec<f64> = (0..16)
        .map(|i| i as f64 + if i % 2 == 0 { 0.3 } else { -0.3 })
        .collect();
    let mut smooth = Signal::from_samples(noisy.clone());
    smooth.savitzky_golay(5, 2, 0)?;
    println!("   input:          {:?}", rounded(&noisy));
    println!("   savitzky-golay: {:?}", rounded(smooth.samples()));
    let kernel = savitzky_golay_kernel(2, 2, 2, 0)?;
    println!("   kernel taps:    {:?}", rounded(kernel.taps()));
    let mut ema = Signal::from_samples(noisy);
    ema.simple_exponential_smoothing(0.5)?;
    println!("   exponential:    {:?}", rounded(ema.samples()));
    println!();

    // 5. Resizing and arithmetic
    println!("5. Resizing and arithmetic");
    let mut s = Signal::new(100);
    s.resize_to_nearest_power_of_two();
    println!("   100 samples -> nearest power of two: {}", s.len());
    let sum = Signal::from_samples(vec![1.0, 2.0, 3.0, 4.0])
        .add(&Signal::from_samples(vec![10.0, 20.0]));
    println!("   [1,2,3,4] + [10,20] = {:?}", sum.samples());
    let err: SignalError = Signal::new(4).generate_tone(1.0, 1.0, 0.0).unwrap_err();
    println!("   tone without sampling frequency: {}", err);

    Ok(())
}

fn close(a: &Signal, b: &Signal) -> bool {
    a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-9)
}

fn rounded(values: &[f64]) -> Vec<f64> {
    values.iter().map(|v| (v * 1000.0).round() / 1000.0).collect()
}
