//! Window generation through the dispatch table.

use sigkit::window::{evaluate, generate, generate_into};
use sigkit::{WindowError, WindowShape};

/// Allowed floating-point error for window values.
const EPSILON: f64 = 1e-12;

fn max(slice: &[f64]) -> f64 {
    slice.iter().copied().fold(f64::MIN, f64::max)
}

#[test]
fn rectangular_is_all_ones() {
    assert_eq!(generate(WindowShape::Rectangular, 5, 0.0).unwrap(), vec![1.0; 5]);
}

#[test]
fn too_short_widths_fail() {
    for width in [0, 1] {
        for shape in WindowShape::ALL {
            assert!(generate(shape, width, 0.0).is_err());
        }
        assert_eq!(
            generate(WindowShape::Hann, width, 0.0),
            Err(WindowError::TooShort(width))
        );
    }
}

#[test]
fn tukey_is_not_implemented() {
    assert_eq!(
        generate(WindowShape::Tukey, 16, 0.5),
        Err(WindowError::NotImplemented(WindowShape::Tukey))
    );
    assert!(!WindowShape::Tukey.is_implemented());
}

#[test]
fn every_implemented_shape_is_finite_and_symmetric() {
    for shape in WindowShape::ALL.into_iter().filter(|s| s.is_implemented()) {
        let w = generate(shape, 33, 0.0).unwrap();
        assert_eq!(w.len(), 33);
        for n in 0..w.len() {
            assert!(w[n].is_finite(), "{} sample {}", shape, n);
            assert!((w[n] - w[w.len() - 1 - n]).abs() < 1e-9, "{} sample {}", shape, n);
        }
    }
}

#[test]
fn hann_edges_and_peak() {
    let w = generate(WindowShape::Hann, 9, 0.0).unwrap();
    assert!(w[0].abs() < EPSILON);
    assert!(w[8].abs() < EPSILON);
    assert!((max(&w) - 1.0).abs() < EPSILON);
    assert!((w[4] - 1.0).abs() < EPSILON);
}

#[test]
fn hamming_edges() {
    let w = generate(WindowShape::Hamming, 11, 0.0).unwrap();
    assert!((w[0] - 0.07672).abs() < 1e-9);
    assert!((w[10] - 0.07672).abs() < 1e-9);
    assert!((w[5] - 1.0).abs() < 1e-9);
}

#[test]
fn evaluate_matches_generate() {
    let w = generate(WindowShape::Blackman, 20, 0.0).unwrap();
    for (n, &v) in w.iter().enumerate() {
        assert_eq!(evaluate(WindowShape::Blackman, n, 20, 0.0).unwrap(), v);
    }
}

#[test]
fn kaiser_parameter_narrows_window() {
    let narrow = generate(WindowShape::Kaiser, 31, 8.0).unwrap();
    let wide = generate(WindowShape::Kaiser, 31, 1.0).unwrap();
    assert!((narrow[15] - 1.0).abs() < 1e-9);
    assert!((wide[15] - 1.0).abs() < 1e-9);
    assert!(narrow[3] < wide[3]);
}

#[test]
fn generate_into_leaves_buffer_on_error() {
    let mut buf = [7.0; 1];
    assert!(generate_into(&mut buf, WindowShape::Hann, 0.0).is_err());
    assert_eq!(buf, [7.0]);
    let mut buf = [7.0; 8];
    generate_into(&mut buf, WindowShape::Rectangular, 0.0).unwrap();
    assert_eq!(buf, [1.0; 8]);
}
