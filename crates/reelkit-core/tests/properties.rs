//! Property tests for the pure evaluation functions.

use proptest::prelude::*;
use reelkit_core::{Curve, FrameRate, GridSpec, Spring, SpringConfig};

proptest! {
    #[test]
    fn clamped_curve_stays_within_output_bounds(
        f0 in -1000.0f64..1000.0,
        width in 0.001f64..500.0,
        v0 in -100.0f64..100.0,
        v1 in -100.0f64..100.0,
        x in -5000.0f64..5000.0,
    ) {
        let curve = Curve::clamped(&[f0, f0 + width], &[v0, v1]).unwrap();
        let y = curve.evaluate(x);
        let (lo, hi) = if v0 <= v1 { (v0, v1) } else { (v1, v0) };
        prop_assert!(y >= lo - 1e-9 && y <= hi + 1e-9);
        if x < f0 {
            prop_assert_eq!(y, v0);
        }
        if x > f0 + width {
            prop_assert_eq!(y, v1);
        }
    }

    #[test]
    fn two_point_midpoint_is_average(
        f0 in -1000.0f64..1000.0,
        width in 0.001f64..500.0,
        v0 in -100.0f64..100.0,
        v1 in -100.0f64..100.0,
    ) {
        let curve = Curve::clamped(&[f0, f0 + width], &[v0, v1]).unwrap();
        let mid = curve.evaluate(f0 + width / 2.0);
        prop_assert!((mid - (v0 + v1) / 2.0).abs() < 1e-6);
    }

    #[test]
    fn curve_evaluation_is_deterministic(x in -100.0f64..200.0) {
        let curve = Curve::new(&[0.0, 30.0, 60.0, 90.0], &[0.0, 1.0, 0.25, 0.0]).unwrap();
        prop_assert_eq!(curve.evaluate(x).to_bits(), curve.evaluate(x).to_bits());
    }

    #[test]
    fn unsorted_breakpoints_are_rejected(a in 1.0f64..100.0, b in 0.0f64..0.999) {
        prop_assert!(Curve::new(&[a, a * b], &[0.0, 1.0]).is_err());
    }

    #[test]
    fn spring_is_a_pure_function_of_frame(
        frame in 0u32..600,
        damping in 1.0f64..50.0,
        stiffness in 10.0f64..400.0,
    ) {
        let spring = Spring::new(SpringConfig::new(damping, stiffness)).unwrap();
        let a = spring.evaluate(frame as f64, FrameRate::FPS_30);
        let _ = spring.evaluate((frame / 2) as f64, FrameRate::FPS_30);
        let b = spring.evaluate(frame as f64, FrameRate::FPS_30);
        prop_assert_eq!(a.to_bits(), b.to_bits());
        prop_assert!(a.is_finite());
    }

    #[test]
    fn grid_generation_is_reproducible(rows in 1u32..12, cols in 1u32..12, ratio in 0.0f64..=1.0) {
        let spec = GridSpec { rows, cols, primary_ratio: ratio, ..GridSpec::default() };
        prop_assert_eq!(spec.generate().unwrap(), spec.generate().unwrap());
    }
}
