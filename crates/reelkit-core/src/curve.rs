//! Piecewise-linear property curves with easing.
//!
//! A [`Curve`] maps a frame (or any derived progress value) through ordered
//! breakpoints into a visual property. Cubic Bézier easing uses
//! Newton-Raphson to invert the x(t) polynomial.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

use crate::error::{ReelError, Result};

// ── Easing curves ───────────────────────────────────────────────

/// Cubic Bézier control points for easing (x1, y1, x2, y2).
/// The curve goes from (0,0) to (1,1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl CubicBezier {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    fn sample_x(&self, t: f64) -> f64 {
        let mt = 1.0 - t;
        3.0 * mt * mt * t * self.x1 + 3.0 * mt * t * t * self.x2 + t * t * t
    }

    fn sample_y(&self, t: f64) -> f64 {
        let mt = 1.0 - t;
        3.0 * mt * mt * t * self.y1 + 3.0 * mt * t * t * self.y2 + t * t * t
    }

    fn sample_dx(&self, t: f64) -> f64 {
        let mt = 1.0 - t;
        3.0 * mt * mt * self.x1 + 6.0 * mt * t * (self.x2 - self.x1) + 3.0 * t * t * (1.0 - self.x2)
    }

    /// Map progress `x` in [0, 1] to eased progress.
    pub fn evaluate(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }

        let mut t = x;
        for _ in 0..8 {
            let x_est = self.sample_x(t) - x;
            if x_est.abs() < 1e-10 {
                break;
            }
            let dx = self.sample_dx(t);
            if dx.abs() < 1e-12 {
                break;
            }
            t = (t - x_est / dx).clamp(0.0, 1.0);
        }

        self.sample_y(t)
    }

    pub const LINEAR: Self = Self::new(0.0, 0.0, 1.0, 1.0);
    pub const EASE: Self = Self::new(0.25, 0.1, 0.25, 1.0);
    pub const EASE_IN: Self = Self::new(0.42, 0.0, 1.0, 1.0);
    pub const EASE_OUT: Self = Self::new(0.0, 0.0, 0.58, 1.0);
    pub const EASE_IN_OUT: Self = Self::new(0.42, 0.0, 0.58, 1.0);
    /// Approximation of `1 - (1 - t)^3`.
    pub const EASE_OUT_CUBIC: Self = Self::new(0.33, 1.0, 0.68, 1.0);
}

/// How progress within one interval is shaped.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum EasingCurve {
    /// Step: keep the interval's start value until the next breakpoint.
    Hold,
    #[default]
    Linear,
    Bezier(CubicBezier),
}

impl EasingCurve {
    /// Apply the easing to an interval progress value.
    ///
    /// Values outside [0, 1] come from `Extrapolate::Extend`. A Bézier only
    /// covers [0, 1], so beyond it progress continues along the chord.
    pub fn apply(self, t: f64) -> f64 {
        match self {
            EasingCurve::Bezier(_) if !(0.0..=1.0).contains(&t) => t,
            EasingCurve::Hold => {
                if t >= 1.0 {
                    1.0
                } else {
                    0.0
                }
            }
            EasingCurve::Linear => t,
            EasingCurve::Bezier(bezier) => bezier.evaluate(t),
        }
    }
}

// ── Boundary policy ─────────────────────────────────────────────

/// What happens when a curve is queried outside its input domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Extrapolate {
    /// Continue the slope of the boundary interval.
    #[default]
    Extend,
    /// Pin to the nearest endpoint value.
    Clamp,
    /// Return the query value unchanged.
    Identity,
}

// ── Curve ───────────────────────────────────────────────────────

/// A validated piecewise-linear curve.
///
/// Breakpoints are non-decreasing. A zero-width interval (duplicate
/// breakpoint) resolves to the later value at and after the breakpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    input: SmallVec<[f64; 4]>,
    output: SmallVec<[f64; 4]>,
    easing: EasingCurve,
    left: Extrapolate,
    right: Extrapolate,
}

impl Curve {
    /// Build a curve, failing fast on malformed breakpoints.
    pub fn new(input: &[f64], output: &[f64]) -> Result<Self> {
        validate(input, output)?;
        Ok(Self {
            input: SmallVec::from_slice(input),
            output: SmallVec::from_slice(output),
            easing: EasingCurve::Linear,
            left: Extrapolate::Extend,
            right: Extrapolate::Extend,
        })
    }

    /// Shorthand for a curve clamped on both sides.
    pub fn clamped(input: &[f64], output: &[f64]) -> Result<Self> {
        Ok(Self::new(input, output)?.clamp_both())
    }

    pub fn with_easing(mut self, easing: EasingCurve) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_left(mut self, policy: Extrapolate) -> Self {
        self.left = policy;
        self
    }

    pub fn with_right(mut self, policy: Extrapolate) -> Self {
        self.right = policy;
        self
    }

    pub fn clamp_both(self) -> Self {
        self.with_left(Extrapolate::Clamp)
            .with_right(Extrapolate::Clamp)
    }

    /// Evaluate the curve at `x`.
    pub fn evaluate(&self, x: f64) -> f64 {
        let n = self.input.len();
        // Index of the interval [input[seg], input[seg + 1]] that owns x.
        let seg = self.input[1..n - 1].partition_point(|&b| b <= x);
        let (lo, hi) = (self.input[seg], self.input[seg + 1]);
        let (out_lo, out_hi) = (self.output[seg], self.output[seg + 1]);

        if x < lo {
            match self.left {
                Extrapolate::Clamp => return out_lo,
                Extrapolate::Identity => return x,
                Extrapolate::Extend => {}
            }
        }
        if x > hi {
            match self.right {
                Extrapolate::Clamp => return out_hi,
                Extrapolate::Identity => return x,
                Extrapolate::Extend => {}
            }
        }

        if hi == lo {
            return if x < lo { out_lo } else { out_hi };
        }

        let t = (x - lo) / (hi - lo);
        if t == 0.0 {
            return out_lo;
        }
        if t == 1.0 && self.easing != EasingCurve::Hold {
            return out_hi;
        }
        out_lo + (out_hi - out_lo) * self.easing.apply(t)
    }

    /// Input breakpoints.
    pub fn input(&self) -> &[f64] {
        &self.input
    }

    /// Output values.
    pub fn output(&self) -> &[f64] {
        &self.output
    }

    /// First and last input breakpoint.
    pub fn domain(&self) -> (f64, f64) {
        (self.input[0], self.input[self.input.len() - 1])
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (start, end) = self.domain();
        write!(f, "Curve([{start}, {end}], {} points)", self.input.len())
    }
}

fn validate(input: &[f64], output: &[f64]) -> Result<()> {
    if input.len() < 2 {
        return Err(ReelError::InvalidCurve(format!(
            "need at least 2 breakpoints, got {}",
            input.len()
        )));
    }
    if input.len() != output.len() {
        return Err(ReelError::InvalidCurve(format!(
            "input has {} breakpoints but output has {} values",
            input.len(),
            output.len()
        )));
    }
    if let Some(bad) = input.iter().chain(output).find(|v| !v.is_finite()) {
        return Err(ReelError::InvalidCurve(format!(
            "non-finite value {bad} in curve"
        )));
    }
    if let Some(i) = input.windows(2).position(|w| w[1] < w[0]) {
        return Err(ReelError::InvalidCurve(format!(
            "breakpoints must be non-decreasing, but {} follows {} at index {}",
            input[i + 1],
            input[i],
            i + 1
        )));
    }
    Ok(())
}

/// One-shot interpolation without keeping the curve around.
///
/// Scenes call this once per property per frame, so it validates on every
/// call and reports malformed breakpoints as errors.
pub fn interpolate(
    x: f64,
    input: &[f64],
    output: &[f64],
    left: Extrapolate,
    right: Extrapolate,
) -> Result<f64> {
    Ok(Curve::new(input, output)?
        .with_left(left)
        .with_right(right)
        .evaluate(x))
}

// ── Tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_interpolation() {
        let curve = Curve::new(&[0.0, 10.0], &[0.0, 1.0]).unwrap();
        assert_eq!(curve.evaluate(0.0), 0.0);
        assert!((curve.evaluate(5.0) - 0.5).abs() < 1e-12);
        assert_eq!(curve.evaluate(10.0), 1.0);
    }

    #[test]
    fn test_clamp_returns_exact_endpoints() {
        let curve = Curve::clamped(&[6.0, 24.0], &[0.1, 0.7]).unwrap();
        assert_eq!(curve.evaluate(-100.0), 0.1);
        assert_eq!(curve.evaluate(100.0), 0.7);
    }

    #[test]
    fn test_extend_continues_slope() {
        let curve = Curve::new(&[0.0, 900.0], &[0.0, 360.0]).unwrap();
        assert!((curve.evaluate(1800.0) - 720.0).abs() < 1e-9);
        assert!((curve.evaluate(-450.0) + 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_identity_passes_through() {
        let curve = Curve::new(&[0.0, 1.0], &[10.0, 20.0])
            .unwrap()
            .with_right(Extrapolate::Identity);
        assert_eq!(curve.evaluate(5.0), 5.0);
    }

    #[test]
    fn test_multiple_intervals() {
        let curve = Curve::clamped(&[0.0, 15.0, 255.0, 270.0], &[0.0, 1.0, 1.0, 0.0]).unwrap();
        assert!((curve.evaluate(7.5) - 0.5).abs() < 1e-12);
        assert_eq!(curve.evaluate(100.0), 1.0);
        assert!((curve.evaluate(262.5) - 0.5).abs() < 1e-12);
        assert_eq!(curve.evaluate(300.0), 0.0);
    }

    #[test]
    fn test_zero_width_interval_takes_later_value() {
        let curve = Curve::clamped(&[0.0, 10.0, 10.0, 20.0], &[0.0, 1.0, 5.0, 6.0]).unwrap();
        assert!((curve.evaluate(9.0) - 0.9).abs() < 1e-12);
        assert_eq!(curve.evaluate(10.0), 5.0);
        assert!((curve.evaluate(15.0) - 5.5).abs() < 1e-12);

        let trailing = Curve::clamped(&[0.0, 10.0, 10.0], &[0.0, 1.0, 2.0]).unwrap();
        assert_eq!(trailing.evaluate(10.0), 2.0);
        assert_eq!(trailing.evaluate(11.0), 2.0);
    }

    #[test]
    fn test_malformed_curves_rejected() {
        assert!(Curve::new(&[0.0], &[1.0]).is_err());
        assert!(Curve::new(&[0.0, 1.0], &[1.0]).is_err());
        assert!(Curve::new(&[10.0, 5.0], &[0.0, 1.0]).is_err());
        assert!(Curve::new(&[0.0, f64::NAN], &[0.0, 1.0]).is_err());
    }

    #[test]
    fn test_hold_easing() {
        let curve = Curve::new(&[0.0, 10.0], &[0.0, 1.0])
            .unwrap()
            .with_easing(EasingCurve::Hold);
        assert_eq!(curve.evaluate(9.9), 0.0);
        assert_eq!(curve.evaluate(10.0), 1.0);
    }

    #[test]
    fn test_bezier_ease_out_cubic_front_loaded() {
        let curve = Curve::clamped(&[0.0, 20.0], &[20.0, 0.0])
            .unwrap()
            .with_easing(EasingCurve::Bezier(CubicBezier::EASE_OUT_CUBIC));
        // Ease-out covers more than half the distance by the midpoint.
        assert!(curve.evaluate(10.0) < 10.0);
    }

    #[test]
    fn test_bezier_extends_past_its_ends() {
        let curve = Curve::new(&[0.0, 10.0], &[0.0, 100.0])
            .unwrap()
            .with_easing(EasingCurve::Bezier(CubicBezier::EASE_IN_OUT));
        assert!((curve.evaluate(20.0) - 200.0).abs() < 1e-9);
        assert!((curve.evaluate(-5.0) + 50.0).abs() < 1e-9);

        let clamped = curve.clamp_both();
        assert_eq!(clamped.evaluate(20.0), 100.0);
        assert_eq!(clamped.evaluate(-5.0), 0.0);
    }

    #[test]
    fn test_cubic_bezier_linear() {
        let bezier = CubicBezier::LINEAR;
        for i in 0..=10 {
            let x = i as f64 / 10.0;
            assert!((bezier.evaluate(x) - x).abs() < 0.001, "x={x}");
        }
    }

    #[test]
    fn test_interpolate_helper_validates() {
        let v = interpolate(5.0, &[0.0, 10.0], &[0.0, 1.0], Extrapolate::Clamp, Extrapolate::Clamp)
            .unwrap();
        assert!((v - 0.5).abs() < 1e-12);
        assert!(interpolate(0.0, &[1.0, 0.0], &[0.0, 1.0], Extrapolate::Clamp, Extrapolate::Clamp)
            .is_err());
    }
}
