//! Spring-physics easing.
//!
//! Progress is the closed-form solution of a damped harmonic oscillator
//! released from rest at `from` and settling at `to`. Nothing is integrated
//! across calls: every evaluation derives the value from the frame number
//! alone, so frames can be rendered in any order.

use serde::{Deserialize, Serialize};

use crate::error::{ReelError, Result};
use crate::time::FrameRate;

/// Distance from the target below which a spring counts as settled.
pub const SETTLE_THRESHOLD: f64 = 0.005;

/// Upper bound on the settle search (ten minutes at 60 fps).
const MAX_SETTLE_FRAMES: i64 = 36_000;

/// Physical parameters of a spring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    pub damping: f64,
    pub stiffness: f64,
    pub mass: f64,
    /// Never report progress past the target.
    pub overshoot_clamping: bool,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            damping: 10.0,
            stiffness: 100.0,
            mass: 1.0,
            overshoot_clamping: false,
        }
    }
}

impl SpringConfig {
    pub const fn new(damping: f64, stiffness: f64) -> Self {
        Self {
            damping,
            stiffness,
            mass: 1.0,
            overshoot_clamping: false,
        }
    }

    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_overshoot_clamping(mut self, clamp: bool) -> Self {
        self.overshoot_clamping = clamp;
        self
    }

    /// Reject parameters with no physical meaning.
    pub fn validate(&self) -> Result<()> {
        let finite = self.damping.is_finite() && self.stiffness.is_finite() && self.mass.is_finite();
        if !finite || self.mass <= 0.0 || self.stiffness <= 0.0 || self.damping < 0.0 {
            return Err(ReelError::InvalidParameter(format!(
                "spring needs mass > 0, stiffness > 0, damping >= 0 (got m={}, k={}, c={})",
                self.mass, self.stiffness, self.damping
            )));
        }
        Ok(())
    }

    /// Natural angular frequency.
    fn omega(&self) -> f64 {
        (self.stiffness / self.mass).sqrt()
    }

    /// ζ = c / (2·√(k·m)). Below 1 the spring overshoots.
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    /// Signed displacement from the target after `t` seconds, starting at -1
    /// with zero velocity.
    fn displacement(&self, t: f64) -> f64 {
        let w0 = self.omega();
        let zeta = self.damping_ratio();
        let x0 = -1.0;

        if (zeta - 1.0).abs() < 1e-9 {
            (x0 + w0 * x0 * t) * (-w0 * t).exp()
        } else if zeta < 1.0 {
            let wd = w0 * (1.0 - zeta * zeta).sqrt();
            let envelope = (-zeta * w0 * t).exp();
            envelope * (x0 * (wd * t).cos() + (zeta * w0 * x0 / wd) * (wd * t).sin())
        } else {
            let s = w0 * (zeta * zeta - 1.0).sqrt();
            let r1 = -zeta * w0 + s;
            let r2 = -zeta * w0 - s;
            let c2 = -r1 * x0 / (r2 - r1);
            let c1 = x0 - c2;
            c1 * (r1 * t).exp() + c2 * (r2 * t).exp()
        }
    }

    /// Upper bound on |displacement| from `t` onward.
    fn envelope(&self, t: f64) -> f64 {
        let w0 = self.omega();
        let zeta = self.damping_ratio();

        if (zeta - 1.0).abs() < 1e-9 {
            (1.0 + w0 * t) * (-w0 * t).exp()
        } else if zeta < 1.0 {
            let wd = w0 * (1.0 - zeta * zeta).sqrt();
            let amplitude = (1.0 + (zeta * w0 / wd).powi(2)).sqrt();
            amplitude * (-zeta * w0 * t).exp()
        } else {
            let s = w0 * (zeta * zeta - 1.0).sqrt();
            let r1 = -zeta * w0 + s;
            let r2 = -zeta * w0 - s;
            let c2 = r1 / (r2 - r1);
            let c1 = -1.0 - c2;
            c1.abs() * (r1 * t).exp() + c2.abs() * (r2 * t).exp()
        }
    }

    /// Normalised progress (0 at rest, 1 at target) after `t` seconds.
    pub fn progress_at(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        let progress = 1.0 + self.displacement(t);
        if self.overshoot_clamping {
            progress.min(1.0)
        } else {
            progress
        }
    }

    /// First frame from which the spring stays within [`SETTLE_THRESHOLD`] of
    /// its target, or `None` for an undamped spring.
    pub fn settle_frames(&self, fps: FrameRate) -> Option<i64> {
        if self.damping <= 0.0 {
            return None;
        }
        (0..=MAX_SETTLE_FRAMES)
            .find(|&frame| self.envelope(fps.frame_to_seconds_f64(frame)) < SETTLE_THRESHOLD)
    }
}

/// A spring animation placed on a segment's local timeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spring {
    pub config: SpringConfig,
    pub from: f64,
    pub to: f64,
    /// Frames to wait before the spring is released.
    pub delay: i64,
    /// Stretch the natural settle time to this many frames.
    pub duration_in_frames: Option<i64>,
}

impl Spring {
    /// Create a 0 → 1 spring.
    pub fn new(config: SpringConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            from: 0.0,
            to: 1.0,
            delay: 0,
            duration_in_frames: None,
        })
    }

    pub fn with_range(mut self, from: f64, to: f64) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    pub fn with_delay(mut self, frames: i64) -> Self {
        self.delay = frames;
        self
    }

    /// Stretch or compress the spring so it settles after `frames` frames.
    pub fn with_duration(mut self, frames: i64) -> Result<Self> {
        if frames <= 0 {
            return Err(ReelError::InvalidParameter(format!(
                "spring duration must be positive, got {frames}"
            )));
        }
        if self.config.damping <= 0.0 {
            return Err(ReelError::InvalidParameter(
                "an undamped spring never settles and cannot be stretched".into(),
            ));
        }
        self.duration_in_frames = Some(frames);
        Ok(self)
    }

    /// Value of the spring at a local frame.
    pub fn evaluate(&self, frame: f64, fps: FrameRate) -> f64 {
        let mut elapsed = frame - self.delay as f64;
        if elapsed <= 0.0 {
            return self.from;
        }
        if let Some(target) = self.duration_in_frames {
            if let Some(natural) = self.config.settle_frames(fps) {
                elapsed *= natural as f64 / target as f64;
            }
        }
        let t = elapsed * fps.denominator as f64 / fps.numerator as f64;
        self.from + (self.to - self.from) * self.config.progress_at(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FPS: FrameRate = FrameRate::FPS_30;

    #[test]
    fn test_starts_at_rest() {
        let s = Spring::new(SpringConfig::default()).unwrap();
        assert_eq!(s.evaluate(0.0, FPS), 0.0);
        assert_eq!(s.evaluate(-10.0, FPS), 0.0);
    }

    #[test]
    fn test_underdamped_overshoots_then_settles() {
        let s = Spring::new(SpringConfig::default()).unwrap();
        let peak = (0..60)
            .map(|f| s.evaluate(f as f64, FPS))
            .fold(f64::MIN, f64::max);
        assert!(peak > 1.0, "peak {peak} should overshoot");
        assert!((s.evaluate(90.0, FPS) - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_overshoot_clamping() {
        let config = SpringConfig::default().with_overshoot_clamping(true);
        let s = Spring::new(config).unwrap();
        assert!((0..90).all(|f| s.evaluate(f as f64, FPS) <= 1.0));
    }

    #[test]
    fn test_critical_and_overdamped_are_monotonic() {
        for config in [SpringConfig::new(20.0, 100.0), SpringConfig::new(40.0, 100.0)] {
            let s = Spring::new(config).unwrap();
            let values: Vec<f64> = (0..120).map(|f| s.evaluate(f as f64, FPS)).collect();
            assert!(values.windows(2).all(|w| w[1] >= w[0] - 1e-12));
            assert!(values.iter().all(|&v| v <= 1.0 + 1e-12));
        }
    }

    #[test]
    fn test_evaluation_is_order_independent() {
        let s = Spring::new(SpringConfig::new(12.0, 80.0)).unwrap();
        let forward: Vec<f64> = (0..50).map(|f| s.evaluate(f as f64, FPS)).collect();
        let backward: Vec<f64> = (0..50).rev().map(|f| s.evaluate(f as f64, FPS)).collect();
        let reversed: Vec<f64> = backward.into_iter().rev().collect();
        assert_eq!(forward, reversed);
    }

    #[test]
    fn test_delay_and_range() {
        let s = Spring::new(SpringConfig::default())
            .unwrap()
            .with_range(0.8, 1.0)
            .with_delay(150);
        assert_eq!(s.evaluate(149.0, FPS), 0.8);
        assert!((s.evaluate(300.0, FPS) - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_duration_stretch() {
        let s = Spring::new(SpringConfig::default())
            .unwrap()
            .with_duration(90)
            .unwrap();
        assert!((s.evaluate(90.0, FPS) - 1.0).abs() < SETTLE_THRESHOLD);
        // A third of the way in the stretched spring is still moving.
        assert!((s.evaluate(30.0, FPS) - 1.0).abs() > SETTLE_THRESHOLD);
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(Spring::new(SpringConfig::new(10.0, 0.0)).is_err());
        assert!(Spring::new(SpringConfig::new(-1.0, 100.0)).is_err());
        assert!(Spring::new(SpringConfig::default().with_mass(0.0)).is_err());
        assert!(Spring::new(SpringConfig::new(0.0, 100.0))
            .unwrap()
            .with_duration(30)
            .is_err());
    }

    #[test]
    fn test_settle_frames() {
        let frames = SpringConfig::default().settle_frames(FPS).unwrap();
        assert!(frames > 10 && frames < 60, "settled after {frames}");
        assert_eq!(SpringConfig::new(0.0, 100.0).settle_frames(FPS), None);
    }
}
