//! Frame clock types.
//!
//! Every time value in a composition is an integer frame index. Frame rates
//! stay rational so that 29.97-style rates convert to and from seconds without
//! accumulating floating-point error.

use num_rational::Rational64;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Frame rate as a rational number (e.g., 30000/1001 for 29.97 fps).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameRate {
    /// Numerator (e.g., 30000)
    pub numerator: u32,
    /// Denominator (e.g., 1001)
    pub denominator: u32,
}

impl FrameRate {
    /// Create a new frame rate.
    #[inline]
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Integer frame rate (`fps/1`).
    #[inline]
    pub const fn fps(fps: u32) -> Self {
        Self::new(fps, 1)
    }

    /// Convert to frames per second as f64.
    #[inline]
    pub fn to_fps_f64(self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// Exact frames per second.
    #[inline]
    pub fn as_rational(self) -> Rational64 {
        Rational64::new(self.numerator as i64, self.denominator as i64)
    }

    /// Duration of a single frame in seconds.
    #[inline]
    pub fn frame_duration(self) -> Rational64 {
        Rational64::new(self.denominator as i64, self.numerator as i64)
    }

    /// Number of frames in a whole number of seconds, rounded to the nearest frame.
    pub fn seconds(self, seconds: i64) -> i64 {
        (self.as_rational() * seconds).round().to_integer()
    }

    /// Number of frames in a fractional duration, rounded to the nearest frame.
    pub fn frames_from_seconds(self, seconds: f64) -> i64 {
        (seconds * self.to_fps_f64()).round() as i64
    }

    /// Exact time of a frame in seconds.
    pub fn frame_to_seconds(self, frame: i64) -> Rational64 {
        self.frame_duration() * frame
    }

    /// Time of a frame in seconds as f64.
    pub fn frame_to_seconds_f64(self, frame: i64) -> f64 {
        frame as f64 * self.denominator as f64 / self.numerator as f64
    }

    /// Format a frame index as non-drop SMPTE timecode (`HH:MM:SS:FF`).
    pub fn timecode(self, frame: i64) -> String {
        let nominal = self.to_fps_f64().round().max(1.0) as i64;
        let sign = if frame < 0 { "-" } else { "" };
        let frame = frame.abs();
        let ff = frame % nominal;
        let total_seconds = frame / nominal;
        let ss = total_seconds % 60;
        let mm = (total_seconds / 60) % 60;
        let hh = total_seconds / 3600;
        format!("{sign}{hh:02}:{mm:02}:{ss:02}:{ff:02}")
    }

    /// Whether both components are non-zero.
    pub fn is_valid(self) -> bool {
        self.numerator > 0 && self.denominator > 0
    }

    /// Common frame rates
    pub const FPS_24: Self = Self::new(24, 1);
    pub const FPS_25: Self = Self::new(25, 1);
    pub const FPS_29_97: Self = Self::new(30000, 1001);
    pub const FPS_30: Self = Self::new(30, 1);
    pub const FPS_60: Self = Self::new(60, 1);
}

impl Default for FrameRate {
    fn default() -> Self {
        Self::FPS_30
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fps = self.to_fps_f64();
        if (fps - fps.round()).abs() < 0.001 {
            write!(f, "{} fps", fps.round() as u32)
        } else {
            write!(f, "{:.3} fps", fps)
        }
    }
}

/// A frame range with inclusive start and exclusive end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FrameRange {
    /// First frame (inclusive)
    pub start: i64,
    /// Number of frames
    pub duration: i64,
}

impl FrameRange {
    /// Create a new range from start and duration.
    #[inline]
    pub const fn new(start: i64, duration: i64) -> Self {
        Self { start, duration }
    }

    /// Create a range from start and end frames.
    #[inline]
    pub const fn from_start_end(start: i64, end: i64) -> Self {
        Self {
            start,
            duration: end - start,
        }
    }

    /// End frame (exclusive).
    #[inline]
    pub const fn end(self) -> i64 {
        self.start + self.duration
    }

    /// Check if a frame is within this range.
    #[inline]
    pub const fn contains(self, frame: i64) -> bool {
        frame >= self.start && frame < self.end()
    }

    /// Project a global frame into this range's local time.
    ///
    /// Returns `None` outside `[start, end)`; local frame 0 is the range start.
    #[inline]
    pub const fn local_frame(self, global: i64) -> Option<i64> {
        if self.contains(global) {
            Some(global - self.start)
        } else {
            None
        }
    }

    /// Check if two ranges overlap.
    pub fn overlaps(self, other: Self) -> bool {
        self.start < other.end() && other.start < self.end()
    }

    /// Compute the intersection of two ranges, if any.
    pub fn intersection(self, other: Self) -> Option<Self> {
        if !self.overlaps(other) {
            return None;
        }
        Some(Self::from_start_end(
            self.start.max(other.start),
            self.end().min(other.end()),
        ))
    }

    /// Shift the range by `delta` frames.
    pub const fn shifted(self, delta: i64) -> Self {
        Self {
            start: self.start + delta,
            duration: self.duration,
        }
    }

    /// Whether the range has no frames.
    pub const fn is_empty(self) -> bool {
        self.duration <= 0
    }
}

impl fmt::Display for FrameRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end())
    }
}
