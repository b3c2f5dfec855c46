//! Entrance and exit envelope wrapped around a slide.
//!
//! Opacity fades in over the first `transition` frames and out over the last,
//! taking the smaller of the two. The style-specific value (scale, offset or
//! blur) uses its entrance curve in the first half of the slide and its exit
//! curve in the second.

use reelkit_core::{Curve, ReelError, Result};
use serde::{Deserialize, Serialize};

use crate::visual::Layer;

/// Default fade length in frames.
pub const DEFAULT_TRANSITION: i64 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnvelopeStyle {
    Fade,
    #[default]
    Zoom,
    SlideUp,
    BlurFade,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlideEnvelope {
    pub duration: i64,
    pub transition: i64,
    pub style: EnvelopeStyle,
}

impl SlideEnvelope {
    pub fn new(duration: i64, style: EnvelopeStyle) -> Self {
        Self {
            duration,
            transition: DEFAULT_TRANSITION,
            style,
        }
    }

    pub fn with_transition(mut self, frames: i64) -> Self {
        self.transition = frames;
        self
    }

    /// A slide shorter than the transition is fine: its fades overlap and
    /// opacity never reaches 1.
    pub fn validate(&self) -> Result<()> {
        if self.transition <= 0 || self.duration <= 0 {
            return Err(ReelError::InvalidParameter(format!(
                "envelope needs a positive transition ({}) and duration ({})",
                self.transition, self.duration
            )));
        }
        Ok(())
    }

    /// Entrance then exit curve, both clamped.
    fn ramps(&self, enter: [f64; 2], exit: [f64; 2]) -> Result<(Curve, Curve)> {
        let (d, t) = (self.duration as f64, self.transition as f64);
        Ok((
            Curve::clamped(&[0.0, t], &enter)?,
            Curve::clamped(&[d - t, d], &exit)?,
        ))
    }

    pub fn opacity(&self, frame: i64) -> Result<f64> {
        let (fade_in, fade_out) = self.ramps([0.0, 1.0], [1.0, 0.0])?;
        let x = frame as f64;
        Ok(fade_in.evaluate(x).min(fade_out.evaluate(x)))
    }

    /// Style-specific value at `frame`: scale for zoom, y offset for
    /// slide-up, blur radius for blur-fade, `None` for plain fades.
    pub fn style_value(&self, frame: i64) -> Result<Option<f64>> {
        let (enter, exit) = match self.style {
            EnvelopeStyle::Fade => return Ok(None),
            EnvelopeStyle::Zoom => ([0.97, 1.0], [1.0, 1.02]),
            EnvelopeStyle::SlideUp => ([20.0, 0.0], [0.0, -20.0]),
            EnvelopeStyle::BlurFade => ([8.0, 0.0], [0.0, 8.0]),
        };
        let (enter, exit) = self.ramps(enter, exit)?;
        let x = frame as f64;
        let first_half = x < self.duration as f64 / 2.0;
        Ok(Some(if first_half {
            enter.evaluate(x)
        } else {
            exit.evaluate(x)
        }))
    }

    /// Apply the envelope to a rendered slide.
    pub fn apply(&self, layer: Layer, frame: i64) -> Result<Layer> {
        self.validate()?;
        let layer = layer.with_opacity(self.opacity(frame)?);
        Ok(match (self.style, self.style_value(frame)?) {
            (EnvelopeStyle::Zoom, Some(scale)) => layer.scaled(scale),
            (EnvelopeStyle::SlideUp, Some(y)) => layer.translated(0.0, y),
            (EnvelopeStyle::BlurFade, Some(blur)) => layer.blurred(blur),
            _ => layer,
        })
    }
}
