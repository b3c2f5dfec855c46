//! Narrator picture-in-picture overlay.

use reelkit_core::{Color, Curve, Result};
use reelkit_timeline::{NarratorConfig, PipPosition, PipSize};

use crate::render::{Render, RenderContext};
use crate::visual::{Content, Layer, Rect};

const EDGE: f32 = 40.0;
const FADE_IN: f64 = 15.0;
const FADE_OUT: f64 = 30.0;

#[derive(Debug, Clone, PartialEq)]
pub struct NarratorPip {
    /// Path relative to the public directory, used as given
    pub video_file: String,
    pub position: PipPosition,
    pub size: PipSize,
    /// Length of the whole composition; the fade-out ends `FADE_OUT`
    /// frames before it
    pub composition_frames: i64,
}

impl NarratorPip {
    pub fn from_config(config: &NarratorConfig, composition_frames: i64) -> Self {
        Self {
            video_file: config.video_file.clone(),
            position: config.position,
            size: config.size,
            composition_frames,
        }
    }

    pub fn opacity(&self, local_frame: i64) -> Result<f64> {
        let d = self.composition_frames as f64;
        let curve = Curve::clamped(
            &[0.0, FADE_IN, d - FADE_OUT - FADE_IN, d - FADE_OUT],
            &[0.0, 1.0, 1.0, 0.0],
        )?;
        Ok(curve.evaluate(local_frame as f64))
    }

    fn bounds(&self, ctx: &RenderContext<'_>) -> Rect {
        let (w, h) = self.size.dimensions();
        let (w, h) = (w as f32, h as f32);
        let right = ctx.width as f32 - EDGE - w;
        let bottom = ctx.height as f32 - EDGE - h;
        let (x, y) = match self.position {
            PipPosition::BottomRight => (right, bottom),
            PipPosition::BottomLeft => (EDGE, bottom),
            PipPosition::TopRight => (right, EDGE),
            PipPosition::TopLeft => (EDGE, EDGE),
        };
        Rect::new(x, y, w, h)
    }
}

impl Render for NarratorPip {
    fn render(&self, local_frame: i64, ctx: &RenderContext<'_>) -> Result<Layer> {
        if !ctx.assets.exists(&self.video_file) {
            return Ok(Layer::empty("narrator"));
        }
        let bounds = self.bounds(ctx);
        let children = vec![
            Layer::new(
                "narrator-video",
                Content::Video {
                    path: self.video_file.clone(),
                    source_frame: local_frame as f64,
                    playback_rate: 1.0,
                    muted: true,
                },
            ),
            Layer::new(
                "narrator-shade",
                Content::Solid {
                    color: Color::BLACK.with_alpha(0.8),
                },
            )
            .with_bounds(Rect::new(0.0, bounds.height - 40.0, bounds.width, 40.0)),
        ];
        Ok(Layer::group("narrator", children)
            .with_bounds(bounds)
            .with_opacity(self.opacity(local_frame)?))
    }
}
