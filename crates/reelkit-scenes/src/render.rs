//! Frame evaluation.
//!
//! Every visual property is a pure function of the local frame, so frames
//! can be requested in any order and a range can be split across threads.

use rayon::prelude::*;
use reelkit_core::{FrameRate, ReelError, Result};
use reelkit_timeline::{AssetLookup, Timeline};
use serde::Serialize;

use crate::theme::Theme;
use crate::visual::Layer;

/// Everything a scene may read while rendering, passed explicitly.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub theme: &'a Theme,
    pub assets: &'a dyn AssetLookup,
    pub fps: FrameRate,
    pub width: u32,
    pub height: u32,
}

impl<'a> RenderContext<'a> {
    pub fn for_timeline<C>(timeline: &Timeline<C>, theme: &'a Theme, assets: &'a dyn AssetLookup) -> Self {
        let config = timeline.config();
        Self {
            theme,
            assets,
            fps: config.fps,
            width: config.width,
            height: config.height,
        }
    }
}

/// Something that can describe itself at a segment-local frame.
///
/// A scene with nothing to show returns an empty layer.
pub trait Render {
    fn render(&self, local_frame: i64, ctx: &RenderContext<'_>) -> Result<Layer>;
}

/// An audio track playing at the rendered frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AudibleTrack {
    pub file: String,
    pub volume: f64,
    /// Frame within the audio file
    pub local_frame: i64,
}

/// Scene description of one composition frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameDescription {
    pub frame: i64,
    pub timecode: String,
    /// Bottom layer first
    pub layers: Vec<Layer>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub audio: Vec<AudibleTrack>,
}

/// Evaluate every segment covering `frame`.
pub fn render_frame<C: Render>(
    timeline: &Timeline<C>,
    frame: i64,
    theme: &Theme,
    assets: &dyn AssetLookup,
) -> Result<FrameDescription> {
    timeline.check_frame(frame)?;
    let ctx = RenderContext::for_timeline(timeline, theme, assets);

    let mut layers = Vec::new();
    for active in timeline.active_at(frame) {
        let layer = active
            .segment
            .content
            .render(active.local_frame, &ctx)
            .map_err(|err| match err {
                err @ ReelError::Render { .. } => err,
                other => ReelError::Render {
                    segment: active.segment.label.clone(),
                    frame,
                    message: other.to_string(),
                },
            })?;
        if !layer.is_empty() {
            layers.push(layer);
        }
    }

    let audio = timeline
        .audible_at(frame)
        .map(|track| AudibleTrack {
            file: track.file.clone(),
            volume: track.volume,
            local_frame: frame - track.start_frame,
        })
        .collect();

    Ok(FrameDescription {
        frame,
        timecode: timeline.fps().timecode(frame),
        layers,
        audio,
    })
}

/// Evaluate `[from, to)` in parallel, returned in frame order.
pub fn render_range<C: Render + Sync>(
    timeline: &Timeline<C>,
    from: i64,
    to: i64,
    theme: &Theme,
    assets: &dyn AssetLookup,
) -> Result<Vec<FrameDescription>> {
    if from > to {
        return Err(ReelError::InvalidParameter(format!(
            "render range start {from} is after its end {to}"
        )));
    }
    tracing::debug!(from, to, id = %timeline.config().id, "rendering frame range");
    (from..to)
        .into_par_iter()
        .map(|frame| render_frame(timeline, frame, theme, assets))
        .collect()
}
