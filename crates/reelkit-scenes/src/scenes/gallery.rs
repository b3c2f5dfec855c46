//! Transition gallery scenes: the intro card and one before/after demo per
//! presentation.

use reelkit_core::{Color, ReelError, Result};
use reelkit_timeline::{Presence, SeriesLayout, TransitionSeries, TransitionTiming};

use super::ramp;
use crate::presentation::{self, is_invisible, Presentation};
use crate::render::{Render, RenderContext};
use crate::visual::{Content, Layer, TextRole};

/// Length of each before/after scene.
pub const GALLERY_SCENE_FRAMES: i64 = 45;

const INTRO_BG: Color = Color::new(15.0 / 255.0, 15.0 / 255.0, 26.0 / 255.0, 1.0);
const SCENE_A: Color = Color::new(26.0 / 255.0, 26.0 / 255.0, 46.0 / 255.0, 1.0);
const SCENE_B: Color = Color::new(233.0 / 255.0, 69.0 / 255.0, 96.0 / 255.0, 1.0);

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GalleryIntro;

impl Render for GalleryIntro {
    fn render(&self, local_frame: i64, _ctx: &RenderContext<'_>) -> Result<Layer> {
        let f = local_frame as f64;
        Ok(Layer::group(
            "gallery-intro",
            vec![
                Layer::new("intro-fill", Content::Solid { color: INTRO_BG }),
                Layer::text("intro-title", "Transitions Gallery", TextRole::Heading, Color::WHITE)
                    .with_opacity(ramp(f, [0.0, 20.0], [0.0, 1.0])?),
                Layer::text("intro-subtitle", "reelkit", TextRole::Subheading, Color::WHITE.with_alpha(0.6))
                    .with_opacity(ramp(f, [15.0, 35.0], [0.0, 1.0])?),
            ],
        ))
    }
}

/// Two scenes joined by one presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionDemo {
    /// Registered presentation name, e.g. `glitch()`
    pub name: String,
    pub layout: SeriesLayout,
}

impl TransitionDemo {
    pub fn new(name: impl Into<String>, transition_frames: i64) -> Result<Self> {
        let name = name.into();
        if presentation::builtin().find(&name).is_none() {
            return Err(ReelError::NotFound(format!("no presentation named '{name}'")));
        }
        let layout = TransitionSeries::new()
            .scene("before", GALLERY_SCENE_FRAMES)
            .transition(TransitionTiming::linear(transition_frames))
            .scene("after", GALLERY_SCENE_FRAMES)
            .layout()?;
        Ok(Self { name, layout })
    }

    /// Demo for a registered presentation at its default length.
    pub fn for_presentation(p: &dyn Presentation) -> Result<Self> {
        Self::new(p.name(), p.default_duration())
    }

    pub fn duration(&self) -> i64 {
        self.layout.total_span()
    }

    fn scene(&self, index: usize, local_frame: i64) -> Result<Layer> {
        let after = index > 0;
        let (color, letter, caption) = if after {
            (SCENE_B, "B", "After")
        } else {
            (SCENE_A, "A", "Before")
        };
        Ok(Layer::group(
            if after { "scene-b" } else { "scene-a" },
            vec![
                Layer::new("scene-fill", Content::Solid { color }),
                Layer::group(
                    "name-tag",
                    vec![
                        Layer::new(
                            "name-tag-bg",
                            Content::Solid {
                                color: Color::BLACK.with_alpha(0.4),
                            },
                        ),
                        Layer::text("name-tag-text", &self.name, TextRole::Label, Color::WHITE),
                    ],
                )
                .with_opacity(ramp(local_frame as f64, [0.0, 10.0], [0.0, 1.0])?),
                Layer::text("scene-letter", letter, TextRole::Stat, Color::WHITE.with_alpha(0.15)),
                Layer::text("scene-caption", caption, TextRole::Caption, Color::WHITE.with_alpha(0.5)),
            ],
        ))
    }
}

impl Render for TransitionDemo {
    fn render(&self, local_frame: i64, ctx: &RenderContext<'_>) -> Result<Layer> {
        let presentation = presentation::builtin()
            .find(&self.name)
            .ok_or_else(|| ReelError::NotFound(format!("no presentation named '{}'", self.name)))?;

        let mut exiting = None;
        let mut entering = None;
        let mut full = None;
        for active in self.layout.active_at(local_frame, ctx.fps) {
            let layer = self.scene(active.index, active.local_frame)?;
            match active.presence {
                Presence::Full => full = Some(layer),
                Presence::Exiting(_) => exiting = Some(layer),
                Presence::Entering(p) => entering = Some((layer, p)),
            }
        }

        let children = match (exiting, entering, full) {
            (Some(out), Some((inc, progress)), _) => {
                let (out, inc) = presentation.present(out, inc, progress, ctx.width as f64);
                [out, inc].into_iter().filter(|l| !is_invisible(l)).collect()
            }
            (_, _, Some(layer)) => vec![layer],
            _ => Vec::new(),
        };
        Ok(Layer::group(format!("transition-{}", self.name), children))
    }
}
