//! Scene components.
//!
//! Each scene is a typed configuration struct rendered through [`Render`].
//! [`Scene`] is the closed set a timeline can hold.

mod background;
mod credits;
mod decoration;
mod demo;
mod gallery;
mod narrator;
mod overview;
mod summary;
mod title;

pub use background::{AnimatedBackground, BackgroundVariant};
pub use credits::EndCredits;
pub use decoration::MazeDecoration;
pub use demo::{DemoBody, DemoScene, SplitScreen, Timelapse, VideoPanel};
pub use gallery::{GalleryIntro, TransitionDemo};
pub use narrator::NarratorPip;
pub use overview::OverviewSlide;
pub use summary::SummarySlide;
pub use title::TitleSlide;

use reelkit_core::{interpolate, Extrapolate, Result};

use crate::envelope::SlideEnvelope;
use crate::render::{Render, RenderContext};
use crate::visual::Layer;

/// Any scene a timeline segment can hold.
#[derive(Debug, Clone)]
pub enum Scene {
    Background(AnimatedBackground),
    Title(TitleSlide),
    Overview(OverviewSlide),
    Demo(DemoScene),
    Summary(SummarySlide),
    Credits(EndCredits),
    Maze(MazeDecoration),
    Narrator(NarratorPip),
    GalleryIntro(GalleryIntro),
    TransitionDemo(TransitionDemo),
    /// A slide wrapped in an entrance and exit envelope.
    Enveloped {
        envelope: SlideEnvelope,
        inner: Box<Scene>,
    },
}

impl Scene {
    pub fn enveloped(self, envelope: SlideEnvelope) -> Self {
        Scene::Enveloped {
            envelope,
            inner: Box::new(self),
        }
    }

    /// Short kind name for logs and schedules.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Scene::Background(_) => "background",
            Scene::Title(_) => "title",
            Scene::Overview(_) => "overview",
            Scene::Demo(_) => "demo",
            Scene::Summary(_) => "summary",
            Scene::Credits(_) => "credits",
            Scene::Maze(_) => "maze",
            Scene::Narrator(_) => "narrator",
            Scene::GalleryIntro(_) => "gallery-intro",
            Scene::TransitionDemo(_) => "transition-demo",
            Scene::Enveloped { inner, .. } => inner.kind_name(),
        }
    }
}

impl Render for Scene {
    fn render(&self, local_frame: i64, ctx: &RenderContext<'_>) -> Result<Layer> {
        match self {
            Scene::Background(s) => s.render(local_frame, ctx),
            Scene::Title(s) => s.render(local_frame, ctx),
            Scene::Overview(s) => s.render(local_frame, ctx),
            Scene::Demo(s) => s.render(local_frame, ctx),
            Scene::Summary(s) => s.render(local_frame, ctx),
            Scene::Credits(s) => s.render(local_frame, ctx),
            Scene::Maze(s) => s.render(local_frame, ctx),
            Scene::Narrator(s) => s.render(local_frame, ctx),
            Scene::GalleryIntro(s) => s.render(local_frame, ctx),
            Scene::TransitionDemo(s) => s.render(local_frame, ctx),
            Scene::Enveloped { envelope, inner } => {
                let layer = inner.render(local_frame, ctx)?;
                if layer.is_empty() {
                    return Ok(layer);
                }
                envelope.apply(layer, local_frame)
            }
        }
    }
}

/// Two-point ramp, clamped on both sides.
pub(crate) fn ramp(frame: f64, input: [f64; 2], output: [f64; 2]) -> Result<f64> {
    interpolate(frame, &input, &output, Extrapolate::Clamp, Extrapolate::Clamp)
}


#[cfg(test)]
mod tests {
    use super::testing::ctx;
    use super::*;
    use crate::envelope::EnvelopeStyle;
    use crate::theme::Theme;
    use reelkit_timeline::StaticManifest;

    #[test]
    fn test_ramp_clamps_both_sides() {
        assert_eq!(ramp(-5.0, [6.0, 24.0], [0.0, 1.0]).unwrap(), 0.0);
        assert_eq!(ramp(15.0, [6.0, 24.0], [0.0, 1.0]).unwrap(), 0.5);
        assert_eq!(ramp(100.0, [6.0, 24.0], [0.0, 1.0]).unwrap(), 1.0);
    }

    #[test]
    fn test_enveloped_scene_fades() {
        let theme = Theme::default();
        let assets = StaticManifest::new();
        let scene = Scene::Background(AnimatedBackground::default())
            .enveloped(SlideEnvelope::new(150, EnvelopeStyle::Fade));
        assert_eq!(scene.kind_name(), "background");
        let first = scene.render(0, &ctx(&theme, &assets)).unwrap();
        assert_eq!(first.opacity, 0.0);
        let middle = scene.render(75, &ctx(&theme, &assets)).unwrap();
        assert_eq!(middle.opacity, 1.0);
    }
}
