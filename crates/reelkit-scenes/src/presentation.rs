//! Transition presentations.
//!
//! A presentation decides how the exiting and entering scenes of a
//! transition window are combined at a given progress. It works on layers
//! (opacity, transform, effects), leaving pixels to the rasteriser.

use std::f64::consts::PI;
use std::sync::OnceLock;

use crate::visual::{Content, EffectKind, Layer};

/// Combines the two scenes of a transition window.
pub trait Presentation: Send + Sync {
    /// Name used in the gallery label, e.g. `fade()`.
    fn name(&self) -> &str;

    /// Transition length the presentation is shown with by default.
    fn default_duration(&self) -> i64;

    /// Return the exiting and entering layers, adjusted for `progress` in [0, 1].
    fn present(&self, exiting: Layer, entering: Layer, progress: f64, width: f64) -> (Layer, Layer);
}

/// 0 at both ends of the window, 1 in the middle.
fn peak(progress: f64) -> f64 {
    1.0 - (2.0 * progress - 1.0).abs()
}

fn cross_fade(exiting: Layer, entering: Layer, progress: f64) -> (Layer, Layer) {
    (exiting.with_opacity(1.0 - progress), entering.with_opacity(progress))
}

/// Hard cut at the midpoint.
fn cut(exiting: Layer, entering: Layer, progress: f64) -> (Layer, Layer) {
    if progress < 0.5 {
        (exiting, entering.with_opacity(0.0))
    } else {
        (exiting.with_opacity(0.0), entering)
    }
}

pub struct Glitch {
    pub intensity: f64,
}

impl Presentation for Glitch {
    fn name(&self) -> &str {
        "glitch()"
    }

    fn default_duration(&self) -> i64 {
        25
    }

    fn present(&self, exiting: Layer, entering: Layer, progress: f64, _width: f64) -> (Layer, Layer) {
        let amount = self.intensity * peak(progress);
        let (a, b) = cut(exiting, entering, progress);
        (
            a.with_effect(EffectKind::Glitch, amount),
            b.with_effect(EffectKind::Glitch, amount),
        )
    }
}

pub struct RgbSplit {
    /// Maximum channel offset in pixels
    pub max_offset: f64,
}

impl Presentation for RgbSplit {
    fn name(&self) -> &str {
        "rgbSplit()"
    }

    fn default_duration(&self) -> i64 {
        25
    }

    fn present(&self, exiting: Layer, entering: Layer, progress: f64, _width: f64) -> (Layer, Layer) {
        let offset = self.max_offset * peak(progress);
        let (a, b) = cross_fade(exiting, entering, progress);
        (
            a.with_effect(EffectKind::RgbSplit, offset),
            b.with_effect(EffectKind::RgbSplit, offset),
        )
    }
}

pub struct ZoomBlur {
    pub max_blur: f64,
}

impl Presentation for ZoomBlur {
    fn name(&self) -> &str {
        "zoomBlur()"
    }

    fn default_duration(&self) -> i64 {
        25
    }

    fn present(&self, exiting: Layer, entering: Layer, progress: f64, _width: f64) -> (Layer, Layer) {
        let (a, b) = cross_fade(exiting, entering, progress);
        (
            a.scaled(1.0 + 0.5 * progress).blurred(self.max_blur * progress),
            b.scaled(1.5 - 0.5 * progress)
                .blurred(self.max_blur * (1.0 - progress)),
        )
    }
}

pub struct LightLeak;

impl Presentation for LightLeak {
    fn name(&self) -> &str {
        "lightLeak()"
    }

    fn default_duration(&self) -> i64 {
        35
    }

    fn present(&self, exiting: Layer, entering: Layer, progress: f64, _width: f64) -> (Layer, Layer) {
        let glow = peak(progress);
        let (a, b) = cross_fade(exiting, entering, progress);
        (
            a.with_effect(EffectKind::LightLeak, glow),
            b.with_effect(EffectKind::LightLeak, glow),
        )
    }
}

pub struct ClockWipe;

impl Presentation for ClockWipe {
    fn name(&self) -> &str {
        "clockWipe()"
    }

    fn default_duration(&self) -> i64 {
        25
    }

    fn present(&self, exiting: Layer, entering: Layer, progress: f64, _width: f64) -> (Layer, Layer) {
        (exiting, entering.with_effect(EffectKind::ClockReveal, progress))
    }
}

pub struct Pixelate {
    pub max_block_size: f64,
}

impl Presentation for Pixelate {
    fn name(&self) -> &str {
        "pixelate()"
    }

    fn default_duration(&self) -> i64 {
        25
    }

    fn present(&self, exiting: Layer, entering: Layer, progress: f64, _width: f64) -> (Layer, Layer) {
        let block = (self.max_block_size * peak(progress)).max(1.0);
        let (a, b) = cut(exiting, entering, progress);
        (
            a.with_effect(EffectKind::Pixelate, block),
            b.with_effect(EffectKind::Pixelate, block),
        )
    }
}

/// Entering scene pushes in from the right.
pub struct Slide;

impl Presentation for Slide {
    fn name(&self) -> &str {
        "slide()"
    }

    fn default_duration(&self) -> i64 {
        20
    }

    fn present(&self, exiting: Layer, entering: Layer, progress: f64, width: f64) -> (Layer, Layer) {
        (
            exiting.translated(-width * progress, 0.0),
            entering.translated(width * (1.0 - progress), 0.0),
        )
    }
}

/// Entering scene fades in over the exiting one.
pub struct Fade;

impl Presentation for Fade {
    fn name(&self) -> &str {
        "fade()"
    }

    fn default_duration(&self) -> i64 {
        25
    }

    fn present(&self, exiting: Layer, entering: Layer, progress: f64, _width: f64) -> (Layer, Layer) {
        (exiting, entering.with_opacity(progress))
    }
}

pub struct Wipe;

impl Presentation for Wipe {
    fn name(&self) -> &str {
        "wipe()"
    }

    fn default_duration(&self) -> i64 {
        20
    }

    fn present(&self, exiting: Layer, entering: Layer, progress: f64, _width: f64) -> (Layer, Layer) {
        (exiting, entering.with_effect(EffectKind::WipeReveal, progress))
    }
}

/// Card flip around the vertical axis; each side shows for half the window.
pub struct Flip;

impl Presentation for Flip {
    fn name(&self) -> &str {
        "flip()"
    }

    fn default_duration(&self) -> i64 {
        25
    }

    fn present(&self, exiting: Layer, entering: Layer, progress: f64, _width: f64) -> (Layer, Layer) {
        let angle = 180.0 * progress;
        let (a, b) = cut(exiting, entering, progress);
        // Perspective shrink peaks when the card is edge-on.
        let depth = 1.0 - 0.2 * (PI * progress).sin();
        (
            a.with_effect(EffectKind::Flip, angle).scaled(depth),
            b.with_effect(EffectKind::Flip, angle - 180.0).scaled(depth),
        )
    }
}

/// Registry of available presentations.
pub struct PresentationRegistry {
    presentations: Vec<Box<dyn Presentation>>,
}

impl PresentationRegistry {
    /// Registry with the built-in presentations, in gallery order.
    pub fn new() -> Self {
        let mut reg = Self {
            presentations: Vec::new(),
        };
        reg.register(Box::new(Glitch { intensity: 0.9 }));
        reg.register(Box::new(RgbSplit { max_offset: 30.0 }));
        reg.register(Box::new(ZoomBlur { max_blur: 20.0 }));
        reg.register(Box::new(LightLeak));
        reg.register(Box::new(ClockWipe));
        reg.register(Box::new(Pixelate {
            max_block_size: 50.0,
        }));
        reg.register(Box::new(Slide));
        reg.register(Box::new(Fade));
        reg.register(Box::new(Wipe));
        reg.register(Box::new(Flip));
        reg
    }

    pub fn register(&mut self, p: Box<dyn Presentation>) {
        self.presentations.push(p);
    }

    /// Find by name, with or without the trailing `()`.
    pub fn find(&self, name: &str) -> Option<&dyn Presentation> {
        let bare = name.trim_end_matches("()");
        self.presentations
            .iter()
            .find(|p| p.name().trim_end_matches("()") == bare)
            .map(|p| p.as_ref())
    }

    pub fn names(&self) -> Vec<&str> {
        self.presentations.iter().map(|p| p.name()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Presentation> {
        self.presentations.iter().map(|p| p.as_ref())
    }

    pub fn len(&self) -> usize {
        self.presentations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presentations.is_empty()
    }
}

impl Default for PresentationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared registry of the built-in presentations.
pub fn builtin() -> &'static PresentationRegistry {
    static REGISTRY: OnceLock<PresentationRegistry> = OnceLock::new();
    REGISTRY.get_or_init(PresentationRegistry::new)
}

/// Layer for a scene that is fully hidden by a presentation.
pub(crate) fn is_invisible(layer: &Layer) -> bool {
    layer.opacity <= 0.0 || matches!(layer.content, Content::Empty)
}
