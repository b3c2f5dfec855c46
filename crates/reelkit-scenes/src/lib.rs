//! Reelkit Scenes - Typed scene components and frame rendering
//!
//! Every scene is a pure function of its local frame and an explicit
//! [`RenderContext`]. Rendering produces a [`Layer`] tree that an external
//! rasteriser can draw; no pixels are produced here.

pub mod compositions;
pub mod envelope;
pub mod presentation;
pub mod render;
pub mod scenes;
pub mod theme;
pub mod visual;

pub use compositions::{sprint_review, transition_gallery, GALLERY_DURATION, GALLERY_ID, SPRINT_REVIEW_ID};
pub use envelope::{EnvelopeStyle, SlideEnvelope};
pub use presentation::{Presentation, PresentationRegistry};
pub use render::{render_frame, render_range, AudibleTrack, FrameDescription, Render, RenderContext};
pub use scenes::Scene;
pub use theme::Theme;
pub use visual::{Content, Effect, EffectKind, Layer, Rect, TextRole, Transform};
