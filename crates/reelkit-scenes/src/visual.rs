//! Per-frame scene description.
//!
//! A [`Layer`] is what a scene renders to at one frame: content plus the
//! opacity, transform, blur and effects an external rasteriser applies to it.

use glam::Vec2;
use reelkit_core::{BlockPalette, Color};
use serde::{Deserialize, Serialize};

/// 2D transform applied around the layer's center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Offset in pixels
    pub translate: Vec2,
    pub scale: f32,
    /// Degrees, clockwise
    pub rotation: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translate: Vec2::ZERO,
        scale: 1.0,
        rotation: 0.0,
    };

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

/// Pixel rectangle inside the composition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Post effects a presentation asks the rasteriser for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EffectKind {
    Glitch,
    RgbSplit,
    Pixelate,
    LightLeak,
    /// Left-to-right reveal; amount is the revealed fraction
    WipeReveal,
    /// Clockwise sweep; amount is the revealed fraction of a turn
    ClockReveal,
    /// Rotation around the vertical axis in degrees
    Flip,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    pub kind: EffectKind,
    pub amount: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextRole {
    Heading,
    Subheading,
    Body,
    Label,
    Caption,
    Stat,
}

/// What a layer draws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Content {
    /// Nothing; dropped from the frame.
    Empty,
    Solid {
        color: Color,
    },
    /// Radial gradient blob.
    Glow {
        color: Color,
        radius: f32,
    },
    Text {
        text: String,
        role: TextRole,
        color: Color,
    },
    Video {
        path: String,
        /// Frame of the source file to show, in composition frames
        source_frame: f64,
        playback_rate: f64,
        muted: bool,
    },
    Image {
        path: String,
    },
    /// Stand-in for a missing asset.
    Placeholder {
        expected_path: String,
        message: String,
    },
    Block {
        palette: BlockPalette,
        size: f32,
    },
    Group {
        children: Vec<Layer>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub label: String,
    pub opacity: f32,
    #[serde(default, skip_serializing_if = "Transform::is_identity")]
    pub transform: Transform,
    /// Gaussian blur radius in pixels
    #[serde(default)]
    pub blur: f32,
    /// Placement; `None` fills the composition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Rect>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<Effect>,
    pub content: Content,
}

impl Layer {
    pub fn new(label: impl Into<String>, content: Content) -> Self {
        Self {
            label: label.into(),
            opacity: 1.0,
            transform: Transform::IDENTITY,
            blur: 0.0,
            bounds: None,
            effects: Vec::new(),
            content,
        }
    }

    pub fn empty(label: impl Into<String>) -> Self {
        Self::new(label, Content::Empty)
    }

    pub fn group(label: impl Into<String>, children: Vec<Layer>) -> Self {
        Self::new(label, Content::Group { children })
    }

    pub fn text(label: impl Into<String>, text: impl Into<String>, role: TextRole, color: Color) -> Self {
        Self::new(
            label,
            Content::Text {
                text: text.into(),
                role,
                color,
            },
        )
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.content, Content::Empty)
    }

    /// Multiply into the current opacity.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity *= opacity as f32;
        self
    }

    pub fn translated(mut self, x: f64, y: f64) -> Self {
        self.transform.translate += Vec2::new(x as f32, y as f32);
        self
    }

    /// Multiply into the current scale.
    pub fn scaled(mut self, scale: f64) -> Self {
        self.transform.scale *= scale as f32;
        self
    }

    pub fn rotated(mut self, degrees: f64) -> Self {
        self.transform.rotation += degrees as f32;
        self
    }

    pub fn blurred(mut self, radius: f64) -> Self {
        self.blur += radius as f32;
        self
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_effect(mut self, kind: EffectKind, amount: f64) -> Self {
        self.effects.push(Effect {
            kind,
            amount: amount as f32,
        });
        self
    }

    /// Children of a group layer.
    pub fn children(&self) -> &[Layer] {
        match &self.content {
            Content::Group { children } => children,
            _ => &[],
        }
    }

    /// Depth-first search by label.
    pub fn find(&self, label: &str) -> Option<&Layer> {
        if self.label == label {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders_compose() {
        let layer = Layer::empty("x")
            .with_opacity(0.5)
            .with_opacity(0.5)
            .scaled(2.0)
            .translated(10.0, 0.0)
            .translated(0.0, -5.0);
        assert_eq!(layer.opacity, 0.25);
        assert_eq!(layer.transform.scale, 2.0);
        assert_eq!(layer.transform.translate, Vec2::new(10.0, -5.0));
    }

    #[test]
    fn test_find_nested() {
        let tree = Layer::group(
            "root",
            vec![Layer::group("inner", vec![Layer::text("title", "Hi", TextRole::Heading, Color::BLACK)])],
        );
        assert!(tree.find("title").is_some());
        assert!(tree.find("missing").is_none());
    }

    #[test]
    fn test_identity_transform_not_serialized() {
        let json = serde_json::to_value(Layer::empty("bg")).unwrap();
        assert!(json.get("transform").is_none());
        assert_eq!(json["content"]["kind"], "empty");
    }
}
