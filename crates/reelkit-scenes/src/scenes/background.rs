//! Slow-moving glow shapes behind every slide.

use reelkit_core::{interpolate, Color, Extrapolate, Result};
use serde::{Deserialize, Serialize};

use crate::render::{Render, RenderContext};
use crate::visual::{Content, Layer, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundVariant {
    #[default]
    Subtle,
    Tech,
    Warm,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AnimatedBackground {
    pub variant: BackgroundVariant,
}

struct Palette {
    bg: Color,
    shapes: [Color; 3],
}

impl AnimatedBackground {
    pub fn new(variant: BackgroundVariant) -> Self {
        Self { variant }
    }

    fn palette(&self, ctx: &RenderContext<'_>) -> Palette {
        let c = &ctx.theme.colors;
        match self.variant {
            BackgroundVariant::Subtle => Palette {
                bg: c.bg_light,
                shapes: [
                    c.primary.with_alpha(0.03),
                    c.text_dark.with_alpha(0.02),
                    c.primary.with_alpha(0.02),
                ],
            },
            BackgroundVariant::Tech => Palette {
                bg: c.bg_light,
                shapes: [
                    c.primary.with_alpha(0.04),
                    c.text_light.with_alpha(0.03),
                    c.primary_light.with_alpha(0.02),
                ],
            },
            BackgroundVariant::Warm => Palette {
                bg: Color::from_rgba8(0xff, 0xfb, 0xf7, 255),
                shapes: [
                    c.primary.with_alpha(0.05),
                    c.primary.with_alpha(0.03),
                    c.primary_light.with_alpha(0.03),
                ],
            },
        }
    }
}

impl Render for AnimatedBackground {
    fn render(&self, local_frame: i64, ctx: &RenderContext<'_>) -> Result<Layer> {
        let f = local_frame as f64;
        let (w, h) = (ctx.width as f32, ctx.height as f32);
        let palette = self.palette(ctx);

        let rotation1 = interpolate(f, &[0.0, 900.0], &[0.0, 360.0], Extrapolate::Clamp, Extrapolate::Extend)?;
        let rotation2 = interpolate(f, &[0.0, 1200.0], &[360.0, 0.0], Extrapolate::Clamp, Extrapolate::Extend)?;
        let float1_y = (f * 0.008).sin() * 30.0;
        let float2_y = (f * 0.006).cos() * 40.0;
        let float3_x = (f * 0.005).sin() * 50.0;
        let scale1 = 1.0 + (f * 0.004).sin() * 0.1;
        let scale2 = 1.0 + (f * 0.003).cos() * 0.08;

        let glow = |label: &str, color: Color, size: f32, stop: f32, bounds: Rect| {
            Layer::new(
                label,
                Content::Glow {
                    color,
                    radius: size / 2.0 * stop,
                },
            )
            .with_bounds(bounds)
        };

        let children = vec![
            Layer::new("background-fill", Content::Solid { color: palette.bg }),
            glow(
                "glow-top-right",
                palette.shapes[0],
                600.0,
                0.7,
                Rect::new(w - 450.0, -200.0 + float1_y as f32, 600.0, 600.0),
            )
            .rotated(rotation1)
            .scaled(scale1),
            glow(
                "glow-bottom-left",
                palette.shapes[1],
                500.0,
                0.7,
                Rect::new(-100.0 + float3_x as f32, h - 400.0 - float2_y as f32, 500.0, 500.0),
            )
            .rotated(rotation2)
            .scaled(scale2),
            glow(
                "glow-center-left",
                palette.shapes[2],
                400.0,
                0.6,
                Rect::new(-200.0 + float3_x as f32 * 0.5, h * 0.4, 400.0, 400.0),
            )
            .scaled(scale1 * 0.9),
        ];
        Ok(Layer::group("background", children))
    }
}
