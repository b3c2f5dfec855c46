//! Opening title card.

use reelkit_core::{Color, Result};
use reelkit_timeline::{AssetKind, SprintInfo};

use super::ramp;
use crate::render::{Render, RenderContext};
use crate::visual::{Content, Layer, Rect, TextRole};

/// Logo looked up under `images/`.
pub const LOGO_FILE: &str = "logo.png";

#[derive(Debug, Clone, PartialEq)]
pub struct TitleSlide {
    pub info: SprintInfo,
}

impl TitleSlide {
    pub fn new(info: SprintInfo) -> Self {
        Self { info }
    }

    pub fn version_string(&self) -> String {
        match &self.info.build {
            Some(build) => format!("Version {} (BUILD {build})", self.info.version),
            None => format!("Version {}", self.info.version),
        }
    }

    fn logo(&self, ctx: &RenderContext<'_>) -> Layer {
        let path = AssetKind::Image.path(LOGO_FILE);
        let bounds = Rect::new(ctx.width as f32 / 2.0 - 100.0, 140.0, 200.0, 200.0);
        if ctx.assets.exists(&path) {
            return Layer::new("logo", Content::Image { path }).with_bounds(bounds);
        }
        let initial: String = self.info.product.chars().take(1).collect();
        Layer::group(
            "logo",
            vec![
                Layer::new(
                    "logo-tile",
                    Content::Solid {
                        color: ctx.theme.colors.primary,
                    },
                ),
                Layer::text("logo-initial", initial, TextRole::Heading, Color::WHITE),
            ],
        )
        .with_bounds(bounds)
    }
}

impl Render for TitleSlide {
    fn render(&self, local_frame: i64, ctx: &RenderContext<'_>) -> Result<Layer> {
        let f = local_frame as f64;
        let colors = &ctx.theme.colors;
        // Each element starts six frames after the previous one.
        let stagger = |k: f64| ramp(f, [6.0 * k, 6.0 * k + 18.0], [0.0, 1.0]);

        let children = vec![
            self.logo(ctx).with_opacity(stagger(0.0)?),
            Layer::text("product", &self.info.product, TextRole::Heading, colors.text_dark)
                .with_opacity(stagger(1.0)?),
            Layer::group(
                "sprint-line",
                vec![
                    Layer::text("sprint-prefix", "Sprint Review : ", TextRole::Subheading, colors.text_dark),
                    Layer::text("sprint-name", &self.info.name, TextRole::Subheading, colors.primary),
                ],
            )
            .with_opacity(stagger(2.0)?),
            Layer::text("date-range", &self.info.date_range, TextRole::Body, colors.text_light)
                .with_opacity(stagger(3.0)?),
            Layer::text("platform", &self.info.platform, TextRole::Subheading, colors.text_dark)
                .with_opacity(stagger(4.0)?),
            Layer::text("version", self.version_string(), TextRole::Body, colors.text_light)
                .with_opacity(stagger(5.0)?),
        ];

        Ok(Layer::group("title", children).scaled(ramp(f, [0.0, 30.0], [0.95, 1.0])?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenes::testing::{ctx, opacity_of, text_of};
    use crate::theme::Theme;
    use reelkit_timeline::StaticManifest;

    fn info(build: Option<&str>) -> SprintInfo {
        SprintInfo {
            name: "Cho Oyu".into(),
            date_range: "Mar 2 - Mar 13".into(),
            product: "Pulse".into(),
            platform: "iOS".into(),
            version: "2.4".into(),
            build: build.map(String::from),
        }
    }

    #[test]
    fn test_version_string() {
        assert_eq!(TitleSlide::new(info(Some("311"))).version_string(), "Version 2.4 (BUILD 311)");
        assert_eq!(TitleSlide::new(info(None)).version_string(), "Version 2.4");
    }

    #[test]
    fn test_staggered_fades() {
        let theme = Theme::default();
        let assets = StaticManifest::new();
        let layer = TitleSlide::new(info(None)).render(12, &ctx(&theme, &assets)).unwrap();
        assert!((opacity_of(&layer, "logo") - 12.0 / 18.0).abs() < 1e-6);
        assert!((opacity_of(&layer, "product") - 6.0 / 18.0).abs() < 1e-6);
        assert_eq!(opacity_of(&layer, "sprint-line"), 0.0);
        assert_eq!(opacity_of(&layer, "version"), 0.0);
        assert!((layer.transform.scale - 0.97).abs() < 1e-6);
    }

    #[test]
    fn test_logo_placeholder_uses_initial() {
        let theme = Theme::default();
        let assets = StaticManifest::new();
        let layer = TitleSlide::new(info(None)).render(60, &ctx(&theme, &assets)).unwrap();
        assert_eq!(text_of(&layer, "logo-initial"), "P");

        let assets = StaticManifest::new().with("images/logo.png");
        let layer = TitleSlide::new(info(None)).render(60, &ctx(&theme, &assets)).unwrap();
        assert!(matches!(layer.find("logo").unwrap().content, Content::Image { .. }));
    }
}
