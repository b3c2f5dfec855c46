//! Closing credits on the dark background.

use reelkit_core::{Color, CubicBezier, Curve, EasingCurve, Result};
use reelkit_timeline::CreditSection;

use super::ramp;
use crate::render::{Render, RenderContext};
use crate::visual::{Content, Layer, TextRole};

const SECTION_STAGGER: f64 = 50.0;
const SECTION_FADE: f64 = 20.0;

#[derive(Debug, Clone, PartialEq)]
pub struct EndCredits {
    pub sections: Vec<CreditSection>,
    pub product: String,
}

impl EndCredits {
    pub fn new(sections: Vec<CreditSection>, product: impl Into<String>) -> Self {
        Self {
            sections,
            product: product.into(),
        }
    }

    fn section_window(index: usize) -> [f64; 2] {
        let start = 30.0 + index as f64 * SECTION_STAGGER;
        [start, start + SECTION_FADE]
    }
}

impl Render for EndCredits {
    fn render(&self, local_frame: i64, ctx: &RenderContext<'_>) -> Result<Layer> {
        let f = local_frame as f64;
        let colors = &ctx.theme.colors;

        let mut children = vec![
            Layer::new("credits-fill", Content::Solid { color: colors.bg_dark }),
            Layer::new(
                "credits-glow",
                Content::Glow {
                    color: colors.primary.with_alpha(0.1),
                    radius: ctx.width as f32 * 0.35,
                },
            ),
            Layer::text("credits-title", "CREDITS", TextRole::Heading, colors.primary)
                .with_opacity(ramp(f, [0.0, 30.0], [0.0, 1.0])?),
        ];

        for (i, section) in self.sections.iter().enumerate() {
            let window = Self::section_window(i);
            let rise = Curve::clamped(&window, &[20.0, 0.0])?
                .with_easing(EasingCurve::Bezier(CubicBezier::EASE_OUT_CUBIC))
                .evaluate(f);

            let mut lines = vec![Layer::text(
                "category",
                section.category.to_uppercase(),
                TextRole::Label,
                colors.primary,
            )];
            lines.extend(
                section
                    .items
                    .iter()
                    .enumerate()
                    .map(|(j, item)| Layer::text(format!("item-{j}"), item, TextRole::Body, Color::WHITE)),
            );
            children.push(
                Layer::group(format!("section-{i}"), lines)
                    .with_opacity(ramp(f, window, [0.0, 1.0])?)
                    .translated(0.0, rise),
            );
        }

        children.push(
            Layer::text("product-name", self.product.to_uppercase(), TextRole::Label, colors.primary)
                .with_opacity(ramp(f, [280.0, 310.0], [0.0, 1.0])?),
        );
        Ok(Layer::group("credits", children))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenes::testing::{ctx, opacity_of, text_of};
    use crate::theme::Theme;
    use reelkit_timeline::StaticManifest;

    fn credits() -> EndCredits {
        EndCredits::new(
            vec![
                CreditSection {
                    category: "Engineering".into(),
                    items: vec!["Ana".into(), "Luis".into()],
                },
                CreditSection {
                    category: "Design".into(),
                    items: vec!["Mei".into()],
                },
            ],
            "Pulse",
        )
    }

    #[test]
    fn test_sections_stagger_and_rise() {
        let theme = Theme::default();
        let assets = StaticManifest::new();
        let layer = credits().render(30, &ctx(&theme, &assets)).unwrap();
        assert_eq!(opacity_of(&layer, "section-0"), 0.0);
        assert_eq!(layer.find("section-0").unwrap().transform.translate.y, 20.0);

        let layer = credits().render(90, &ctx(&theme, &assets)).unwrap();
        assert_eq!(opacity_of(&layer, "section-0"), 1.0);
        assert_eq!(layer.find("section-0").unwrap().transform.translate.y, 0.0);
        assert!((opacity_of(&layer, "section-1") - 0.5).abs() < 1e-6);
        // ease-out covers most of the distance by the halfway point
        assert!(layer.find("section-1").unwrap().transform.translate.y < 5.0);
    }

    #[test]
    fn test_uppercase_text_and_product_fade() {
        let theme = Theme::default();
        let assets = StaticManifest::new();
        let layer = credits().render(295, &ctx(&theme, &assets)).unwrap();
        assert_eq!(text_of(&layer, "category"), "ENGINEERING");
        assert_eq!(text_of(&layer, "product-name"), "PULSE");
        assert!((opacity_of(&layer, "product-name") - 0.5).abs() < 1e-6);
    }
}
